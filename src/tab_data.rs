/// The active browser tab as reported by chrome.tabs.query
use serde::{Deserialize, Serialize};

use crate::domain::extract_domain;
use crate::error::LookupError;

/// Only the fields the popup needs; chrome may omit `url` without permission
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TabInfo {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

impl TabInfo {
    /// Domain to look up, or a tab-resolution error
    pub fn domain(&self) -> Result<String, LookupError> {
        let url = self
            .url
            .as_deref()
            .filter(|u| !u.is_empty())
            .ok_or_else(|| LookupError::TabResolution("No active tab found".to_string()))?;

        extract_domain(url)
            .ok_or_else(|| LookupError::TabResolution(format!("Invalid domain in {}", url)))
    }
}
