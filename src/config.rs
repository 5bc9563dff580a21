/// Extension configuration, read from chrome.storage.local
use serde::{Deserialize, Serialize};

/// Storage key holding the user's overrides
pub const CONFIG_STORAGE_KEY: &str = "traffic_lens_config";

pub const DEFAULT_RANK_ENDPOINT: &str = "https://rank.similarweb.com/api/v1/global";
pub const DEFAULT_DATA_ENDPOINT: &str = "https://data.similarweb.com/api/v1/data";
pub const DEFAULT_FLAG_CDN: &str = "https://flagcdn.com/w20";
pub const DEFAULT_LIST_LIMIT: usize = 10;

/// Root configuration; every field falls back to its default when missing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rank_endpoint: String,
    pub data_endpoint: String,
    pub flag_cdn: String,
    pub top_countries_limit: usize,
    pub top_keywords_limit: usize,
}

/// The two upstream endpoints the fetcher calls
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoints {
    pub rank: String,
    pub data: String,
}

/// Settings the render pipeline needs
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayConfig {
    pub flag_cdn: String,
    pub top_countries_limit: usize,
    pub top_keywords_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            rank_endpoint: DEFAULT_RANK_ENDPOINT.to_string(),
            data_endpoint: DEFAULT_DATA_ENDPOINT.to_string(),
            flag_cdn: DEFAULT_FLAG_CDN.to_string(),
            top_countries_limit: DEFAULT_LIST_LIMIT,
            top_keywords_limit: DEFAULT_LIST_LIMIT,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Config::default().display()
    }
}

impl Config {
    /// Parse stored config, falling back to defaults on anything unreadable
    pub fn from_stored(value: Option<serde_json::Value>) -> Config {
        match value {
            None | Some(serde_json::Value::Null) => Config::default(),
            Some(raw) => match serde_json::from_value::<Config>(raw) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("Ignoring malformed {}: {}", CONFIG_STORAGE_KEY, e);
                    Config::default()
                }
            },
        }
    }

    pub fn endpoints(&self) -> Endpoints {
        Endpoints {
            rank: self.rank_endpoint.clone(),
            data: self.data_endpoint.clone(),
        }
    }

    pub fn display(&self) -> DisplayConfig {
        DisplayConfig {
            flag_cdn: self.flag_cdn.trim_end_matches('/').to_string(),
            top_countries_limit: self.top_countries_limit,
            top_keywords_limit: self.top_keywords_limit,
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Config::default().endpoints()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_config_uses_defaults() {
        assert_eq!(Config::from_stored(None), Config::default());
        assert_eq!(Config::from_stored(Some(json!(null))), Config::default());
    }

    #[test]
    fn test_partial_config_keeps_other_defaults() {
        let config = Config::from_stored(Some(json!({"top_keywords_limit": 5})));

        assert_eq!(config.top_keywords_limit, 5);
        assert_eq!(config.top_countries_limit, DEFAULT_LIST_LIMIT);
        assert_eq!(config.rank_endpoint, DEFAULT_RANK_ENDPOINT);
    }

    #[test]
    fn test_malformed_config_falls_back() {
        let config = Config::from_stored(Some(json!({"top_keywords_limit": "many"})));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_display_trims_trailing_slash() {
        let config = Config {
            flag_cdn: "https://flags.example/w40/".to_string(),
            ..Config::default()
        };

        assert_eq!(config.display().flag_cdn, "https://flags.example/w40");
    }
}
