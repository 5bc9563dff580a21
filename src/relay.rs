/// Request/response relay between the popup and the background context
///
/// The popup can't make cross-origin calls itself, so it sends a
/// `RelayRequest` over `chrome.runtime.sendMessage` and the background
/// answers with exactly one `RelayResponse`.
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::Config;
use crate::error::{LookupError, RelayError};
use crate::fetcher::{Fetcher, MetricsSource};
use crate::metrics::SiteMetrics;

/// Every action the background understands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum RelayRequest {
    FetchData { domain: String },
}

const KNOWN_ACTIONS: &[&str] = &["fetchData"];

/// Wire shape: `{success, data?, error?}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelayResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RelayRequest {
    pub fn fetch_data(domain: impl Into<String>) -> Self {
        RelayRequest::FetchData {
            domain: domain.into(),
        }
    }

    /// Validate a raw message at the boundary
    pub fn parse(raw: &Value) -> Result<RelayRequest, RelayError> {
        let action = raw.get("action").and_then(Value::as_str);
        if !action.is_some_and(|a| KNOWN_ACTIONS.contains(&a)) {
            return Err(RelayError::UnknownAction);
        }

        let request: RelayRequest = serde_json::from_value(raw.clone())
            .map_err(|e| RelayError::InvalidRequest(e.to_string()))?;

        match &request {
            RelayRequest::FetchData { domain } if domain.trim().is_empty() => {
                Err(RelayError::InvalidRequest("empty domain".to_string()))
            }
            _ => Ok(request),
        }
    }
}

impl RelayResponse {
    pub fn ok(data: Value) -> Self {
        RelayResponse {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        RelayResponse {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    /// Popup-side interpretation of an answer
    ///
    /// `success: false` is an upstream error; success with an absent or
    /// empty payload means there is nothing to show.
    pub fn into_metrics(self) -> Result<SiteMetrics, LookupError> {
        if !self.success {
            let message = self.error.unwrap_or_else(|| "unknown error".to_string());
            return Err(LookupError::Upstream(message));
        }

        match self.data {
            Some(data) if SiteMetrics::is_usable_payload(Some(&data)) => {
                Ok(SiteMetrics::from_json(&data))
            }
            _ => Err(LookupError::NoData),
        }
    }
}

/// Run a validated request; errors become the failure shape
pub async fn dispatch<S: MetricsSource>(request: &RelayRequest, source: &S) -> RelayResponse {
    match request {
        RelayRequest::FetchData { domain } => {
            log::info!("Fetching metrics for {}", domain);
            match source.fetch_metrics(domain).await {
                Ok(data) => RelayResponse::ok(data),
                Err(e) => {
                    log::error!("Fetch failed for {}: {}", domain, e);
                    RelayResponse::failure(e.to_string())
                }
            }
        }
    }
}

/// Parse and dispatch a raw message; always yields one response
pub async fn handle_value<S: MetricsSource>(raw: &Value, source: &S) -> RelayResponse {
    match RelayRequest::parse(raw) {
        Ok(request) => dispatch(&request, source).await,
        Err(e) => {
            log::warn!("Rejected relay message: {}", e);
            RelayResponse::failure(e.to_string())
        }
    }
}

/// Background path: fetch from the endpoints `config` names
pub async fn handle_with_config(raw: &Value, config: &Config) -> RelayResponse {
    match Fetcher::new(config.endpoints()) {
        Ok(fetcher) => handle_value(raw, &fetcher).await,
        Err(e) => {
            log::error!("{}", e);
            RelayResponse::failure(e.to_string())
        }
    }
}
