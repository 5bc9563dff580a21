/// HTTP fetcher for the ranking service
///
/// Two independent GETs (rank source, detail source) whose JSON objects are
/// shallow-merged, detail fields winning on key collision.
use reqwest::Client;
use serde_json::{Map, Value};
use url::Url;

use crate::config::Endpoints;
use crate::error::FetchError;

/// Anything that can produce the merged metrics payload for a domain
#[allow(async_fn_in_trait)]
pub trait MetricsSource {
    async fn fetch_metrics(&self, domain: &str) -> Result<Value, FetchError>;
}

pub struct Fetcher {
    client: Client,
    endpoints: Endpoints,
}

impl Fetcher {
    /// # Errors
    ///
    /// Returns [`FetchError::Client`] if the `reqwest::Client` can't be built.
    pub fn new(endpoints: Endpoints) -> Result<Self, FetchError> {
        let client = Client::builder().build().map_err(FetchError::Client)?;
        Ok(Self { client, endpoints })
    }

    /// Fetch both sources concurrently and merge them
    ///
    /// # Errors
    ///
    /// Fails if either request can't be sent, returns a non-2xx status, or
    /// has a body that isn't valid JSON.
    pub async fn fetch(&self, domain: &str) -> Result<Value, FetchError> {
        let rank_url = endpoint_url(&self.endpoints.rank, domain)?;
        let data_url = endpoint_url(&self.endpoints.data, domain)?;

        let (rank, detail) = futures::try_join!(
            fetch_json(&self.client, &rank_url),
            fetch_json(&self.client, &data_url),
        )?;

        Ok(merge_shallow(rank, detail))
    }
}

impl MetricsSource for Fetcher {
    async fn fetch_metrics(&self, domain: &str) -> Result<Value, FetchError> {
        self.fetch(domain).await
    }
}

/// `{endpoint}?domain={domain}` with the domain query-encoded
pub fn endpoint_url(endpoint: &str, domain: &str) -> Result<String, FetchError> {
    let mut url = Url::parse(endpoint).map_err(|source| FetchError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        source,
    })?;
    url.query_pairs_mut().append_pair("domain", domain);
    Ok(url.to_string())
}

async fn fetch_json(client: &Client, url: &str) -> Result<Value, FetchError> {
    log::debug!("GET {}", url);

    let response = client
        .get(url)
        .header(reqwest::header::ACCEPT, "application/json")
        .send()
        .await
        .map_err(|source| FetchError::Request {
            url: url.to_owned(),
            source,
        })?;

    if !response.status().is_success() {
        return Err(FetchError::Status {
            url: url.to_owned(),
            status: response.status().as_u16(),
        });
    }

    let body = response.text().await.map_err(|source| FetchError::Request {
        url: url.to_owned(),
        source,
    })?;

    serde_json::from_str(&body).map_err(|source| FetchError::Decode {
        url: url.to_owned(),
        source,
    })
}

/// Shallow merge: keys of `detail` overwrite keys of `rank`
///
/// Bodies that are valid JSON but not objects contribute nothing.
pub fn merge_shallow(rank: Value, detail: Value) -> Value {
    let mut merged = Map::new();

    for (source, value) in [("rank", rank), ("detail", detail)] {
        match value {
            Value::Object(map) => merged.extend(map),
            Value::Null => {}
            other => log::warn!("Ignoring non-object {} payload: {}", source, kind(&other)),
        }
    }

    Value::Object(merged)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_detail_wins_on_collision() {
        let rank = json!({"GlobalRank": {"Rank": 10}, "SiteName": "from-rank"});
        let detail = json!({"SiteName": "from-detail", "TopKeywords": []});

        let merged = merge_shallow(rank, detail);

        assert_eq!(merged["SiteName"], "from-detail");
        assert_eq!(merged["GlobalRank"]["Rank"], 10);
        assert_eq!(merged["TopKeywords"], json!([]));
    }

    #[test]
    fn test_merge_is_shallow() {
        let rank = json!({"Engagments": {"Visits": 100, "BounceRate": 0.5}});
        let detail = json!({"Engagments": {"Visits": 200}});

        let merged = merge_shallow(rank, detail);

        assert_eq!(merged["Engagments"], json!({"Visits": 200}));
    }

    #[test]
    fn test_merge_ignores_non_objects() {
        assert_eq!(merge_shallow(json!(null), json!({"a": 1})), json!({"a": 1}));
        assert_eq!(merge_shallow(json!([1, 2]), json!("x")), json!({}));
    }

    #[test]
    fn test_endpoint_url_encodes_domain() {
        let url = endpoint_url("https://rank.example/api/v1/global", "b\u{fc}cher.de").unwrap();
        assert_eq!(url, "https://rank.example/api/v1/global?domain=b%C3%BCcher.de");

        let plain = endpoint_url("https://rank.example/api", "example.com").unwrap();
        assert_eq!(plain, "https://rank.example/api?domain=example.com");
    }

    #[test]
    fn test_endpoint_url_rejects_garbage() {
        let err = endpoint_url("not a url", "example.com").unwrap_err();
        assert!(matches!(err, FetchError::InvalidEndpoint { .. }));
    }
}
