/// Site metrics as returned by the ranking service
///
/// Built once from the merged JSON payload. Extraction never fails: each
/// field is pulled out on its own, so a malformed field only loses itself.
use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::numeric::parse_numeric_opt;

/// Engagement block (the upstream key is spelled "Engagments")
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Engagement {
    pub bounce_rate: Option<f64>,
    pub pages_per_visit: Option<f64>,
    pub time_on_site: Option<f64>,
    pub visits: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CountryShare {
    pub code: String,
    pub share: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Keyword {
    pub name: String,
    pub volume: Option<f64>,
    pub estimated_value: Option<f64>,
}

/// Merged analytics for one domain
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteMetrics {
    pub site_name: Option<String>,
    pub description: Option<String>,
    pub global_rank: Option<f64>,
    pub country_rank: Option<f64>,
    pub category_rank: Option<f64>,
    pub engagement: Engagement,
    /// Month key -> visits; `BTreeMap` keeps keys in lexicographic (date) order
    pub monthly_visits: BTreeMap<String, Option<f64>>,
    pub traffic_sources: BTreeMap<String, Option<f64>>,
    pub top_countries: Vec<CountryShare>,
    pub top_keywords: Vec<Keyword>,
}

impl SiteMetrics {
    /// True when the payload is a non-empty JSON object
    pub fn is_usable_payload(payload: Option<&Value>) -> bool {
        matches!(payload, Some(Value::Object(map)) if !map.is_empty())
    }

    pub fn from_json(payload: &Value) -> SiteMetrics {
        let Some(root) = payload.as_object() else {
            return SiteMetrics::default();
        };

        let engagement = root
            .get("Engagments")
            .and_then(Value::as_object)
            .map(|e| Engagement {
                bounce_rate: parse_numeric_opt(e.get("BounceRate")),
                pages_per_visit: parse_numeric_opt(e.get("PagePerVisit")),
                time_on_site: parse_numeric_opt(e.get("TimeOnSite")),
                visits: parse_numeric_opt(e.get("Visits")),
            })
            .unwrap_or_default();

        SiteMetrics {
            site_name: non_empty_string(root.get("SiteName")),
            description: non_empty_string(root.get("Description")),
            global_rank: nested_rank(root, "GlobalRank"),
            country_rank: nested_rank(root, "CountryRank"),
            category_rank: nested_rank(root, "CategoryRank"),
            engagement,
            monthly_visits: numeric_map(root.get("EstimatedMonthlyVisits")),
            traffic_sources: numeric_map(root.get("TrafficSources")),
            top_countries: countries(root.get("TopCountryShares")),
            top_keywords: keywords(root.get("TopKeywords")),
        }
    }
}

fn nested_rank(root: &Map<String, Value>, key: &str) -> Option<f64> {
    parse_numeric_opt(root.get(key).and_then(|v| v.get("Rank")))
}

fn non_empty_string(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn numeric_map(value: Option<&Value>) -> BTreeMap<String, Option<f64>> {
    value
        .and_then(Value::as_object)
        .map(|map| {
            map.iter()
                .map(|(key, v)| (key.clone(), parse_numeric_opt(Some(v))))
                .collect()
        })
        .unwrap_or_default()
}

fn countries(value: Option<&Value>) -> Vec<CountryShare> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| {
                    let code = non_empty_string(item.get("CountryCode"))?;
                    Some(CountryShare {
                        code,
                        share: parse_numeric_opt(item.get("Value")),
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

fn keywords(value: Option<&Value>) -> Vec<Keyword> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| {
                    let name = non_empty_string(item.get("Name"))?;
                    Some(Keyword {
                        name,
                        volume: parse_numeric_opt(item.get("Volume")),
                        estimated_value: parse_numeric_opt(item.get("EstimatedValue")),
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_usable_payload() {
        assert!(SiteMetrics::is_usable_payload(Some(&json!({"SiteName": "x"}))));
        assert!(!SiteMetrics::is_usable_payload(Some(&json!({}))));
        assert!(!SiteMetrics::is_usable_payload(Some(&json!(null))));
        assert!(!SiteMetrics::is_usable_payload(Some(&json!([1, 2]))));
        assert!(!SiteMetrics::is_usable_payload(None));
    }

    #[test]
    fn test_from_json_full() {
        let payload = json!({
            "SiteName": "example.com",
            "Description": "An example",
            "GlobalRank": {"Rank": 1200},
            "CountryRank": {"Rank": "340", "CountryCode": "US"},
            "CategoryRank": {"Rank": 12, "Category": "News"},
            "Engagments": {
                "BounceRate": "0.4512",
                "PagePerVisit": "3.21",
                "TimeOnSite": "185.3",
                "Visits": "1250000"
            },
            "EstimatedMonthlyVisits": {"2024-02-01": 150, "2024-01-01": 100},
            "TrafficSources": {"Direct": 0.4, "Search": 0.3},
            "TopCountryShares": [{"CountryCode": "US", "Value": 0.42}],
            "TopKeywords": [{"Name": "example", "Volume": 5000, "EstimatedValue": 120}]
        });

        let metrics = SiteMetrics::from_json(&payload);

        assert_eq!(metrics.site_name.as_deref(), Some("example.com"));
        assert_eq!(metrics.global_rank, Some(1200.0));
        assert_eq!(metrics.country_rank, Some(340.0));
        assert_eq!(metrics.category_rank, Some(12.0));
        assert_eq!(metrics.engagement.bounce_rate, Some(0.4512));
        assert_eq!(metrics.engagement.visits, Some(1_250_000.0));
        assert_eq!(
            metrics.monthly_visits.keys().collect::<Vec<_>>(),
            vec!["2024-01-01", "2024-02-01"]
        );
        assert_eq!(metrics.traffic_sources.get("Direct"), Some(&Some(0.4)));
        assert_eq!(metrics.top_countries[0].code, "US");
        assert_eq!(metrics.top_keywords[0].estimated_value, Some(120.0));
    }

    #[test]
    fn test_malformed_fields_degrade_independently() {
        let payload = json!({
            "GlobalRank": "not-an-object",
            "CountryRank": {"Rank": "abc"},
            "CategoryRank": {"Rank": 5},
            "Engagments": [1, 2, 3],
            "EstimatedMonthlyVisits": {"2024-01": "lots", "2024-02": 10},
            "TrafficSources": "none",
            "TopCountryShares": [{"Value": 0.5}, {"CountryCode": "DE"}],
            "TopKeywords": {"Name": "not a list"}
        });

        let metrics = SiteMetrics::from_json(&payload);

        assert_eq!(metrics.global_rank, None);
        assert_eq!(metrics.country_rank, None);
        assert_eq!(metrics.category_rank, Some(5.0));
        assert_eq!(metrics.engagement, Engagement::default());
        assert_eq!(metrics.monthly_visits.get("2024-01"), Some(&None));
        assert_eq!(metrics.monthly_visits.get("2024-02"), Some(&Some(10.0)));
        assert!(metrics.traffic_sources.is_empty());
        assert_eq!(metrics.top_countries.len(), 1);
        assert_eq!(metrics.top_countries[0].code, "DE");
        assert_eq!(metrics.top_countries[0].share, None);
        assert!(metrics.top_keywords.is_empty());
    }

    #[test]
    fn test_non_object_payload_is_empty_metrics() {
        assert_eq!(SiteMetrics::from_json(&json!("oops")), SiteMetrics::default());
    }
}
