//! Dashboard and analytics endpoints.
//!
//! The payloads are loosely shaped and only read for display, so they stay
//! as JSON; [`count`] and [`amount`] read numbers out of them.

use serde_json::Value;

use crate::client::ApiClient;
use crate::endpoints;
use crate::error::ApiError;
use crate::resource::normalize_list;

pub async fn overview(client: &ApiClient) -> Result<Value, ApiError> {
    client.get(endpoints::ANALYTICS_OVERVIEW).await
}

pub async fn agent_performance(client: &ApiClient) -> Result<Vec<Value>, ApiError> {
    client
        .get(endpoints::ANALYTICS_AGENTS)
        .await
        .map(normalize_list)
}

/// Analytics of the signed-in agent.
pub async fn my_analytics(client: &ApiClient) -> Result<Value, ApiError> {
    client.get(endpoints::AGENT_ANALYTICS).await
}

/// Integer at a `/`-separated path, 0 when missing.
pub fn count(value: &Value, path: &str) -> u64 {
    lookup(value, path)
        .and_then(|v| v.as_u64().or_else(|| v.as_str().and_then(|s| s.parse().ok())))
        .unwrap_or_default()
}

/// Decimal at a `/`-separated path, 0 when missing.
pub fn amount(value: &Value, path: &str) -> f64 {
    lookup(value, path)
        .and_then(|v| v.as_f64().or_else(|| v.as_str().and_then(|s| s.parse().ok())))
        .unwrap_or_default()
}

fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('/').try_fold(value, |v, key| v.get(key))
}

/// `{status: count}` pairs from a `leads_by_status` object or list.
pub fn status_counts(value: &Value) -> Vec<(String, u64)> {
    match value {
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| (k.clone(), v.as_u64().unwrap_or_default()))
            .collect(),
        Value::Array(rows) => rows
            .iter()
            .filter_map(|row| {
                let status = row.get("status")?.as_str()?.to_string();
                Some((status, count(row, "count")))
            })
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_number_lookup() {
        let data = json!({"leads": {"total": 40, "converted": "7"}, "revenue": {"total": "1250.50"}});
        assert_eq!(count(&data, "leads/total"), 40);
        assert_eq!(count(&data, "leads/converted"), 7);
        assert_eq!(amount(&data, "revenue/total"), 1250.5);
        assert_eq!(count(&data, "missing/path"), 0);
    }

    #[test]
    fn test_status_counts_shapes() {
        let from_map = status_counts(&json!({"new": 3, "contacted": 2}));
        assert_eq!(from_map.len(), 2);

        let from_rows = status_counts(&json!([{"status": "new", "count": 3}]));
        assert_eq!(from_rows, vec![("new".to_string(), 3)]);
    }
}
