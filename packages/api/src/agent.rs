//! Agent workspace endpoints that are not plain CRUD.

use serde_json::Value;

use crate::client::ApiClient;
use crate::endpoints;
use crate::error::ApiError;
use crate::resource::normalize_list;

pub async fn reports(client: &ApiClient) -> Result<Vec<Value>, ApiError> {
    client.get(endpoints::AGENT_REPORTS).await.map(normalize_list)
}

/// Ask the backend to generate a report, e.g. `{"report_type": "monthly"}`.
pub async fn generate_report(client: &ApiClient, request: Value) -> Result<Value, ApiError> {
    client.post(endpoints::AGENT_REPORTS, request.into()).await
}
