//! Deal (revenue) endpoints.

use serde_json::Value;

use crate::client::ApiClient;
use crate::endpoints;
use crate::error::ApiError;
use crate::models::{Deal, DealPayload, RevenueStats};
use crate::resource::normalize_list;

pub async fn list(client: &ApiClient, query: Vec<(String, String)>) -> Result<Vec<Deal>, ApiError> {
    let value = client.get_with(endpoints::DEALS, query).await?;
    normalize_list(value)
        .into_iter()
        .map(|row| serde_json::from_value(row).map_err(ApiError::from))
        .collect()
}

pub async fn create(client: &ApiClient, payload: &DealPayload) -> Result<Deal, ApiError> {
    let body = serde_json::to_value(payload)?;
    let value = client.post(endpoints::DEALS, body.into()).await?;
    Ok(serde_json::from_value(value)?)
}

/// `PATCH /deals/<id>/`.
pub async fn update(client: &ApiClient, id: &str, payload: &DealPayload) -> Result<Deal, ApiError> {
    let body = serde_json::to_value(payload)?;
    let value = client
        .patch(&endpoints::detail(endpoints::DEALS, id), body.into())
        .await?;
    Ok(serde_json::from_value(value)?)
}

pub async fn delete(client: &ApiClient, id: &str) -> Result<Value, ApiError> {
    client.delete(&endpoints::detail(endpoints::DEALS, id)).await
}

/// Revenue statistics of the signed-in agent.
pub async fn revenue_stats(client: &ApiClient) -> Result<RevenueStats, ApiError> {
    let value = client.get(endpoints::AGENT_REVENUE).await?;
    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;
    use std::sync::Arc;
    use std::time::Duration;

    use serde_json::json;
    use store::{MemoryStorage, Session};

    use super::*;
    use crate::mock::MockTransport;
    use crate::models::DealDraft;
    use crate::request::Method;

    #[tokio::test]
    async fn test_create_then_patch() {
        let transport = Rc::new(MockTransport::new());
        transport.respond(
            Method::Post,
            endpoints::DEALS,
            201,
            json!({"id": 8, "lead": 42, "revenue_amount": "500000.00", "currency": "AED"}),
        );
        transport.respond(
            Method::Patch,
            "/deals/8/",
            200,
            json!({"id": 8, "lead": 42, "revenue_amount": 450000, "currency": "USD"}),
        );
        let client = ApiClient::with_transport(
            transport.clone(),
            Session::new(Arc::new(MemoryStorage::new())),
            Duration::ZERO,
        );

        let mut draft = DealDraft::new("42");
        draft.revenue_amount = "500000".into();
        let deal = create(&client, &draft.validate().unwrap()).await.unwrap();
        assert_eq!(deal.id.as_deref(), Some("8"));

        draft.revenue_amount = "450000".into();
        draft.currency = "USD".into();
        let deal = update(&client, "8", &draft.validate().unwrap()).await.unwrap();
        assert_eq!(deal.currency, "USD");
        assert_eq!(transport.count(Method::Patch, "/deals/8/"), 1);
    }
}
