//! Unauthenticated endpoints used by the public website.

use crate::client::ApiClient;
use crate::endpoints;
use crate::error::ApiError;
use crate::models::{AgentCard, HeroSlide, PropertyCard};
use crate::resource::normalize_list;

/// Active hero, if any. An empty body or list means none.
pub async fn hero(client: &ApiClient) -> Result<Option<HeroSlide>, ApiError> {
    let value = client.get(endpoints::PUBLIC_HERO).await?;
    let row = if value.is_array() || value.get("results").is_some() {
        normalize_list(value).into_iter().next()
    } else if value.is_object() && value.as_object().is_some_and(|m| !m.is_empty()) {
        Some(value)
    } else {
        None
    };
    row.map(serde_json::from_value).transpose().map_err(ApiError::from)
}

pub async fn agents(client: &ApiClient) -> Result<Vec<AgentCard>, ApiError> {
    rows(client, endpoints::PUBLIC_AGENTS).await
}

pub async fn properties(client: &ApiClient) -> Result<Vec<PropertyCard>, ApiError> {
    rows(client, endpoints::PUBLIC_PROPERTIES).await
}

async fn rows<T: serde::de::DeserializeOwned>(
    client: &ApiClient,
    path: &str,
) -> Result<Vec<T>, ApiError> {
    let value = client.get(path).await?;
    normalize_list(value)
        .into_iter()
        .map(|row| serde_json::from_value(row).map_err(ApiError::from))
        .collect()
}
