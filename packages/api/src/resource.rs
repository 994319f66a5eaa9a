//! # Generic REST resources
//!
//! Most dashboard entities are plain collections with the same five calls.
//! [`Resource`] names a collection, [`ResourceApi`] binds it to a client, and
//! [`CrudApi`] is the object-safe trait the CRUD manager consumes.
//!
//! Records stay as `serde_json::Value`: the manager renders them through
//! column descriptors, so it never needs a typed view.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::ApiClient;
use crate::endpoints;
use crate::error::ApiError;
use crate::request::RequestBody;

/// A REST collection at `/<segment>/`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resource {
    pub segment: &'static str,
}

impl Resource {
    pub const fn new(segment: &'static str) -> Self {
        Self { segment }
    }

    pub fn list_path(&self) -> String {
        format!("/{}/", self.segment)
    }

    pub fn detail_path(&self, id: &str) -> String {
        endpoints::detail(&self.list_path(), id)
    }
}

pub const USERS: Resource = Resource::new("users");
pub const AGENTS: Resource = Resource::new("agents");
pub const PROPERTIES: Resource = Resource::new("properties");
pub const COLLABORATIONS: Resource = Resource::new("collaborations");
pub const SLIDES: Resource = Resource::new("slides");
pub const YOUR_PERFECT: Resource = Resource::new("yourperfect");
pub const SIDEBAR_CARD: Resource = Resource::new("sidebarcard");
pub const DAMAC: Resource = Resource::new("damac");
pub const EMPOWERING_COMMUNITIES: Resource = Resource::new("empoweringcommunities");
pub const HERO: Resource = Resource::new("hero");
pub const LEADS: Resource = Resource::new("leads");
pub const DEALS: Resource = Resource::new("deals");
pub const AGENT_PROPERTIES: Resource = Resource::new("agent/properties");
pub const AGENT_APPOINTMENTS: Resource = Resource::new("agent/appointments");
pub const AGENT_DOCUMENTS: Resource = Resource::new("agent/documents");

/// The five calls the CRUD manager makes.
#[async_trait(?Send)]
pub trait CrudApi {
    async fn get_all(&self) -> Result<Value, ApiError>;
    async fn get_by_id(&self, id: &str) -> Result<Value, ApiError>;
    async fn create(&self, body: RequestBody) -> Result<Value, ApiError>;
    async fn update(&self, id: &str, body: RequestBody) -> Result<Value, ApiError>;
    async fn delete(&self, id: &str) -> Result<Value, ApiError>;
}

/// [`CrudApi`] over a [`Resource`]. Updates use `PUT`.
#[derive(Clone)]
pub struct ResourceApi {
    client: ApiClient,
    resource: Resource,
}

impl ResourceApi {
    pub fn new(client: ApiClient, resource: Resource) -> Self {
        Self { client, resource }
    }

    pub fn resource(&self) -> Resource {
        self.resource
    }
}

#[async_trait(?Send)]
impl CrudApi for ResourceApi {
    async fn get_all(&self) -> Result<Value, ApiError> {
        self.client.get(&self.resource.list_path()).await
    }

    async fn get_by_id(&self, id: &str) -> Result<Value, ApiError> {
        self.client.get(&self.resource.detail_path(id)).await
    }

    async fn create(&self, body: RequestBody) -> Result<Value, ApiError> {
        self.client.post(&self.resource.list_path(), body).await
    }

    async fn update(&self, id: &str, body: RequestBody) -> Result<Value, ApiError> {
        self.client.put(&self.resource.detail_path(id), body).await
    }

    async fn delete(&self, id: &str) -> Result<Value, ApiError> {
        self.client.delete(&self.resource.detail_path(id)).await
    }
}

/// Rows of a list response: `{results: [...]}`, `{data: [...]}` or a bare
/// array. Anything else is empty.
pub fn normalize_list(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::Object(mut map) => ["results", "data"]
            .iter()
            .find_map(|key| match map.remove(*key) {
                Some(Value::Array(items)) => Some(items),
                _ => None,
            })
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

/// String form of a record's `id`, numeric or string.
pub fn record_id(record: &Value) -> Option<String> {
    match record.get("id")? {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// A DRF-style paginated page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            count: 0,
            next: None,
            previous: None,
            results: Vec::new(),
        }
    }
}

impl<T: serde::de::DeserializeOwned> Page<T> {
    /// Accepts a paginated object or a bare array (count = len).
    pub fn from_value(value: Value) -> Result<Self, ApiError> {
        if value.get("results").is_some() {
            return Ok(serde_json::from_value(value)?);
        }
        let results: Vec<T> = normalize_list(value)
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<_, _>>()?;
        Ok(Self {
            count: results.len() as u64,
            results,
            ..Default::default()
        })
    }

    /// Number of pages for `page_size` rows per page, at least one.
    pub fn total_pages(&self, page_size: u64) -> u64 {
        if page_size == 0 {
            return 1;
        }
        self.count.div_ceil(page_size).max(1)
    }
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
    use crate::request::Method;

    #[test]
    fn test_normalize_list_shapes() {
        let rows = json!([{"id": 1}, {"id": 2}]);
        assert_eq!(normalize_list(json!({"results": rows.clone()})).len(), 2);
        assert_eq!(normalize_list(json!({"data": rows.clone()})).len(), 2);
        assert_eq!(normalize_list(rows).len(), 2);
        assert!(normalize_list(json!({"detail": "x"})).is_empty());
        assert!(normalize_list(Value::Null).is_empty());
    }

    #[test]
    fn test_record_id() {
        assert_eq!(record_id(&json!({"id": 5})).as_deref(), Some("5"));
        assert_eq!(record_id(&json!({"id": "ab"})).as_deref(), Some("ab"));
        assert_eq!(record_id(&json!({"name": "x"})), None);
    }

    #[test]
    fn test_page_from_bare_array() {
        let page: Page<Value> = Page::from_value(json!([{"id": 1}])).unwrap();
        assert_eq!(page.count, 1);
        assert_eq!(page.total_pages(10), 1);

        let page: Page<Value> =
            Page::from_value(json!({"count": 25, "results": [], "next": "?page=2"})).unwrap();
        assert_eq!(page.total_pages(10), 3);
    }

    #[tokio::test]
    async fn test_resource_paths() {
        let transport = Rc::new(MockTransport::new());
        let client = ApiClient::with_transport(
            transport.clone(),
            Session::new(Arc::new(MemoryStorage::new())),
            Duration::ZERO,
        );
        let api = ResourceApi::new(client, AGENT_DOCUMENTS);

        api.get_all().await.unwrap();
        api.update("9", json!({"title": "t"}).into()).await.unwrap();
        api.delete("9").await.unwrap();

        assert_eq!(transport.count(Method::Get, "/agent/documents/"), 1);
        assert_eq!(transport.count(Method::Put, "/agent/documents/9/"), 1);
        assert_eq!(transport.count(Method::Delete, "/agent/documents/9/"), 1);
    }
}
