//! Lead endpoints for admins, agents and the public form.

use serde::Serialize;
use serde_json::{json, Map, Value};
use store::TrackingData;

use crate::client::ApiClient;
use crate::endpoints;
use crate::error::ApiError;
use crate::models::{Lead, LeadStatus};
use crate::resource::Page;

pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Filters and pagination for lead lists. Empty filters are not sent.
#[derive(Clone, Debug, PartialEq)]
pub struct LeadQuery {
    pub page: u64,
    pub page_size: u64,
    pub status: String,
    pub agent: String,
    pub search: String,
    pub traffic_source: String,
}

impl Default for LeadQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            status: String::new(),
            agent: String::new(),
            search: String::new(),
            traffic_source: String::new(),
        }
    }
}

impl LeadQuery {
    pub fn params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("page".to_string(), self.page.max(1).to_string()),
            ("page_size".to_string(), self.page_size.to_string()),
        ];
        for (key, value) in [
            ("status", &self.status),
            ("agent", &self.agent),
            ("search", &self.search),
            ("traffic_source", &self.traffic_source),
        ] {
            let value = value.trim();
            if !value.is_empty() {
                params.push((key.to_string(), value.to_string()));
            }
        }
        params
    }

    /// Reset filters but keep the page size.
    pub fn cleared(&self) -> Self {
        Self {
            page_size: self.page_size,
            ..Default::default()
        }
    }
}

pub async fn list(client: &ApiClient, query: &LeadQuery) -> Result<Page<Lead>, ApiError> {
    let value = client.get_with(endpoints::LEADS, query.params()).await?;
    Page::from_value(value)
}

/// Admin edit: status, assigned agent and an optional note. An empty agent
/// unassigns; a blank note is not sent.
pub async fn update(
    client: &ApiClient,
    id: &str,
    status: LeadStatus,
    assigned_agent: Option<&str>,
    note: &str,
) -> Result<Value, ApiError> {
    let agent = match assigned_agent.filter(|a| !a.is_empty()) {
        Some(id) => id.parse::<i64>().map(Value::from).unwrap_or_else(|_| json!(id)),
        None => Value::Null,
    };
    let mut body = json!({ "status": status, "assigned_agent": agent });
    let note = note.trim();
    if !note.is_empty() {
        body["activity_note"] = json!(note);
    }
    client
        .put(&endpoints::detail(endpoints::LEADS, id), body.into())
        .await
}

pub async fn delete(client: &ApiClient, id: &str) -> Result<(), ApiError> {
    client
        .delete(&endpoints::detail(endpoints::LEADS, id))
        .await
        .map(|_| ())
}

pub async fn agent_list(client: &ApiClient, query: &LeadQuery) -> Result<Page<Lead>, ApiError> {
    let value = client.get_with(endpoints::AGENT_LEADS, query.params()).await?;
    Page::from_value(value)
}

/// What an agent changed in the edit dialog.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentLeadUpdate {
    pub status: Option<LeadStatus>,
    pub activity_note: Option<String>,
}

impl AgentLeadUpdate {
    /// Only a changed status and a non-blank note are kept.
    pub fn diff(current: LeadStatus, selected: LeadStatus, note: &str) -> Self {
        let note = note.trim();
        Self {
            status: (selected != current).then_some(selected),
            activity_note: (!note.is_empty()).then(|| note.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.activity_note.is_none()
    }

    pub fn body(&self) -> Value {
        let mut map = Map::new();
        if let Some(status) = self.status {
            map.insert("status".into(), json!(status));
        }
        if let Some(note) = &self.activity_note {
            map.insert("activity_note".into(), json!(note));
        }
        Value::Object(map)
    }

    /// "Lead status and comment updated successfully" and the like.
    pub fn success_message(&self) -> String {
        let mut parts = Vec::new();
        if self.status.is_some() {
            parts.push("status");
        }
        if self.activity_note.is_some() {
            parts.push("comment");
        }
        format!("Lead {} updated successfully", parts.join(" and "))
    }
}

pub async fn agent_update(
    client: &ApiClient,
    id: &str,
    update: &AgentLeadUpdate,
) -> Result<Value, ApiError> {
    client
        .put(&endpoints::detail(endpoints::AGENT_LEADS, id), update.body().into())
        .await
}

/// Lead submitted from the public website.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PublicLead {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub source_page: String,
    pub traffic_source: String,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
}

impl PublicLead {
    pub fn with_tracking(mut self, tracking: &TrackingData, current_page: &str) -> Self {
        self.source_page = current_page.to_string();
        self.traffic_source = tracking.traffic_source.as_str().to_string();
        self.utm_source = tracking.utm_source.clone();
        self.utm_medium = tracking.utm_medium.clone();
        self.utm_campaign = tracking.utm_campaign.clone();
        self
    }

    /// Name or email must be given.
    pub fn is_submittable(&self) -> bool {
        !self.name.trim().is_empty() || !self.email.trim().is_empty()
    }
}

pub async fn submit_public(client: &ApiClient, lead: &PublicLead) -> Result<Value, ApiError> {
    let body = serde_json::to_value(lead)?;
    client.post(endpoints::PUBLIC_LEADS, body.into()).await
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;
    use std::sync::Arc;
    use std::time::Duration;

    use store::{MemoryStorage, Session, TrafficSource};

    use super::*;
    use crate::mock::MockTransport;
    use crate::request::Method;

    #[test]
    fn test_query_skips_empty_filters() {
        let query = LeadQuery {
            page: 2,
            status: "contacted".into(),
            search: "  ".into(),
            ..Default::default()
        };
        let params = query.params();
        assert_eq!(
            params,
            vec![
                ("page".to_string(), "2".to_string()),
                ("page_size".to_string(), "10".to_string()),
                ("status".to_string(), "contacted".to_string()),
            ]
        );
        assert_eq!(query.cleared().page, 1);
    }

    #[test]
    fn test_agent_update_diff() {
        let none = AgentLeadUpdate::diff(LeadStatus::New, LeadStatus::New, "   ");
        assert!(none.is_empty());

        let both = AgentLeadUpdate::diff(LeadStatus::New, LeadStatus::Contacted, " called ");
        assert_eq!(
            both.body(),
            json!({"status": "contacted", "activity_note": "called"})
        );
        assert_eq!(both.success_message(), "Lead status and comment updated successfully");

        let note = AgentLeadUpdate::diff(LeadStatus::InProgress, LeadStatus::InProgress, "x");
        assert_eq!(note.body(), json!({"activity_note": "x"}));
    }

    #[test]
    fn test_public_lead_tracking() {
        let tracking = TrackingData {
            traffic_source: TrafficSource::Social,
            utm_source: None,
            utm_medium: None,
            utm_campaign: None,
            source_page: "/".into(),
        };
        let lead = PublicLead {
            email: "v@example.com".into(),
            ..Default::default()
        }
        .with_tracking(&tracking, "/contact");
        assert!(lead.is_submittable());
        assert_eq!(lead.traffic_source, "social");
        assert_eq!(lead.source_page, "/contact");
        assert!(!PublicLead::default().is_submittable());
    }

    #[tokio::test]
    async fn test_list_sends_params_and_parses_page() {
        let transport = Rc::new(MockTransport::new());
        transport.respond(
            Method::Get,
            endpoints::LEADS,
            200,
            json!({"count": 11, "next": "x", "results": [{"id": 1, "status": "new"}]}),
        );
        let client = ApiClient::with_transport(
            transport.clone(),
            Session::new(Arc::new(MemoryStorage::new())),
            Duration::ZERO,
        );

        let page = list(&client, &LeadQuery::default()).await.unwrap();

        assert_eq!(page.count, 11);
        assert_eq!(page.total_pages(10), 2);
        assert_eq!(page.results[0].status, LeadStatus::New);
        assert_eq!(transport.last().unwrap().query.len(), 2);
    }

    #[tokio::test]
    async fn test_admin_update_unassigns_with_null() {
        let transport = Rc::new(MockTransport::new());
        let client = ApiClient::with_transport(
            transport.clone(),
            Session::new(Arc::new(MemoryStorage::new())),
            Duration::ZERO,
        );

        update(&client, "3", LeadStatus::Closed, Some(""), "  ").await.unwrap();

        let request = transport.last().unwrap();
        assert_eq!(request.path, "/leads/3/");
        assert_eq!(
            request.body.unwrap().as_json().unwrap(),
            &json!({"status": "closed", "assigned_agent": null})
        );

        update(&client, "3", LeadStatus::New, Some("9"), "Handed over").await.unwrap();
        assert_eq!(
            transport.last().unwrap().body.unwrap().as_json().unwrap(),
            &json!({"status": "new", "assigned_agent": 9, "activity_note": "Handed over"})
        );
    }
}
