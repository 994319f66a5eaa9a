//! # Leads
//!
//! A lead moves through a status pipeline. The backend knows six statuses;
//! admins and agents each see a narrower set:
//!
//! | Status | Admin choice | Agent choice | Agent may move to |
//! |--------|--------------|--------------|-------------------|
//! | `new` | yes | yes | `new`, `contacted` |
//! | `contacted` | yes | yes | `contacted`, `in_progress` |
//! | `in_progress` | yes | yes | `in_progress` |
//! | `closed` | yes | no | nothing |
//! | `converted` | shown as Closed | no | nothing |
//! | `closed_lost` | shown as Closed | no | nothing |

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::lenient;
use super::Deal;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    InProgress,
    Closed,
    Converted,
    ClosedLost,
    #[serde(other)]
    Unknown,
}

impl LeadStatus {
    pub const ADMIN_OPTIONS: [LeadStatus; 4] = [
        LeadStatus::New,
        LeadStatus::Contacted,
        LeadStatus::InProgress,
        LeadStatus::Closed,
    ];

    pub const AGENT_OPTIONS: [LeadStatus; 3] =
        [LeadStatus::New, LeadStatus::Contacted, LeadStatus::InProgress];

    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "new",
            LeadStatus::Contacted => "contacted",
            LeadStatus::InProgress => "in_progress",
            LeadStatus::Closed => "closed",
            LeadStatus::Converted => "converted",
            LeadStatus::ClosedLost => "closed_lost",
            LeadStatus::Unknown => "unknown",
        }
    }

    pub fn parse(s: &str) -> LeadStatus {
        serde_json::from_value(Value::String(s.to_string())).unwrap_or(LeadStatus::Unknown)
    }

    pub fn label(&self) -> &'static str {
        match self {
            LeadStatus::New => "New",
            LeadStatus::Contacted => "Contacted",
            LeadStatus::InProgress => "In Progress",
            LeadStatus::Closed | LeadStatus::Converted | LeadStatus::ClosedLost => "Closed",
            LeadStatus::Unknown => "Unknown",
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(
            self,
            LeadStatus::Closed | LeadStatus::Converted | LeadStatus::ClosedLost
        )
    }

    /// Statuses an agent may pick for a lead currently in `self`.
    pub fn agent_transitions(&self) -> &'static [LeadStatus] {
        match self {
            LeadStatus::New => &[LeadStatus::New, LeadStatus::Contacted],
            LeadStatus::Contacted => &[LeadStatus::Contacted, LeadStatus::InProgress],
            LeadStatus::InProgress => &[LeadStatus::InProgress],
            _ => &[],
        }
    }

    /// CSS modifier for the status badge.
    pub fn badge_class(&self) -> &'static str {
        match self {
            LeadStatus::New => "badge badge-blue",
            LeadStatus::Contacted => "badge badge-yellow",
            LeadStatus::InProgress => "badge badge-orange",
            LeadStatus::Converted => "badge badge-green",
            _ => "badge badge-gray",
        }
    }
}

/// Assigned agent, sent either as a bare id or as a nested object.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct AgentRef {
    pub id: Option<String>,
    pub name: Option<String>,
}

impl<'de> Deserialize<'de> for AgentRef {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Number(n) => AgentRef {
                id: Some(n.to_string()),
                name: None,
            },
            Value::String(s) => AgentRef {
                id: Some(s),
                name: None,
            },
            Value::Object(map) => {
                let text = |key: &str| map.get(key).and_then(Value::as_str).map(str::to_string);
                AgentRef {
                    id: map.get("id").and_then(|v| match v {
                        Value::Number(n) => Some(n.to_string()),
                        Value::String(s) => Some(s.clone()),
                        _ => None,
                    }),
                    name: text("name").or_else(|| text("username")).or_else(|| text("email")),
                }
            }
            _ => AgentRef::default(),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadNote {
    #[serde(deserialize_with = "lenient::opt_id")]
    pub id: Option<String>,
    pub user_name: String,
    pub note: String,
    pub created_at: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lead {
    #[serde(deserialize_with = "lenient::opt_id")]
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: Option<String>,
    pub status: LeadStatus,
    pub assigned_agent: Option<AgentRef>,
    pub assigned_agent_name: Option<String>,
    /// Most recent first.
    pub notes_history: Vec<LeadNote>,
    pub traffic_source: Option<String>,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    pub source_page: Option<String>,
    pub created_at: Option<String>,
    pub deal: Option<Deal>,
}

impl Lead {
    /// Name for dialogs: name, email, else `Lead #<id>`.
    pub fn display_name(&self) -> String {
        if !self.name.is_empty() {
            return self.name.clone();
        }
        if !self.email.is_empty() {
            return self.email.clone();
        }
        format!("Lead #{}", self.id.as_deref().unwrap_or("?"))
    }

    pub fn agent_name(&self) -> String {
        self.assigned_agent_name
            .clone()
            .filter(|n| !n.is_empty())
            .or_else(|| self.assigned_agent.as_ref().and_then(|a| a.name.clone()))
            .unwrap_or_else(|| "Unassigned".to_string())
    }

    pub fn agent_id(&self) -> Option<&str> {
        self.assigned_agent.as_ref().and_then(|a| a.id.as_deref())
    }

    pub fn last_note(&self) -> Option<&LeadNote> {
        self.notes_history.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_transitions_are_forward_only() {
        assert_eq!(
            LeadStatus::New.agent_transitions(),
            &[LeadStatus::New, LeadStatus::Contacted]
        );
        assert_eq!(
            LeadStatus::Contacted.agent_transitions(),
            &[LeadStatus::Contacted, LeadStatus::InProgress]
        );
        assert_eq!(LeadStatus::InProgress.agent_transitions(), &[LeadStatus::InProgress]);
        assert!(LeadStatus::Converted.agent_transitions().is_empty());
        assert!(LeadStatus::ClosedLost.agent_transitions().is_empty());
    }

    #[test]
    fn test_backend_statuses_display_as_closed() {
        assert_eq!(LeadStatus::Converted.label(), "Closed");
        assert_eq!(LeadStatus::ClosedLost.label(), "Closed");
        assert!(LeadStatus::ClosedLost.is_closed());
        assert_eq!(LeadStatus::parse("in_progress"), LeadStatus::InProgress);
        assert_eq!(LeadStatus::parse("archived"), LeadStatus::Unknown);
    }

    #[test]
    fn test_lead_with_nested_agent() {
        let lead: Lead = serde_json::from_str(
            r#"{
                "id": 12,
                "name": "",
                "email": "buyer@example.com",
                "status": "contacted",
                "assigned_agent": {"id": 3, "username": "omar"},
                "notes_history": [
                    {"id": 2, "user_name": "omar", "note": "Called back"},
                    {"id": 1, "user_name": "omar", "note": "Left voicemail"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(lead.id.as_deref(), Some("12"));
        assert_eq!(lead.display_name(), "buyer@example.com");
        assert_eq!(lead.agent_id(), Some("3"));
        assert_eq!(lead.agent_name(), "omar");
        assert_eq!(lead.last_note().unwrap().note, "Called back");
    }

    #[test]
    fn test_lead_with_bare_agent_id() {
        let lead: Lead =
            serde_json::from_str(r#"{"id":"7","assigned_agent":5,"status":"weird"}"#).unwrap();
        assert_eq!(lead.agent_id(), Some("5"));
        assert_eq!(lead.agent_name(), "Unassigned");
        assert_eq!(lead.status, LeadStatus::Unknown);
        assert_eq!(lead.display_name(), "Lead #7");
    }
}
