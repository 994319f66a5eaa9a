//! Typed views of backend records used by the bespoke pages.
//!
//! Every optional field is `#[serde(default)]`; the backend omits keys freely.

pub mod deal;
pub mod lead;
pub mod public;

pub use deal::{Deal, DealDraft, DealError, DealPayload, RevenueStats};
pub use lead::{AgentRef, Lead, LeadNote, LeadStatus};
pub use public::{AgentCard, HeroSlide, PropertyCard};

/// Deserializers for values the backend sends as either numbers or strings
/// (Django decimals arrive as `"1250.00"`).
pub(crate) mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    fn to_f64(value: Value) -> Option<f64> {
        match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn f64<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        Ok(to_f64(Value::deserialize(d)?).unwrap_or_default())
    }

    pub fn opt_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        Ok(to_f64(Value::deserialize(d)?))
    }

    /// Numeric or string id as a string.
    pub fn opt_id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Number(n) => Some(n.to_string()),
            Value::String(s) if !s.is_empty() => Some(s),
            _ => None,
        })
    }
}
