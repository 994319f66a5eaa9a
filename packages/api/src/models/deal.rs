//! Deals: revenue recorded against a converted lead.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::lenient;

pub const DEFAULT_CURRENCY: &str = "AED";

pub const CURRENCIES: [(&str, &str); 4] = [
    ("AED", "AED - UAE Dirham"),
    ("USD", "USD - US Dollar"),
    ("EUR", "EUR - Euro"),
    ("GBP", "GBP - British Pound"),
];

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    #[serde(default, deserialize_with = "lenient::opt_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_id")]
    pub lead: Option<String>,
    #[serde(default)]
    pub lead_name: Option<String>,
    #[serde(default)]
    pub lead_email: Option<String>,
    #[serde(default, deserialize_with = "lenient::f64")]
    pub revenue_amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub commission_rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub commission_amount: Option<f64>,
    #[serde(default)]
    pub closed_date: Option<String>,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DealError {
    #[error("Please fill in all required fields")]
    MissingFields,
    #[error("Please enter a valid revenue amount")]
    InvalidRevenue,
    #[error("Commission rate must be between 0 and 100")]
    InvalidCommission,
}

/// Body of `POST /deals/` and `PATCH /deals/<id>/`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DealPayload {
    pub lead: Value,
    pub revenue_amount: f64,
    pub currency: String,
    pub closed_date: String,
    pub commission_rate: Option<f64>,
}

/// Revenue form state, kept as the strings the inputs hold.
#[derive(Clone, Debug, PartialEq)]
pub struct DealDraft {
    pub lead_id: String,
    pub revenue_amount: String,
    pub currency: String,
    pub closed_date: String,
    pub commission_rate: String,
}

impl DealDraft {
    /// Empty draft closing today.
    pub fn new(lead_id: impl Into<String>) -> Self {
        Self {
            lead_id: lead_id.into(),
            revenue_amount: String::new(),
            currency: default_currency(),
            closed_date: chrono::Local::now().date_naive().format("%Y-%m-%d").to_string(),
            commission_rate: String::new(),
        }
    }

    pub fn from_deal(lead_id: impl Into<String>, deal: &Deal) -> Self {
        Self {
            lead_id: lead_id.into(),
            revenue_amount: deal.revenue_amount.to_string(),
            currency: deal.currency.clone(),
            closed_date: deal.closed_date.clone().unwrap_or_default(),
            commission_rate: deal
                .commission_rate
                .map(|r| r.to_string())
                .unwrap_or_default(),
        }
    }

    /// revenue × rate / 100, when both parse and are non-zero.
    pub fn commission_preview(&self) -> Option<f64> {
        let revenue: f64 = self.revenue_amount.trim().parse().ok()?;
        let rate: f64 = self.commission_rate.trim().parse().ok()?;
        (revenue != 0.0 && rate != 0.0).then(|| revenue * rate / 100.0)
    }

    pub fn validate(&self) -> Result<DealPayload, DealError> {
        if self.revenue_amount.trim().is_empty() || self.closed_date.trim().is_empty() {
            return Err(DealError::MissingFields);
        }

        let revenue: f64 = self
            .revenue_amount
            .trim()
            .parse()
            .map_err(|_| DealError::InvalidRevenue)?;
        if !revenue.is_finite() || revenue <= 0.0 {
            return Err(DealError::InvalidRevenue);
        }

        let rate = match self.commission_rate.trim() {
            "" => None,
            raw => {
                let rate: f64 = raw.parse().map_err(|_| DealError::InvalidCommission)?;
                if !(0.0..=100.0).contains(&rate) {
                    return Err(DealError::InvalidCommission);
                }
                Some(rate)
            }
        };

        let lead = self
            .lead_id
            .parse::<i64>()
            .map(Value::from)
            .unwrap_or_else(|_| Value::String(self.lead_id.clone()));

        Ok(DealPayload {
            lead,
            revenue_amount: revenue,
            currency: self.currency.clone(),
            closed_date: self.closed_date.trim().to_string(),
            commission_rate: rate,
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonthRevenue {
    pub month: String,
    #[serde(deserialize_with = "lenient::f64")]
    pub revenue: f64,
    #[serde(deserialize_with = "lenient::f64")]
    pub commission: f64,
    pub deals: u64,
}

/// `GET /agent/revenue/`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevenueStats {
    #[serde(deserialize_with = "lenient::f64")]
    pub total_revenue: f64,
    #[serde(deserialize_with = "lenient::f64")]
    pub total_commission: f64,
    pub converted_leads_count: u64,
    pub revenue_by_month: Vec<MonthRevenue>,
    pub recent_deals: Vec<Deal>,
}

impl RevenueStats {
    pub fn average_deal_value(&self) -> f64 {
        if self.converted_leads_count == 0 {
            return 0.0;
        }
        self.total_revenue / self.converted_leads_count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(revenue: &str, rate: &str) -> DealDraft {
        DealDraft {
            revenue_amount: revenue.to_string(),
            commission_rate: rate.to_string(),
            ..DealDraft::new("42")
        }
    }

    #[test]
    fn test_validate_rejects_bad_revenue() {
        assert_eq!(draft("", "").validate(), Err(DealError::MissingFields));
        assert_eq!(draft("0", "").validate(), Err(DealError::InvalidRevenue));
        assert_eq!(draft("-5", "").validate(), Err(DealError::InvalidRevenue));
        assert_eq!(draft("abc", "").validate(), Err(DealError::InvalidRevenue));
    }

    #[test]
    fn test_validate_commission_range() {
        assert_eq!(draft("1000", "101").validate(), Err(DealError::InvalidCommission));
        assert_eq!(draft("1000", "-1").validate(), Err(DealError::InvalidCommission));

        let payload = draft("1000", "2.5").validate().unwrap();
        assert_eq!(payload.lead, Value::from(42));
        assert_eq!(payload.commission_rate, Some(2.5));
        assert_eq!(payload.currency, "AED");

        let payload = draft("1000", "").validate().unwrap();
        assert_eq!(payload.commission_rate, None);
    }

    #[test]
    fn test_missing_date_is_required() {
        let mut d = draft("1000", "");
        d.closed_date.clear();
        assert_eq!(d.validate(), Err(DealError::MissingFields));
    }

    #[test]
    fn test_commission_preview() {
        assert_eq!(draft("200000", "2").commission_preview(), Some(4000.0));
        assert_eq!(draft("200000", "").commission_preview(), None);
    }

    #[test]
    fn test_deal_from_decimal_strings() {
        let deal: Deal = serde_json::from_str(
            r#"{"id":1,"lead":9,"revenue_amount":"350000.00","commission_rate":"2.00"}"#,
        )
        .unwrap();
        assert_eq!(deal.revenue_amount, 350000.0);
        assert_eq!(deal.currency, "AED");
        assert_eq!(DealDraft::from_deal("9", &deal).commission_rate, "2");
    }
}
