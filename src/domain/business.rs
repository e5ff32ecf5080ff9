use super::address::Address;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Business details supplied with a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessData {
    pub name: String,
    /// Employer identification number. Unique across all stored businesses.
    pub tax_id: String,
    pub address: Address,
    pub business_type: Option<String>,
    pub years_in_operation: u32,
    /// Non-negative, currency precision.
    pub annual_revenue: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Business {
    pub id: Uuid,
    #[serde(flatten)]
    pub details: BusinessData,
    pub created_at: DateTime<Utc>,
}

impl Business {
    pub fn new(details: BusinessData, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            details,
            created_at,
        }
    }
}
