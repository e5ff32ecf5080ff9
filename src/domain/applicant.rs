use super::address::Address;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Personal details supplied with a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantData {
    pub first_name: String,
    pub last_name: String,
    /// Unique across all stored applicants.
    pub email: String,
    pub phone: Option<String>,
    /// National tax id (SSN). Sensitive; unique when present.
    pub tax_id: Option<String>,
    pub address: Address,
}

/// A persisted applicant. Only ever created as part of a loan application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Applicant {
    pub id: Uuid,
    #[serde(flatten)]
    pub details: ApplicantData,
    pub created_at: DateTime<Utc>,
}

impl Applicant {
    pub fn new(details: ApplicantData, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            details,
            created_at,
        }
    }
}
