use super::applicant::Applicant;
use super::business::Business;
use crate::error::LoanError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identifier handed back to callers after a successful submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(Uuid);

impl ApplicationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ApplicationId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ApplicationId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ApplicationId {
    type Err = LoanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|e| LoanError::InvalidInput(format!("malformed application id `{s}`: {e}")))
    }
}

/// A strictly positive requested loan amount.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, LoanError> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(LoanError::InvalidInput(
                "Loan amount must be positive".to_string(),
            ))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = LoanError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

/// Underwriting outcome. Assigned once, when the application is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Approved,
    Declined,
    NeedsReview,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Status::Approved => "APPROVED",
            Status::Declined => "DECLINED",
            Status::NeedsReview => "NEEDS_REVIEW",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRequestData {
    pub amount: Amount,
    pub purpose: Option<String>,
}

/// The record linking one applicant and one business to a decided request.
///
/// Fields are private so status and submission time cannot be changed once
/// the record exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanApplication {
    id: ApplicationId,
    applicant_id: Uuid,
    business_id: Uuid,
    amount: Amount,
    purpose: Option<String>,
    status: Status,
    submitted_at: DateTime<Utc>,
}

impl LoanApplication {
    pub fn new(
        applicant: &Applicant,
        business: &Business,
        request: LoanRequestData,
        status: Status,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ApplicationId::new(),
            applicant_id: applicant.id,
            business_id: business.id,
            amount: request.amount,
            purpose: request.purpose,
            status,
            submitted_at,
        }
    }

    pub fn id(&self) -> ApplicationId {
        self.id
    }

    pub fn applicant_id(&self) -> Uuid {
        self.applicant_id
    }

    pub fn business_id(&self) -> Uuid {
        self.business_id
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn purpose(&self) -> Option<&str> {
        self.purpose.as_deref()
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }
}

/// An application joined with its applicant and business, read in one go.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationView {
    pub application: LoanApplication,
    pub applicant: Applicant,
    pub business: Business,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_amount_validation() {
        assert!(Amount::new(dec!(0.01)).is_ok());
        assert!(matches!(
            Amount::new(dec!(0)),
            Err(LoanError::InvalidInput(_))
        ));
        assert!(matches!(
            Amount::new(dec!(-5)),
            Err(LoanError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_amount_deserialization_rejects_non_positive() {
        let ok: Amount = serde_json::from_str("\"2500.50\"").unwrap();
        assert_eq!(ok.value(), dec!(2500.50));
        assert!(serde_json::from_str::<Amount>("\"0\"").is_err());
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&Status::NeedsReview).unwrap(),
            "\"NEEDS_REVIEW\""
        );
        let parsed: Status = serde_json::from_str("\"APPROVED\"").unwrap();
        assert_eq!(parsed, Status::Approved);
        assert_eq!(Status::Declined.to_string(), "DECLINED");
    }

    #[test]
    fn test_application_id_parsing() {
        let id = ApplicationId::new();
        let parsed: ApplicationId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
        assert!(matches!(
            "not-a-uuid".parse::<ApplicationId>(),
            Err(LoanError::InvalidInput(_))
        ));
    }
}
