use crate::domain::address::Address;
use crate::domain::applicant::ApplicantData;
use crate::domain::application::{Amount, ApplicationId, ApplicationView, LoanRequestData, Status};
use crate::domain::business::BusinessData;
use crate::error::{LoanError, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantDto {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub ssn: Option<String>,
    #[serde(default)]
    pub street_address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessDto {
    pub name: String,
    pub ein: String,
    #[serde(default)]
    pub street_address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
    #[serde(default, rename = "type")]
    pub business_type: Option<String>,
    pub years_in_operation: i64,
    pub annual_revenue: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanDetailsDto {
    pub amount: Decimal,
    #[serde(default)]
    pub purpose: Option<String>,
}

/// Request body for a submission and response body for a retrieval.
///
/// `id`, `status` and `submittedAt` are ignored on input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanApplicationDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ApplicationId>,
    pub applicant: ApplicantDto,
    pub business: BusinessDto,
    pub loan_details: LoanDetailsDto,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponseDto {
    pub application_id: ApplicationId,
}

fn required(field: &str, value: String) -> Result<String> {
    if value.trim().is_empty() {
        Err(LoanError::InvalidInput(format!("{field} cannot be blank")))
    } else {
        Ok(value)
    }
}

fn check_email(email: &str) -> Result<()> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(LoanError::InvalidInput(format!(
            "Invalid email format: {email}"
        )))
    }
}

impl ApplicantDto {
    pub fn into_domain(self) -> Result<ApplicantData> {
        let first_name = required("First name", self.first_name)?;
        let last_name = required("Last name", self.last_name)?;
        let email = required("Email", self.email)?;
        check_email(&email)?;

        if let Some(ssn) = &self.ssn
            && !(9..=11).contains(&ssn.chars().count())
        {
            return Err(LoanError::InvalidInput(
                "SSN must be between 9 and 11 characters".to_string(),
            ));
        }

        Ok(ApplicantData {
            first_name,
            last_name,
            email,
            phone: self.phone,
            tax_id: self.ssn,
            address: Address {
                street_address: self.street_address,
                city: self.city,
                state: self.state,
                zip_code: self.zip_code,
            },
        })
    }
}

impl BusinessDto {
    pub fn into_domain(self) -> Result<BusinessData> {
        let name = required("Business name", self.name)?;
        let tax_id = required("EIN", self.ein)?;
        let Ok(years_in_operation) = u32::try_from(self.years_in_operation) else {
            return Err(LoanError::InvalidInput(
                "Years in operation must be zero or positive".to_string(),
            ));
        };
        if self.annual_revenue < Decimal::ZERO {
            return Err(LoanError::InvalidInput(
                "Annual revenue must be zero or positive".to_string(),
            ));
        }

        Ok(BusinessData {
            name,
            tax_id,
            address: Address {
                street_address: self.street_address,
                city: self.city,
                state: self.state,
                zip_code: self.zip_code,
            },
            business_type: self.business_type,
            years_in_operation,
            annual_revenue: self.annual_revenue,
        })
    }
}

impl LoanDetailsDto {
    pub fn into_domain(self) -> Result<LoanRequestData> {
        Ok(LoanRequestData {
            amount: Amount::new(self.amount)?,
            purpose: self.purpose,
        })
    }
}

impl LoanApplicationDto {
    /// Validates the request and splits it into the orchestrator's inputs.
    pub fn into_domain(self) -> Result<(ApplicantData, BusinessData, LoanRequestData)> {
        Ok((
            self.applicant.into_domain()?,
            self.business.into_domain()?,
            self.loan_details.into_domain()?,
        ))
    }
}

impl From<ApplicationView> for LoanApplicationDto {
    fn from(view: ApplicationView) -> Self {
        let ApplicationView {
            application,
            applicant,
            business,
        } = view;
        let applicant = applicant.details;
        let business = business.details;

        Self {
            id: Some(application.id()),
            applicant: ApplicantDto {
                first_name: applicant.first_name,
                last_name: applicant.last_name,
                email: applicant.email,
                phone: applicant.phone,
                ssn: applicant.tax_id,
                street_address: applicant.address.street_address,
                city: applicant.address.city,
                state: applicant.address.state,
                zip_code: applicant.address.zip_code,
            },
            business: BusinessDto {
                name: business.name,
                ein: business.tax_id,
                street_address: business.address.street_address,
                city: business.address.city,
                state: business.address.state,
                zip_code: business.address.zip_code,
                business_type: business.business_type,
                years_in_operation: i64::from(business.years_in_operation),
                annual_revenue: business.annual_revenue,
            },
            loan_details: LoanDetailsDto {
                amount: application.amount().value(),
                purpose: application.purpose().map(str::to_string),
            },
            status: Some(application.status()),
            submitted_at: Some(application.submitted_at()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const REQUEST: &str = r#"{
        "applicant": {
            "firstName": "Mary",
            "lastName": "Jackson",
            "email": "mary@example.com",
            "ssn": "123-45-6789",
            "city": "Hampton"
        },
        "business": {
            "name": "Wind Tunnel Works",
            "ein": "12-3456789",
            "type": "Engineering",
            "yearsInOperation": 4,
            "annualRevenue": 250000
        },
        "loanDetails": { "amount": "75000.25", "purpose": "Expansion" }
    }"#;

    fn request() -> LoanApplicationDto {
        serde_json::from_str(REQUEST).unwrap()
    }

    #[test]
    fn test_request_maps_to_domain() {
        let (applicant, business, loan) = request().into_domain().unwrap();
        assert_eq!(applicant.tax_id.as_deref(), Some("123-45-6789"));
        assert_eq!(applicant.address.city.as_deref(), Some("Hampton"));
        assert_eq!(applicant.phone, None);
        assert_eq!(business.business_type.as_deref(), Some("Engineering"));
        assert_eq!(business.years_in_operation, 4);
        assert_eq!(business.annual_revenue, dec!(250000));
        assert_eq!(loan.amount.value(), dec!(75000.25));
    }

    #[test]
    fn test_blank_name_rejected() {
        let mut dto = request();
        dto.applicant.first_name = "  ".to_string();
        assert!(matches!(dto.into_domain(), Err(LoanError::InvalidInput(_))));
    }

    #[test]
    fn test_bad_email_rejected() {
        let invalid = [
            "no-at-sign",
            "@example.com",
            "a@",
            "a@b@c",
            "a b@example.com",
        ];
        for email in invalid {
            let mut dto = request();
            dto.applicant.email = email.to_string();
            assert!(
                matches!(dto.into_domain(), Err(LoanError::InvalidInput(_))),
                "{email} should be rejected"
            );
        }
    }

    #[test]
    fn test_ssn_length_checked() {
        let mut dto = request();
        dto.applicant.ssn = Some("1234".to_string());
        assert!(dto.into_domain().is_err());

        let mut dto = request();
        dto.applicant.ssn = None;
        assert!(dto.into_domain().is_ok());
    }

    #[test]
    fn test_negative_financials_rejected() {
        let mut dto = request();
        dto.business.years_in_operation = -1;
        assert!(matches!(dto.into_domain(), Err(LoanError::InvalidInput(_))));

        let mut dto = request();
        dto.business.annual_revenue = dec!(-0.01);
        assert!(matches!(dto.into_domain(), Err(LoanError::InvalidInput(_))));

        let mut dto = request();
        dto.loan_details.amount = dec!(0);
        assert!(matches!(dto.into_domain(), Err(LoanError::InvalidInput(_))));
    }

    #[test]
    fn test_response_uses_wire_names() {
        let response = SubmissionResponseDto {
            application_id: ApplicationId::new(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("applicationId").is_some());

        let json = serde_json::to_value(request()).unwrap();
        assert!(json.get("loanDetails").is_some());
        assert!(json.get("status").is_none());
        assert_eq!(json["business"]["type"], "Engineering");
    }
}
