use crate::error::Result;
use crate::interfaces::json::dto::{ApplicantDto, BusinessDto, LoanApplicationDto, LoanDetailsDto};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

/// One application flattened into a CSV row. Business address columns carry a
/// `business` prefix to keep them apart from the applicant's.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApplicationRow {
    first_name: String,
    last_name: String,
    email: String,
    phone: Option<String>,
    ssn: Option<String>,
    street_address: Option<String>,
    city: Option<String>,
    state: Option<String>,
    zip_code: Option<String>,
    business_name: String,
    ein: String,
    business_street_address: Option<String>,
    business_city: Option<String>,
    business_state: Option<String>,
    business_zip_code: Option<String>,
    business_type: Option<String>,
    years_in_operation: i64,
    annual_revenue: Decimal,
    amount: Decimal,
    purpose: Option<String>,
}

impl From<ApplicationRow> for LoanApplicationDto {
    fn from(row: ApplicationRow) -> Self {
        Self {
            id: None,
            applicant: ApplicantDto {
                first_name: row.first_name,
                last_name: row.last_name,
                email: row.email,
                phone: row.phone,
                ssn: row.ssn,
                street_address: row.street_address,
                city: row.city,
                state: row.state,
                zip_code: row.zip_code,
            },
            business: BusinessDto {
                name: row.business_name,
                ein: row.ein,
                street_address: row.business_street_address,
                city: row.business_city,
                state: row.business_state,
                zip_code: row.business_zip_code,
                business_type: row.business_type,
                years_in_operation: row.years_in_operation,
                annual_revenue: row.annual_revenue,
            },
            loan_details: LoanDetailsDto {
                amount: row.amount,
                purpose: row.purpose,
            },
            status: None,
            submitted_at: None,
        }
    }
}

/// Reads loan applications from a CSV source.
///
/// This reader wraps `csv::Reader` and provides an iterator over
/// `Result<LoanApplicationDto>`. It trims whitespace around every field.
pub struct ApplicationReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> ApplicationReader<R> {
    /// Creates a new `ApplicationReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads rows as request DTOs.
    ///
    /// Rows are not validated here; a malformed row yields an error without
    /// stopping the iteration.
    pub fn applications(self) -> impl Iterator<Item = Result<LoanApplicationDto>> {
        self.reader.into_deserialize().map(row_to_dto)
    }
}

fn row_to_dto(row: csv::Result<ApplicationRow>) -> Result<LoanApplicationDto> {
    Ok(row?.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoanError;
    use rust_decimal_macros::dec;

    const HEADER: &str = "firstName,lastName,email,phone,ssn,streetAddress,city,state,zipCode,businessName,ein,businessStreetAddress,businessCity,businessState,businessZipCode,businessType,yearsInOperation,annualRevenue,amount,purpose";

    #[test]
    fn test_reader_valid_stream() {
        let data = format!(
            "{HEADER}\n\
             Ada, Lovelace, ada@example.com,,,,London,,, Engines Ltd, 11-1111111,,,,,LLC, 5, 400000, 150000, Equipment\n\
             Alan,Turing,alan@example.com,555-0100,123456789,,,,,Bombe Co,22-2222222,,Bletchley,,,,2,100000,20000,"
        );
        let reader = ApplicationReader::new(data.as_bytes());
        let results: Vec<Result<LoanApplicationDto>> = reader.applications().collect();

        assert_eq!(results.len(), 2);
        let first = results[0].as_ref().unwrap();
        assert_eq!(first.applicant.email, "ada@example.com");
        assert_eq!(first.applicant.phone, None);
        assert_eq!(first.applicant.city.as_deref(), Some("London"));
        assert_eq!(first.business.name, "Engines Ltd");
        assert_eq!(first.business.annual_revenue, dec!(400000));
        assert_eq!(first.loan_details.purpose.as_deref(), Some("Equipment"));

        let second = results[1].as_ref().unwrap();
        assert_eq!(second.business.city.as_deref(), Some("Bletchley"));
        assert_eq!(second.loan_details.purpose, None);
    }

    #[test]
    fn test_reader_malformed_line() {
        let data = format!(
            "{HEADER}\n\
             Ada,Lovelace,ada@example.com,,,,,,,Engines Ltd,11-1111111,,,,,,many,400000,150000,"
        );
        let reader = ApplicationReader::new(data.as_bytes());
        let results: Vec<Result<LoanApplicationDto>> = reader.applications().collect();

        assert!(matches!(results[0], Err(LoanError::CsvError(_))));
    }
}
