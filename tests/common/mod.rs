#![allow(dead_code)]

use quickloan::domain::address::Address;
use quickloan::domain::applicant::ApplicantData;
use quickloan::domain::application::{Amount, LoanRequestData};
use quickloan::domain::business::BusinessData;
use rust_decimal::Decimal;
use std::fs::File;
use std::io::Error;
use std::path::Path;

pub const CSV_HEADER: [&str; 20] = [
    "firstName",
    "lastName",
    "email",
    "phone",
    "ssn",
    "streetAddress",
    "city",
    "state",
    "zipCode",
    "businessName",
    "ein",
    "businessStreetAddress",
    "businessCity",
    "businessState",
    "businessZipCode",
    "businessType",
    "yearsInOperation",
    "annualRevenue",
    "amount",
    "purpose",
];

pub fn applicant(n: usize) -> ApplicantData {
    ApplicantData {
        first_name: "Dorothy".to_string(),
        last_name: format!("Vaughan{n}"),
        email: format!("dorothy{n}@example.com"),
        phone: Some("555-0142".to_string()),
        tax_id: Some(format!("{:09}", n)),
        address: Address {
            street_address: Some("1 Langley Blvd".to_string()),
            city: Some("Hampton".to_string()),
            state: Some("VA".to_string()),
            zip_code: Some("23666".to_string()),
        },
    }
}

pub fn business(n: usize, revenue: Decimal, years: u32) -> BusinessData {
    BusinessData {
        name: format!("Fortran Shop {n}"),
        tax_id: format!("{:02}-{:07}", n % 100, n),
        address: Address::default(),
        business_type: Some("Sole Proprietorship".to_string()),
        years_in_operation: years,
        annual_revenue: revenue,
    }
}

pub fn loan(amount: Decimal) -> LoanRequestData {
    LoanRequestData {
        amount: Amount::new(amount).expect("positive amount"),
        purpose: Some("Working capital".to_string()),
    }
}

/// Writes `rows` distinct applications that are all approved by the default rules.
pub fn generate_csv(path: &Path, rows: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(CSV_HEADER)?;

    for i in 1..=rows {
        wtr.write_record([
            "Dorothy",
            "Vaughan",
            &format!("dorothy{i}@example.com"),
            "",
            "",
            "",
            "",
            "",
            "",
            &format!("Fortran Shop {i}"),
            &format!("10-{:07}", i),
            "",
            "",
            "",
            "",
            "",
            "5",
            "300000",
            "1000",
            "",
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
