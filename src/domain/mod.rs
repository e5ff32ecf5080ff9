//! Domain layer: the loan records, their value objects, the underwriting
//! decision and the storage port the application layer depends on.

pub mod address;
pub mod applicant;
pub mod application;
pub mod business;
pub mod decision;
pub mod ports;
