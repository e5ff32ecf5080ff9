//! Application layer containing the submission orchestration.
//!
//! `LoanApplicationService` combines the underwriting decision with a single
//! atomic write to the record store, and serves reads back by identifier.

pub mod service;
