use super::applicant::Applicant;
use super::application::{ApplicationId, ApplicationView, LoanApplication};
use super::business::Business;
use crate::error::Result;
use async_trait::async_trait;

/// Persistence for the three records that make up a loan application.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persists all three records as one unit: afterwards either every record
    /// exists or none does. Returns the application's identifier.
    async fn create_application(
        &self,
        applicant: Applicant,
        business: Business,
        application: LoanApplication,
    ) -> Result<ApplicationId>;

    /// Reads an application together with its applicant and business.
    /// Fails with `LoanError::NotFound` when the id is unknown.
    async fn get_application_by_id(&self, id: ApplicationId) -> Result<ApplicationView>;
}

pub type RecordStoreBox = Box<dyn RecordStore>;
