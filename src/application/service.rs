use crate::domain::applicant::{Applicant, ApplicantData};
use crate::domain::application::{
    ApplicationId, ApplicationView, LoanApplication, LoanRequestData, Status,
};
use crate::domain::business::{Business, BusinessData};
use crate::domain::decision::DecisionEngine;
use crate::domain::ports::RecordStoreBox;
use crate::error::Result;
use chrono::Utc;

/// The entry point for submitting and retrieving loan applications.
///
/// Holds no mutable state of its own, so one instance can serve any number of
/// concurrent calls. Consistency comes from the store's atomic create.
pub struct LoanApplicationService {
    engine: DecisionEngine,
    store: RecordStoreBox,
}

impl LoanApplicationService {
    /// Creates a new `LoanApplicationService`.
    ///
    /// # Arguments
    ///
    /// * `engine` - Assigns the initial status of each application.
    /// * `store` - Persists applicant, business and application records.
    pub fn new(engine: DecisionEngine, store: RecordStoreBox) -> Self {
        Self { engine, store }
    }

    /// Underwrites and persists a new application, returning its identifier.
    ///
    /// A failed write surfaces as `LoanError::PersistenceFailure` and leaves
    /// nothing behind, so the whole submission can be retried.
    pub async fn submit(
        &self,
        applicant: ApplicantData,
        business: BusinessData,
        loan: LoanRequestData,
    ) -> Result<ApplicationId> {
        let (id, _) = self.submit_with_status(applicant, business, loan).await?;
        Ok(id)
    }

    /// Same as [`submit`](Self::submit), also returning the assigned status.
    pub async fn submit_with_status(
        &self,
        applicant: ApplicantData,
        business: BusinessData,
        loan: LoanRequestData,
    ) -> Result<(ApplicationId, Status)> {
        let now = Utc::now();
        let applicant = Applicant::new(applicant, now);
        let business = Business::new(business, now);

        let status = self.engine.decide(
            business.details.annual_revenue,
            business.details.years_in_operation,
            loan.amount.value(),
        );
        let application = LoanApplication::new(&applicant, &business, loan, status, now);

        let id = self
            .store
            .create_application(applicant, business, application)
            .await?;
        tracing::info!(application_id = %id, %status, "loan application submitted");
        Ok((id, status))
    }

    /// Fetches a submitted application with its applicant and business.
    pub async fn get_by_id(&self, id: ApplicationId) -> Result<ApplicationView> {
        self.store.get_application_by_id(id).await
    }
}
