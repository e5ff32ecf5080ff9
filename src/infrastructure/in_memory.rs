use crate::domain::applicant::Applicant;
use crate::domain::application::{ApplicationId, ApplicationView, LoanApplication};
use crate::domain::business::Business;
use crate::domain::ports::RecordStore;
use crate::error::{ConstraintViolation, LoanError, Result};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct Tables {
    applicants: HashMap<Uuid, Applicant>,
    businesses: HashMap<Uuid, Business>,
    applications: HashMap<ApplicationId, LoanApplication>,
    // Unique keys already taken.
    applicant_emails: HashSet<String>,
    applicant_tax_ids: HashSet<String>,
    business_tax_ids: HashSet<String>,
}

impl Tables {
    /// Checks every uniqueness rule a submission is subject to, before
    /// anything is written.
    fn check_unique(&self, applicant: &Applicant, business: &Business) -> Result<()> {
        let details = &applicant.details;
        if self.applicant_emails.contains(&details.email) {
            return Err(violation("applicants.email", &details.email));
        }

        if let Some(tax_id) = &details.tax_id
            && self.applicant_tax_ids.contains(tax_id)
        {
            return Err(violation("applicants.tax_id", tax_id));
        }

        let ein = &business.details.tax_id;
        if self.business_tax_ids.contains(ein) {
            return Err(violation("businesses.tax_id", ein));
        }

        Ok(())
    }

    fn insert(&mut self, applicant: Applicant, business: Business, application: LoanApplication) {
        let details = &applicant.details;
        self.applicant_emails.insert(details.email.clone());
        if let Some(tax_id) = &details.tax_id {
            self.applicant_tax_ids.insert(tax_id.clone());
        }
        let ein = business.details.tax_id.clone();
        self.business_tax_ids.insert(ein);

        self.applicants.insert(applicant.id, applicant);
        self.businesses.insert(business.id, business);
        self.applications.insert(application.id(), application);
    }
}

fn violation(constraint: &'static str, value: &str) -> LoanError {
    ConstraintViolation {
        constraint,
        value: value.to_string(),
    }
    .into()
}

/// A thread-safe in-memory record store.
///
/// All three tables sit behind one `RwLock`, so a submission is checked and
/// written under a single write guard and readers never see half of it.
#[derive(Default, Clone)]
pub struct InMemoryRecordStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryRecordStore {
    /// Creates a new, empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of (applicants, businesses, applications) currently stored.
    pub async fn counts(&self) -> (usize, usize, usize) {
        let tables = self.tables.read().await;
        (
            tables.applicants.len(),
            tables.businesses.len(),
            tables.applications.len(),
        )
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn create_application(
        &self,
        applicant: Applicant,
        business: Business,
        application: LoanApplication,
    ) -> Result<ApplicationId> {
        let mut tables = self.tables.write().await;
        tables.check_unique(&applicant, &business)?;

        let id = application.id();
        tables.insert(applicant, business, application);
        tracing::debug!(application_id = %id, "stored application in memory");
        Ok(id)
    }

    async fn get_application_by_id(&self, id: ApplicationId) -> Result<ApplicationView> {
        tracing::debug!(application_id = %id, "reading application from memory");
        let tables = self.tables.read().await;
        let application = tables
            .applications
            .get(&id)
            .ok_or(LoanError::NotFound(id))?;

        let applicant = tables
            .applicants
            .get(&application.applicant_id())
            .cloned()
            .ok_or_else(|| dangling(id, "applicant"))?;
        let business = tables
            .businesses
            .get(&application.business_id())
            .cloned()
            .ok_or_else(|| dangling(id, "business"))?;

        Ok(ApplicationView {
            application: application.clone(),
            applicant,
            business,
        })
    }
}

fn dangling(id: ApplicationId, record: &str) -> LoanError {
    LoanError::persistence(std::io::Error::other(format!(
        "application {id} references a missing {record}"
    )))
}
