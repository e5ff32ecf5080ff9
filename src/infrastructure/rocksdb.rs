use crate::domain::applicant::Applicant;
use crate::domain::application::{ApplicationId, ApplicationView, LoanApplication};
use crate::domain::business::Business;
use crate::domain::ports::RecordStore;
use crate::error::{ConstraintViolation, LoanError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, Options, Snapshot, WriteBatch};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Column Family for applicant records, keyed by applicant id.
pub const CF_APPLICANTS: &str = "applicants";
/// Column Family for business records, keyed by business id.
pub const CF_BUSINESSES: &str = "businesses";
/// Column Family for loan applications, keyed by application id.
pub const CF_APPLICATIONS: &str = "applications";
/// Column Family mapping `<constraint>:<value>` to the owning record id.
pub const CF_UNIQUE_INDEX: &str = "unique_index";

const COLUMN_FAMILIES: [&str; 4] = [
    CF_APPLICANTS,
    CF_BUSINESSES,
    CF_APPLICATIONS,
    CF_UNIQUE_INDEX,
];

/// A persistent record store implementation using RocksDB.
///
/// Each record type lives in its own Column Family. A submission is written as
/// one `WriteBatch`, which RocksDB applies atomically, and reads go through a
/// snapshot so the joined view is consistent.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
    // Serialises the unique-index check with the batch write.
    write_lock: Arc<Mutex<()>>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that all required column families exist.
    ///
    /// # Arguments
    ///
    /// * `path` - The filesystem path where the database will be stored.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let descriptors = COLUMN_FAMILIES
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect::<Vec<_>>();

        let db = DB::open_cf_descriptors(&opts, path, descriptors)?;

        Ok(Self {
            db: Arc::new(db),
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    fn cf(&self, name: &str) -> Result<&ColumnFamily> {
        self.db.cf_handle(name).ok_or_else(|| {
            LoanError::persistence(std::io::Error::other(format!(
                "{name} column family not found"
            )))
        })
    }

    fn claim_unique(
        &self,
        batch: &mut WriteBatch,
        index: &ColumnFamily,
        constraint: &'static str,
        value: &str,
        owner: &[u8],
    ) -> Result<()> {
        let key = format!("{constraint}:{value}");
        if self.db.get_pinned_cf(index, key.as_bytes())?.is_some() {
            return Err(ConstraintViolation {
                constraint,
                value: value.to_string(),
            }
            .into());
        }
        batch.put_cf(index, key.as_bytes(), owner);
        Ok(())
    }
}

fn encode<T: Serialize>(record: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(record).map_err(|e| {
        LoanError::persistence(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("Serialization error: {}", e),
        ))
    })
}

fn read<T: DeserializeOwned>(
    snapshot: &Snapshot<'_>,
    cf: &ColumnFamily,
    key: &[u8],
) -> Result<Option<T>> {
    let result = snapshot.get_cf(cf, key)?;

    if let Some(bytes) = result {
        let record = serde_json::from_slice(&bytes).map_err(|e| {
            LoanError::persistence(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Deserialization error: {}", e),
            ))
        })?;
        Ok(Some(record))
    } else {
        Ok(None)
    }
}

#[async_trait]
impl RecordStore for RocksDBStore {
    async fn create_application(
        &self,
        applicant: Applicant,
        business: Business,
        application: LoanApplication,
    ) -> Result<ApplicationId> {
        let _guard = self.write_lock.lock().await;

        let applicants = self.cf(CF_APPLICANTS)?;
        let businesses = self.cf(CF_BUSINESSES)?;
        let applications = self.cf(CF_APPLICATIONS)?;
        let index = self.cf(CF_UNIQUE_INDEX)?;

        let id = application.id();
        let applicant_key = applicant.id.as_bytes();
        let business_key = business.id.as_bytes();
        let application_key = id.as_uuid().as_bytes();

        let mut batch = WriteBatch::default();

        self.claim_unique(
            &mut batch,
            index,
            "applicants.email",
            &applicant.details.email,
            applicant_key,
        )?;
        if let Some(tax_id) = &applicant.details.tax_id {
            self.claim_unique(
                &mut batch,
                index,
                "applicants.tax_id",
                tax_id,
                applicant_key,
            )?;
        }
        self.claim_unique(
            &mut batch,
            index,
            "businesses.tax_id",
            &business.details.tax_id,
            business_key,
        )?;

        batch.put_cf(applicants, applicant_key, encode(&applicant)?);
        batch.put_cf(businesses, business_key, encode(&business)?);
        batch.put_cf(applications, application_key, encode(&application)?);

        self.db.write(batch)?;
        tracing::debug!(application_id = %id, "committed application batch");
        Ok(id)
    }

    async fn get_application_by_id(&self, id: ApplicationId) -> Result<ApplicationView> {
        tracing::debug!(application_id = %id, "reading application from RocksDB");
        let applicants = self.cf(CF_APPLICANTS)?;
        let businesses = self.cf(CF_BUSINESSES)?;
        let applications = self.cf(CF_APPLICATIONS)?;

        let snapshot = self.db.snapshot();
        let application_key = id.as_uuid().as_bytes();
        let application: LoanApplication = read(&snapshot, applications, application_key)?
            .ok_or(LoanError::NotFound(id))?;

        let missing = |record: &str| {
            LoanError::persistence(std::io::Error::other(format!(
                "application {id} references a missing {record}"
            )))
        };
        let applicant_key = application.applicant_id();
        let applicant = read(&snapshot, applicants, applicant_key.as_bytes())?
            .ok_or_else(|| missing("applicant"))?;
        let business_key = application.business_id();
        let business = read(&snapshot, businesses, business_key.as_bytes())?
            .ok_or_else(|| missing("business"))?;

        Ok(ApplicationView {
            application,
            applicant,
            business,
        })
    }
}
