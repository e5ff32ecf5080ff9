use crate::domain::application::ApplicationId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LoanError>;

#[derive(Error, Debug)]
pub enum LoanError {
    #[error("loan application {0} not found")]
    NotFound(ApplicationId),
    #[error("persistence failure: {0}")]
    PersistenceFailure(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl LoanError {
    pub fn persistence<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::PersistenceFailure(Box::new(err))
    }
}

/// A uniqueness rule rejected one of the records of a submission.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unique constraint `{constraint}` violated by value `{value}`")]
pub struct ConstraintViolation {
    pub constraint: &'static str,
    pub value: String,
}

impl From<ConstraintViolation> for LoanError {
    fn from(violation: ConstraintViolation) -> Self {
        Self::persistence(violation)
    }
}

#[cfg(feature = "storage-rocksdb")]
impl From<rocksdb::Error> for LoanError {
    fn from(err: rocksdb::Error) -> Self {
        Self::persistence(err)
    }
}
