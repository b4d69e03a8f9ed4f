use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("Bootcamp with id {0} does not exist")]
    BootcampNotFound(Uuid),

    #[error("{0}")]
    Invalid(String),

    #[error("Duplicate values entered")]
    Duplicate,

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Internal server error")]
    InternalServerError,
}
