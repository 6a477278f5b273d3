use thiserror::Error;

/// Failures surfaced by the catalog layer.
///
/// Lookups that find nothing are not errors: they come back as `None` or
/// `false`. Unparseable fragments of a user query never reach this type
/// either, the translator just leaves the affected field unset.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The listing store could not be reached or rejected a statement.
    #[error("store failure: {0}")]
    Connection(#[from] sqlx::Error),

    /// A request was rejected before touching the store.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// The external text-understanding service failed.
    #[error("external service failure: {0}")]
    ExternalService(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
