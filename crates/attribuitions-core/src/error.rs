use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cant {operation}: {source}")]
    Storage {
        operation: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: i64 },

    #[error("unknown type: {0}")]
    UnknownType(String),

    #[error("unknown licence: {0}")]
    UnknownLicence(String),

    #[error("database closed")]
    Closed,

    /// The connection could not be released. Callers treat this as fatal.
    #[error("unrecoverable: {0}")]
    Unrecoverable(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Attaches the storage operation name to a raw `rusqlite` failure.
pub(crate) trait OperationContext<T> {
    fn during(self, operation: &'static str) -> Result<T>;
}

impl<T> OperationContext<T> for rusqlite::Result<T> {
    fn during(self, operation: &'static str) -> Result<T> {
        self.map_err(|source| Error::Storage { operation, source })
    }
}
