use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    /// the catalog could not be opened, created or seeded
    #[error("cannot open catalog: {0}")]
    Unavailable(#[source] rusqlite::Error),

    #[error("could not load data: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("filesystem error: {0}")]
    Fs(#[from] std::io::Error),
}

impl StorageError {
    pub(crate) fn unavailable(err: rusqlite::Error) -> Self {
        StorageError::Unavailable(err)
    }
}
