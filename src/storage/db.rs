use std::path::Path;

use rusqlite::Connection;

use crate::{
    config::Database,
    storage::{error::StorageError, schema},
};

fn open_in_memory() -> Result<rusqlite::Connection, rusqlite::Error> {
    Connection::open_in_memory()
}

fn open_from_file(path: &Path) -> Result<rusqlite::Connection, StorageError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Connection::open(path).map_err(StorageError::unavailable)
}

/// Opens the catalog database and makes sure its schema and seed rows are in place
pub fn open(config: &Database) -> Result<rusqlite::Connection, StorageError> {
    log::debug!("opening catalog at {config}");
    let mut db = if config.in_memory {
        open_in_memory().map_err(StorageError::unavailable)?
    } else {
        open_from_file(&config.resolved_path())?
    };
    schema::open(&mut db)?;
    Ok(db)
}
