use std::fmt::Display;

use crate::config::Database;

pub mod db;
pub mod error;
pub(crate) mod mapper;
pub mod operations;
pub mod query;
pub(crate) mod schema;
pub(crate) mod seed;

impl Display for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.in_memory {
            write!(f, ":memory:")
        } else {
            write!(f, "{}", self.resolved_path().to_string_lossy())
        }
    }
}
