//! Runtime configuration loaded from environment variables.

use std::path::PathBuf;

use crate::db::Database;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;

/// Server configuration.
///
/// Read from `IVAHIT_DB_PATH`, `IVAHIT_HOST` and `IVAHIT_PORT`. Command line flags take
/// precedence over anything set here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// SQLite file to use. `None` means the per-user data directory.
    pub db_path: Option<PathBuf>,
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let db_path = lookup("IVAHIT_DB_PATH")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        let host = lookup("IVAHIT_HOST")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = lookup("IVAHIT_PORT")
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            db_path,
            host,
            port,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Open the configured database and bring its schema up to date.
    pub fn open_database(&self) -> anyhow::Result<Database> {
        let db = match &self.db_path {
            Some(path) => Database::open(path.clone())?,
            None => Database::open_default()?,
        };
        db.migrate()?;
        Ok(db)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
