//! Application configuration loaded from environment variables and `.env`.

use std::collections::HashMap;
use std::path::Path;

/// Server configuration with sensible defaults.
///
/// Reads from environment variables, then from a `.env` file for anything the
/// process environment does not set:
/// - `SQLITE_DB_FILE`: SQLite database file, created if missing (default: `"sale_orders.db"`)
/// - `SERVICE_ADDR`: bind address (default: `"0.0.0.0:3000"`)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
#[derive(Debug, Clone)]
pub struct Config {
    pub db_file: String,
    pub addr: String,
    pub log_level: String,
}

impl Config {
    /// Loads configuration from environment variables and `./.env`, falling
    /// back to defaults. A missing `.env` is not an error.
    pub fn from_env() -> Result<Self, dotenvy::Error> {
        Self::from_env_file(".env")
    }

    /// Like [`Config::from_env`], reading the env file at `path`.
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self, dotenvy::Error> {
        let file = read_env_file(path.as_ref())?;
        Ok(Self::from_lookup(|key| {
            std::env::var(key).ok().or_else(|| file.get(key).cloned())
        }))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            db_file: non_empty("SQLITE_DB_FILE").unwrap_or(defaults.db_file),
            addr: non_empty("SERVICE_ADDR").unwrap_or(defaults.addr),
            log_level: non_empty("RUST_LOG").unwrap_or(defaults.log_level),
        }
    }
}

fn read_env_file(path: &Path) -> Result<HashMap<String, String>, dotenvy::Error> {
    match dotenvy::from_path_iter(path) {
        Ok(entries) => entries.collect(),
        Err(e) if e.not_found() => Ok(HashMap::new()),
        Err(e) => Err(e),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_file: "sale_orders.db".to_string(),
            addr: "0.0.0.0:3000".to_string(),
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.db_file, "sale_orders.db");
        assert_eq!(config.addr, "0.0.0.0:3000");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("SQLITE_DB_FILE", "/tmp/orders.db"),
            ("SERVICE_ADDR", "127.0.0.1:8080"),
            ("RUST_LOG", "debug"),
        ]);
        let config = Config::from_lookup(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.db_file, "/tmp/orders.db");
        assert_eq!(config.addr, "127.0.0.1:8080");
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_env_file_entries() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# local overrides").unwrap();
        writeln!(file, "SQLITE_DB_FILE=/var/lib/sale_orders/orders.db").unwrap();
        writeln!(file, "SERVICE_ADDR=\"127.0.0.1:9000\"").unwrap();

        let entries = read_env_file(file.path()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries["SQLITE_DB_FILE"], "/var/lib/sale_orders/orders.db");
        assert_eq!(entries["SERVICE_ADDR"], "127.0.0.1:9000");

        let config = Config::from_env_file(file.path()).unwrap();
        assert_eq!(config.db_file, "/var/lib/sale_orders/orders.db");
        assert_eq!(config.addr, "127.0.0.1:9000");
    }

    #[test]
    fn test_missing_env_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let entries = read_env_file(&dir.path().join(".env")).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_malformed_env_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "this is not an assignment").unwrap();

        assert!(Config::from_env_file(file.path()).is_err());
    }

    #[test]
    fn test_blank_values_fall_back() {
        let config = Config::from_lookup(|key| (key == "SERVICE_ADDR").then(|| "  ".to_string()));
        assert_eq!(config.addr, "0.0.0.0:3000");
    }
}
