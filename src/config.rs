use std::env;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a number, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Postgres connection string. Without it the in-memory store is used.
    pub database_url: Option<String>,
    pub max_connections: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = parse_or(&lookup, "PORT", 8080)?;
        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());
        let max_connections = parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 5)?;

        Ok(Self {
            host,
            port,
            database_url,
            max_connections,
        })
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let config = load(&[]).unwrap();
        assert_eq!(config.bind_address(), ("127.0.0.1".to_string(), 8080));
        assert_eq!(config.database_url, None);
        assert_eq!(config.max_connections, 5);
    }

    #[test]
    fn reads_overrides() {
        let config = load(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "3000"),
            ("DATABASE_URL", "postgres://localhost/employees"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
        ])
        .unwrap();
        assert_eq!(config.bind_address(), ("0.0.0.0".to_string(), 3000));
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/employees"));
        assert_eq!(config.max_connections, 12);
    }

    #[test]
    fn blank_database_url_means_in_memory() {
        let config = load(&[("DATABASE_URL", "  ")]).unwrap();
        assert_eq!(config.database_url, None);
    }

    #[test]
    fn rejects_non_numeric_port() {
        let err = load(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }
}
