//! Server configuration from environment variables.

use crate::error::ConfigError;
use crate::pagination::DEFAULT_PAGE_SIZE;
use std::net::SocketAddr;

/// Which [`crate::store::TriviaStore`] the server runs against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageKind {
    Postgres,
    Memory,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub questions_per_page: usize,
    pub max_connections: u32,
    pub body_limit_bytes: usize,
    pub seed_categories: bool,
    pub storage: StorageKind,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            database_url: "postgres://localhost/trivia".into(),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 5000)),
            questions_per_page: DEFAULT_PAGE_SIZE,
            max_connections: 5,
            body_limit_bytes: 64 * 1024,
            seed_categories: true,
            storage: StorageKind::Postgres,
        }
    }
}

impl ServerConfig {
    /// Read from the process environment. Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment in production, a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = ServerConfig::default();
        if let Some(url) = lookup("DATABASE_URL") {
            cfg.database_url = url;
        }
        if let Some(v) = lookup("BIND_ADDR") {
            cfg.bind_addr = parse("BIND_ADDR", &v)?;
        }
        if let Some(v) = lookup("QUESTIONS_PER_PAGE") {
            let n: usize = parse("QUESTIONS_PER_PAGE", &v)?;
            if n == 0 {
                return Err(ConfigError::Invalid { key: "QUESTIONS_PER_PAGE", value: v });
            }
            cfg.questions_per_page = n;
        }
        if let Some(v) = lookup("DB_MAX_CONNECTIONS") {
            cfg.max_connections = parse("DB_MAX_CONNECTIONS", &v)?;
        }
        if let Some(v) = lookup("BODY_LIMIT_BYTES") {
            cfg.body_limit_bytes = parse("BODY_LIMIT_BYTES", &v)?;
        }
        if let Some(v) = lookup("TRIVIA_SEED_CATEGORIES") {
            cfg.seed_categories = parse_bool("TRIVIA_SEED_CATEGORIES", &v)?;
        }
        if let Some(v) = lookup("TRIVIA_STORAGE") {
            cfg.storage = match v.trim().to_ascii_lowercase().as_str() {
                "postgres" => StorageKind::Postgres,
                "memory" => StorageKind::Memory,
                _ => return Err(ConfigError::Invalid { key: "TRIVIA_STORAGE", value: v }),
            };
        }
        Ok(cfg)
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: value.to_string(),
    })
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid { key, value: value.to_string() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        ServerConfig::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = from_pairs(&[]).unwrap();
        assert_eq!(cfg.questions_per_page, 10);
        assert_eq!(cfg.bind_addr.port(), 5000);
        assert!(cfg.seed_categories);
        assert_eq!(cfg.storage, StorageKind::Postgres);
    }

    #[test]
    fn overrides_are_applied() {
        let cfg = from_pairs(&[
            ("QUESTIONS_PER_PAGE", "25"),
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("TRIVIA_SEED_CATEGORIES", "off"),
            ("TRIVIA_STORAGE", "memory"),
        ])
        .unwrap();
        assert_eq!(cfg.questions_per_page, 25);
        assert_eq!(cfg.bind_addr.port(), 8080);
        assert!(!cfg.seed_categories);
        assert_eq!(cfg.storage, StorageKind::Memory);
    }

    #[test]
    fn zero_page_size_is_invalid() {
        let err = from_pairs(&[("QUESTIONS_PER_PAGE", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "QUESTIONS_PER_PAGE", .. }));
    }

    #[test]
    fn garbage_bind_addr_is_invalid() {
        assert!(from_pairs(&[("BIND_ADDR", "not-an-addr")]).is_err());
    }
}
