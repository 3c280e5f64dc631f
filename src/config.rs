use crate::cache::CacheConfig;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_HOT_TEMPLATES: usize = 5;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Process configuration, read from the environment (and `.env` via `dotenv`).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    /// Without a Redis URL the service caches in process memory.
    pub redis_url: Option<String>,
    pub port: u16,
    pub run_migrations: bool,
    pub hot_templates_limit: usize,
    pub cache: CacheConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let redis_url = lookup("REDIS_URL").filter(|v| !v.trim().is_empty());

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };

        let run_migrations = match lookup("RUN_MIGRATIONS") {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::Invalid {
                name: "RUN_MIGRATIONS",
                value: raw,
            })?,
            None => true,
        };

        let hot_templates_limit = match lookup("HOT_TEMPLATES_LIMIT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "HOT_TEMPLATES_LIMIT",
                value: raw,
            })?,
            None => DEFAULT_HOT_TEMPLATES,
        };

        Ok(Self {
            database_url,
            redis_url,
            port,
            run_migrations,
            hot_templates_limit,
            cache: CacheConfig::from_lookup(&lookup),
        })
    }
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<&str, &str> = vars.iter().copied().collect();
        move |name| vars.get(name).map(|v| v.to_string())
    }

    #[test]
    fn database_url_is_required() {
        let err = AppConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn defaults_apply() {
        let config =
            AppConfig::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://db/app")])).unwrap();

        assert_eq!(config.redis_url, None);
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(config.run_migrations);
        assert_eq!(config.hot_templates_limit, DEFAULT_HOT_TEMPLATES);
        assert_eq!(config.cache, CacheConfig::default());
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://db/app"),
            ("REDIS_URL", "redis://cache:6379"),
            ("PORT", "9000"),
            ("RUN_MIGRATIONS", "off"),
            ("HOT_TEMPLATES_LIMIT", "10"),
        ]))
        .unwrap();

        assert_eq!(config.redis_url.as_deref(), Some("redis://cache:6379"));
        assert_eq!(config.port, 9000);
        assert!(!config.run_migrations);
        assert_eq!(config.hot_templates_limit, 10);
    }

    #[test]
    fn bad_port_is_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://db/app"),
            ("PORT", "eighty"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "PORT", .. }));
    }
}
