pub mod memory;
pub mod ranking;
pub mod read_through;

use async_trait::async_trait;
use redis::{Client, RedisError, aio::ConnectionManager};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

pub use memory::MemoryCache;
pub use ranking::TemplateRanking;
pub use read_through::read_through;

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    Redis(#[from] RedisError),

    #[error("Cache payload error: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("Cache unavailable: {0}")]
    Unavailable(String),
}

/// Key/value and sorted-set operations against a fast, possibly absent, store.
///
/// Values are opaque strings; (de)serialization belongs to the caller.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Get a value from cache
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Set a value in cache, optionally expiring after `ttl`
    async fn set(&self, key: &str, value: String, ttl: Option<Duration>)
    -> Result<(), CacheError>;

    /// Delete a key from cache
    async fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// Add `by` to `member`'s score in the sorted set at `key`, creating either
    /// as needed. Returns the new score.
    async fn zincr_by(&self, key: &str, member: &str, by: f64) -> Result<f64, CacheError>;

    /// Members ranked `start..=stop` by descending score. Negative indexes count
    /// from the lowest-ranked member, as in Redis.
    async fn zrev_range(&self, key: &str, start: isize, stop: isize)
    -> Result<Vec<String>, CacheError>;

    async fn zscore(&self, key: &str, member: &str) -> Result<Option<f64>, CacheError>;
}

/// Handle shared by every component that talks to the cache.
pub type SharedCache = Arc<dyn CacheStore>;

#[derive(Clone)]
pub struct RedisCache {
    connection: ConnectionManager,
}

impl fmt::Debug for RedisCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisCache")
            .field("connection", &"ConnectionManager")
            .finish()
    }
}

impl RedisCache {
    pub async fn new(redis_url: &str) -> Result<Self, RedisError> {
        let client = Client::open(redis_url)?;
        let connection = ConnectionManager::new(client).await?;
        Ok(Self { connection })
    }
}

#[async_trait]
impl CacheStore for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let value: Option<String> = redis::cmd("GET")
            .arg(key)
            .query_async(&mut self.connection.clone())
            .await?;
        Ok(value)
    }

    async fn set(
        &self,
        key: &str,
        value: String,
        ttl: Option<Duration>,
    ) -> Result<(), CacheError> {
        let mut cmd = redis::cmd("SET");
        cmd.arg(key).arg(value);

        if let Some(ttl) = ttl {
            // EX 0 is rejected by Redis
            cmd.arg("EX").arg(ttl.as_secs().max(1));
        }

        let _: () = cmd.query_async(&mut self.connection.clone()).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let _: () = redis::cmd("DEL")
            .arg(key)
            .query_async(&mut self.connection.clone())
            .await?;
        Ok(())
    }

    async fn zincr_by(&self, key: &str, member: &str, by: f64) -> Result<f64, CacheError> {
        let score: f64 = redis::cmd("ZINCRBY")
            .arg(key)
            .arg(by)
            .arg(member)
            .query_async(&mut self.connection.clone())
            .await?;
        Ok(score)
    }

    async fn zrev_range(
        &self,
        key: &str,
        start: isize,
        stop: isize,
    ) -> Result<Vec<String>, CacheError> {
        let members: Vec<String> = redis::cmd("ZREVRANGE")
            .arg(key)
            .arg(start)
            .arg(stop)
            .query_async(&mut self.connection.clone())
            .await?;
        Ok(members)
    }

    async fn zscore(&self, key: &str, member: &str) -> Result<Option<f64>, CacheError> {
        let score: Option<f64> = redis::cmd("ZSCORE")
            .arg(key)
            .arg(member)
            .query_async(&mut self.connection.clone())
            .await?;
        Ok(score)
    }
}

/// Cache key generators
pub mod keys {
    /// Key holding every template with its pages
    pub fn all_templates() -> String {
        "templates:all".to_string()
    }

    /// Key holding the portfolios of one owner
    pub fn owner_portfolios(owner_id: &str) -> String {
        format!("portfolios:{}", owner_id)
    }

    /// Sorted set scoring templates by how many portfolios were created with them
    pub fn template_ranking() -> String {
        "templates:usage".to_string()
    }
}

/// Cache configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// `None` keeps entries until they are overwritten or deleted.
    pub templates_ttl: Option<Duration>,
    pub portfolios_ttl: Option<Duration>,
    /// Drop the owner's cached portfolio list after a committed save.
    pub invalidate_owner_on_save: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            templates_ttl: None,
            portfolios_ttl: None,
            invalidate_owner_on_save: true,
        }
    }
}

impl CacheConfig {
    /// Build from any variable source. Unparsable values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            templates_ttl: parse_ttl_secs(&lookup, "CACHE_TTL_TEMPLATES"),
            portfolios_ttl: parse_ttl_secs(&lookup, "CACHE_TTL_PORTFOLIOS"),
            invalidate_owner_on_save: lookup("CACHE_INVALIDATE_ON_SAVE")
                .and_then(|v| crate::config::parse_bool(&v))
                .unwrap_or(true),
        }
    }
}

fn parse_ttl_secs<F>(lookup: &F, env_var: &str) -> Option<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(env_var)?;
    match raw.trim().parse::<u64>() {
        Ok(0) => None,
        Ok(secs) => Some(Duration::from_secs(secs)),
        Err(_) => {
            tracing::warn!(variable = env_var, value = %raw, "ignoring unparsable cache TTL");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn keys_follow_query_shape() {
        assert_eq!(keys::all_templates(), "templates:all");
        assert_eq!(keys::owner_portfolios("o-42"), "portfolios:o-42");
        assert_eq!(keys::template_ranking(), "templates:usage");
    }

    #[test]
    fn config_defaults_to_no_expiry_and_invalidation_on() {
        let config = CacheConfig::from_lookup(|_| None);
        assert_eq!(config, CacheConfig::default());
    }

    #[test]
    fn config_reads_ttls_and_switch() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("CACHE_TTL_TEMPLATES", "600"),
            ("CACHE_TTL_PORTFOLIOS", "0"),
            ("CACHE_INVALIDATE_ON_SAVE", "false"),
        ]);
        let config = CacheConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.templates_ttl, Some(Duration::from_secs(600)));
        assert_eq!(config.portfolios_ttl, None);
        assert!(!config.invalidate_owner_on_save);
    }

    #[test]
    fn bad_ttl_is_ignored() {
        let config = CacheConfig::from_lookup(|name| {
            (name == "CACHE_TTL_TEMPLATES").then(|| "soon".to_string())
        });
        assert_eq!(config.templates_ttl, None);
    }
}
