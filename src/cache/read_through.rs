use serde::{Serialize, de::DeserializeOwned};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

use super::CacheStore;

/// Cache-aside read.
///
/// Returns the cached value for `key` when it is present and decodes. Otherwise
/// runs `fetch` against the store, writes its result back under `key` on a
/// best-effort basis and returns it. Cache failures are logged and never
/// returned; only `fetch` can fail the call.
pub async fn read_through<T, E, F, Fut>(
    cache: &dyn CacheStore,
    key: &str,
    ttl: Option<Duration>,
    fetch: F,
) -> Result<T, E>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    match cache.get(key).await {
        Ok(Some(raw)) => match serde_json::from_str::<T>(&raw) {
            Ok(value) => {
                debug!(key, "cache hit");
                return Ok(value);
            }
            Err(e) => warn!(key, error = %e, "discarding undecodable cache entry"),
        },
        Ok(None) => debug!(key, "cache miss"),
        Err(e) => warn!(key, error = %e, "cache read failed, falling back to store"),
    }

    let value = fetch().await?;

    match serde_json::to_string(&value) {
        Ok(raw) => {
            if let Err(e) = cache.set(key, raw, ttl).await {
                warn!(key, error = %e, "cache write-back failed");
            }
        }
        Err(e) => warn!(key, error = %e, "could not serialize value for cache"),
    }

    Ok(value)
}
