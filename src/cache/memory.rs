use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use std::collections::HashMap;
use std::ops::RangeInclusive;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use super::{CacheError, CacheStore};

#[derive(Clone)]
struct CachedValue {
    payload: String,
    ttl: Option<Duration>,
}

/// Expires each entry after the TTL it was written with.
struct PerEntryTtl;

impl Expiry<String, CachedValue> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CachedValue,
        _created_at: Instant,
    ) -> Option<Duration> {
        value.ttl
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &CachedValue,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        value.ttl
    }
}

/// In-process cache used when no Redis is configured.
///
/// Sorted sets break score ties by member, descending, like Redis `ZREVRANGE`.
pub struct MemoryCache {
    values: Cache<String, CachedValue>,
    sorted_sets: RwLock<HashMap<String, HashMap<String, f64>>>,
}

impl MemoryCache {
    pub fn new(max_capacity: u64) -> Self {
        let values = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(PerEntryTtl)
            .build();

        Self {
            values,
            sorted_sets: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new(10_000)
    }
}

impl std::fmt::Debug for MemoryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryCache")
            .field("entries", &self.values.entry_count())
            .finish()
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self.values.get(key).await.map(|v| v.payload))
    }

    async fn set(
        &self,
        key: &str,
        value: String,
        ttl: Option<Duration>,
    ) -> Result<(), CacheError> {
        self.values
            .insert(
                key.to_string(),
                CachedValue {
                    payload: value,
                    ttl,
                },
            )
            .await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.values.invalidate(key).await;
        self.sorted_sets.write().await.remove(key);
        Ok(())
    }

    async fn zincr_by(&self, key: &str, member: &str, by: f64) -> Result<f64, CacheError> {
        let mut sets = self.sorted_sets.write().await;
        let score = sets
            .entry(key.to_string())
            .or_default()
            .entry(member.to_string())
            .or_insert(0.0);
        *score += by;
        Ok(*score)
    }

    async fn zrev_range(
        &self,
        key: &str,
        start: isize,
        stop: isize,
    ) -> Result<Vec<String>, CacheError> {
        let sets = self.sorted_sets.read().await;
        let Some(set) = sets.get(key) else {
            return Ok(Vec::new());
        };

        let mut ranked: Vec<(&String, f64)> = set.iter().map(|(m, s)| (m, *s)).collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| b.0.cmp(a.0)));

        Ok(match resolve_range(ranked.len(), start, stop) {
            Some(range) => ranked[range].iter().map(|(m, _)| (*m).clone()).collect(),
            None => Vec::new(),
        })
    }

    async fn zscore(&self, key: &str, member: &str) -> Result<Option<f64>, CacheError> {
        let sets = self.sorted_sets.read().await;
        Ok(sets.get(key).and_then(|set| set.get(member).copied()))
    }
}

/// Translate Redis-style inclusive, possibly negative, indexes into a slice range.
fn resolve_range(len: usize, start: isize, stop: isize) -> Option<RangeInclusive<usize>> {
    let len = len as isize;
    if len == 0 {
        return None;
    }

    let start = if start < 0 { (len + start).max(0) } else { start };
    let stop = if stop < 0 { len + stop } else { stop.min(len - 1) };

    if start > stop || start >= len {
        return None;
    }

    Some(start as usize..=stop as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_range_matches_redis_semantics() {
        assert_eq!(resolve_range(5, 0, 2), Some(0..=2));
        assert_eq!(resolve_range(5, 0, -1), Some(0..=4));
        assert_eq!(resolve_range(5, -2, -1), Some(3..=4));
        assert_eq!(resolve_range(3, 0, 10), Some(0..=2));
        assert_eq!(resolve_range(3, 4, 10), None);
        assert_eq!(resolve_range(3, 2, 1), None);
        assert_eq!(resolve_range(0, 0, -1), None);
    }

    #[tokio::test]
    async fn values_round_trip_and_delete() {
        let cache = MemoryCache::default();
        assert_eq!(cache.get("k").await.unwrap(), None);

        cache.set("k", "v1".to_string(), None).await.unwrap();
        assert_eq!(cache.get("k").await.unwrap().as_deref(), Some("v1"));

        cache.set("k", "v2".to_string(), None).await.unwrap();
        assert_eq!(cache.get("k").await.unwrap().as_deref(), Some("v2"));

        cache.delete("k").await.unwrap();
        assert_eq!(cache.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn entries_expire_after_their_ttl() {
        let cache = MemoryCache::default();
        cache
            .set("short", "x".to_string(), Some(Duration::from_millis(50)))
            .await
            .unwrap();
        cache.set("forever", "y".to_string(), None).await.unwrap();

        tokio::time::sleep(Duration::from_millis(150)).await;

        assert_eq!(cache.get("short").await.unwrap(), None);
        assert_eq!(cache.get("forever").await.unwrap().as_deref(), Some("y"));
    }

    #[tokio::test]
    async fn sorted_set_ranks_by_score_then_member_descending() {
        let cache = MemoryCache::default();
        for member in ["a", "b", "b", "c", "c", "c", "d"] {
            cache.zincr_by("rank", member, 1.0).await.unwrap();
        }

        assert_eq!(
            cache.zrev_range("rank", 0, -1).await.unwrap(),
            vec!["c", "b", "d", "a"]
        );
        assert_eq!(cache.zrev_range("rank", 0, 1).await.unwrap(), vec!["c", "b"]);
        assert_eq!(cache.zscore("rank", "c").await.unwrap(), Some(3.0));
        assert_eq!(cache.zscore("rank", "zzz").await.unwrap(), None);
        assert!(cache.zrev_range("missing", 0, -1).await.unwrap().is_empty());
    }
}
