use super::{CacheError, SharedCache, keys};

/// Popularity ranking of templates, kept in one sorted set.
///
/// Equal scores are ordered however the backing store orders them; callers
/// must not rely on a particular tie-break.
#[derive(Clone)]
pub struct TemplateRanking {
    cache: SharedCache,
    key: String,
}

impl TemplateRanking {
    pub fn new(cache: SharedCache) -> Self {
        Self {
            cache,
            key: keys::template_ranking(),
        }
    }

    /// Count one more portfolio created with `template_id`.
    pub async fn increment(&self, template_id: &str) -> Result<f64, CacheError> {
        self.cache.zincr_by(&self.key, template_id, 1.0).await
    }

    /// Up to `n` template ids, most used first.
    pub async fn top(&self, n: usize) -> Result<Vec<String>, CacheError> {
        if n == 0 {
            return Ok(Vec::new());
        }
        let stop = isize::try_from(n - 1).unwrap_or(isize::MAX);
        self.cache.zrev_range(&self.key, 0, stop).await
    }

    pub async fn score(&self, template_id: &str) -> Result<Option<f64>, CacheError> {
        self.cache.zscore(&self.key, template_id).await
    }
}
