pub mod feedback;
pub mod page;
pub mod portfolio;
pub mod project;
pub mod template;
pub mod text;
pub mod work;

use serde::Deserialize;

/// Upper bound for `?limit=` on ranked listings.
pub const MAX_HOT_TEMPLATES: usize = 50;

#[derive(Debug, Clone, Deserialize)]
pub struct HotTemplatesQuery {
    pub limit: Option<usize>,
}

impl HotTemplatesQuery {
    pub fn limit(&self, default: usize) -> usize {
        self.limit.unwrap_or(default).min(MAX_HOT_TEMPLATES)
    }
}
