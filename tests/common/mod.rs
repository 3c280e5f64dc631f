//! Shared fixtures: a migrated SQLite database per test plus cache doubles.
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, TimeZone, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tempfile::TempDir;

use springboard_backend::cache::{CacheConfig, CacheError, CacheStore, MemoryCache, SharedCache};
use springboard_backend::models::page::{self, BleedBox};
use springboard_backend::models::portfolio::SavePortfolio;
use springboard_backend::models::template;
use springboard_backend::services::{Clock, FeedbackService, IdGenerator, PortfolioService};
use springboard_backend::{create_pool, db};

pub const TEMPLATE_A: &str = "tpl-a";
pub const TEMPLATE_B: &str = "tpl-b";
pub const TEMPLATE_C: &str = "tpl-c";

pub struct TestDb {
    pub db: DatabaseConnection,
    // Dropping the directory deletes the database file.
    _dir: TempDir,
}

/// A fresh, migrated SQLite database holding three templates with two pages each.
pub async fn test_db() -> TestDb {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("test.db").display());

    let db = create_pool(&url).await.unwrap();
    db::run_migrations(&db).await.unwrap();
    seed_templates(&db).await;

    TestDb { db, _dir: dir }
}

async fn seed_templates(db: &DatabaseConnection) {
    let base = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();

    for (n, id) in [TEMPLATE_A, TEMPLATE_B, TEMPLATE_C].into_iter().enumerate() {
        insert_template(db, id, base + ChronoDuration::minutes(n as i64)).await;
    }
}

pub async fn insert_template(db: &DatabaseConnection, id: &str, created_at: DateTime<Utc>) {
    template::ActiveModel {
        id: Set(id.to_string()),
        name: Set(format!("Template {id}")),
        font_asset_key: Set(format!("fonts/{id}.ttf")),
        created_at: Set(created_at),
    }
    .insert(db)
    .await
    .unwrap();

    // Inserted out of order so the position sort is observable.
    for position in [1, 0] {
        page::ActiveModel {
            id: Set(format!("{id}-page-{position}")),
            template_id: Set(id.to_string()),
            position: Set(position),
            asset_key: Set(format!("pages/{id}/{position}.svg")),
            preview_asset_key: Set(format!("pages/{id}/{position}.png")),
            bleed: Set(Some(BleedBox([
                "0".to_string(),
                "0".to_string(),
                "210".to_string(),
                "297".to_string(),
            ]))),
            size: Set("210x297".to_string()),
            margin_top: Set("10".to_string()),
            margin_left: Set("10".to_string()),
            background_size: Set("cover".to_string()),
            is_content_page: Set(position > 0),
        }
        .insert(db)
        .await
        .unwrap();
    }
}

/// Ids `{prefix}-0`, `{prefix}-1`, ...
pub struct SequentialIds {
    prefix: &'static str,
    next: AtomicUsize,
}

impl SequentialIds {
    pub fn new(prefix: &'static str) -> Self {
        Self {
            prefix,
            next: AtomicUsize::new(0),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        format!("{}-{}", self.prefix, self.next.fetch_add(1, Ordering::SeqCst))
    }
}

/// A clock that moves one second forward every time it is read.
pub struct StepClock {
    now: Mutex<DateTime<Utc>>,
}

impl Default for StepClock {
    fn default() -> Self {
        Self {
            now: Mutex::new(Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()),
        }
    }
}

impl Clock for StepClock {
    fn now(&self) -> DateTime<Utc> {
        let mut now = self.now.lock().unwrap();
        let current = *now;
        *now = current + ChronoDuration::seconds(1);
        current
    }
}

/// A cache that is always down.
#[derive(Debug, Default)]
pub struct FailingCache;

fn down() -> CacheError {
    CacheError::Unavailable("connection refused".to_string())
}

#[async_trait]
impl CacheStore for FailingCache {
    async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
        Err(down())
    }

    async fn set(
        &self,
        _key: &str,
        _value: String,
        _ttl: Option<Duration>,
    ) -> Result<(), CacheError> {
        Err(down())
    }

    async fn delete(&self, _key: &str) -> Result<(), CacheError> {
        Err(down())
    }

    async fn zincr_by(&self, _key: &str, _member: &str, _by: f64) -> Result<f64, CacheError> {
        Err(down())
    }

    async fn zrev_range(
        &self,
        _key: &str,
        _start: isize,
        _stop: isize,
    ) -> Result<Vec<String>, CacheError> {
        Err(down())
    }

    async fn zscore(&self, _key: &str, _member: &str) -> Result<Option<f64>, CacheError> {
        Err(down())
    }
}

pub fn memory_cache() -> Arc<MemoryCache> {
    Arc::new(MemoryCache::default())
}

pub fn portfolio_service(
    db: &DatabaseConnection,
    cache: SharedCache,
    config: CacheConfig,
) -> PortfolioService {
    PortfolioService::new(db.clone(), cache, config).with_clock(Arc::new(StepClock::default()))
}

pub fn feedback_service(db: &DatabaseConnection) -> FeedbackService {
    FeedbackService::new(db.clone()).with_clock(Arc::new(StepClock::default()))
}

/// A save request built from JSON, the way clients send it.
pub fn save_request(value: serde_json::Value) -> SavePortfolio {
    serde_json::from_value(value).unwrap()
}

/// A new portfolio with one project holding one work and one text.
pub fn new_portfolio(title: &str, template_id: &str) -> SavePortfolio {
    save_request(serde_json::json!({
        "title": title,
        "template_id": template_id,
        "projects": [{
            "name": "Posters",
            "order": 0,
            "works": [{ "asset_key": "works/poster.png", "size": "100x100", "page_num": 1 }],
            "texts": [{ "content": "Hello", "font_size": "12", "page_num": 1 }],
        }],
    }))
}
