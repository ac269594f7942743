//! Visitor and pageview counters
//!
//! A small set of monotonic counters kept in a [`KvStore`]: lifetime and
//! per-day visitor counts, a global pageview count, and one counter per
//! tracked path. The store is injected so the day-boundary and new-visitor
//! logic is testable without real persistence.
//!
//! Counter updates never raise past this module: a failing store is logged
//! and reads degrade to a fixed fallback snapshot.

mod store;

pub use store::{FileStore, KvStore, MemoryStore, StoreError};

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Store key of the global stats record.
pub const STATS_KEY: &str = "blog_visitor_stats";
/// Store key of the persisted visitor identifier.
pub const VISITOR_KEY: &str = "blog_visitor_id";

const PAGE_VIEW_PREFIX: &str = "page_views_";

/// The counters, as persisted under [`STATS_KEY`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitorStats {
    pub total_visitors: u64,
    pub today_visitors: u64,
    pub page_views: u64,
    /// RFC 3339 timestamp of the last recorded visit; empty before the first
    pub last_visit: String,
    pub is_new_visitor: bool,
}

impl Default for VisitorStats {
    fn default() -> Self {
        Self {
            total_visitors: 0,
            today_visitors: 0,
            page_views: 0,
            last_visit: String::new(),
            is_new_visitor: true,
        }
    }
}

/// Fixed placeholder numbers shown when the store is unavailable.
pub fn fallback_stats() -> VisitorStats {
    VisitorStats {
        total_visitors: 1250,
        today_visitors: 45,
        page_views: 3200,
        last_visit: Local::now().to_rfc3339(),
        is_new_visitor: true,
    }
}

/// A path with its accumulated view count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageViewCount {
    pub path: String,
    pub views: u64,
}

/// Tracks visits and pageviews against an injected store.
pub struct VisitorTracker<S: KvStore> {
    store: S,
}

impl<S: KvStore> VisitorTracker<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Record one view of `path` now.
    pub fn record_page_view(&mut self, path: &str) {
        self.record_page_view_at(path, Local::now());
    }

    /// Record one view of `path` at a given instant. The explicit instant
    /// exists so tests can cross simulated day boundaries.
    pub fn record_page_view_at(&mut self, path: &str, now: DateTime<Local>) {
        let key = page_view_key(path);
        let views = match self.store.get(&key) {
            Ok(stored) => stored.and_then(|v| v.parse::<u64>().ok()).unwrap_or(0),
            Err(e) => {
                tracing::warn!("Pageview store read failed for {}: {}", path, e);
                return;
            }
        };
        if let Err(e) = self.store.set(&key, &(views + 1).to_string()) {
            tracing::warn!("Pageview store write failed for {}: {}", path, e);
            return;
        }

        self.update_visitor_stats(now);
    }

    /// The global counters, or the fallback snapshot when the store fails.
    pub fn stats(&self) -> VisitorStats {
        match self.store.get(STATS_KEY) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(stats) => stats,
                Err(e) => {
                    tracing::warn!("Corrupt stats record, using fallback: {}", e);
                    fallback_stats()
                }
            },
            Ok(None) => VisitorStats::default(),
            Err(e) => {
                tracing::warn!("Stats store unavailable, using fallback: {}", e);
                fallback_stats()
            }
        }
    }

    /// Accumulated view count of one path.
    pub fn page_views(&self, path: &str) -> u64 {
        match self.store.get(&page_view_key(path)) {
            Ok(stored) => stored.and_then(|v| v.parse::<u64>().ok()).unwrap_or(0),
            Err(e) => {
                tracing::warn!("Pageview store read failed for {}: {}", path, e);
                0
            }
        }
    }

    /// The most viewed paths, descending.
    pub fn top_pages(&self, limit: usize) -> Vec<PageViewCount> {
        let keys = match self.store.keys() {
            Ok(keys) => keys,
            Err(e) => {
                tracing::warn!("Pageview store scan failed: {}", e);
                return Vec::new();
            }
        };

        let mut pages: Vec<PageViewCount> = keys
            .into_iter()
            .filter_map(|key| {
                let suffix = key.strip_prefix(PAGE_VIEW_PREFIX)?;
                let views = self
                    .store
                    .get(&key)
                    .ok()
                    .flatten()
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(0);
                Some(PageViewCount {
                    path: suffix.replace('_', "/"),
                    views,
                })
            })
            .collect();

        pages.sort_by(|a, b| b.views.cmp(&a.views));
        pages.truncate(limit);
        pages
    }

    fn update_visitor_stats(&mut self, now: DateTime<Local>) {
        let mut stats = match self.store.get(STATS_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_default(),
            Ok(None) => VisitorStats::default(),
            Err(e) => {
                tracing::warn!("Stats store read failed: {}", e);
                return;
            }
        };

        let is_new_visitor = matches!(self.store.get(VISITOR_KEY), Ok(None));
        let last_visit_day = parse_visit_day(&stats.last_visit);
        let today = now.date_naive();

        stats.page_views += 1;

        if is_new_visitor {
            stats.total_visitors += 1;
            if let Err(e) = self.store.set(VISITOR_KEY, &mint_visitor_id(now)) {
                tracing::warn!("Visitor id write failed: {}", e);
            }
        }

        // First visit of the day resets the daily counter regardless of its
        // previous value; further same-day visits only count new visitors.
        if last_visit_day != Some(today) {
            stats.today_visitors = 1;
        } else if is_new_visitor {
            stats.today_visitors += 1;
        }

        stats.last_visit = now.to_rfc3339();
        stats.is_new_visitor = is_new_visitor;

        match serde_json::to_string(&stats) {
            Ok(raw) => {
                if let Err(e) = self.store.set(STATS_KEY, &raw) {
                    tracing::warn!("Stats store write failed: {}", e);
                }
            }
            Err(e) => tracing::warn!("Stats encoding failed: {}", e),
        }
    }
}

fn page_view_key(path: &str) -> String {
    format!("{}{}", PAGE_VIEW_PREFIX, path.replace('/', "_"))
}

fn parse_visit_day(last_visit: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(last_visit)
        .ok()
        .map(|dt| dt.with_timezone(&Local).date_naive())
}

fn mint_visitor_id(now: DateTime<Local>) -> String {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let mut hasher = DefaultHasher::new();
    now.timestamp_nanos_opt().unwrap_or_default().hash(&mut hasher);
    std::process::id().hash(&mut hasher);
    format!("visitor_{}_{:x}", now.timestamp_millis(), hasher.finish())
}
