//! Server-side snapshot cache and bounded history.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;

use chrono::Duration as ChronoDuration;
use chrono::Utc;
use dioxus_logger::tracing;
use tokio::sync::OnceCell;
use tokio::sync::RwLock;

use crate::config::FeedConfig;
use crate::price_engine;
use crate::price_snapshot::PriceSnapshot;
use crate::price_sources;
use crate::ApiError;

/// Snapshots retained for the history endpoint: four weeks at the default
/// 15-minute cadence.
const HISTORY_CAP: usize = 2688;

#[derive(Clone, Debug)]
struct CachedSnapshot {
    snapshot: PriceSnapshot,
    last_fetched: Instant,
}

type SnapshotCache = Arc<RwLock<Option<CachedSnapshot>>>;
type SnapshotHistory = Arc<RwLock<VecDeque<PriceSnapshot>>>;

async fn cache() -> &'static SnapshotCache {
    static CACHE: OnceCell<SnapshotCache> = OnceCell::const_new();
    CACHE
        .get_or_init(|| async { Arc::new(RwLock::new(None)) })
        .await
}

async fn history() -> &'static SnapshotHistory {
    static HISTORY: OnceCell<SnapshotHistory> = OnceCell::const_new();
    HISTORY
        .get_or_init(|| async { Arc::new(RwLock::new(VecDeque::new())) })
        .await
}

/// Retrieves the current snapshot, using a lazy, time-based cache.
///
/// This is the single read path behind `GET /api/v1/prices/live`. The
/// underlying sources are only queried when the cache is empty or older
/// than the configured refresh interval; if a refresh fails and a stale
/// snapshot exists, the stale one is served.
pub async fn current_snapshot() -> Result<PriceSnapshot, ApiError> {
    let config = FeedConfig::from_env();
    let cache_lock = cache().await;

    // Check for a valid, non-stale entry first with a read lock.
    let read_lock = cache_lock.read().await;
    if let Some(cached) = &*read_lock {
        if cached.last_fetched.elapsed() < config.refresh_interval {
            return Ok(cached.snapshot.clone());
        }
    }
    drop(read_lock); // Release read lock before attempting to acquire a write lock.

    let mut write_lock = cache_lock.write().await;

    // Another task might have refreshed while we waited for the write lock.
    if let Some(cached) = &*write_lock {
        if cached.last_fetched.elapsed() < config.refresh_interval {
            return Ok(cached.snapshot.clone());
        }
    }

    match build_snapshot(&config).await {
        Ok(snapshot) => {
            store(&mut *write_lock, snapshot.clone()).await;
            Ok(snapshot)
        }
        Err(e) => match &*write_lock {
            Some(stale) => {
                tracing::warn!("price refresh failed, serving stale snapshot: {e}");
                Ok(stale.snapshot.clone())
            }
            None => Err(e),
        },
    }
}

/// Rebuilds the snapshot unconditionally. Called by the scheduler.
pub async fn refresh_snapshot() -> Result<PriceSnapshot, ApiError> {
    let config = FeedConfig::from_env();
    let snapshot = build_snapshot(&config).await?;

    let cache_lock = cache().await;
    let mut write_lock = cache_lock.write().await;
    store(&mut *write_lock, snapshot.clone()).await;

    Ok(snapshot)
}

/// Snapshots recorded over the trailing `days`, oldest first.
pub async fn snapshot_history(days: u32) -> Vec<PriceSnapshot> {
    let since = Utc::now() - ChronoDuration::days(days as i64);
    let history_lock = history().await;
    let read_lock = history_lock.read().await;
    read_lock
        .iter()
        .filter(|snapshot| snapshot.updated_at.is_some_and(|at| at >= since))
        .cloned()
        .collect()
}

async fn build_snapshot(config: &FeedConfig) -> Result<PriceSnapshot, ApiError> {
    let quotes = price_sources::fetch_all_quotes().await?;

    let our_price = match config.price_override {
        Some(pinned) => pinned,
        None => price_engine::calculate_our_price(&quotes),
    };
    let average = price_engine::average_price(&quotes);
    let savings = (!quotes.is_empty()).then(|| price_engine::savings_percent(our_price, average));

    Ok(PriceSnapshot {
        our_price,
        average_competitor: average,
        savings_percent: savings,
        competitor_prices: quotes,
        updated_at: Some(Utc::now()),
    })
}

async fn store(cache_entry: &mut Option<CachedSnapshot>, snapshot: PriceSnapshot) {
    let history_lock = history().await;
    let mut history = history_lock.write().await;
    history.push_back(snapshot.clone());
    while history.len() > HISTORY_CAP {
        history.pop_front();
    }

    *cache_entry = Some(CachedSnapshot {
        snapshot,
        last_fetched: Instant::now(),
    });
}
