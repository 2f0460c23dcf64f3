//! This crate contains the pricing domain types and all shared fullstack
//! server functions.

pub mod gp_amount;
pub mod price_channel;
pub mod price_engine;
pub mod price_snapshot;
pub mod usd_price;

#[cfg(not(target_arch = "wasm32"))]
pub mod config;
#[cfg(not(target_arch = "wasm32"))]
mod price_caching;
#[cfg(not(target_arch = "wasm32"))]
pub mod price_feed;
#[cfg(not(target_arch = "wasm32"))]
mod price_sources;

use dioxus::prelude::*;
use price_snapshot::PriceSnapshot;

pub type ApiError = anyhow::Error;

/// Current live prices: ours, the competitor quotes, their average and the
/// savings percentage. Served through the snapshot cache.
#[get("/api/v1/prices/live")]
pub async fn live_prices() -> Result<PriceSnapshot, ApiError> {
    Ok(price_caching::current_snapshot().await?)
}

/// Snapshots recorded over the trailing `days` (clamped to 30), oldest
/// first.
#[post("/api/v1/prices/history")]
pub async fn price_history(days: u32) -> Result<Vec<PriceSnapshot>, ApiError> {
    let days = days.min(30);
    Ok(price_caching::snapshot_history(days).await)
}
