//! Competitor quote sources.
//!
//! Each source exposes a JSON endpoint; the quote is pulled out of the
//! response with a generic `serde_json::Value` path walk so new sources are
//! a table entry, not a new response struct.

use dioxus_logger::tracing;
use serde_json::Value;

use crate::price_snapshot::CompetitorPrices;
use crate::usd_price::UsdPrice;
use crate::ApiError;

/// A competitor storefront we track.
pub struct CompetitorSource {
    pub name: &'static str,
    url: &'static str,
    /// Path of object keys leading to the per-1M-GP dollar quote.
    quote_path: &'static [&'static str],
    enabled: bool,
}

/// The storefronts tracked for price comparison.
pub const COMPETITOR_SOURCES: &[CompetitorSource] = &[
    CompetitorSource {
        name: "PlayerAuctions",
        url: "https://www.playerauctions.com/api/market/osrs-gold/price",
        quote_path: &["offer", "unit_price"],
        enabled: true,
    },
    CompetitorSource {
        name: "Sythe",
        url: "https://www.sythe.org/api/osrs-gold/price",
        quote_path: &["price"],
        enabled: false, // requires login
    },
    CompetitorSource {
        name: "OSRS Exchange",
        url: "https://osrs.exchange/api/v1/gold/price",
        quote_path: &["gold", "price"],
        enabled: true,
    },
    CompetitorSource {
        name: "Eldorado",
        url: "https://www.eldorado.gg/api/flexibleOffers/osrs-gold/cheapest",
        quote_path: &["pricePerUnit", "amount"],
        enabled: true,
    },
    CompetitorSource {
        name: "RPGStash",
        url: "https://www.rpgstash.com/api/products/osrs-gold/price",
        quote_path: &["product", "price"],
        enabled: true,
    },
];

impl CompetitorSource {
    async fn fetch_quote(&self, client: &reqwest::Client) -> Result<UsdPrice, ApiError> {
        let resp: Value = client.get(self.url).send().await?.json().await?;

        let quote = self
            .quote_path
            .iter()
            .try_fold(&resp, |node, key| node.get(key))
            .and_then(Value::as_f64)
            .ok_or_else(|| anyhow::anyhow!("no quote at {:?} in {} response", self.quote_path, self.name))?;

        Ok(UsdPrice::from_float(quote))
    }
}

/// Fetches quotes from all enabled sources concurrently.
///
/// A source that fails or returns an unusable payload is logged and
/// skipped; the result carries whatever quotes survived.
pub async fn fetch_all_quotes() -> Result<CompetitorPrices, ApiError> {
    let client = reqwest::Client::builder()
        .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
        .build()?;

    let enabled: Vec<&CompetitorSource> = COMPETITOR_SOURCES
        .iter()
        .filter(|source| source.enabled)
        .collect();

    let results =
        futures::future::join_all(enabled.iter().map(|source| source.fetch_quote(&client))).await;

    let mut quotes = CompetitorPrices::new();
    for (source, result) in enabled.iter().zip(results) {
        match result {
            Ok(price) => {
                quotes.insert(source.name, price);
            }
            Err(e) => tracing::warn!("error fetching {} quote: {e}", source.name),
        }
    }

    Ok(quotes)
}
