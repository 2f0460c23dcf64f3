//! The complete set of price values needed to render the storefront at one
//! instant. Snapshots are replaced wholesale on every update; no history is
//! kept on the client and there is no identity beyond "current".

use std::collections::BTreeMap;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::usd_price::UsdPrice;

/// Current pricing state as served by `GET /api/v1/prices/live` and pushed
/// over the price channel.
///
/// Every field defaults when absent from the payload; presence checks with
/// defaults are the only validation applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSnapshot {
    /// Our price per 1M GP.
    #[serde(default)]
    pub our_price: UsdPrice,
    /// Mean competitor price per 1M GP.
    #[serde(default)]
    pub average_competitor: UsdPrice,
    /// Percent saved buying from us rather than the average competitor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub savings_percent: Option<f64>,
    #[serde(default)]
    pub competitor_prices: CompetitorPrices,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl PriceSnapshot {
    /// Percentage a competitor quote sits above (positive) or below
    /// (negative) our price. `None` while our price is still zero.
    pub fn percent_diff_vs_ours(&self, competitor: UsdPrice) -> Option<f64> {
        if self.our_price.is_zero() {
            return None;
        }
        let ours = self.our_price.as_cents() as f64;
        let theirs = competitor.as_cents() as f64;
        Some((theirs - ours) / ours * 100.0)
    }

    /// Renders a percent difference with an explicit sign: "+14.3%", "-14.3%".
    pub fn format_percent_diff(diff: f64) -> String {
        format!("{:+.1}%", diff)
    }
}

/// A map of competitor name to quoted price per 1M GP.
///
/// Wraps a `BTreeMap` so callers get a type-safe API and a deterministic,
/// name-ordered iteration for table rendering. Serializes as a plain JSON
/// object of dollar amounts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitorPrices(BTreeMap<String, UsdPrice>);

impl CompetitorPrices {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Inserts or updates a competitor quote, returning any previous one.
    pub fn insert(&mut self, name: impl Into<String>, price: UsdPrice) -> Option<UsdPrice> {
        self.0.insert(name.into(), price)
    }

    pub fn get(&self, name: &str) -> Option<UsdPrice> {
        self.0.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over `(name, price)` pairs in name order.
    pub fn iter(&self) -> Iter<'_> {
        Iter(self.0.iter())
    }
}

/// An iterator over the quotes in a `CompetitorPrices` map.
pub struct Iter<'a>(std::collections::btree_map::Iter<'a, String, UsdPrice>);

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, UsdPrice);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(name, &price)| (name.as_str(), price))
    }
}

/// Allows `CompetitorPrices` to be used directly in `for` loops.
impl<'a> IntoIterator for &'a CompetitorPrices {
    type Item = (&'a str, UsdPrice);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<(String, UsdPrice)> for CompetitorPrices {
    fn from_iter<T: IntoIterator<Item = (String, UsdPrice)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_payload() {
        let json = r#"{
            "our_price": 10.5,
            "average_competitor": 12.25,
            "savings_percent": 14.3,
            "competitor_prices": {"PlayerAuctions": 12.0, "Eldorado": 9.0},
            "updated_at": "2026-08-05T00:00:00Z"
        }"#;
        let snapshot: PriceSnapshot = serde_json::from_str(json).unwrap();

        assert_eq!(snapshot.our_price, UsdPrice::from_cents(1050));
        assert_eq!(snapshot.average_competitor, UsdPrice::from_cents(1225));
        assert_eq!(snapshot.savings_percent, Some(14.3));
        assert_eq!(
            snapshot.competitor_prices.get("Eldorado"),
            Some(UsdPrice::from_cents(900))
        );
        assert!(snapshot.updated_at.is_some());
    }

    #[test]
    fn missing_fields_default_to_zero() {
        let snapshot: PriceSnapshot = serde_json::from_str(r#"{"our_price": 0.25}"#).unwrap();
        assert_eq!(snapshot.our_price, UsdPrice::from_cents(25));
        assert!(snapshot.average_competitor.is_zero());
        assert_eq!(snapshot.savings_percent, None);
        assert!(snapshot.competitor_prices.is_empty());

        let empty: PriceSnapshot = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, PriceSnapshot::default());
    }

    #[test]
    fn percent_diff_carries_the_quote_sign() {
        let snapshot = PriceSnapshot {
            our_price: UsdPrice::from_float(10.5),
            ..Default::default()
        };

        let dearer = snapshot
            .percent_diff_vs_ours(UsdPrice::from_float(12.0))
            .unwrap();
        let cheaper = snapshot
            .percent_diff_vs_ours(UsdPrice::from_float(9.0))
            .unwrap();

        assert_eq!(PriceSnapshot::format_percent_diff(dearer), "+14.3%");
        assert_eq!(PriceSnapshot::format_percent_diff(cheaper), "-14.3%");
    }

    #[test]
    fn percent_diff_is_undefined_at_zero_price() {
        let snapshot = PriceSnapshot::default();
        assert_eq!(
            snapshot.percent_diff_vs_ours(UsdPrice::from_float(1.0)),
            None
        );
    }

    #[test]
    fn competitor_rows_iterate_in_name_order() {
        let mut prices = CompetitorPrices::new();
        prices.insert("RPGStash", UsdPrice::from_float(1.0));
        prices.insert("Eldorado", UsdPrice::from_float(0.9));
        prices.insert("PlayerAuctions", UsdPrice::from_float(1.1));

        let names: Vec<&str> = prices.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["Eldorado", "PlayerAuctions", "RPGStash"]);
    }
}
