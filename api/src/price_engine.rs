//! Price intelligence: derives our price per 1M GP from competitor quotes.
//!
//! The rule is 15% below the median competitor quote after IQR outlier
//! removal, never below the cost floor plus margin.

use itertools::Itertools;

use crate::price_snapshot::CompetitorPrices;
use crate::usd_price::UsdPrice;

/// Minimum cost per 1M GP (USD).
pub const COST_FLOOR: f64 = 0.20;
/// Minimum profit margin over the cost floor.
pub const PROFIT_MARGIN: f64 = 0.05;
/// Fraction of the median competitor quote we charge.
pub const DISCOUNT_RATE: f64 = 0.85;

/// The lowest price we ever quote: floor cost plus the minimum margin.
pub fn floor_price() -> UsdPrice {
    UsdPrice::from_float(COST_FLOOR * (1.0 + PROFIT_MARGIN))
}

/// Calculates our price from the current competitor quotes.
///
/// With no quotes at all the floor price is returned. With four or more,
/// quotes outside `[Q1 - 1.5*IQR, Q3 + 1.5*IQR]` are dropped first.
pub fn calculate_our_price(quotes: &CompetitorPrices) -> UsdPrice {
    if quotes.is_empty() {
        return floor_price();
    }

    let prices = quotes
        .iter()
        .map(|(_, price)| price.as_dollars())
        .sorted_by(|a, b| a.total_cmp(b))
        .collect_vec();

    let filtered = if prices.len() >= 4 {
        let q1 = percentile(&prices, 25.0);
        let q3 = percentile(&prices, 75.0);
        let iqr = q3 - q1;
        let lower = q1 - 1.5 * iqr;
        let upper = q3 + 1.5 * iqr;
        prices
            .iter()
            .copied()
            .filter(|p| (lower..=upper).contains(p))
            .collect_vec()
    } else {
        prices
    };

    let discounted = median(&filtered) * DISCOUNT_RATE;
    UsdPrice::from_float(discounted.max(floor_price().as_dollars()))
}

/// Mean of all quotes, rounded to the cent. Zero when there are none.
pub fn average_price(quotes: &CompetitorPrices) -> UsdPrice {
    if quotes.is_empty() {
        return UsdPrice::default();
    }
    let sum: f64 = quotes.iter().map(|(_, price)| price.as_dollars()).sum();
    UsdPrice::from_float(sum / quotes.len() as f64)
}

/// Percent saved buying at `ours` instead of `average`. Zero when the
/// average is zero (no quotes).
pub fn savings_percent(ours: UsdPrice, average: UsdPrice) -> f64 {
    if average.is_zero() {
        return 0.0;
    }
    (average.as_cents() - ours.as_cents()) as f64 / average.as_cents() as f64 * 100.0
}

/// Linear-interpolated percentile over an ascending-sorted slice.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        return sorted[lower];
    }
    sorted[lower] + (rank - lower as f64) * (sorted[upper] - sorted[lower])
}

fn median(sorted: &[f64]) -> f64 {
    percentile(sorted, 50.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quotes(pairs: &[(&str, f64)]) -> CompetitorPrices {
        pairs
            .iter()
            .map(|&(name, price)| (name.to_string(), UsdPrice::from_float(price)))
            .collect()
    }

    #[test]
    fn price_from_valid_quotes_undercuts_the_cheapest() {
        let quotes = quotes(&[
            ("Competitor1", 1.00),
            ("Competitor2", 0.95),
            ("Competitor3", 1.05),
            ("Competitor4", 0.98),
        ]);

        let ours = calculate_our_price(&quotes);

        assert!(ours > UsdPrice::default());
        assert!(ours < UsdPrice::from_float(0.95));
    }

    #[test]
    fn price_never_drops_below_the_floor() {
        let quotes = quotes(&[("Competitor1", 0.10), ("Competitor2", 0.12)]);
        assert_eq!(calculate_our_price(&quotes), floor_price());
    }

    #[test]
    fn empty_quotes_fall_back_to_the_floor() {
        assert_eq!(calculate_our_price(&CompetitorPrices::new()), floor_price());
    }

    #[test]
    fn outliers_do_not_move_the_price() {
        let quotes = quotes(&[
            ("Competitor1", 1.00),
            ("Competitor2", 0.95),
            ("Competitor3", 1.05),
            ("Competitor4", 10.00),
        ]);

        let ours = calculate_our_price(&quotes);
        assert!(ours < UsdPrice::from_float(1.50));
    }

    #[test]
    fn average_and_savings() {
        let quotes = quotes(&[("A", 1.00), ("B", 0.90)]);
        let average = average_price(&quotes);
        assert_eq!(average, UsdPrice::from_float(0.95));

        let savings = savings_percent(UsdPrice::from_float(0.76), average);
        assert!((savings - 20.0).abs() < 1e-9);

        assert_eq!(savings_percent(UsdPrice::from_float(0.5), UsdPrice::default()), 0.0);
    }

    #[test]
    fn percentile_interpolates_linearly() {
        let sorted = [0.95, 0.98, 1.00, 1.05];
        assert!((percentile(&sorted, 25.0) - 0.9725).abs() < 1e-9);
        assert!((percentile(&sorted, 50.0) - 0.99).abs() < 1e-9);
        assert!((percentile(&sorted, 75.0) - 1.0125).abs() < 1e-9);
        assert_eq!(percentile(&sorted, 100.0), 1.05);
    }
}
