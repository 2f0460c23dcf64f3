//! Pure view-model for the pricing widgets: one immutable snapshot in,
//! display strings out. Components render these values and nothing else.

use api::gp_amount::GpAmount;
use api::price_snapshot::PriceSnapshot;

/// The three derived calculator labels.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorDisplay {
    pub amount_label: String,
    pub total: String,
    pub savings: String,
}

/// Derives the calculator labels from the current snapshot and slider
/// position.
///
/// `None` when no slider is present, in which case nothing renders and
/// nothing mutates.
pub fn calculator_display(
    snapshot: &PriceSnapshot,
    slider: Option<GpAmount>,
) -> Option<CalculatorDisplay> {
    let amount = slider?;
    let millions = amount.as_millions();

    let total = snapshot.our_price.scale(millions);
    let competitor_total = snapshot.average_competitor.scale(millions);
    let savings = competitor_total - total;

    Some(CalculatorDisplay {
        amount_label: amount.to_string(),
        total: total.to_string_with_symbol(),
        savings: savings.to_string_with_symbol(),
    })
}

/// One rendered comparison-table row.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRow {
    pub name: String,
    pub price: String,
    pub diff: String,
}

/// Competitor rows in name order. The highlighted "us" row is appended by
/// the table component itself.
pub fn table_rows(snapshot: &PriceSnapshot) -> Vec<PriceRow> {
    snapshot
        .competitor_prices
        .iter()
        .map(|(name, price)| PriceRow {
            name: name.to_string(),
            price: price.to_string_with_symbol(),
            diff: snapshot
                .percent_diff_vs_ours(price)
                .map(PriceSnapshot::format_percent_diff)
                .unwrap_or_else(|| "n/a".to_string()),
        })
        .collect()
}

pub fn live_price_label(snapshot: &PriceSnapshot) -> String {
    snapshot.our_price.to_string_with_symbol()
}

/// "Save 14.3% vs competitors", or `None` when the payload carried no
/// savings figure (the badge keeps its previous text).
pub fn savings_label(snapshot: &PriceSnapshot) -> Option<String> {
    snapshot
        .savings_percent
        .map(|percent| format!("Save {percent:.1}% vs competitors"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::price_snapshot::CompetitorPrices;
    use api::usd_price::UsdPrice;

    fn snapshot(our: f64, average: f64) -> PriceSnapshot {
        PriceSnapshot {
            our_price: UsdPrice::from_float(our),
            average_competitor: UsdPrice::from_float(average),
            ..Default::default()
        }
    }

    #[test]
    fn totals_scale_with_the_slider() {
        let view =
            calculator_display(&snapshot(0.25, 0.30), Some(GpAmount::millions(100))).unwrap();

        assert_eq!(view.amount_label, "100M GP");
        assert_eq!(view.total, "$25.00");
        assert_eq!(view.savings, "$5.00");
    }

    #[test]
    fn amounts_at_a_billion_switch_label() {
        let view =
            calculator_display(&snapshot(0.25, 0.30), Some(GpAmount::millions(1500))).unwrap();
        assert_eq!(view.amount_label, "1.5B GP");
        assert_eq!(view.total, "$375.00");
    }

    #[test]
    fn negative_savings_keep_their_sign() {
        let view =
            calculator_display(&snapshot(0.30, 0.25), Some(GpAmount::millions(100))).unwrap();
        assert_eq!(view.savings, "$-5.00");
    }

    #[test]
    fn absent_slider_renders_nothing() {
        assert_eq!(calculator_display(&snapshot(0.25, 0.30), None), None);
    }

    #[test]
    fn zeroed_snapshot_yields_zero_labels() {
        let view =
            calculator_display(&PriceSnapshot::default(), Some(GpAmount::millions(100))).unwrap();
        assert_eq!(view.total, "$0.00");
        assert_eq!(view.savings, "$0.00");
    }

    #[test]
    fn table_rows_follow_the_signed_diff_baseline() {
        let mut competitor_prices = CompetitorPrices::new();
        competitor_prices.insert("A", UsdPrice::from_float(12.0));
        competitor_prices.insert("B", UsdPrice::from_float(9.0));
        let snapshot = PriceSnapshot {
            our_price: UsdPrice::from_float(10.5),
            competitor_prices,
            ..Default::default()
        };

        let rows = table_rows(&snapshot);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "A");
        assert_eq!(rows[0].price, "$12.00");
        assert_eq!(rows[0].diff, "+14.3%");
        assert_eq!(rows[1].name, "B");
        assert_eq!(rows[1].diff, "-14.3%");
    }

    #[test]
    fn savings_badge_only_updates_when_present() {
        assert_eq!(savings_label(&PriceSnapshot::default()), None);

        let snapshot = PriceSnapshot {
            savings_percent: Some(14.25),
            ..Default::default()
        };
        assert_eq!(
            savings_label(&snapshot),
            Some("Save 14.2% vs competitors".to_string())
        );
    }
}
