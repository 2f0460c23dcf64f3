//! The competitor comparison table.

use dioxus::prelude::*;

use crate::app_state::AppState;
use crate::app_state_mut::AppStateMut;
use crate::display;

#[component]
pub fn PriceTable() -> Element {
    let app_state = use_context::<AppState>();
    let app_state_mut = use_context::<AppStateMut>();
    let snapshot = app_state_mut.snapshot.read();

    let rows = display::table_rows(&snapshot);

    rsx! {
        table {
            thead {
                tr {
                    th { "Seller" }
                    th { "Price per 1M" }
                    th { "vs Us" }
                }
            }
            tbody {
                id: "price-table-body",
                for row in rows {
                    tr {
                        td { "{row.name}" }
                        td { "{row.price}" }
                        td {
                            class: "diff-cell",
                            "{row.diff}"
                        }
                    }
                }
                tr {
                    class: "our-row",
                    td { "{app_state.site_name} (Us)" }
                    td { "{snapshot.our_price.to_string_with_symbol()}" }
                    td {
                        class: "best-price",
                        "BEST PRICE"
                    }
                }
            }
        }
    }
}
