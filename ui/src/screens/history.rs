//=============================================================================
// File: src/screens/history.rs
//=============================================================================
use api::price_snapshot::PriceSnapshot;
use dioxus::prelude::*;

use crate::components::pico::Card;

const HISTORY_DAYS: u32 = 7;

#[component]
pub fn HistoryScreen() -> Element {
    let mut history = use_resource(move || async move { api::price_history(HISTORY_DAYS).await });

    // for refreshing from the server every N secs
    use_coroutine(move |_rx: UnboundedReceiver<()>| {
        let mut data_resource = history;
        async move {
            loop {
                crate::compat::sleep(std::time::Duration::from_secs(60)).await;
                data_resource.restart();
            }
        }
    });

    rsx! {
        match &*history.read() {
            None => rsx! {
                Card {
                    h3 { "Price History" }
                    p { "Loading..." }
                    progress {}
                }
            },
            Some(Err(e)) => rsx! {
                Card {
                    h3 { "Error" }
                    p { "Failed to load price history: {e}" }
                    button {
                        onclick: move |_| history.restart(),
                        "Retry"
                    }
                }
            },
            Some(Ok(snapshots)) => rsx! {
                Card {
                    h3 { "Price History ({snapshots.len()} samples, {HISTORY_DAYS} days)" }
                    div {
                        style: "max-height: 70vh; overflow-y: auto;",
                        table {
                            thead {
                                tr {
                                    th { "Recorded" }
                                    th { "Our Price" }
                                    th { "Avg Competitor" }
                                    th { "Savings" }
                                }
                            }
                            tbody {
                                for snapshot in snapshots.iter().rev() {
                                    tr {
                                        td { "{format_recorded_at(snapshot)}" }
                                        td { "{snapshot.our_price.to_string_with_symbol()}" }
                                        td { "{snapshot.average_competitor.to_string_with_symbol()}" }
                                        td { "{format_savings(snapshot)}" }
                                    }
                                }
                            }
                        }
                    }
                }
            },
        }
    }
}

fn format_recorded_at(snapshot: &PriceSnapshot) -> String {
    snapshot
        .updated_at
        .map(|at| {
            at.with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M")
                .to_string()
        })
        .unwrap_or_else(|| "n/a".to_string())
}

fn format_savings(snapshot: &PriceSnapshot) -> String {
    snapshot
        .savings_percent
        .map(|percent| format!("{percent:.1}%"))
        .unwrap_or_else(|| "n/a".to_string())
}
