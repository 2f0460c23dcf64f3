//! The main pricing screen: live price, savings badge, comparison table and
//! the GP calculator.

use dioxus::prelude::*;

use crate::app_state_mut::AppStateMut;
use crate::components::calculator::Calculator;
use crate::components::live_price::LivePrice;
use crate::components::pico::Card;
use crate::components::price_table::PriceTable;
use crate::display;
use crate::hooks::use_price_channel::ChannelStatus;

#[component]
pub fn PricingScreen() -> Element {
    let status = use_context::<Signal<ChannelStatus>>();

    rsx! {
        Card {
            h3 { "Live Price" }
            p {
                LivePrice {}
                " per 1M GP"
            }
            SavingsBadge {}
            if !status.read().is_connected() {
                p {
                    class: "channel-status",
                    "Live updates unavailable"
                }
            }
        }
        Card {
            h3 { "Price Comparison" }
            PriceTable {}
        }
        Calculator {}
    }
}

/// Shows the latest known savings figure. A payload without one leaves the
/// previous text in place.
#[component]
fn SavingsBadge() -> Element {
    let app_state_mut = use_context::<AppStateMut>();
    let mut last_seen = use_signal(|| None::<String>);

    use_effect(move || {
        if let Some(text) = display::savings_label(&app_state_mut.snapshot.read()) {
            if last_seen.peek().as_deref() != Some(text.as_str()) {
                last_seen.set(Some(text));
            }
        }
    });

    match last_seen() {
        Some(text) => rsx! {
            p {
                class: "text-clout-cyan",
                "{text}"
            }
        },
        None => rsx! {},
    }
}
