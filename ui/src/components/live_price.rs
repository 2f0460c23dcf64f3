//! The live price label with its one-second update pulse.

use dioxus::prelude::*;

use crate::app_state_mut::AppStateMut;
use crate::display;

#[component]
pub fn LivePrice() -> Element {
    let app_state_mut = use_context::<AppStateMut>();
    let snapshot = app_state_mut.snapshot.read();

    let class = if *app_state_mut.live_pulse.read() {
        "live-price animate-pulse"
    } else {
        "live-price"
    };

    rsx! {
        span {
            id: "live-price",
            class: "{class}",
            "{display::live_price_label(&snapshot)}"
        }
    }
}
