//! The GP calculator card: slider in, three derived labels out.

use api::gp_amount::GpAmount;
use dioxus::prelude::*;

use crate::app_state::AppState;
use crate::app_state_mut::AppStateMut;
use crate::components::pico::Card;
use crate::display;

#[component]
pub fn Calculator() -> Element {
    let app_state = use_context::<AppState>();
    let app_state_mut = use_context::<AppStateMut>();

    let bounds = app_state.slider;
    let mut slider = use_signal(|| GpAmount::millions(bounds.start));

    let snapshot = app_state_mut.snapshot.read();
    let Some(view) = display::calculator_display(&snapshot, Some(slider())) else {
        return rsx! {};
    };

    rsx! {
        Card {
            h3 { "GP Calculator" }
            input {
                r#type: "range",
                id: "gp-slider",
                min: "{bounds.min}",
                max: "{bounds.max}",
                step: "{bounds.step}",
                value: "{slider().as_millions()}",
                oninput: move |event| {
                    // Anything unparsable keeps the previous position.
                    if let Ok(amount) = event.value().parse::<GpAmount>() {
                        slider.set(amount);
                    }
                },
            }
            div {
                class: "calculator-readout",
                span {
                    id: "gp-amount",
                    "{view.amount_label}"
                }
                span {
                    id: "total-price",
                    "{view.total}"
                }
            }
            p {
                "You save "
                span {
                    id: "savings-amount",
                    "{view.savings}"
                }
                " vs the average competitor"
            }
        }
    }
}
