//! Defines the mutable, reactive state for the application's UI.

use api::price_snapshot::PriceSnapshot;
use dioxus::prelude::*;

/// A reactive state provided as a Dioxus context for mutable UI data.
///
/// This struct holds `Signal`s for any UI-related state that needs to change
/// and trigger automatic re-renders in the view. It is separate from the
/// fixed `AppState`.
#[derive(Clone, Copy)]
pub struct AppStateMut {
    /// The latest price snapshot. Replaced wholesale on every update, so
    /// every derived value is read consistently from one instant.
    pub snapshot: Signal<PriceSnapshot>,
    /// True while the live price label plays its update pulse.
    pub live_pulse: Signal<bool>,
}
