// The client-side Dioxus application logic.

use dioxus::prelude::*;

mod app_state;
mod app_state_mut;
pub mod compat;
mod components;
mod display;
pub mod hooks;
mod screens;

use api::price_snapshot::PriceSnapshot;
use app_state::AppState;
use app_state_mut::AppStateMut;
use components::pico::Container;
use dioxus_logger::tracing;
use hooks::use_price_channel::use_price_channel;
use hooks::use_price_channel::ChannelStatus;
use screens::history::HistoryScreen;
use screens::pricing::PricingScreen;

/// Enum to represent the different screens in our application.
#[derive(Clone, Copy, PartialEq, Default)]
enum Screen {
    #[default]
    Pricing,
    History,
}

impl Screen {
    /// Helper to get the display name for each screen.
    fn name(&self) -> &'static str {
        match self {
            Screen::Pricing => "Pricing",
            Screen::History => "History",
        }
    }
}

/// A list of all available screens for easy iteration.
const ALL_SCREENS: [Screen; 2] = [Screen::Pricing, Screen::History];

/// The navigation tabs component.
#[component]
fn Tabs(active_screen: Signal<Screen>) -> Element {
    rsx! {
        nav {
            class: "tab-menu",
            ul {
                for screen in ALL_SCREENS {
                    li {
                        a {
                            href: "#",
                            class: if *active_screen.read() == screen { "active-tab" } else { "" },
                            onclick: move |event| {
                                event.prevent_default();
                                active_screen.set(screen);
                            },
                            "{screen.name()}"
                        }
                    }
                }
            }
        }
    }
}

//=============================================================================
// MAIN APPLICATION COMPONENT (Client-side)
//=============================================================================

#[allow(non_snake_case)]
pub fn App() -> Element {
    let page_css = r#"
    /* --- NAVIGATION TABS --- */
    .tab-menu a { color: var(--pico-muted-color); border-bottom: 3px solid transparent; }
    .tab-menu a.active-tab { color: var(--pico-primary) !important; text-decoration: none; }

    /* --- LIVE PRICE --- */
    #live-price { font-size: 2rem; font-weight: bold; }

    .animate-pulse { animation: price-pulse 1s ease-in-out; }
    @keyframes price-pulse {
        0% { opacity: 1; }
        50% { opacity: 0.4; }
        100% { opacity: 1; }
    }

    .text-clout-cyan { color: #22d3ee; font-weight: bold; }
    .channel-status { color: var(--pico-muted-color); font-size: 0.85rem; }

    /* --- COMPARISON TABLE --- */
    tr.our-row td { color: #fbbf24; font-weight: bold; background: rgba(251, 191, 36, 0.1); }
    tr.our-row td.best-price { color: #22d3ee; }
    td.diff-cell { color: #f87171; }

    /* --- CALCULATOR --- */
    #gp-slider { width: 100%; }
    .calculator-readout { display: flex; justify-content: space-between; font-size: 1.25rem; margin: 0.5rem 0; }
    "#;

    rsx! {
        document::Meta {
            name: "viewport",
            content: "width=device-width, initial-scale=1.0",
        }
        document::Stylesheet {
            href: "https://cdn.jsdelivr.net/npm/@picocss/pico@2.0.6/css/pico.cyan.min.css",
        }
        style {
            "{page_css}"
        }
        AppBody {}
    }
}

#[component]
fn AppBody() -> Element {
    // this will be processed on server before initial page is delivered.
    let initial_prices = use_server_future(move || async move { api::live_prices().await })?;

    let body = match &*initial_prices.read() {
        Some(Ok(snapshot)) => rsx! {
            LoadedApp {
                initial: snapshot.clone(),
            }
        },
        Some(Err(e)) => {
            // A failed initial fetch is logged and the page renders with
            // zeroed prices until the channel delivers.
            tracing::warn!("error fetching initial prices: {e}");
            rsx! {
                LoadedApp {
                    initial: PriceSnapshot::default(),
                }
            }
        }
        None => rsx! {
            p {
                "Loading..."
            }
        },
    };
    body
}

/// This component holds the main app logic and only runs when data is ready.
#[component]
fn LoadedApp(initial: PriceSnapshot) -> Element {
    // Provide the stable, non-reactive AppState.
    let app_state = use_context_provider(AppState::new);

    // Create signals for mutable state at the top level of the component.
    let snapshot_signal = use_signal(|| initial.clone());
    let live_pulse_signal = use_signal(|| false);

    // Provide the mutable state by passing the already created signals.
    use_context_provider(|| AppStateMut {
        snapshot: snapshot_signal,
        live_pulse: live_pulse_signal,
    });

    let status_signal = use_signal(|| ChannelStatus::Disconnected("not connected".to_string()));
    use_context_provider(|| status_signal);

    use_price_channel();

    let active_screen = use_signal(Screen::default);

    rsx! {
        div {
            class: "app-main-container",
            Container {
                header {
                    nav {
                        ul {
                            li {
                                h1 {
                                    style: "margin: 0; font-size: 1.5rem;",
                                    "{app_state.site_name} GP"
                                }
                            }
                            li {
                                Tabs {
                                    active_screen,
                                }
                            }
                        }
                    }
                }
                div {
                    class: "content",
                    match active_screen() {
                        Screen::Pricing => rsx! {
                            PricingScreen {}
                        },
                        Screen::History => rsx! {
                            HistoryScreen {}
                        },
                    }
                }
            }
        }
    }
}
