//! The components module contains all shared components for our app. Components are the building blocks of dioxus apps.
//! They can be used to define common UI elements like the price table, the live price label, and the calculator.
pub mod calculator;
pub mod live_price;
pub mod pico;
pub mod price_table;
