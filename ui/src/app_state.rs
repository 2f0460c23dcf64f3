use std::ops::Deref;
use std::sync::Arc;

/// Fixed bounds of the GP calculator slider, in millions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderBounds {
    pub min: u64,
    pub max: u64,
    pub step: u64,
    pub start: u64,
}

#[derive(Debug, PartialEq, Eq)]
pub struct AppStateData {
    pub site_name: &'static str,
    pub slider: SliderBounds,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppState(Arc<AppStateData>);

impl Deref for AppState {
    type Target = AppStateData;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AppState {
    pub fn new() -> Self {
        Self(Arc::new(AppStateData {
            site_name: "CloutScape",
            slider: SliderBounds {
                min: 50,
                max: 10_000,
                step: 50,
                start: 100,
            },
        }))
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
