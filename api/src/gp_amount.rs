//! The calculator's slider unit: a whole number of millions of GP.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

/// A quantity of game currency, counted in millions.
///
/// The pricing slider works in these units; display switches to billions
/// once the value reaches 1000M.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct GpAmount(u64);

impl GpAmount {
    pub fn millions(value: u64) -> Self {
        Self(value)
    }

    pub fn as_millions(&self) -> u64 {
        self.0
    }
}

/// Renders "750M GP" below one billion and "1.5B GP" at or above it.
impl fmt::Display for GpAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 >= 1000 {
            write!(f, "{:.1}B GP", self.0 as f64 / 1000.0)
        } else {
            write!(f, "{}M GP", self.0)
        }
    }
}

impl FromStr for GpAmount {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_below_one_billion_in_millions() {
        assert_eq!(GpAmount::millions(100).to_string(), "100M GP");
        assert_eq!(GpAmount::millions(999).to_string(), "999M GP");
    }

    #[test]
    fn labels_at_and_above_one_billion_in_billions() {
        assert_eq!(GpAmount::millions(1000).to_string(), "1.0B GP");
        assert_eq!(GpAmount::millions(1500).to_string(), "1.5B GP");
        assert_eq!(GpAmount::millions(2300).to_string(), "2.3B GP");
    }

    #[test]
    fn parses_slider_values() {
        assert_eq!("2500".parse::<GpAmount>(), Ok(GpAmount::millions(2500)));
        assert!("2.5".parse::<GpAmount>().is_err());
        assert!("abc".parse::<GpAmount>().is_err());
    }
}
