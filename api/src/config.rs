//! Env-driven runtime settings for the price feed.

use std::env;
use std::net::Ipv4Addr;
use std::net::SocketAddr;
use std::time::Duration;

use crate::price_channel::DEFAULT_PUSH_PORT;
use crate::usd_price::UsdPrice;

/// Settings for the scheduler and push-channel listener.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FeedConfig {
    /// How often competitor quotes are refreshed.
    pub refresh_interval: Duration,
    /// Address the push-channel websocket listener binds.
    pub push_addr: SocketAddr,
    /// Manual price override; when set, quotes are fetched but our price is
    /// pinned to this value.
    pub price_override: Option<UsdPrice>,
}

impl FeedConfig {
    /// Reads the configuration from environment variables, with
    /// conservative in-code defaults.
    ///
    /// # Environment Variables
    /// - `PRICE_REFRESH_SECS`: refresh cadence in seconds, default 900.
    /// - `PRICE_PUSH_ADDR`: listener socket address, default 127.0.0.1:9100.
    /// - `PRICE_OVERRIDE`: decimal dollar amount pinning our price.
    pub fn from_env() -> Self {
        const DEFAULT_REFRESH_SECS: u64 = 900;

        let refresh_secs = env::var("PRICE_REFRESH_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_REFRESH_SECS);

        let push_addr = env::var("PRICE_PUSH_ADDR")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(|| {
                SocketAddr::new(std::net::IpAddr::V4(Ipv4Addr::LOCALHOST), DEFAULT_PUSH_PORT)
            });

        let price_override = env::var("PRICE_OVERRIDE")
            .ok()
            .and_then(|s| UsdPrice::from_str_exact(s.trim()).ok());

        Self {
            refresh_interval: Duration::from_secs(refresh_secs),
            push_addr,
            price_override,
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
