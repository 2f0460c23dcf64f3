//! Wire envelope for the push channel.
//!
//! Frames are JSON objects of the form `{"event": "...", "data": {...}}`.
//! The client joins the `price_updates` room after connecting; the server
//! then pushes a frame per fresh snapshot.

use serde::Deserialize;
use serde::Serialize;

use crate::price_snapshot::PriceSnapshot;

/// Default TCP port for the push-channel listener.
pub const DEFAULT_PUSH_PORT: u16 = 9100;

/// A single frame on the push channel, in either direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ChannelMessage {
    /// Server -> client: connection acknowledged.
    Connected,
    /// Client -> server: subscribe to price updates.
    JoinPriceUpdates,
    /// Server -> client: subscription acknowledged.
    Joined,
    /// Client -> server: unsubscribe.
    LeavePriceUpdates,
    /// Server -> client: a fresh snapshot for subscribed clients.
    PriceUpdate(PriceSnapshot),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usd_price::UsdPrice;

    #[test]
    fn join_frame_is_a_bare_event() {
        let frame = serde_json::to_string(&ChannelMessage::JoinPriceUpdates).unwrap();
        assert_eq!(frame, r#"{"event":"join_price_updates"}"#);
    }

    #[test]
    fn price_update_frame_nests_the_snapshot_under_data() {
        let payload = r#"{"event":"price_update","data":{"our_price":10.5,"competitor_prices":{"A":12.0}}}"#;
        let frame: ChannelMessage = serde_json::from_str(payload).unwrap();

        match frame {
            ChannelMessage::PriceUpdate(snapshot) => {
                assert_eq!(snapshot.our_price, UsdPrice::from_float(10.5));
                assert_eq!(
                    snapshot.competitor_prices.get("A"),
                    Some(UsdPrice::from_float(12.0))
                );
            }
            other => panic!("unexpected frame: {other:?}"),
        }
    }

    #[test]
    fn unknown_events_fail_to_parse() {
        assert!(serde_json::from_str::<ChannelMessage>(r#"{"event":"mystery"}"#).is_err());
    }
}
