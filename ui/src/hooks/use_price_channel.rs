//! Subscribes the UI to the server's push channel.

use std::time::Duration;

use api::price_channel::ChannelMessage;
use api::price_snapshot::PriceSnapshot;
use dioxus::prelude::*;
use dioxus_logger::tracing;

use crate::app_state_mut::AppStateMut;
use crate::compat;
use crate::compat::ChannelEvent;

/// Connection state of the push channel.
#[derive(Clone, PartialEq, Debug, strum::EnumIs)]
pub enum ChannelStatus {
    Connected,
    Disconnected(String),
}

/// Connects the push channel once and applies every inbound price update to
/// the shared snapshot signal.
///
/// Emits `join_price_updates` right after connecting. A failed connect or a
/// later close is logged and reflected in the status signal; reconnection
/// is left to the transport.
pub fn use_price_channel() {
    let app_state_mut = use_context::<AppStateMut>();
    let mut status = use_context::<Signal<ChannelStatus>>();

    use_coroutine(move |_rx: UnboundedReceiver<()>| {
        let mut state = app_state_mut;
        async move {
            let url = compat::push_channel_url();
            let mut channel = match compat::PriceChannel::connect(&url).await {
                Ok(channel) => channel,
                Err(e) => {
                    tracing::warn!("push channel connect failed: {e}");
                    status.set(ChannelStatus::Disconnected(e));
                    return;
                }
            };

            if let Err(e) = channel.send(&ChannelMessage::JoinPriceUpdates).await {
                tracing::warn!("push channel join failed: {e}");
                status.set(ChannelStatus::Disconnected(e));
                return;
            }
            status.set(ChannelStatus::Connected);

            while let Some(event) = channel.next_event().await {
                match event {
                    ChannelEvent::Message(ChannelMessage::PriceUpdate(snapshot)) => {
                        apply_update(&mut state, snapshot);
                    }
                    ChannelEvent::Message(_) => {} // acks
                    ChannelEvent::Closed(reason) => {
                        tracing::warn!("push channel closed: {reason}");
                        status.set(ChannelStatus::Disconnected(reason));
                        return;
                    }
                }
            }
            status.set(ChannelStatus::Disconnected("stream ended".to_string()));
        }
    });
}

/// Replaces the snapshot wholesale and plays the one-second pulse on the
/// live price label. Everything derived (labels, table, calculator)
/// re-renders from the new snapshot within the same event turn.
fn apply_update(state: &mut AppStateMut, snapshot: PriceSnapshot) {
    state.snapshot.set(snapshot);

    let mut pulse = state.live_pulse;
    pulse.set(true);
    spawn(async move {
        compat::sleep(Duration::from_secs(1)).await;
        pulse.set(false);
    });
}
