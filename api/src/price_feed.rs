//! Price scheduler and push-channel broadcaster.
//!
//! One task refreshes the snapshot on a fixed cadence and fans it out on a
//! broadcast channel; a websocket listener forwards updates to every client
//! that has joined the `price_updates` room.

use dioxus_logger::tracing;
use futures::SinkExt;
use futures::StreamExt;
use tokio::net::TcpListener;
use tokio::net::TcpStream;
use tokio::sync::broadcast;
use tokio::time::MissedTickBehavior;
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;

use crate::config::FeedConfig;
use crate::price_caching;
use crate::price_channel::ChannelMessage;
use crate::price_snapshot::PriceSnapshot;
use crate::usd_price::UsdPrice;
use crate::ApiError;

/// A move of at least this much is worth flagging in the logs.
const NOTABLE_CHANGE_PERCENT: f64 = 2.0;

/// Runs the scheduler and the push-channel listener until failure.
pub async fn run(config: FeedConfig) -> Result<(), ApiError> {
    let (updates, _) = broadcast::channel::<PriceSnapshot>(16);

    tokio::spawn(scheduler_loop(config, updates.clone()));

    let listener = TcpListener::bind(config.push_addr).await?;
    tracing::info!("push channel listening on ws://{}", config.push_addr);

    loop {
        let (stream, peer) = listener.accept().await?;
        let updates = updates.clone();
        tokio::spawn(async move {
            if let Err(e) = handle_client(stream, updates).await {
                tracing::debug!("push client {peer} dropped: {e}");
            }
        });
    }
}

/// Refreshes the snapshot immediately and then on every tick, broadcasting
/// each fresh snapshot to subscribed clients.
async fn scheduler_loop(config: FeedConfig, updates: broadcast::Sender<PriceSnapshot>) {
    let mut ticker = tokio::time::interval(config.refresh_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut last_price: Option<UsdPrice> = None;
    loop {
        ticker.tick().await;

        match price_caching::refresh_snapshot().await {
            Ok(snapshot) => {
                log_price_move(last_price, snapshot.our_price);
                last_price = Some(snapshot.our_price);

                tracing::info!(
                    "prices updated: ours ${}, avg competitor ${}",
                    snapshot.our_price,
                    snapshot.average_competitor
                );
                // Err here only means no client is currently subscribed.
                let _ = updates.send(snapshot);
            }
            Err(e) => tracing::warn!("scheduled price update failed: {e}"),
        }
    }
}

fn log_price_move(old: Option<UsdPrice>, new: UsdPrice) {
    let Some(old) = old.filter(|p| !p.is_zero()) else {
        return;
    };
    let change = (new.as_cents() - old.as_cents()) as f64 / old.as_cents() as f64 * 100.0;
    if change.abs() >= NOTABLE_CHANGE_PERCENT {
        tracing::info!("price moved {change:+.1}%: ${old} -> ${new}");
    }
}

/// Serves one push-channel client.
///
/// Snapshots are only forwarded after the client sends `join_price_updates`;
/// `leave_price_updates` stops them again. Frames that do not parse are
/// ignored.
async fn handle_client(
    stream: TcpStream,
    updates: broadcast::Sender<PriceSnapshot>,
) -> Result<(), ApiError> {
    let ws = accept_async(stream).await?;
    let (mut sink, mut stream) = ws.split();
    let mut inbox = updates.subscribe();

    sink.send(frame(&ChannelMessage::Connected)?).await?;

    let mut joined = false;
    loop {
        tokio::select! {
            incoming = stream.next() => match incoming {
                Some(Ok(Message::Text(text))) => {
                    match serde_json::from_str::<ChannelMessage>(&text) {
                        Ok(ChannelMessage::JoinPriceUpdates) => {
                            joined = true;
                            sink.send(frame(&ChannelMessage::Joined)?).await?;
                        }
                        Ok(ChannelMessage::LeavePriceUpdates) => joined = false,
                        Ok(_) => {}
                        Err(e) => tracing::debug!("ignoring unparseable frame: {e}"),
                    }
                }
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
            },
            update = inbox.recv() => match update {
                Ok(snapshot) if joined => {
                    sink.send(frame(&ChannelMessage::PriceUpdate(snapshot))?).await?;
                }
                Ok(_) => {}
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::debug!("push client lagged, skipped {skipped} updates");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
        }
    }

    Ok(())
}

fn frame(message: &ChannelMessage) -> Result<Message, ApiError> {
    Ok(Message::Text(serde_json::to_string(message)?.into()))
}
