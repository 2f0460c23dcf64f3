// Re-export the public API from the appropriate module
#[cfg(target_arch = "wasm32")]
pub use wasm32::*;

#[cfg(not(target_arch = "wasm32"))]
pub use non_wasm32::*;

use api::price_channel::ChannelMessage;

/// Something received from the push channel.
#[derive(Debug)]
pub enum ChannelEvent {
    Message(ChannelMessage),
    /// The transport closed. No reconnection is attempted at this layer.
    Closed(String),
}

#[cfg(target_arch = "wasm32")]
pub mod wasm32 {
    use std::time::Duration;

    use api::price_channel::ChannelMessage;
    use api::price_channel::DEFAULT_PUSH_PORT;
    use futures::future::{self, Either};
    use futures::StreamExt;
    use futures_channel::mpsc;
    use futures_channel::oneshot;
    use wasm_bindgen::prelude::*;
    use web_sys::{CloseEvent, ErrorEvent, MessageEvent, WebSocket};

    use super::ChannelEvent;

    pub async fn sleep(duration: Duration) {
        gloo_timers::future::sleep(duration).await;
    }

    /// Push-channel endpoint derived from the page's own host.
    pub fn push_channel_url() -> String {
        let host = web_sys::window()
            .and_then(|window| window.location().hostname().ok())
            .unwrap_or_else(|| "127.0.0.1".to_string());
        format!("ws://{host}:{DEFAULT_PUSH_PORT}")
    }

    /// A connected push-channel socket.
    ///
    /// Browser callbacks feed an unbounded queue that `next_event` drains;
    /// the closure handles live as long as the channel does.
    pub struct PriceChannel {
        ws: WebSocket,
        events: mpsc::UnboundedReceiver<ChannelEvent>,
        _on_message: Closure<dyn FnMut(MessageEvent)>,
        _on_close: Closure<dyn FnMut(CloseEvent)>,
    }

    impl PriceChannel {
        /// Opens the socket and waits for it to connect.
        pub async fn connect(url: &str) -> Result<Self, String> {
            let ws = WebSocket::new(url).map_err(|e| format!("{e:?}"))?;

            let (event_tx, events) = mpsc::unbounded();

            let tx = event_tx.clone();
            let on_message = Closure::<dyn FnMut(_)>::new(move |event: MessageEvent| {
                let Some(text) = event.data().as_string() else {
                    return;
                };
                // Frames that do not parse are ignored.
                if let Ok(message) = serde_json::from_str::<ChannelMessage>(&text) {
                    let _ = tx.unbounded_send(ChannelEvent::Message(message));
                }
            });
            ws.set_onmessage(Some(on_message.as_ref().unchecked_ref()));

            let tx = event_tx;
            let on_close = Closure::<dyn FnMut(_)>::new(move |event: CloseEvent| {
                let _ = tx.unbounded_send(ChannelEvent::Closed(event.reason()));
            });
            ws.set_onclose(Some(on_close.as_ref().unchecked_ref()));

            let (open_tx, open_rx) = oneshot::channel::<()>();
            let on_open = Closure::once(move |_: web_sys::Event| {
                let _ = open_tx.send(());
            });
            ws.set_onopen(Some(on_open.as_ref().unchecked_ref()));

            let (error_tx, error_rx) = oneshot::channel::<String>();
            let on_error = Closure::once(move |event: ErrorEvent| {
                let _ = error_tx.send(event.message());
            });
            ws.set_onerror(Some(on_error.as_ref().unchecked_ref()));

            let opened = match future::select(open_rx, error_rx).await {
                Either::Left((result, _)) => result.is_ok(),
                Either::Right((message, _)) => {
                    shutdown(&ws);
                    return Err(message.unwrap_or_else(|_| "socket error".to_string()));
                }
            };
            ws.set_onopen(None);
            ws.set_onerror(None);
            if !opened {
                shutdown(&ws);
                return Err("socket dropped before opening".to_string());
            }

            Ok(Self {
                ws,
                events,
                _on_message: on_message,
                _on_close: on_close,
            })
        }

        pub async fn send(&mut self, message: &ChannelMessage) -> Result<(), String> {
            let text = serde_json::to_string(message).map_err(|e| e.to_string())?;
            self.ws.send_with_str(&text).map_err(|e| format!("{e:?}"))
        }

        /// The next inbound frame, or `None` once the queue is gone.
        pub async fn next_event(&mut self) -> Option<ChannelEvent> {
            self.events.next().await
        }
    }

    impl Drop for PriceChannel {
        fn drop(&mut self) {
            shutdown(&self.ws);
        }
    }

    /// Detaches every handler before closing so the browser never calls
    /// into a dropped closure.
    fn shutdown(ws: &WebSocket) {
        ws.set_onmessage(None);
        ws.set_onclose(None);
        ws.set_onopen(None);
        ws.set_onerror(None);
        let _ = ws.close();
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub mod non_wasm32 {
    use std::time::Duration;

    use api::price_channel::ChannelMessage;
    use api::price_channel::DEFAULT_PUSH_PORT;
    use futures::stream::SplitSink;
    use futures::stream::SplitStream;
    use futures::SinkExt;
    use futures::StreamExt;
    use tokio::net::TcpStream;
    use tokio_tungstenite::tungstenite::Message;
    use tokio_tungstenite::MaybeTlsStream;
    use tokio_tungstenite::WebSocketStream;

    use super::ChannelEvent;

    pub async fn sleep(duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    pub fn push_channel_url() -> String {
        let addr = std::env::var("PRICE_PUSH_ADDR")
            .unwrap_or_else(|_| format!("127.0.0.1:{DEFAULT_PUSH_PORT}"));
        format!("ws://{addr}")
    }

    type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

    /// A connected push-channel socket.
    pub struct PriceChannel {
        sink: SplitSink<Socket, Message>,
        stream: SplitStream<Socket>,
    }

    impl PriceChannel {
        pub async fn connect(url: &str) -> Result<Self, String> {
            let (socket, _) = tokio_tungstenite::connect_async(url)
                .await
                .map_err(|e| e.to_string())?;
            let (sink, stream) = socket.split();
            Ok(Self { sink, stream })
        }

        pub async fn send(&mut self, message: &ChannelMessage) -> Result<(), String> {
            let text = serde_json::to_string(message).map_err(|e| e.to_string())?;
            self.sink
                .send(Message::Text(text.into()))
                .await
                .map_err(|e| e.to_string())
        }

        /// The next inbound frame, or `None` once the stream ends. Frames
        /// that do not parse are skipped.
        pub async fn next_event(&mut self) -> Option<ChannelEvent> {
            while let Some(incoming) = self.stream.next().await {
                match incoming {
                    Ok(Message::Text(text)) => {
                        if let Ok(message) = serde_json::from_str(&text) {
                            return Some(ChannelEvent::Message(message));
                        }
                    }
                    Ok(Message::Close(frame)) => {
                        let reason = frame.map(|f| f.reason.to_string()).unwrap_or_default();
                        return Some(ChannelEvent::Closed(reason));
                    }
                    Ok(_) => {}
                    Err(e) => return Some(ChannelEvent::Closed(e.to_string())),
                }
            }
            None
        }
    }
}
