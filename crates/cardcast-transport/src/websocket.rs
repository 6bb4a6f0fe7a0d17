//! WebSocket adapter using `tokio-tungstenite`.
//!
//! The caller connects (or accepts) the socket; this module only pumps
//! frames. Outbound frames go through an unbounded queue to a writer task
//! so `send` never waits on the network.

use futures_util::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tokio_tungstenite::WebSocketStream;
use tokio_tungstenite::tungstenite::Message;

use crate::{Channel, ChannelId, Inbound, TransportError};

/// A [`Channel`] backed by an established WebSocket stream.
#[derive(Debug, Clone)]
pub struct WebSocketChannel {
    id: ChannelId,
    tx: mpsc::UnboundedSender<Vec<u8>>,
}

impl WebSocketChannel {
    /// Takes ownership of `ws` and spawns its reader and writer tasks.
    ///
    /// Must be called from within a Tokio runtime. The returned
    /// [`Inbound`] yields every text or binary frame the peer sends and
    /// ends when the peer closes the socket.
    pub fn spawn<S>(ws: WebSocketStream<S>) -> (Self, Inbound)
    where
        S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
    {
        let id = ChannelId::next();
        let (mut sink, mut stream) = ws.split();
        let (out_tx, mut out_rx) = mpsc::unbounded_channel::<Vec<u8>>();
        let (in_tx, in_rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            while let Some(frame) = out_rx.recv().await {
                // JSON payloads go out as text frames.
                let msg = match String::from_utf8(frame) {
                    Ok(text) => Message::Text(text.into()),
                    Err(e) => Message::Binary(e.into_bytes().into()),
                };
                if let Err(e) = sink.send(msg).await {
                    tracing::debug!(channel_id = %id, error = %e, "websocket write failed");
                    break;
                }
            }
            let _ = sink.close().await;
            tracing::debug!(channel_id = %id, "websocket writer stopped");
        });

        tokio::spawn(async move {
            while let Some(msg) = stream.next().await {
                let frame = match msg {
                    Ok(Message::Text(text)) => text.as_bytes().to_vec(),
                    Ok(Message::Binary(data)) => data.into(),
                    Ok(Message::Close(_)) => break,
                    Ok(_) => continue, // skip ping/pong/frame
                    Err(e) => {
                        tracing::debug!(channel_id = %id, error = %e, "websocket read failed");
                        break;
                    }
                };
                if in_tx.send(frame).is_err() {
                    break;
                }
            }
            tracing::debug!(channel_id = %id, "websocket reader stopped");
        });

        tracing::info!(channel_id = %id, "websocket channel attached");
        (Self { id, tx: out_tx }, Inbound::new(id, in_rx))
    }
}

impl Channel for WebSocketChannel {
    fn send(&self, data: &[u8]) -> Result<(), TransportError> {
        self.tx
            .send(data.to_vec())
            .map_err(|_| TransportError::Closed(self.id))
    }

    fn id(&self) -> ChannelId {
        self.id
    }
}
