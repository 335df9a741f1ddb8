//! WebSocket transport.
//!
//! A reader task forwards text frames into an unbounded channel so the
//! event loop can poll without blocking, in arrival order.

use super::error::{ChannelError, ChannelErrorKind};
use super::transport::{FramePoll, Transport};
use futures::stream::{SplitSink, StreamExt};
use futures::SinkExt;
use tokio::net::TcpStream;
use tokio::sync::mpsc::{self, error::TryRecvError};
use tokio::task::JoinHandle;
use tokio_websockets::{ClientBuilder, MaybeTlsStream, Message, WebSocketStream};
use tracing::{debug, info, instrument, warn};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Transport over a WebSocket connection.
pub struct WebSocketTransport {
    sink: SplitSink<WsStream, Message>,
    frames: mpsc::UnboundedReceiver<String>,
    reader: JoinHandle<()>,
}

impl std::fmt::Debug for WebSocketTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebSocketTransport").finish_non_exhaustive()
    }
}

impl WebSocketTransport {
    /// Connects to `url` (`ws://` or `wss://`).
    #[instrument]
    pub async fn connect(url: &str) -> Result<Self, ChannelError> {
        let uri: http::Uri = url.parse().map_err(|e: http::uri::InvalidUri| {
            ChannelError::new(ChannelErrorKind::Connect(format!("Invalid URL {}: {}", url, e)))
        })?;

        let (stream, _response) = ClientBuilder::from_uri(uri)
            .connect()
            .await
            .map_err(|e| ChannelError::new(ChannelErrorKind::Connect(e.to_string())))?;
        info!(url, "Connected to authority");

        let (sink, mut source) = stream.split();
        let (tx, frames) = mpsc::unbounded_channel();

        let reader = tokio::spawn(async move {
            while let Some(message) = source.next().await {
                match message {
                    Ok(message) => {
                        if let Some(text) = message.as_text() {
                            if tx.send(text.to_string()).is_err() {
                                break;
                            }
                        } else if message.is_close() {
                            debug!("Authority sent close frame");
                            break;
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "WebSocket read failed");
                        break;
                    }
                }
            }
            debug!("WebSocket reader finished");
        });

        Ok(Self {
            sink,
            frames,
            reader,
        })
    }
}

#[async_trait::async_trait]
impl Transport for WebSocketTransport {
    async fn send_frame(&mut self, frame: String) -> Result<(), ChannelError> {
        self.sink
            .send(Message::text(frame))
            .await
            .map_err(|e| ChannelError::new(ChannelErrorKind::Send(e.to_string())))
    }

    fn poll_frame(&mut self) -> FramePoll {
        match self.frames.try_recv() {
            Ok(frame) => FramePoll::Frame(frame),
            Err(TryRecvError::Empty) => FramePoll::Empty,
            Err(TryRecvError::Disconnected) => FramePoll::Closed,
        }
    }
}

impl Drop for WebSocketTransport {
    fn drop(&mut self) {
        self.reader.abort();
    }
}
