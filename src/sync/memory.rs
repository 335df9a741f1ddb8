//! In-process transport backed by tokio channels.
//!
//! Useful for embedding the client next to an in-process authority and for
//! driving the client from tests.

use super::error::{ChannelError, ChannelErrorKind};
use super::events::{InboundEvent, OutboundEvent};
use super::transport::{FramePoll, Transport};
use super::wire;
use tokio::sync::mpsc::{self, error::TryRecvError};
use tracing::{debug, instrument};

/// Client end of an in-memory channel.
#[derive(Debug)]
pub struct MemoryTransport {
    inbound: mpsc::UnboundedReceiver<String>,
    outbound: mpsc::UnboundedSender<String>,
}

/// Authority end of an in-memory channel.
#[derive(Debug)]
pub struct AuthorityHandle {
    to_client: mpsc::UnboundedSender<String>,
    from_client: mpsc::UnboundedReceiver<String>,
}

/// Creates a connected client/authority pair.
#[instrument]
pub fn memory_pair() -> (MemoryTransport, AuthorityHandle) {
    let (to_client, inbound) = mpsc::unbounded_channel();
    let (outbound, from_client) = mpsc::unbounded_channel();
    debug!("Created in-memory channel pair");
    (
        MemoryTransport { inbound, outbound },
        AuthorityHandle {
            to_client,
            from_client,
        },
    )
}

#[async_trait::async_trait]
impl Transport for MemoryTransport {
    async fn send_frame(&mut self, frame: String) -> Result<(), ChannelError> {
        self.outbound
            .send(frame)
            .map_err(|_| ChannelError::new(ChannelErrorKind::Closed))
    }

    fn poll_frame(&mut self) -> FramePoll {
        match self.inbound.try_recv() {
            Ok(frame) => FramePoll::Frame(frame),
            Err(TryRecvError::Empty) => FramePoll::Empty,
            Err(TryRecvError::Disconnected) => FramePoll::Closed,
        }
    }
}

impl AuthorityHandle {
    /// Pushes a raw frame to the client.
    pub fn push_frame(&self, frame: impl Into<String>) -> Result<(), ChannelError> {
        self.to_client
            .send(frame.into())
            .map_err(|_| ChannelError::new(ChannelErrorKind::Closed))
    }

    /// Encodes and pushes an event to the client.
    #[instrument(skip(self))]
    pub fn push(&self, event: &InboundEvent) -> Result<(), ChannelError> {
        self.push_frame(wire::encode_inbound(event)?)
    }

    /// Next raw frame sent by the client, if one is pending.
    pub fn try_next_frame(&mut self) -> Option<String> {
        self.from_client.try_recv().ok()
    }

    /// Next decoded event sent by the client, if one is pending.
    pub fn try_next(&mut self) -> Option<Result<OutboundEvent, ChannelError>> {
        self.try_next_frame()
            .map(|frame| wire::decode_outbound(&frame))
    }

    /// Closes the authority side; the client observes [`FramePoll::Closed`]
    /// after draining pending frames.
    pub fn close(self) {
        debug!("Authority side closed");
    }
}
