//! Synchronization channel to the remote authority.
//!
//! [`SyncChannel`] sits on top of a [`Transport`] and speaks the core event
//! vocabulary: it decodes inbound frames in arrival order and encodes
//! outbound proposals. Sending is fire-and-forget.

mod error;
mod events;
mod memory;
mod transport;
mod websocket;
pub mod wire;

pub use error::{ChannelError, ChannelErrorKind};
pub use events::{InboundEvent, OutboundEvent};
pub use memory::{AuthorityHandle, MemoryTransport, memory_pair};
pub use transport::{FramePoll, Transport};
pub use websocket::WebSocketTransport;

use tracing::{debug, info, instrument, warn};

/// Event-level view of a transport.
pub struct SyncChannel {
    transport: Box<dyn Transport>,
    closed: bool,
}

impl std::fmt::Debug for SyncChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncChannel")
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}

impl SyncChannel {
    /// Wraps a transport.
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Box::new(transport),
            closed: false,
        }
    }

    /// Whether the transport has reported closure.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Returns the next inbound event, if one is pending.
    ///
    /// Closure is reported once as [`InboundEvent::Closed`]; after that the
    /// channel yields nothing.
    #[instrument(skip(self), level = "trace")]
    pub fn poll(&mut self) -> Option<Result<InboundEvent, ChannelError>> {
        if self.closed {
            return None;
        }
        match self.transport.poll_frame() {
            FramePoll::Frame(frame) => {
                let decoded = wire::decode_inbound(&frame);
                match &decoded {
                    Ok(event) => debug!(?event, "Inbound event"),
                    Err(e) => warn!(error = %e, frame = %frame, "Dropping undecodable frame"),
                }
                Some(decoded)
            }
            FramePoll::Empty => None,
            FramePoll::Closed => {
                info!("Channel closed by peer");
                self.closed = true;
                Some(Ok(InboundEvent::Closed))
            }
        }
    }

    /// Sends an event to the authority without awaiting any reply.
    #[instrument(skip(self))]
    pub async fn emit(&mut self, event: OutboundEvent) -> Result<(), ChannelError> {
        if self.closed {
            return Err(ChannelError::new(ChannelErrorKind::Closed));
        }
        let frame = wire::encode_outbound(&event)?;
        self.transport.send_frame(frame).await?;
        debug!(?event, "Outbound event sent");
        Ok(())
    }
}
