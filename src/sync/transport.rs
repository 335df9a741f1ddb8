//! Transport seam: an ordered, bidirectional stream of text frames.

use super::error::ChannelError;

/// Result of polling a transport for the next frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FramePoll {
    /// The next frame, in arrival order.
    Frame(String),
    /// Nothing pending right now.
    Empty,
    /// The peer is gone; no further frames will arrive.
    Closed,
}

/// Bidirectional frame transport.
///
/// Delivery and reconnection are the implementation's concern. Frames must
/// be yielded in the order they arrived.
#[async_trait::async_trait]
pub trait Transport: Send {
    /// Sends one frame. Does not wait for any acknowledgement.
    async fn send_frame(&mut self, frame: String) -> Result<(), ChannelError>;

    /// Returns the next received frame without blocking.
    fn poll_frame(&mut self) -> FramePoll;
}
