//! Channel error types.

use derive_more::{Display, Error};
use tracing::instrument;

/// What went wrong on the channel.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ChannelErrorKind {
    /// A frame could not be decoded.
    #[display("Malformed frame: {}", _0)]
    Malformed(String),
    /// A well-formed frame named an event this client does not handle.
    #[display("Unknown event {:?}", _0)]
    UnknownEvent(String),
    /// The connection could not be established.
    #[display("Connection failed: {}", _0)]
    Connect(String),
    /// A frame could not be sent.
    #[display("Send failed: {}", _0)]
    Send(String),
    /// The channel is closed.
    #[display("Channel closed")]
    Closed,
}

/// Channel error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Channel error: {} at {}:{}", kind, file, line)]
pub struct ChannelError {
    /// Error kind.
    pub kind: ChannelErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ChannelError {
    /// Creates a new channel error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: ChannelErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Error kind.
    pub fn kind(&self) -> &ChannelErrorKind {
        &self.kind
    }
}

impl From<serde_json::Error> for ChannelError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(ChannelErrorKind::Malformed(err.to_string()))
    }
}
