//! JSON framing of channel events.
//!
//! Each frame is `{"event": <name>, "data": <payload>}`. Event names follow
//! the authority's vocabulary (`playerRole`, `boardState`, ...), which this
//! module maps onto [`InboundEvent`] and [`OutboundEvent`].

use super::error::{ChannelError, ChannelErrorKind};
use super::events::{InboundEvent, OutboundEvent};
use crate::games::chess::{Color, Move};
use serde::{Deserialize, Serialize};
use tracing::{instrument, trace};

/// A frame as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
enum WireMessage {
    #[serde(rename = "playerRole")]
    PlayerRole(RolePayload),
    #[serde(rename = "spectatorRole")]
    SpectatorRole,
    #[serde(rename = "boardState")]
    BoardState(PositionPayload),
    #[serde(rename = "move")]
    Move(Move),
    #[serde(rename = "invalidMove")]
    InvalidMove(Move),
}

/// Role payload: a bare `"w"` or `{"role": "w"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
enum RolePayload {
    Bare(Color),
    Wrapped { role: Color },
}

impl RolePayload {
    fn color(self) -> Color {
        match self {
            RolePayload::Bare(color) | RolePayload::Wrapped { role: color } => color,
        }
    }
}

/// Snapshot payload: a bare FEN string or `{"position": <fen>}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
enum PositionPayload {
    Bare(String),
    Wrapped { position: String },
}

impl PositionPayload {
    fn fen(self) -> String {
        match self {
            PositionPayload::Bare(fen) | PositionPayload::Wrapped { position: fen } => fen,
        }
    }
}

/// Wire names understood by the client.
const KNOWN_EVENTS: [&str; 5] = [
    "playerRole",
    "spectatorRole",
    "boardState",
    "move",
    "invalidMove",
];

fn parse(frame: &str) -> Result<WireMessage, ChannelError> {
    let value: serde_json::Value = serde_json::from_str(frame)?;
    let name = value
        .get("event")
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| {
            ChannelError::new(ChannelErrorKind::Malformed(
                "frame has no event name".to_string(),
            ))
        })?;

    if !KNOWN_EVENTS.contains(&name) {
        return Err(ChannelError::new(ChannelErrorKind::UnknownEvent(
            name.to_string(),
        )));
    }

    Ok(serde_json::from_value(value)?)
}

/// Decodes a frame received from the authority.
#[instrument(skip(frame))]
pub fn decode_inbound(frame: &str) -> Result<InboundEvent, ChannelError> {
    trace!(frame, "Decoding inbound frame");
    Ok(match parse(frame)? {
        WireMessage::PlayerRole(payload) => InboundEvent::RoleAssigned(payload.color()),
        WireMessage::SpectatorRole => InboundEvent::SpectatorAssigned,
        WireMessage::BoardState(payload) => InboundEvent::PositionSnapshot(payload.fen()),
        WireMessage::Move(mv) => InboundEvent::MoveApplied(mv),
        WireMessage::InvalidMove(mv) => InboundEvent::MoveRejected(mv),
    })
}

/// Encodes a frame for the authority.
#[instrument]
pub fn encode_outbound(event: &OutboundEvent) -> Result<String, ChannelError> {
    let message = match event {
        OutboundEvent::MoveProposed(mv) => WireMessage::Move(*mv),
    };
    Ok(serde_json::to_string(&message)?)
}

/// Decodes a frame sent by a client (authority side of the channel).
#[instrument(skip(frame))]
pub fn decode_outbound(frame: &str) -> Result<OutboundEvent, ChannelError> {
    match parse(frame)? {
        WireMessage::Move(mv) => Ok(OutboundEvent::MoveProposed(mv)),
        other => Err(ChannelError::new(ChannelErrorKind::Malformed(format!(
            "clients may only send moves, got {:?}",
            other
        )))),
    }
}

/// Encodes an authority event (authority side of the channel).
///
/// [`InboundEvent::Closed`] has no wire form and is rejected.
#[instrument]
pub fn encode_inbound(event: &InboundEvent) -> Result<String, ChannelError> {
    let message = match event {
        InboundEvent::RoleAssigned(color) => WireMessage::PlayerRole(RolePayload::Bare(*color)),
        InboundEvent::SpectatorAssigned => WireMessage::SpectatorRole,
        InboundEvent::PositionSnapshot(fen) => {
            WireMessage::BoardState(PositionPayload::Bare(fen.clone()))
        }
        InboundEvent::MoveApplied(mv) => WireMessage::Move(*mv),
        InboundEvent::MoveRejected(mv) => WireMessage::InvalidMove(*mv),
        InboundEvent::Closed => {
            return Err(ChannelError::new(ChannelErrorKind::Malformed(
                "close is not a wire event".to_string(),
            )));
        }
    };
    Ok(serde_json::to_string(&message)?)
}
