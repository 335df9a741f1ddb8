//! Tests for the sync channel over the in-memory transport.

use strictly_chess::{
    ChannelErrorKind, Color, InboundEvent, Move, OutboundEvent, PieceKind, STARTING_FEN,
    SyncChannel, SyncController, SyncEvent, memory_pair, wire,
};

fn mv(from: &str, to: &str) -> Move {
    Move::from_algebraic(from, to).expect("valid move")
}

#[test]
fn test_decodes_authority_vocabulary() {
    assert_eq!(
        wire::decode_inbound(r#"{"event":"playerRole","data":"b"}"#).expect("decodes"),
        InboundEvent::RoleAssigned(Color::Black)
    );
    assert_eq!(
        wire::decode_inbound(r#"{"event":"spectatorRole"}"#).expect("decodes"),
        InboundEvent::SpectatorAssigned
    );
    assert_eq!(
        wire::decode_inbound(&format!(r#"{{"event":"boardState","data":"{STARTING_FEN}"}}"#))
            .expect("decodes"),
        InboundEvent::PositionSnapshot(STARTING_FEN.to_string())
    );
    assert_eq!(
        wire::decode_inbound(r#"{"event":"move","data":{"from":"e2","to":"e4"}}"#)
            .expect("decodes"),
        InboundEvent::MoveApplied(mv("e2", "e4"))
    );
    assert_eq!(
        wire::decode_inbound(r#"{"event":"move","data":{"from":"a7","to":"a8","promotion":"q"}}"#)
            .expect("decodes"),
        InboundEvent::MoveApplied(mv("a7", "a8").with_promotion(PieceKind::Queen))
    );
    assert_eq!(
        wire::decode_inbound(r#"{"event":"invalidMove","data":{"from":"e2","to":"e5"}}"#)
            .expect("decodes"),
        InboundEvent::MoveRejected(mv("e2", "e5"))
    );
}

#[test]
fn test_decodes_object_wrapped_payloads() {
    assert_eq!(
        wire::decode_inbound(r#"{"event":"playerRole","data":{"role":"w"}}"#).expect("decodes"),
        InboundEvent::RoleAssigned(Color::White)
    );
    assert_eq!(
        wire::decode_inbound(&format!(
            r#"{{"event":"boardState","data":{{"position":"{STARTING_FEN}"}}}}"#
        ))
        .expect("decodes"),
        InboundEvent::PositionSnapshot(STARTING_FEN.to_string())
    );

    let err = wire::decode_inbound(r#"{"event":"playerRole","data":{"colour":"w"}}"#)
        .expect_err("unknown shape");
    assert!(matches!(err.kind(), ChannelErrorKind::Malformed(_)), "{err}");
}

#[test]
fn test_authority_frames_use_bare_payloads() {
    let frame = wire::encode_inbound(&InboundEvent::RoleAssigned(Color::Black)).expect("encodes");
    let value: serde_json::Value = serde_json::from_str(&frame).expect("valid json");
    assert_eq!(value, serde_json::json!({"event": "playerRole", "data": "b"}));
}

#[test]
fn test_proposal_wire_shape() {
    let frame = wire::encode_outbound(&OutboundEvent::MoveProposed(mv("e2", "e4")))
        .expect("encodes");
    let value: serde_json::Value = serde_json::from_str(&frame).expect("valid json");
    assert_eq!(
        value,
        serde_json::json!({"event": "move", "data": {"from": "e2", "to": "e4"}})
    );
}

#[test]
fn test_unknown_event_is_error() {
    let err = wire::decode_inbound(r#"{"event":"chat","data":"hi"}"#).expect_err("unknown");
    assert_eq!(err.kind(), &ChannelErrorKind::UnknownEvent("chat".to_string()));
}

#[test]
fn test_malformed_frames_are_errors() {
    for frame in [
        "not json",
        r#"{"data":"w"}"#,
        r#"{"event":"playerRole","data":"green"}"#,
        r#"{"event":"move","data":{"from":"z9","to":"e4"}}"#,
    ] {
        let err = wire::decode_inbound(frame).expect_err("malformed");
        assert!(
            matches!(err.kind(), ChannelErrorKind::Malformed(_)),
            "{frame}: {err}"
        );
    }
}

#[test]
fn test_closed_has_no_wire_form() {
    assert!(wire::encode_inbound(&InboundEvent::Closed).is_err());
}

#[tokio::test]
async fn test_inbound_events_arrive_in_order() {
    let (transport, authority) = memory_pair();
    let mut channel = SyncChannel::new(transport);

    authority
        .push(&InboundEvent::RoleAssigned(Color::White))
        .expect("push role");
    authority
        .push(&InboundEvent::PositionSnapshot(STARTING_FEN.to_string()))
        .expect("push snapshot");
    authority
        .push(&InboundEvent::MoveApplied(mv("e2", "e4")))
        .expect("push move");

    let mut received = Vec::new();
    while let Some(item) = channel.poll() {
        received.push(item.expect("decodes"));
    }

    assert_eq!(
        received,
        vec![
            InboundEvent::RoleAssigned(Color::White),
            InboundEvent::PositionSnapshot(STARTING_FEN.to_string()),
            InboundEvent::MoveApplied(mv("e2", "e4")),
        ]
    );
}

#[tokio::test]
async fn test_emit_reaches_authority() {
    let (transport, mut authority) = memory_pair();
    let mut channel = SyncChannel::new(transport);

    channel
        .emit(OutboundEvent::MoveProposed(mv("g1", "f3")))
        .await
        .expect("emit succeeds");

    let received = authority.try_next().expect("frame pending").expect("decodes");
    assert_eq!(received, OutboundEvent::MoveProposed(mv("g1", "f3")));
    assert!(authority.try_next().is_none());
}

#[tokio::test]
async fn test_bad_frame_does_not_stop_the_stream() {
    let (transport, authority) = memory_pair();
    let mut channel = SyncChannel::new(transport);

    authority.push_frame("{oops").expect("push garbage");
    authority
        .push(&InboundEvent::SpectatorAssigned)
        .expect("push role");

    assert!(channel.poll().expect("pending").is_err());
    assert_eq!(
        channel.poll().expect("pending").expect("decodes"),
        InboundEvent::SpectatorAssigned
    );
    assert!(channel.poll().is_none());
}

#[tokio::test]
async fn test_close_is_reported_once_after_pending_frames() {
    let (transport, authority) = memory_pair();
    let mut channel = SyncChannel::new(transport);

    authority
        .push(&InboundEvent::SpectatorAssigned)
        .expect("push role");
    authority.close();

    assert_eq!(
        channel.poll().expect("pending").expect("decodes"),
        InboundEvent::SpectatorAssigned
    );
    assert_eq!(
        channel.poll().expect("closed").expect("decodes"),
        InboundEvent::Closed
    );
    assert!(channel.is_closed());
    assert!(channel.poll().is_none());

    let err = channel
        .emit(OutboundEvent::MoveProposed(mv("e2", "e4")))
        .await
        .expect_err("closed channel refuses sends");
    assert_eq!(err.kind(), &ChannelErrorKind::Closed);
}

#[tokio::test]
async fn test_full_round_trip_through_controller() {
    let (transport, mut authority) = memory_pair();
    let mut channel = SyncChannel::new(transport);
    let mut controller: SyncController = SyncController::new();

    authority
        .push(&InboundEvent::RoleAssigned(Color::White))
        .expect("push role");
    authority
        .push(&InboundEvent::PositionSnapshot(STARTING_FEN.to_string()))
        .expect("push snapshot");
    while let Some(item) = channel.poll() {
        controller.handle(SyncEvent::from(item.expect("decodes")));
    }

    let e2 = "e2".parse().expect("square");
    let e4 = "e4".parse().expect("square");
    assert!(controller.begin_drag(e2));
    let proposal = controller.drop_on(e4).expect("proposal");
    channel.emit(proposal).await.expect("emit");

    // Authority accepts and echoes the move back.
    let proposed = authority.try_next().expect("pending").expect("decodes");
    let OutboundEvent::MoveProposed(accepted) = proposed;
    authority
        .push(&InboundEvent::MoveApplied(accepted))
        .expect("echo move");
    while let Some(item) = channel.poll() {
        controller.handle(SyncEvent::from(item.expect("decodes")));
    }

    assert_eq!(controller.session().position().occupant_at(e2), None);
    assert!(controller.session().position().occupant_at(e4).is_some());
    assert_eq!(controller.model().side_to_move(), Some(Color::Black));
}
