//! Tests for the synchronization controller's event dispatch.

use strictly_chess::{
    ChannelError, ChannelErrorKind, Color, Diagnostic, Move, OutboundEvent, Piece, PieceKind,
    Role, STARTING_FEN, Square, SyncController, SyncEvent,
};

fn sq(name: &str) -> Square {
    Square::from_algebraic(name).expect("valid square")
}

fn mv(from: &str, to: &str) -> Move {
    Move::from_algebraic(from, to).expect("valid move")
}

fn controller_as(role: SyncEvent) -> SyncController {
    let mut controller = SyncController::new();
    controller.handle(role);
    controller.handle(SyncEvent::PositionSnapshot(STARTING_FEN.to_string()));
    controller
}

#[test]
fn test_starts_unassigned_with_empty_board() {
    let controller: SyncController = SyncController::new();
    assert_eq!(controller.role(), Role::Unassigned);
    assert!(!controller.model().is_loaded());
    assert_eq!(controller.diagnostic(), None);
    assert_eq!(controller.render_count(), 1);
}

#[test]
fn test_white_drag_emits_proposal_without_mutating_position() {
    let mut controller = controller_as(SyncEvent::RoleAssigned(Color::White));
    let before = controller.session().position().occupants();

    assert!(controller.begin_drag(sq("e2")));
    let sent = controller.drop_on(sq("e4"));

    assert_eq!(sent, Some(OutboundEvent::MoveProposed(mv("e2", "e4"))));
    assert_eq!(controller.session().position().occupants(), before);
    assert_eq!(controller.dragged(), None);
}

#[test]
fn test_spectator_drag_emits_nothing() {
    let mut controller = controller_as(SyncEvent::SpectatorAssigned);

    assert!(!controller.begin_drag(sq("e2")));
    assert_eq!(controller.dragged(), None);
    assert_eq!(controller.drop_on(sq("e4")), None);
}

#[test]
fn test_black_role_flips_board() {
    let controller = controller_as(SyncEvent::RoleAssigned(Color::Black));
    assert_eq!(controller.role(), Role::Player(Color::Black));
    assert_eq!(controller.model().display_rows()[0][0].square, sq("h1"));
}

#[test]
fn test_move_applied_updates_position() {
    let mut controller = controller_as(SyncEvent::RoleAssigned(Color::Black));

    assert_eq!(controller.handle(SyncEvent::MoveApplied(mv("e2", "e4"))), None);

    let position = controller.session().position();
    assert_eq!(position.occupant_at(sq("e2")), None);
    assert_eq!(
        position.occupant_at(sq("e4")),
        Some(Piece::new(Color::White, PieceKind::Pawn))
    );
    assert_eq!(controller.model().side_to_move(), Some(Color::Black));
}

#[test]
fn test_local_intent_event_only_emits() {
    let mut controller = controller_as(SyncEvent::RoleAssigned(Color::White));
    let before = controller.session().position().export();
    let renders = controller.render_count();

    let sent = controller.handle(SyncEvent::LocalMoveIntent(mv("g1", "f3")));

    assert_eq!(sent, Some(OutboundEvent::MoveProposed(mv("g1", "f3"))));
    assert_eq!(controller.session().position().export(), before);
    assert_eq!(controller.render_count(), renders);
}

#[test]
fn test_events_apply_in_order_despite_interleaved_gestures() {
    let mut controller = controller_as(SyncEvent::RoleAssigned(Color::White));

    controller.begin_drag(sq("d2"));
    controller.handle(SyncEvent::MoveApplied(mv("e2", "e4")));
    // Re-render dropped the drag.
    assert_eq!(controller.dragged(), None);
    assert_eq!(controller.drop_on(sq("d4")), None);

    controller.handle(SyncEvent::MoveApplied(mv("e7", "e5")));
    controller.handle(SyncEvent::MoveApplied(mv("g1", "f3")));

    let mut expected: SyncController = SyncController::new();
    expected.handle(SyncEvent::PositionSnapshot(STARTING_FEN.to_string()));
    for step in [mv("e2", "e4"), mv("e7", "e5"), mv("g1", "f3")] {
        expected.handle(SyncEvent::MoveApplied(step));
    }

    assert_eq!(
        controller.session().position().export(),
        expected.session().position().export()
    );
}

#[test]
fn test_invalid_snapshot_keeps_board_and_reports() {
    let mut controller = controller_as(SyncEvent::RoleAssigned(Color::White));
    controller.handle(SyncEvent::MoveApplied(mv("e2", "e4")));
    let before = controller.session().position().export();

    controller.handle(SyncEvent::PositionSnapshot("garbage".to_string()));

    assert_eq!(controller.session().position().export(), before);
    assert!(matches!(
        controller.diagnostic(),
        Some(Diagnostic::InvalidSnapshot { .. })
    ));
}

#[test]
fn test_unreplayable_remote_move_reports_divergence() {
    let mut controller = controller_as(SyncEvent::SpectatorAssigned);
    let before = controller.session().position().export();

    controller.handle(SyncEvent::MoveApplied(mv("e2", "e5")));

    assert_eq!(controller.session().position().export(), before);
    assert_eq!(
        controller.diagnostic().map(|d| matches!(d, Diagnostic::Divergence { .. })),
        Some(true)
    );

    // The next snapshot heals the board.
    let healed = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1";
    controller.handle(SyncEvent::PositionSnapshot(healed.to_string()));
    assert_eq!(
        controller.session().position().occupant_at(sq("e4")),
        Some(Piece::new(Color::White, PieceKind::Pawn))
    );
    assert_eq!(controller.diagnostic(), None);

    controller.handle(SyncEvent::MoveApplied(mv("e7", "e5")));
    assert_eq!(controller.diagnostic(), None);
}

#[test]
fn test_applied_move_clears_stale_divergence() {
    let mut controller = controller_as(SyncEvent::SpectatorAssigned);
    controller.handle(SyncEvent::MoveApplied(mv("e2", "e5")));
    assert!(matches!(
        controller.diagnostic(),
        Some(Diagnostic::Divergence { .. })
    ));

    controller.handle(SyncEvent::MoveApplied(mv("d2", "d4")));
    assert_eq!(controller.diagnostic(), None);
}

#[test]
fn test_successful_snapshot_keeps_rejection_notice() {
    let mut controller = controller_as(SyncEvent::RoleAssigned(Color::White));
    controller.handle(SyncEvent::MoveRejected(mv("e2", "e5")));

    controller.handle(SyncEvent::PositionSnapshot(STARTING_FEN.to_string()));

    assert_eq!(
        controller.diagnostic(),
        Some(&Diagnostic::MoveRejected { mv: mv("e2", "e5") })
    );
}

#[test]
fn test_rejection_is_reported_without_mutation() {
    let mut controller = controller_as(SyncEvent::RoleAssigned(Color::White));
    let before = controller.session().position().export();

    controller.handle(SyncEvent::MoveRejected(mv("e2", "e5")));

    assert_eq!(controller.session().position().export(), before);
    assert_eq!(
        controller.diagnostic(),
        Some(&Diagnostic::MoveRejected { mv: mv("e2", "e5") })
    );
}

#[test]
fn test_channel_close_resets_session() {
    let mut controller = controller_as(SyncEvent::RoleAssigned(Color::White));
    controller.begin_drag(sq("e2"));

    controller.handle(SyncEvent::ChannelClosed);

    assert_eq!(controller.role(), Role::Unassigned);
    assert!(!controller.session().position().is_loaded());
    assert_eq!(controller.dragged(), None);
    assert_eq!(controller.diagnostic(), Some(&Diagnostic::Disconnected));
    assert!(!controller.begin_drag(sq("e2")));
}

#[test]
fn test_role_change_rerenders_and_clears_drag() {
    let mut controller = controller_as(SyncEvent::RoleAssigned(Color::White));
    let renders = controller.render_count();
    controller.begin_drag(sq("e2"));

    controller.handle(SyncEvent::SpectatorAssigned);

    assert_eq!(controller.render_count(), renders + 1);
    assert_eq!(controller.dragged(), None);
    assert!(!controller.model().is_draggable(sq("e2")));
}

#[test]
fn test_channel_error_becomes_diagnostic() {
    let mut controller: SyncController = SyncController::new();
    let err = ChannelError::new(ChannelErrorKind::UnknownEvent("chat".to_string()));

    controller.note_channel_error(&err);

    assert!(matches!(
        controller.diagnostic(),
        Some(Diagnostic::Channel { message }) if message.contains("chat")
    ));
}

#[test]
fn test_diagnostics_have_readable_messages() {
    let rejected = Diagnostic::MoveRejected { mv: mv("e2", "e5") };
    assert_eq!(rejected.to_string(), "Move e2e5 was rejected");
    assert_eq!(Diagnostic::Disconnected.to_string(), "Disconnected from server");
}
