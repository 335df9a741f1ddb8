//! Participation mode assigned by the authority.

use crate::games::chess::Color;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// The client's role in the active session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Role {
    /// No role received yet (or the session was torn down).
    #[default]
    Unassigned,
    /// Playing one side.
    Player(Color),
    /// Watching only.
    Spectator,
}

impl Role {
    /// Color played, if this is a player role.
    pub fn color(self) -> Option<Color> {
        match self {
            Role::Player(color) => Some(color),
            Role::Unassigned | Role::Spectator => None,
        }
    }

    /// Short description for status lines.
    pub fn label(self) -> String {
        match self {
            Role::Unassigned => "Waiting for role".to_string(),
            Role::Player(color) => format!("Playing {}", color),
            Role::Spectator => "Spectating".to_string(),
        }
    }
}

/// Board orientation on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Rank 8 at the top, a-file on the left.
    Standard,
    /// Mirrored on both axes (rank 1 at the top, h-file on the left).
    Flipped,
}

/// Holds the current role. Replaced wholesale, never patched.
#[derive(Debug, Clone, Default)]
pub struct RoleState {
    current: Role,
}

impl RoleState {
    /// Creates an unassigned role state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the role.
    #[instrument(skip(self))]
    pub fn assign(&mut self, role: Role) {
        info!(previous = ?self.current, next = ?role, "Role assigned");
        self.current = role;
    }

    /// Current role.
    pub fn current(&self) -> Role {
        self.current
    }

    /// Whether local input may move pieces of `color`.
    pub fn may_drag(&self, color: Color) -> bool {
        self.current == Role::Player(color)
    }

    /// Orientation implied by the role.
    pub fn orientation(&self) -> Orientation {
        match self.current {
            Role::Player(Color::Black) => Orientation::Flipped,
            Role::Player(Color::White) | Role::Spectator | Role::Unassigned => {
                Orientation::Standard
            }
        }
    }
}
