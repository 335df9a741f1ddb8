//! Client session state: the authoritative position plus the assigned role.
//!
//! Only the sync controller mutates a [`Session`]; render and input capture
//! read it through shared references.

mod role;

pub use role::{Orientation, Role, RoleState};

use crate::games::chess::{PositionStore, RulesEngine, ShakmatyEngine};
use tracing::{info, instrument};

/// Position and role for the single active game.
#[derive(Debug, Clone)]
pub struct Session<E: RulesEngine = ShakmatyEngine> {
    position: PositionStore<E>,
    role: RoleState,
}

impl<E: RulesEngine> Default for Session<E> {
    fn default() -> Self {
        Self {
            position: PositionStore::new(),
            role: RoleState::new(),
        }
    }
}

impl<E: RulesEngine> Session<E> {
    /// Creates an empty session (no position, unassigned role).
    pub fn new() -> Self {
        Self::default()
    }

    /// The position store.
    pub fn position(&self) -> &PositionStore<E> {
        &self.position
    }

    /// The role state.
    pub fn role(&self) -> &RoleState {
        &self.role
    }

    pub(crate) fn position_mut(&mut self) -> &mut PositionStore<E> {
        &mut self.position
    }

    pub(crate) fn role_mut(&mut self) -> &mut RoleState {
        &mut self.role
    }

    /// Tears the session down to its initial state.
    #[instrument(skip(self))]
    pub(crate) fn reset(&mut self) {
        info!("Resetting session");
        self.position.clear();
        self.role = RoleState::new();
    }
}
