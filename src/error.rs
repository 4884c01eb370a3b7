//! Error types shared by the domain and application layers.

use thiserror::Error;

use crate::application::TransitionState;

/// Errors surfaced by the automaton, the orchestrator and the simulation façade.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LifeError {
    /// Malformed size, density or timing parameter.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// What was wrong with the parameters.
        reason: String,
    },

    /// A step was requested while a transition is still running.
    /// This is a busy signal; the scheduler should skip the tick.
    #[error("transition already in progress (state: {state:?})")]
    AlreadyInProgress {
        /// State the orchestrator was in when the request arrived.
        state: TransitionState,
    },

    /// `begin_animation` was called without a prepared transition.
    #[error("no pending transition to animate")]
    NoPendingTransition,

    /// The grid a transition starts from does not match the tracked live cells.
    #[error("grid out of sync with tracked entities: {untracked} live cells without an entity, {orphaned} entities without a live cell")]
    StaleGrid {
        /// Live cells in the grid that have no entity.
        untracked: usize,
        /// Tracked entities whose cell is dead in the grid.
        orphaned: usize,
    },

    /// Two grids that must share dimensions do not.
    #[error("grid dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Side length of the reference grid.
        expected: usize,
        /// Side length of the offending grid.
        found: usize,
    },
}

impl LifeError {
    pub(crate) fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// True for the recoverable "try again on a later tick" signal
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::AlreadyInProgress { .. })
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LifeError>;
