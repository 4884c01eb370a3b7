// Domain layer - automaton, connectivity and patterns
pub mod domain;

// Application layer - transition orchestration and scheduling
pub mod application;

pub mod error;

// Infrastructure layer - macroquad front end
pub mod ui;
pub mod rendering;
pub mod input;

// Re-exports for convenience
pub use domain::{Cell, CellRef, Grid, GridAutomaton, Organism, Pattern, cluster, presets};
pub use application::{
    Camera, EntityHandle, OrchestratorConfig, Progress, Simulation, SimulationConfig,
    TransitionOrchestrator, TransitionState, TransitionSummary, VisualLayer,
};
pub use error::{LifeError, Result};
