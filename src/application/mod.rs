mod camera;
mod config;
mod orchestrator;
mod simulation;
mod visual;

pub use camera::Camera;
pub use config::{MAX_STEPS_PER_SECOND, MIN_STEPS_PER_SECOND, OrchestratorConfig, SimulationConfig};
pub use orchestrator::{
    PendingTransition, Progress, TrackedCell, TransitionOrchestrator, TransitionState,
    TransitionSummary,
};
pub use simulation::Simulation;
pub use visual::{EntityHandle, VisualLayer};
