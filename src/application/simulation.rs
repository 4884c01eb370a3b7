use log::{debug, info, warn};

use super::config::{MAX_STEPS_PER_SECOND, MIN_STEPS_PER_SECOND, SimulationConfig};
use super::orchestrator::{Progress, TransitionOrchestrator, TransitionState, TransitionSummary};
use super::visual::{EntityHandle, VisualLayer};
use crate::domain::{Grid, GridAutomaton, Organism, Pattern};
use crate::error::{LifeError, Result};

type CompletionListener = Box<dyn FnMut(&TransitionSummary)>;

/// Simulation coordinates the automaton, the transition orchestrator and
/// the visual layer. This is the surface the scheduler and input code use.
pub struct Simulation<V: VisualLayer> {
    config: SimulationConfig,
    automaton: GridAutomaton,
    orchestrator: TransitionOrchestrator,
    visual: V,
    is_running: bool,
    update_timer: f32,
    listeners: Vec<CompletionListener>,
    last_summary: Option<TransitionSummary>,
}

impl<V: VisualLayer> Simulation<V> {
    /// Build a board from `config` and populate `visual` with its live cells
    pub fn new(config: SimulationConfig, mut visual: V) -> Result<Self> {
        config.validate()?;
        let automaton = build_automaton(&config, config.density)?;
        let mut orchestrator = TransitionOrchestrator::new(config.size, config.orchestrator);
        orchestrator.populate(automaton.grid(), &mut visual);
        info!(
            "simulation ready: {0}x{0} torus, density {1}, {2} live cells",
            config.size,
            config.density,
            automaton.population()
        );

        Ok(Self {
            config,
            automaton,
            orchestrator,
            visual,
            is_running: false,
            update_timer: 0.0,
            listeners: Vec::new(),
            last_summary: None,
        })
    }

    /// Read-only view of the current generation
    pub fn current_grid(&self) -> &Grid {
        self.automaton.grid()
    }

    pub fn is_idle(&self) -> bool {
        self.orchestrator.is_idle()
    }

    pub fn state(&self) -> TransitionState {
        self.orchestrator.state()
    }

    pub fn organisms(&self) -> &[Organism] {
        self.orchestrator.organisms()
    }

    pub fn generation(&self) -> u64 {
        self.automaton.generation()
    }

    pub fn population(&self) -> usize {
        self.automaton.population()
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn orchestrator(&self) -> &TransitionOrchestrator {
        &self.orchestrator
    }

    pub fn last_summary(&self) -> Option<&TransitionSummary> {
        self.last_summary.as_ref()
    }

    pub fn visual(&self) -> &V {
        &self.visual
    }

    pub fn visual_mut(&mut self) -> &mut V {
        &mut self.visual
    }

    /// Register a callback fired every time a transition returns to Idle
    pub fn on_transition_complete(&mut self, listener: impl FnMut(&TransitionSummary) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Advance one generation if the orchestrator is idle.
    /// Returns whether the step was accepted; a busy orchestrator is not an error.
    pub fn request_step(&mut self) -> bool {
        match self.try_step() {
            Ok(()) => true,
            Err(err) if err.is_busy() => {
                debug!("step skipped: {err}");
                false
            }
            Err(err) => {
                warn!("step failed: {err}");
                false
            }
        }
    }

    fn try_step(&mut self) -> Result<()> {
        if !self.orchestrator.is_idle() {
            return Err(LifeError::AlreadyInProgress {
                state: self.orchestrator.state(),
            });
        }

        // the logical grid is computed and committed before any visual work starts
        let next = self.automaton.next_generation();
        self.orchestrator
            .prepare(self.automaton.grid(), &next, &mut self.visual)?;
        self.automaton.commit(next)?;

        let progress = self.orchestrator.begin_animation(&mut self.visual)?;
        self.handle_progress(progress);
        Ok(())
    }

    /// Stamp a pattern onto the board; new cells are animated in like a step.
    /// Returns false while a transition is running.
    pub fn place_pattern(&mut self, pattern: &Pattern, x: i64, y: i64) -> bool {
        match self.try_place(pattern, x, y) {
            Ok(()) => true,
            Err(err) => {
                debug!("pattern {} not placed: {err}", pattern.name);
                false
            }
        }
    }

    fn try_place(&mut self, pattern: &Pattern, x: i64, y: i64) -> Result<()> {
        if !self.orchestrator.is_idle() {
            return Err(LifeError::AlreadyInProgress {
                state: self.orchestrator.state(),
            });
        }
        let mut stamped = self.automaton.grid().clone();
        pattern.place_on(&mut stamped, x, y);
        self.orchestrator
            .prepare(self.automaton.grid(), &stamped, &mut self.visual)?;
        self.automaton.place_pattern(pattern, x, y);
        let progress = self.orchestrator.begin_animation(&mut self.visual)?;
        self.handle_progress(progress);
        Ok(())
    }

    /// Completion signal from the visual layer for a removal animation
    pub fn removal_complete(&mut self, handle: EntityHandle) {
        let progress = self.orchestrator.removal_complete(handle, &mut self.visual);
        self.handle_progress(progress);
    }

    /// Completion signal from the visual layer for a growth animation
    pub fn growth_complete(&mut self, handle: EntityHandle) {
        let progress = self.orchestrator.growth_complete(handle);
        self.handle_progress(progress);
    }

    /// Fast-forward the transition in flight, if any
    pub fn cancel_transition(&mut self) {
        let progress = self.orchestrator.cancel(&mut self.visual);
        self.handle_progress(progress);
    }

    /// Re-seed the board with `density`, dropping organisms and any transition
    /// in flight. The orchestrator is idle when this returns.
    pub fn reset(&mut self, density: f64) -> Result<()> {
        let automaton = build_automaton(&self.config, density)?;
        self.orchestrator.populate(automaton.grid(), &mut self.visual);
        self.automaton = automaton;
        self.config.density = density;
        self.update_timer = 0.0;
        self.last_summary = None;
        info!(
            "reset with density {density}: {} live cells in {} organisms",
            self.automaton.population(),
            self.orchestrator.organisms().len()
        );
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn set_running(&mut self, running: bool) {
        self.is_running = running;
    }

    /// Toggle play/pause state
    pub fn toggle_running(&mut self) {
        self.is_running = !self.is_running;
    }

    pub fn steps_per_second(&self) -> f32 {
        self.config.steps_per_second
    }

    /// Adjust simulation speed
    pub fn adjust_speed(&mut self, delta: f32) {
        self.config.steps_per_second =
            (self.config.steps_per_second + delta).clamp(MIN_STEPS_PER_SECOND, MAX_STEPS_PER_SECOND);
    }

    /// Clock-driven stepping: once the step interval has elapsed the next
    /// generation is requested, as soon as the orchestrator is idle.
    /// Also feeds the join timeout.
    pub fn tick(&mut self, delta_time: f32) {
        let progress = self.orchestrator.advance(delta_time, &mut self.visual);
        self.handle_progress(progress);

        if !self.is_running {
            return;
        }

        self.update_timer += delta_time;
        let update_interval = 1.0 / self.config.steps_per_second;

        if self.update_timer >= update_interval && self.orchestrator.is_idle() {
            self.update_timer = 0.0;
            self.request_step();
        }
    }

    fn handle_progress(&mut self, progress: Progress) {
        if let Progress::Completed(summary) = progress {
            debug!(
                "transition done: +{} -{}, {} organisms{}",
                summary.appeared,
                summary.disappeared,
                summary.organisms,
                if summary.cancelled { " (fast-forwarded)" } else { "" }
            );
            for listener in &mut self.listeners {
                listener(&summary);
            }
            self.last_summary = Some(summary);
        }
    }
}

fn build_automaton(config: &SimulationConfig, density: f64) -> Result<GridAutomaton> {
    match config.seed {
        Some(seed) => GridAutomaton::initialize_seeded(config.size, density, seed),
        None => GridAutomaton::initialize(config.size, density),
    }
}
