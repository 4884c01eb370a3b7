//! Sequencing of one generation step as an animated transaction.
//!
//! A step runs `Idle → Preparing → Shrinking → Regrouping → Growing → Idle`.
//! Shrinking and Growing fan out one animation per entity and wait on a join
//! until every completion signal has arrived. Regrouping runs synchronously in
//! between, so it always sees a fully shrunk, not yet grown entity set.
//! Only one transition exists at a time; out-of-turn requests are rejected
//! without touching state.

use std::collections::HashSet;

use log::{debug, warn};

use super::config::OrchestratorConfig;
use super::visual::{EntityHandle, VisualLayer};
use crate::domain::{CellRef, Grid, GridAutomaton, Organism, cluster};
use crate::error::{LifeError, Result};

/// Lifecycle of the orchestrator
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TransitionState {
    #[default]
    Idle,
    /// A transition is prepared and waiting for `begin_animation`
    Preparing,
    Shrinking,
    Regrouping,
    Growing,
}

/// A cell together with the visual entity that stands for it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrackedCell {
    pub cell: CellRef,
    pub handle: EntityHandle,
}

/// Classification of every grid cell for one generation step
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PendingTransition {
    appearing: Vec<TrackedCell>,
    disappearing: Vec<TrackedCell>,
    persistent: Vec<CellRef>,
    untouched: usize,
}

impl PendingTransition {
    /// Cells going 0 → 1, with their freshly created (hidden) placeholders
    pub fn appearing(&self) -> &[TrackedCell] {
        &self.appearing
    }

    /// Cells going 1 → 0, with the entities to shrink and remove
    pub fn disappearing(&self) -> &[TrackedCell] {
        &self.disappearing
    }

    /// Cells alive in both generations
    pub fn persistent(&self) -> &[CellRef] {
        &self.persistent
    }

    /// Number of cells dead in both generations
    pub fn untouched(&self) -> usize {
        self.untouched
    }

    /// True when the live-cell set does not change
    pub fn is_noop(&self) -> bool {
        self.appearing.is_empty() && self.disappearing.is_empty()
    }
}

/// Outcome of a finished transition, handed to completion listeners
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionSummary {
    pub appeared: usize,
    pub disappeared: usize,
    pub persisted: usize,
    pub organisms: usize,
    /// Whether organisms were recomputed
    pub regrouped: bool,
    /// Whether the transition was fast-forwarded by a cancel or timeout
    pub cancelled: bool,
}

/// Where a transition stands after a call that may have advanced it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress {
    /// Nothing in flight
    Idle,
    /// Prepared, or suspended in a join waiting for `remaining` signals
    Waiting {
        state: TransitionState,
        remaining: usize,
    },
    /// The transition just finished; the orchestrator is idle again
    Completed(TransitionSummary),
}

/// Fan-out/fan-in barrier over entity handles.
/// Completing a handle twice, or one that was never armed, has no effect.
#[derive(Debug, Default)]
struct Join {
    waiting: HashSet<EntityHandle>,
}

impl Join {
    fn arm(&mut self, handles: impl IntoIterator<Item = EntityHandle>) {
        self.waiting.clear();
        self.waiting.extend(handles);
    }

    fn complete(&mut self, handle: EntityHandle) -> bool {
        self.waiting.remove(&handle)
    }

    fn remaining(&self) -> usize {
        self.waiting.len()
    }

    fn is_done(&self) -> bool {
        self.waiting.is_empty()
    }

    fn drain(&mut self) -> Vec<EntityHandle> {
        let mut handles: Vec<_> = self.waiting.drain().collect();
        handles.sort();
        handles
    }
}

#[derive(Clone, Copy, Debug)]
struct LiveEntity {
    handle: EntityHandle,
    /// Appeared in the transition currently in flight
    is_new: bool,
}

/// Owns the live-entity bookkeeping and the organism list, and sequences
/// each generation step against a [`VisualLayer`].
#[derive(Debug)]
pub struct TransitionOrchestrator {
    size: usize,
    config: OrchestratorConfig,
    state: TransitionState,
    pending: Option<PendingTransition>,
    /// Arena indexed by `CellRef::index`
    entities: Vec<Option<LiveEntity>>,
    organisms: Vec<Organism>,
    join: Join,
    regrouped: bool,
    phase_elapsed: f32,
    completed: u64,
}

impl TransitionOrchestrator {
    pub fn new(size: usize, config: OrchestratorConfig) -> Self {
        Self {
            size,
            config,
            state: TransitionState::Idle,
            pending: None,
            entities: vec![None; size * size],
            organisms: Vec::new(),
            join: Join::default(),
            regrouped: false,
            phase_elapsed: 0.0,
            completed: 0,
        }
    }

    pub fn state(&self) -> TransitionState {
        self.state
    }

    /// Readiness check for the scheduler
    pub fn is_idle(&self) -> bool {
        self.state == TransitionState::Idle
    }

    pub fn pending(&self) -> Option<&PendingTransition> {
        self.pending.as_ref()
    }

    pub fn organisms(&self) -> &[Organism] {
        &self.organisms
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of transitions that reached Idle again
    pub fn completed_transitions(&self) -> u64 {
        self.completed
    }

    /// Cells currently tracked as alive, in row-major order
    pub fn live_cells(&self) -> Vec<CellRef> {
        self.entities
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(i, _)| CellRef::from_index(i, self.size))
            .collect()
    }

    pub fn entity_at(&self, cell: CellRef) -> Option<EntityHandle> {
        self.slot(cell).map(|e| e.handle)
    }

    /// Whether the entity at `cell` appeared in the transition still in flight
    pub fn is_new(&self, cell: CellRef) -> bool {
        self.slot(cell).is_some_and(|e| e.is_new)
    }

    fn slot(&self, cell: CellRef) -> Option<&LiveEntity> {
        self.entities.get(cell.index(self.size)).and_then(Option::as_ref)
    }

    /// Build bookkeeping for a fresh board: one visible entity per live cell,
    /// then a full clustering. Anything tracked before is removed first.
    pub fn populate<V: VisualLayer>(&mut self, grid: &Grid, visual: &mut V) {
        self.clear(visual);
        self.size = grid.size();
        self.entities = vec![None; self.size * self.size];

        for cell in grid.live_cells() {
            let handle = visual.create_placeholder(cell);
            visual.set_visible(handle, true);
            visual.finish_animation(handle);
            self.entities[cell.index(self.size)] = Some(LiveEntity { handle, is_new: false });
        }

        self.recluster(visual);
        debug!(
            "populated {} entities in {} organisms",
            grid.population(),
            self.organisms.len()
        );
    }

    /// Drop every entity, organism and pending transition; state becomes Idle
    pub fn clear<V: VisualLayer>(&mut self, visual: &mut V) {
        if let Some(pending) = self.pending.take() {
            // placeholders not yet moved into the arena
            for tracked in &pending.appearing {
                if self.slot(tracked.cell).map(|e| e.handle) != Some(tracked.handle) {
                    visual.remove_entity(tracked.handle);
                }
            }
        }
        for entity in self.entities.iter_mut().filter_map(Option::take) {
            visual.remove_entity(entity.handle);
        }
        self.organisms.clear();
        visual.rebuild_aggregate_visual(&self.organisms);
        self.join.arm([]);
        self.regrouped = false;
        self.phase_elapsed = 0.0;
        self.set_state(TransitionState::Idle);
    }

    /// Classify the step from `current` to `next` and create hidden
    /// placeholders for every appearing cell.
    ///
    /// Only valid from Idle; otherwise returns [`LifeError::AlreadyInProgress`]
    /// and leaves the transition in flight untouched. `current` must hold
    /// exactly the tracked live cells, else [`LifeError::StaleGrid`] is
    /// returned before any placeholder is created.
    pub fn prepare<V: VisualLayer>(
        &mut self,
        current: &Grid,
        next: &Grid,
        visual: &mut V,
    ) -> Result<&PendingTransition> {
        if !self.is_idle() {
            debug!("prepare rejected while {:?}", self.state);
            return Err(LifeError::AlreadyInProgress { state: self.state });
        }
        if current.size() != self.size {
            return Err(LifeError::DimensionMismatch {
                expected: self.size,
                found: current.size(),
            });
        }

        self.check_in_sync(current)?;

        let changes = GridAutomaton::diff(current, next)?;
        let mut appearing = Vec::new();
        let mut disappearing = Vec::new();

        for (x, y, state) in changes {
            let cell = CellRef::new(x, y);
            if state.is_alive() {
                let handle = visual.create_placeholder(cell);
                appearing.push(TrackedCell { cell, handle });
            } else if let Some(handle) = self.entity_at(cell) {
                disappearing.push(TrackedCell { cell, handle });
            }
        }

        let persistent: Vec<CellRef> = current
            .iter_cells()
            .filter(|&(cell, state)| state.is_alive() && next.get(cell).is_alive())
            .map(|(cell, _)| cell)
            .collect();
        let untouched = self.size * self.size - appearing.len() - disappearing.len() - persistent.len();

        debug!(
            "prepared transition: +{} -{} ={} ({} untouched)",
            appearing.len(),
            disappearing.len(),
            persistent.len(),
            untouched
        );

        self.regrouped = false;
        self.set_state(TransitionState::Preparing);
        Ok(&*self.pending.insert(PendingTransition {
            appearing,
            disappearing,
            persistent,
            untouched,
        }))
    }

    /// Every live cell of `grid` must own an entity and every entity a live cell
    fn check_in_sync(&self, grid: &Grid) -> Result<()> {
        let mut untracked = 0;
        let mut orphaned = 0;
        for (cell, state) in grid.iter_cells() {
            match (state.is_alive(), self.slot(cell).is_some()) {
                (true, false) => untracked += 1,
                (false, true) => orphaned += 1,
                _ => {}
            }
        }
        if untracked + orphaned > 0 {
            warn!("prepare rejected: {untracked} untracked live cells, {orphaned} orphaned entities");
            return Err(LifeError::StaleGrid { untracked, orphaned });
        }
        Ok(())
    }

    /// Start the prepared transition: shrink, regroup, grow.
    ///
    /// Returns immediately with [`Progress::Waiting`] once a join needs
    /// completion signals, or [`Progress::Completed`] if nothing had to be
    /// waited on.
    pub fn begin_animation<V: VisualLayer>(&mut self, visual: &mut V) -> Result<Progress> {
        match self.state {
            TransitionState::Preparing => {}
            TransitionState::Idle => return Err(LifeError::NoPendingTransition),
            state => return Err(LifeError::AlreadyInProgress { state }),
        }
        let Some(pending) = self.pending.as_ref() else {
            return Err(LifeError::NoPendingTransition);
        };

        if pending.is_noop() {
            return Ok(self.finish(false));
        }
        Ok(self.enter_shrink(visual))
    }

    /// Completion signal for one removal animation
    pub fn removal_complete<V: VisualLayer>(&mut self, handle: EntityHandle, visual: &mut V) -> Progress {
        if self.state != TransitionState::Shrinking {
            debug!("removal signal for {handle:?} ignored while {:?}", self.state);
            return self.progress();
        }
        if !self.join.complete(handle) {
            debug!("duplicate or unknown removal signal for {handle:?}");
            return self.progress();
        }
        if self.join.is_done() {
            self.regroup(visual);
            return self.enter_grow(visual);
        }
        self.progress()
    }

    /// Completion signal for one growth animation
    pub fn growth_complete(&mut self, handle: EntityHandle) -> Progress {
        if self.state != TransitionState::Growing {
            debug!("growth signal for {handle:?} ignored while {:?}", self.state);
            return self.progress();
        }
        if !self.join.complete(handle) {
            debug!("duplicate or unknown growth signal for {handle:?}");
            return self.progress();
        }
        if self.join.is_done() {
            return self.finish(false);
        }
        self.progress()
    }

    /// Let `dt` seconds pass for the join timeout. A join that has waited
    /// longer than the configured timeout is fast-forwarded with [`cancel`](Self::cancel).
    pub fn advance<V: VisualLayer>(&mut self, dt: f32, visual: &mut V) -> Progress {
        if !matches!(self.state, TransitionState::Shrinking | TransitionState::Growing) {
            return self.progress();
        }
        self.phase_elapsed += dt;
        match self.config.join_timeout {
            Some(timeout) if self.phase_elapsed > timeout => {
                warn!(
                    "{:?} join timed out after {:.2}s with {} signals outstanding",
                    self.state,
                    self.phase_elapsed,
                    self.join.remaining()
                );
                self.cancel(visual)
            }
            _ => self.progress(),
        }
    }

    /// Fast-forward any transition in flight to Idle.
    ///
    /// Outstanding animations are snapped to their end state, regrouping runs
    /// if it has not yet, and appearing entities are shown at rest, so the
    /// organism list always matches a consistent live-cell set afterwards.
    pub fn cancel<V: VisualLayer>(&mut self, visual: &mut V) -> Progress {
        match self.state {
            TransitionState::Idle => Progress::Idle,
            TransitionState::Preparing | TransitionState::Shrinking | TransitionState::Regrouping => {
                for handle in self.join.drain() {
                    visual.finish_animation(handle);
                }
                if self.pending.as_ref().is_some_and(|p| !p.is_noop()) {
                    self.regroup(visual);
                    for handle in self.appearing_handles() {
                        visual.set_visible(handle, true);
                        visual.finish_animation(handle);
                    }
                }
                self.finish(true)
            }
            TransitionState::Growing => {
                for handle in self.join.drain() {
                    visual.finish_animation(handle);
                }
                self.finish(true)
            }
        }
    }

    fn enter_shrink<V: VisualLayer>(&mut self, visual: &mut V) -> Progress {
        self.set_state(TransitionState::Shrinking);
        let handles: Vec<EntityHandle> = self
            .pending
            .as_ref()
            .map(|p| p.disappearing.iter().map(|t| t.handle).collect())
            .unwrap_or_default();

        for &handle in &handles {
            visual.animate_removal(handle);
        }
        self.join.arm(handles);

        if self.join.is_done() {
            self.regroup(visual);
            return self.enter_grow(visual);
        }
        self.progress()
    }

    /// Swap dying entities for newborn ones in the bookkeeping and recluster.
    /// Aggregate visuals are rebuilt from scratch.
    fn regroup<V: VisualLayer>(&mut self, visual: &mut V) {
        self.set_state(TransitionState::Regrouping);
        if let Some(pending) = &self.pending {
            for tracked in &pending.disappearing {
                visual.remove_entity(tracked.handle);
                self.entities[tracked.cell.index(self.size)] = None;
            }
            for tracked in &pending.appearing {
                self.entities[tracked.cell.index(self.size)] = Some(LiveEntity {
                    handle: tracked.handle,
                    is_new: true,
                });
            }
        }
        self.recluster(visual);
        self.regrouped = true;
    }

    fn enter_grow<V: VisualLayer>(&mut self, visual: &mut V) -> Progress {
        self.set_state(TransitionState::Growing);
        let handles = self.appearing_handles();

        for &handle in &handles {
            visual.set_visible(handle, true);
            visual.animate_growth(handle);
        }
        self.join.arm(handles);

        if self.join.is_done() {
            return self.finish(false);
        }
        self.progress()
    }

    fn finish(&mut self, cancelled: bool) -> Progress {
        let pending = self.pending.take().unwrap_or_default();
        for entity in self.entities.iter_mut().flatten() {
            entity.is_new = false;
        }

        let summary = TransitionSummary {
            appeared: pending.appearing.len(),
            disappeared: pending.disappearing.len(),
            persisted: pending.persistent.len(),
            organisms: self.organisms.len(),
            regrouped: self.regrouped,
            cancelled,
        };
        self.join.arm([]);
        self.regrouped = false;
        self.completed += 1;
        self.set_state(TransitionState::Idle);
        Progress::Completed(summary)
    }

    fn recluster<V: VisualLayer>(&mut self, visual: &mut V) {
        self.organisms = cluster(&self.live_cells(), self.size);
        visual.rebuild_aggregate_visual(&self.organisms);
    }

    fn appearing_handles(&self) -> Vec<EntityHandle> {
        self.pending
            .as_ref()
            .map(|p| p.appearing.iter().map(|t| t.handle).collect())
            .unwrap_or_default()
    }

    fn progress(&self) -> Progress {
        match self.state {
            TransitionState::Idle => Progress::Idle,
            state => Progress::Waiting {
                state,
                remaining: self.join.remaining(),
            },
        }
    }

    fn set_state(&mut self, state: TransitionState) {
        if self.state != state {
            debug!("transition {:?} -> {:?}", self.state, state);
            self.state = state;
            self.phase_elapsed = 0.0;
        }
    }
}
