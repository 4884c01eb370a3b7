use crate::domain::{CellRef, Organism};

/// Opaque identifier for a per-cell entity owned by the visual layer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityHandle(pub u64);

/// Capabilities the transition orchestrator needs from whatever draws the cells.
///
/// `animate_removal` and `animate_growth` start an animation and return at once.
/// The visual layer reports the end of each one exactly once through
/// [`Simulation::removal_complete`](crate::application::Simulation::removal_complete) /
/// [`Simulation::growth_complete`](crate::application::Simulation::growth_complete).
pub trait VisualLayer {
    /// New entity for a cell, invisible (zero scale) until told otherwise
    fn create_placeholder(&mut self, cell: CellRef) -> EntityHandle;

    fn animate_removal(&mut self, handle: EntityHandle);

    fn animate_growth(&mut self, handle: EntityHandle);

    fn set_visible(&mut self, handle: EntityHandle, visible: bool);

    /// Replace every aggregate shape; called with the full organism list
    fn rebuild_aggregate_visual(&mut self, organisms: &[Organism]);

    fn remove_entity(&mut self, handle: EntityHandle);

    /// Jump a running animation to its end state without a completion signal.
    /// Used when a transition is cancelled or times out.
    fn finish_animation(&mut self, _handle: EntityHandle) {}
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Everything the orchestrator asked of the visual layer, in order
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum VisualCall {
        Create(CellRef, EntityHandle),
        AnimateRemoval(EntityHandle),
        AnimateGrowth(EntityHandle),
        SetVisible(EntityHandle, bool),
        Rebuild(usize),
        Remove(EntityHandle),
        Finish(EntityHandle),
    }

    /// Visual layer double that records calls and never completes on its own
    #[derive(Default)]
    pub struct RecordingVisual {
        pub calls: Vec<VisualCall>,
        next_handle: u64,
    }

    impl RecordingVisual {
        pub fn removals(&self) -> Vec<EntityHandle> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    VisualCall::AnimateRemoval(h) => Some(*h),
                    _ => None,
                })
                .collect()
        }

        pub fn growths(&self) -> Vec<EntityHandle> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    VisualCall::AnimateGrowth(h) => Some(*h),
                    _ => None,
                })
                .collect()
        }

        pub fn rebuilds(&self) -> usize {
            self.calls
                .iter()
                .filter(|c| matches!(c, VisualCall::Rebuild(_)))
                .count()
        }

        pub fn position(&self, call: &VisualCall) -> Option<usize> {
            self.calls.iter().position(|c| c == call)
        }
    }

    impl VisualLayer for RecordingVisual {
        fn create_placeholder(&mut self, cell: CellRef) -> EntityHandle {
            let handle = EntityHandle(self.next_handle);
            self.next_handle += 1;
            self.calls.push(VisualCall::Create(cell, handle));
            handle
        }

        fn animate_removal(&mut self, handle: EntityHandle) {
            self.calls.push(VisualCall::AnimateRemoval(handle));
        }

        fn animate_growth(&mut self, handle: EntityHandle) {
            self.calls.push(VisualCall::AnimateGrowth(handle));
        }

        fn set_visible(&mut self, handle: EntityHandle, visible: bool) {
            self.calls.push(VisualCall::SetVisible(handle, visible));
        }

        fn rebuild_aggregate_visual(&mut self, organisms: &[Organism]) {
            self.calls.push(VisualCall::Rebuild(organisms.len()));
        }

        fn remove_entity(&mut self, handle: EntityHandle) {
            self.calls.push(VisualCall::Remove(handle));
        }

        fn finish_animation(&mut self, handle: EntityHandle) {
            self.calls.push(VisualCall::Finish(handle));
        }
    }
}
