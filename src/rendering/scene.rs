//! Visual layer for the demo: one blob per live cell, blended per organism.
//!
//! Animation state is advanced by [`SceneVisual::update`], which reports the
//! animations that ended during the frame so the caller can forward them to
//! the simulation as completion signals.

use std::collections::HashMap;

use crate::application::{EntityHandle, VisualLayer};
use crate::domain::{CellRef, Organism};

/// Scale units per second for shrink and grow animations
pub const SCALE_RATE: f32 = 1.0 / 0.35;

/// An animation that ended during the last [`SceneVisual::update`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Finished {
    Removal(EntityHandle),
    Growth(EntityHandle),
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Motion {
    Resting,
    Shrinking,
    Growing,
}

#[derive(Clone, Copy, Debug)]
pub struct Blob {
    pub cell: CellRef,
    pub scale: f32,
    pub visible: bool,
    motion: Motion,
}

/// Merged shape for one organism
#[derive(Clone, Debug)]
pub struct Aggregate {
    pub color_slot: usize,
    pub cells: Vec<CellRef>,
}

#[derive(Default)]
pub struct SceneVisual {
    blobs: HashMap<EntityHandle, Blob>,
    by_cell: HashMap<CellRef, EntityHandle>,
    aggregates: Vec<Aggregate>,
    palette_len: usize,
    next_id: u64,
}

impl SceneVisual {
    pub fn new(palette_len: usize) -> Self {
        Self {
            palette_len,
            ..Self::default()
        }
    }

    pub fn aggregates(&self) -> &[Aggregate] {
        &self.aggregates
    }

    pub fn blob(&self, handle: EntityHandle) -> Option<&Blob> {
        self.blobs.get(&handle)
    }

    /// Blob currently standing for `cell`, if it is shown
    pub fn blob_at(&self, cell: CellRef) -> Option<&Blob> {
        self.by_cell
            .get(&cell)
            .and_then(|h| self.blobs.get(h))
            .filter(|b| b.visible)
    }

    pub fn is_animating(&self) -> bool {
        self.blobs.values().any(|b| b.motion != Motion::Resting)
    }

    /// Advance every running animation by `dt` seconds
    pub fn update(&mut self, dt: f32) -> Vec<Finished> {
        let step = dt * SCALE_RATE;
        let mut finished = Vec::new();

        for (&handle, blob) in self.blobs.iter_mut() {
            match blob.motion {
                Motion::Resting => {}
                Motion::Shrinking => {
                    blob.scale = (blob.scale - step).max(0.0);
                    if blob.scale == 0.0 {
                        blob.motion = Motion::Resting;
                        finished.push(Finished::Removal(handle));
                    }
                }
                Motion::Growing => {
                    blob.scale = (blob.scale + step).min(1.0);
                    if blob.scale == 1.0 {
                        blob.motion = Motion::Resting;
                        finished.push(Finished::Growth(handle));
                    }
                }
            }
        }

        finished
    }
}

impl VisualLayer for SceneVisual {
    fn create_placeholder(&mut self, cell: CellRef) -> EntityHandle {
        let handle = EntityHandle(self.next_id);
        self.next_id += 1;
        self.blobs.insert(handle, Blob {
            cell,
            scale: 0.0,
            visible: false,
            motion: Motion::Resting,
        });
        handle
    }

    fn animate_removal(&mut self, handle: EntityHandle) {
        if let Some(blob) = self.blobs.get_mut(&handle) {
            blob.motion = Motion::Shrinking;
        }
    }

    fn animate_growth(&mut self, handle: EntityHandle) {
        if let Some(blob) = self.blobs.get_mut(&handle) {
            blob.motion = Motion::Growing;
        }
    }

    fn set_visible(&mut self, handle: EntityHandle, visible: bool) {
        if let Some(blob) = self.blobs.get_mut(&handle) {
            blob.visible = visible;
            if visible {
                self.by_cell.insert(blob.cell, handle);
            }
        }
    }

    fn rebuild_aggregate_visual(&mut self, organisms: &[Organism]) {
        self.aggregates = organisms
            .iter()
            .map(|o| Aggregate {
                color_slot: o.color_slot(self.palette_len),
                cells: o.cells.clone(),
            })
            .collect();
    }

    fn remove_entity(&mut self, handle: EntityHandle) {
        if let Some(blob) = self.blobs.remove(&handle) {
            if self.by_cell.get(&blob.cell) == Some(&handle) {
                self.by_cell.remove(&blob.cell);
            }
        }
    }

    fn finish_animation(&mut self, handle: EntityHandle) {
        if let Some(blob) = self.blobs.get_mut(&handle) {
            blob.scale = if blob.motion == Motion::Shrinking { 0.0 } else { 1.0 };
            blob.motion = Motion::Resting;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_starts_hidden_at_zero_scale() {
        let mut scene = SceneVisual::new(4);
        let handle = scene.create_placeholder(CellRef::new(1, 1));
        let blob = scene.blob(handle).unwrap();
        assert!(!blob.visible);
        assert_eq!(blob.scale, 0.0);
        assert!(scene.blob_at(CellRef::new(1, 1)).is_none());
    }

    #[test]
    fn test_growth_reports_completion_once() {
        let mut scene = SceneVisual::new(4);
        let handle = scene.create_placeholder(CellRef::new(0, 0));
        scene.set_visible(handle, true);
        scene.animate_growth(handle);

        assert!(scene.update(0.1).is_empty());
        assert_eq!(scene.update(1.0), vec![Finished::Growth(handle)]);
        assert!(scene.update(1.0).is_empty());
        assert_eq!(scene.blob(handle).unwrap().scale, 1.0);
        assert!(!scene.is_animating());
    }

    #[test]
    fn test_removal_then_remove_entity() {
        let mut scene = SceneVisual::new(4);
        let handle = scene.create_placeholder(CellRef::new(2, 3));
        scene.set_visible(handle, true);
        scene.finish_animation(handle);
        scene.animate_removal(handle);
        assert!(scene.is_animating());

        assert_eq!(scene.update(1.0), vec![Finished::Removal(handle)]);
        scene.remove_entity(handle);
        assert!(scene.blob(handle).is_none());
        assert!(scene.blob_at(CellRef::new(2, 3)).is_none());
    }

    #[test]
    fn test_finish_snaps_to_end_state() {
        let mut scene = SceneVisual::new(4);
        let grow = scene.create_placeholder(CellRef::new(0, 0));
        scene.animate_growth(grow);
        scene.finish_animation(grow);
        assert_eq!(scene.blob(grow).unwrap().scale, 1.0);
        assert!(scene.update(1.0).is_empty());
    }

    #[test]
    fn test_rebuild_replaces_aggregates() {
        let mut scene = SceneVisual::new(3);
        let organisms = vec![
            Organism { id: 0, cells: vec![CellRef::new(0, 0)] },
            Organism { id: 4, cells: vec![CellRef::new(5, 5)] },
        ];
        scene.rebuild_aggregate_visual(&organisms);
        assert_eq!(scene.aggregates().len(), 2);
        assert_eq!(scene.aggregates()[1].color_slot, 1);
        scene.rebuild_aggregate_visual(&[]);
        assert!(scene.aggregates().is_empty());
    }
}
