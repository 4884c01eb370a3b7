mod scene;

pub use scene::{Aggregate, Blob, Finished, SceneVisual, SCALE_RATE};

use macroquad::prelude::*;
use crate::application::{Camera, Simulation, TransitionState, VisualLayer};
use crate::domain::CellRef;
use crate::ui::{Button, panel_x, grid_area_width, grid_area_height, CELL_SIZE, PANEL_WIDTH};

/// Organism colours, indexed by `Organism::color_slot`
pub const PALETTE: [Color; 6] = [
    Color::new(0.0, 1.0, 0.59, 1.0),   // green
    Color::new(0.39, 0.58, 0.93, 1.0), // cornflower
    Color::new(1.0, 0.65, 0.0, 1.0),   // orange
    Color::new(0.93, 0.35, 0.62, 1.0), // pink
    Color::new(1.0, 0.9, 0.3, 1.0),    // yellow
    Color::new(0.55, 0.85, 0.95, 1.0), // sky
];

const BOARD_COLOR: Color = Color::new(0.06, 0.06, 0.06, 1.0);

/// Blob radius relative to the cell size at full scale
const BLOB_RADIUS: f32 = 0.42;

/// Draw the board background and every organism as a blended shape
pub fn draw_scene(scene: &SceneVisual, board_size: usize, camera: &Camera) {
    let cell = CELL_SIZE * camera.zoom;
    let (origin_x, origin_y) = (camera.offset_x, camera.offset_y);
    draw_rectangle(origin_x, origin_y, board_size as f32 * cell, board_size as f32 * cell, BOARD_COLOR);

    for aggregate in scene.aggregates() {
        let color = PALETTE[aggregate.color_slot % PALETTE.len()];
        for &member in &aggregate.cells {
            let Some(blob) = scene.blob_at(member) else { continue };
            draw_bridges(scene, member, blob.scale, board_size, camera, color);
            draw_blob(blob, camera, color);
        }
    }
}

fn draw_blob(blob: &Blob, camera: &Camera, color: Color) {
    if blob.scale <= 0.0 {
        return;
    }
    let (x, y) = camera.cell_center(blob.cell.x, blob.cell.y, CELL_SIZE);
    let radius = BLOB_RADIUS * CELL_SIZE * camera.zoom * blob.scale;
    draw_circle(x, y, radius, color);
}

/// Thick segments towards already-visible neighbors so members read as one shape.
/// Links across the torus seam are skipped; they would cross the whole board.
fn draw_bridges(scene: &SceneVisual, cell: CellRef, scale: f32, board_size: usize, camera: &Camera, color: Color) {
    let (x, y) = camera.cell_center(cell.x, cell.y, CELL_SIZE);
    for neighbor in cell.neighbors(board_size) {
        if neighbor.x.abs_diff(cell.x) > 1 || neighbor.y.abs_diff(cell.y) > 1 || neighbor <= cell {
            continue;
        }
        let Some(other) = scene.blob_at(neighbor) else { continue };
        let (nx, ny) = camera.cell_center(neighbor.x, neighbor.y, CELL_SIZE);
        let thickness = BLOB_RADIUS * CELL_SIZE * camera.zoom * scale.min(other.scale) * 1.4;
        if thickness > 0.0 {
            draw_line(x, y, nx, ny, thickness, color);
        }
    }
}

/// Draw control panel background
fn draw_panel_background() {
    draw_rectangle(
        panel_x(),
        0.0,
        PANEL_WIDTH,
        screen_height(),
        Color::from_rgba(30, 30, 30, 255)
    );
}

/// Draw the control panel with buttons and status
pub fn draw_controls<V: VisualLayer>(
    sim: &Simulation<V>,
    camera: &Camera,
    buttons: &[Button],
    mouse_pos: (f32, f32)
) {
    draw_panel_background();
    buttons.iter().for_each(|btn| btn.draw(mouse_pos));

    let px = panel_x();
    let controls = [
        ("Controls:", 200.0, 14.0, WHITE),
        ("Space: Play/Pause", 215.0, 12.0, GRAY),
        ("N: Step   R: Reset", 228.0, 12.0, GRAY),
        ("[ ]: Density", 241.0, 12.0, GRAY),
        ("1-7: Place pattern", 254.0, 12.0, GRAY),
        ("Wheel: Zoom", 267.0, 12.0, GRAY),
        ("Mid-drag: Pan  H: Fit", 280.0, 12.0, GRAY),
    ];
    controls.iter().for_each(|(text, y, size, color)| {
        draw_text(text, px, *y, *size, *color);
    });

    let config = sim.config();
    let phase = sim.state();
    let phase_color = if phase == TransitionState::Idle {
        Color::from_rgba(0, 255, 0, 255)
    } else {
        Color::from_rgba(255, 165, 0, 255)
    };

    let labels = [
        (format!("Board: {0}x{0}", config.size), 320.0, 14.0, WHITE),
        (format!("Density: {:.2}", config.density), 338.0, 14.0, WHITE),
        (format!("Generation: {}", sim.generation()), 370.0, 16.0, WHITE),
        (format!("Live cells: {}", sim.population()), 390.0, 14.0, GRAY),
        (format!("Organisms: {}", sim.organisms().len()), 408.0, 14.0, GRAY),
        (format!("Phase: {:?}", phase), 440.0, 14.0, phase_color),
        (format!("Speed: {:.0} gen/s", sim.steps_per_second()), 470.0, 14.0, GRAY),
        (
            (if sim.is_running() { "Running" } else { "Paused" }).to_string(),
            490.0,
            16.0,
            if sim.is_running() { Color::from_rgba(0, 255, 0, 255) } else { Color::from_rgba(255, 165, 0, 255) },
        ),
        (format!("Zoom: {:.1}x  FPS: {}", camera.zoom, get_fps()), 520.0, 12.0, GRAY),
    ];
    labels.iter().for_each(|(text, y, size, color)| {
        draw_text(text, px, *y, *size, *color);
    });

    if let Some(summary) = sim.last_summary() {
        let text = format!("Last: +{} -{}", summary.appeared, summary.disappeared);
        draw_text(&text, px, 540.0, 12.0, GRAY);
    }
}

/// Whether a screen position falls on the board area (left of the panel)
pub fn in_board_area(pos: (f32, f32)) -> bool {
    pos.0 < grid_area_width() && pos.1 < grid_area_height()
}
