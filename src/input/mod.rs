use log::warn;
use macroquad::prelude::*;

use crate::application::{Camera, Simulation, VisualLayer};
use crate::domain::presets;
use crate::rendering::in_board_area;
use crate::ui::{Button, ButtonAction, grid_area_height, grid_area_width, CELL_SIZE};

/// Density change per `[` / `]` press
const DENSITY_STEP: f64 = 0.05;

const PATTERN_KEYS: [KeyCode; 7] = [
    KeyCode::Key1,
    KeyCode::Key2,
    KeyCode::Key3,
    KeyCode::Key4,
    KeyCode::Key5,
    KeyCode::Key6,
    KeyCode::Key7,
];

/// Handle zoom with mouse wheel
pub fn handle_zoom(camera: &mut Camera) {
    let wheel = mouse_wheel().1;
    if wheel > 0.0 {
        camera.zoom_in(1.1);
    } else if wheel < 0.0 {
        camera.zoom_out(1.1);
    }
}

/// Handle pan with middle mouse button drag
pub fn handle_pan(camera: &mut Camera, mouse_pos: (f32, f32)) {
    let held = is_mouse_button_down(MouseButton::Middle);
    camera.drag(held.then_some(mouse_pos));
}

/// Re-seed with a new density, logging rather than failing on bad input
fn reset_with<V: VisualLayer>(sim: &mut Simulation<V>, density: f64) {
    if let Err(err) = sim.reset(density.clamp(0.0, 1.0)) {
        warn!("reset failed: {err}");
    }
}

fn perform<V: VisualLayer>(sim: &mut Simulation<V>, action: ButtonAction) {
    match action {
        ButtonAction::PlayPause => sim.toggle_running(),
        ButtonAction::Step => {
            sim.request_step();
        }
        ButtonAction::Reset => {
            let density = sim.config().density;
            reset_with(sim, density);
        }
    }
}

/// Keyboard shortcuts; patterns are placed under the cursor, or centred
/// when the cursor is over the panel
pub fn process_keyboard_input<V: VisualLayer>(sim: &mut Simulation<V>, camera: &mut Camera, mouse_pos: (f32, f32)) {
    let bindings = [
        (KeyCode::Space, ButtonAction::PlayPause),
        (KeyCode::N, ButtonAction::Step),
        (KeyCode::R, ButtonAction::Reset),
    ];
    for (key, action) in bindings {
        if is_key_pressed(key) {
            perform(sim, action);
        }
    }

    if is_key_pressed(KeyCode::Up) {
        sim.adjust_speed(1.0);
    }
    if is_key_pressed(KeyCode::Down) {
        sim.adjust_speed(-1.0);
    }

    let density = sim.config().density;
    if is_key_pressed(KeyCode::LeftBracket) {
        reset_with(sim, density - DENSITY_STEP);
    }
    if is_key_pressed(KeyCode::RightBracket) {
        reset_with(sim, density + DENSITY_STEP);
    }

    let size = sim.current_grid().size();
    if let Some(index) = PATTERN_KEYS.iter().position(|&k| is_key_pressed(k)) {
        if let Some(pattern) = presets::all_patterns().get(index) {
            let (x, y) = if in_board_area(mouse_pos) {
                let (gx, gy) = camera.screen_to_grid(mouse_pos.0, mouse_pos.1, CELL_SIZE);
                (gx - pattern.width as i64 / 2, gy - pattern.height as i64 / 2)
            } else {
                pattern.centered_origin(size)
            };
            sim.place_pattern(pattern, x, y);
        }
    }

    // Fit the board to the view with 'H' (home)
    if is_key_pressed(KeyCode::H) {
        camera.fit(size, grid_area_width(), grid_area_height(), CELL_SIZE);
    }
}

/// Process panel button clicks
pub fn process_button_clicks<V: VisualLayer>(sim: &mut Simulation<V>, buttons: &[Button], mouse_pos: (f32, f32)) {
    if let Some(button) = buttons.iter().find(|b| b.is_clicked(mouse_pos)) {
        perform(sim, button.action());
    }
}
