mod button;

pub use button::Button;

// Layout helpers - functions so the panel follows window resizes
use macroquad::prelude::{Rect, screen_width, screen_height};

pub const PANEL_WIDTH: f32 = 180.0;
pub const BUTTON_HEIGHT: f32 = 40.0;
/// Cell edge in pixels at zoom 1.0
pub const CELL_SIZE: f32 = 16.0;

/// Get the X position where the panel starts (right side)
pub fn panel_x() -> f32 {
    screen_width() - PANEL_WIDTH
}

/// Get the width of the board area
pub fn grid_area_width() -> f32 {
    screen_width() - PANEL_WIDTH
}

/// Get the height of the board area
pub fn grid_area_height() -> f32 {
    screen_height()
}

/// Actions bound to the panel buttons, in layout order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonAction {
    PlayPause,
    Step,
    Reset,
}

pub const BUTTON_ACTIONS: [ButtonAction; 3] = [
    ButtonAction::PlayPause,
    ButtonAction::Step,
    ButtonAction::Reset,
];

/// Create the panel buttons; Step is only enabled while no transition runs
pub fn create_buttons(idle: bool) -> Vec<Button> {
    let px = panel_x();
    BUTTON_ACTIONS
        .iter()
        .enumerate()
        .map(|(i, &action)| {
            let rect = Rect::new(px, 20.0 + i as f32 * 50.0, PANEL_WIDTH, BUTTON_HEIGHT);
            let label = match action {
                ButtonAction::PlayPause => "Play/Pause",
                ButtonAction::Step => "Step",
                ButtonAction::Reset => "Reset",
            };
            Button::new(rect, label, action).with_enabled(action != ButtonAction::Step || idle)
        })
        .collect()
}
