use macroquad::prelude::*;

use super::ButtonAction;

/// Panel button bound to a [`ButtonAction`], greyed out while disabled
#[derive(Clone)]
pub struct Button {
    rect: Rect,
    label: String,
    action: ButtonAction,
    enabled: bool,
}

impl Button {
    const IDLE: Color = Color::new(0.27, 0.51, 0.71, 1.0);
    const HOVER: Color = Color::new(0.39, 0.58, 0.93, 1.0);
    const DISABLED: Color = Color::new(0.25, 0.25, 0.25, 1.0);

    pub fn new(rect: Rect, label: impl Into<String>, action: ButtonAction) -> Self {
        Self {
            rect,
            label: label.into(),
            action,
            enabled: true,
        }
    }

    pub fn action(&self) -> ButtonAction {
        self.action
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn is_hovered(&self, mouse_pos: (f32, f32)) -> bool {
        self.rect.contains(vec2(mouse_pos.0, mouse_pos.1))
    }

    pub fn draw(&self, mouse_pos: (f32, f32)) {
        let fill = match (self.enabled, self.is_hovered(mouse_pos)) {
            (false, _) => Self::DISABLED,
            (true, true) => Self::HOVER,
            (true, false) => Self::IDLE,
        };
        let Rect { x, y, w, h } = self.rect;

        draw_rectangle(x, y, w, h, fill);
        draw_rectangle_lines(x, y, w, h, 2.0, if self.enabled { WHITE } else { GRAY });

        let text_size = measure_text(&self.label, None, 20, 1.0);
        draw_text(
            &self.label,
            x + (w - text_size.width) / 2.0,
            y + (h + text_size.height) / 2.0,
            20.0,
            if self.enabled { WHITE } else { GRAY },
        );
    }

    /// Clicked this frame; disabled buttons never report clicks
    pub fn is_clicked(&self, mouse_pos: (f32, f32)) -> bool {
        self.enabled && self.is_hovered(mouse_pos) && is_mouse_button_pressed(MouseButton::Left)
    }
}
