/// Camera manages viewport and zoom for the board view
pub struct Camera {
    pub offset_x: f32,
    pub offset_y: f32,
    pub zoom: f32,  // 1.0 = normal, 2.0 = 2x zoomed in
    /// Last cursor position while a pan drag is in progress
    drag_anchor: Option<(f32, f32)>,
}

impl Camera {
    pub const MIN_ZOOM: f32 = 0.25;
    pub const MAX_ZOOM: f32 = 8.0;

    pub fn new() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            zoom: 1.0,
            drag_anchor: None,
        }
    }

    /// Zoom in by factor
    pub fn zoom_in(&mut self, factor: f32) {
        self.zoom = (self.zoom * factor).clamp(Self::MIN_ZOOM, Self::MAX_ZOOM);
    }

    /// Zoom out by factor
    pub fn zoom_out(&mut self, factor: f32) {
        self.zoom = (self.zoom / factor).clamp(Self::MIN_ZOOM, Self::MAX_ZOOM);
    }

    /// Feed the cursor position while the pan button is held; `None` ends the drag
    pub fn drag(&mut self, cursor: Option<(f32, f32)>) {
        if let (Some((x, y)), Some((last_x, last_y))) = (cursor, self.drag_anchor) {
            self.offset_x += x - last_x;
            self.offset_y += y - last_y;
        }
        self.drag_anchor = cursor;
    }

    /// Screen position of the centre of cell `(x, y)`
    pub fn cell_center(&self, x: usize, y: usize, cell_size: f32) -> (f32, f32) {
        let size = cell_size * self.zoom;
        (
            (x as f32 + 0.5) * size + self.offset_x,
            (y as f32 + 0.5) * size + self.offset_y,
        )
    }

    /// Grid coordinates under a screen position (may be outside the board)
    pub fn screen_to_grid(&self, screen_x: f32, screen_y: f32, cell_size: f32) -> (i64, i64) {
        let size = cell_size * self.zoom;
        (
            ((screen_x - self.offset_x) / size).floor() as i64,
            ((screen_y - self.offset_y) / size).floor() as i64,
        )
    }

    /// Centre a `board_cells`-wide board in a viewport
    pub fn fit(&mut self, board_cells: usize, viewport_width: f32, viewport_height: f32, cell_size: f32) {
        let natural = board_cells as f32 * cell_size;
        self.zoom = (viewport_width.min(viewport_height) / natural).clamp(Self::MIN_ZOOM, Self::MAX_ZOOM);
        let extent = natural * self.zoom;
        self.offset_x = (viewport_width - extent) / 2.0;
        self.offset_y = (viewport_height - extent) / 2.0;
        self.drag_anchor = None;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_is_clamped() {
        let mut camera = Camera::new();
        (0..50).for_each(|_| camera.zoom_in(2.0));
        assert_eq!(camera.zoom, Camera::MAX_ZOOM);
        (0..50).for_each(|_| camera.zoom_out(2.0));
        assert_eq!(camera.zoom, Camera::MIN_ZOOM);
    }

    #[test]
    fn test_drag_pans_by_cursor_delta() {
        let mut camera = Camera::new();
        camera.drag(Some((10.0, 10.0)));
        camera.drag(Some((25.0, 5.0)));
        camera.drag(None);
        camera.drag(Some((100.0, 100.0)));
        assert_eq!((camera.offset_x, camera.offset_y), (15.0, -5.0));
    }

    #[test]
    fn test_screen_round_trip() {
        let mut camera = Camera::new();
        camera.fit(40, 800.0, 600.0, 10.0);
        let (sx, sy) = camera.cell_center(7, 12, 10.0);
        assert_eq!(camera.screen_to_grid(sx, sy, 10.0), (7, 12));
    }
}
