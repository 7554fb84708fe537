/// Window-level input as last reported by the host.
///
/// Events overwrite fields as they arrive and the frame loop reads a snapshot
/// once per frame, so the most recent write before a frame wins.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputState {
    pub pointer_x: f64,
    pub pointer_y: f64,
    pub scroll_y: f64,
    pub width: f64,
    pub height: f64,
}

impl InputState {
    pub fn with_viewport(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.pointer_x = x;
        self.pointer_y = y;
    }

    pub fn scrolled(&mut self, scroll_y: f64) {
        self.scroll_y = scroll_y;
    }

    pub fn resized(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }
}
