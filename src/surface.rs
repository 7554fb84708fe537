//! The subset of 2D raster drawing the backdrops need.

/// Immediate-mode 2D drawing target, shaped after the browser canvas API.
pub trait Surface {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64);
    fn stroke(&mut self);
    fn fill(&mut self);
    fn global_alpha(&self) -> f64;
    fn set_global_alpha(&mut self, alpha: f64);
    fn set_stroke_style(&mut self, style: &str);
    fn set_fill_style(&mut self, style: &str);
    fn set_line_width(&mut self, width: f64);

    /// Fills a full circle centred on `(x, y)`.
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64) {
        self.begin_path();
        self.arc(x, y, radius, 0.0, std::f64::consts::TAU);
        self.fill();
    }

    /// Strokes a single segment as its own path.
    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64)) {
        self.begin_path();
        self.move_to(from.0, from.1);
        self.line_to(to.0, to.1);
        self.stroke();
    }
}

/// One recorded call on a [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Clear { width: f64, height: f64 },
    /// A stroked straight segment, with the alpha in effect when stroked.
    Line { from: (f64, f64), to: (f64, f64), alpha: f64 },
    /// A filled circle, with the alpha in effect when filled.
    Circle { center: (f64, f64), radius: f64, alpha: f64 },
}

/// Headless surface that keeps a log of what was drawn.
///
/// Paths are tracked just far enough to turn `move_to`/`line_to`/`stroke`
/// and `arc`/`fill` sequences back into [`DrawOp`]s.
#[derive(Debug)]
pub struct RecordingSurface {
    pub ops: Vec<DrawOp>,
    pub stroke_style: String,
    pub fill_style: String,
    pub line_width: f64,
    alpha: f64,
    cursor: Option<(f64, f64)>,
    segments: Vec<((f64, f64), (f64, f64))>,
    arcs: Vec<((f64, f64), f64)>,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self {
            ops: Vec::new(),
            stroke_style: String::from("#000000"),
            fill_style: String::from("#000000"),
            line_width: 1.0,
            alpha: 1.0,
            cursor: None,
            segments: Vec::new(),
            arcs: Vec::new(),
        }
    }
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Line { .. }))
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Circle { .. }))
    }
}

impl Surface for RecordingSurface {
    fn clear_rect(&mut self, _x: f64, _y: f64, width: f64, height: f64) {
        self.ops.push(DrawOp::Clear { width, height });
    }

    fn begin_path(&mut self) {
        self.cursor = None;
        self.segments.clear();
        self.arcs.clear();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.cursor = Some((x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        if let Some(from) = self.cursor {
            self.segments.push((from, (x, y)));
        }
        self.cursor = Some((x, y));
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, _start: f64, _end: f64) {
        self.arcs.push(((x, y), radius));
    }

    fn stroke(&mut self) {
        let alpha = self.alpha;
        self.ops.extend(
            self.segments
                .iter()
                .map(|&(from, to)| DrawOp::Line { from, to, alpha }),
        );
    }

    fn fill(&mut self) {
        let alpha = self.alpha;
        self.ops.extend(
            self.arcs
                .iter()
                .map(|&(center, radius)| DrawOp::Circle { center, radius, alpha }),
        );
    }

    fn global_alpha(&self) -> f64 {
        self.alpha
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.alpha = alpha;
    }

    fn set_stroke_style(&mut self, style: &str) {
        self.stroke_style = style.to_owned();
    }

    fn set_fill_style(&mut self, style: &str) {
        self.fill_style = style.to_owned();
    }

    fn set_line_width(&mut self, width: f64) {
        self.line_width = width;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_segments_and_circles_with_alpha() {
        let mut s = RecordingSurface::new();
        s.set_global_alpha(0.25);
        s.stroke_line((0.0, 0.0), (3.0, 4.0));
        s.set_global_alpha(1.0);
        s.fill_circle(1.0, 2.0, 3.0);
        assert_eq!(
            s.ops,
            vec![
                DrawOp::Line { from: (0.0, 0.0), to: (3.0, 4.0), alpha: 0.25 },
                DrawOp::Circle { center: (1.0, 2.0), radius: 3.0, alpha: 1.0 },
            ]
        );
    }

    #[test]
    fn begin_path_discards_previous_geometry() {
        let mut s = RecordingSurface::new();
        s.move_to(0.0, 0.0);
        s.line_to(1.0, 1.0);
        s.begin_path();
        s.stroke();
        assert!(s.ops.is_empty());
    }
}
