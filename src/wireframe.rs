//! Scroll-driven rotating cube, drawn as a perspective wireframe.

use crate::config::WireframeConfig;
use crate::math::{project, Vec3};
use crate::surface::Surface;

/// Corners of the unit cube, `(±1, ±1, ±1)`.
pub const CUBE_VERTICES: [Vec3; 8] = [
    Vec3::new(-1.0, -1.0, -1.0),
    Vec3::new(1.0, -1.0, -1.0),
    Vec3::new(1.0, 1.0, -1.0),
    Vec3::new(-1.0, 1.0, -1.0),
    Vec3::new(-1.0, -1.0, 1.0),
    Vec3::new(1.0, -1.0, 1.0),
    Vec3::new(1.0, 1.0, 1.0),
    Vec3::new(-1.0, 1.0, 1.0),
];

/// Back face, front face, then the four connecting edges.
#[rustfmt::skip]
pub const CUBE_EDGES: [(usize, usize); 12] = [
    (0, 1), (1, 2), (2, 3), (3, 0),
    (4, 5), (5, 6), (6, 7), (7, 4),
    (0, 4), (1, 5), (2, 6), (3, 7),
];

/// Target and eased rotation angles, in radians.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RotationState {
    pub target_y: f64,
    pub target_z: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl RotationState {
    /// Closes `easing` of the remaining gap on Y and Z. X never moves.
    pub fn ease(&mut self, easing: f64) {
        self.y += (self.target_y - self.y) * easing;
        self.z += (self.target_z - self.z) * easing;
    }
}

pub struct WireframeProjector {
    width: f64,
    height: f64,
    rotation: RotationState,
    config: WireframeConfig,
}

impl WireframeProjector {
    pub fn new(width: f64, height: f64, config: WireframeConfig) -> Self {
        Self {
            width,
            height,
            rotation: RotationState::default(),
            config,
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        log::debug!("wireframe resized to {width}x{height}");
        self.width = width;
        self.height = height;
    }

    pub fn on_scroll(&mut self, scroll_y: f64) {
        self.rotation.target_y = scroll_y * self.config.scroll_to_y;
        self.rotation.target_z = scroll_y * self.config.scroll_to_z;
    }

    pub fn tick(&mut self) {
        self.rotation.ease(self.config.easing);
    }

    pub fn rotation(&self) -> RotationState {
        self.rotation
    }

    /// Screen-space positions of the cube corners at the current rotation.
    pub fn projected(&self) -> [(f64, f64); 8] {
        let RotationState { x, y, z, .. } = self.rotation;
        CUBE_VERTICES.map(|v| project(v.rotated(x, y, z), self.width, self.height))
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        let points = self.projected();
        let c = &self.config;

        surface.clear_rect(0.0, 0.0, self.width, self.height);

        surface.set_stroke_style(&c.color);
        surface.set_line_width(c.line_width);
        surface.set_global_alpha(c.edge_alpha);
        for &(a, b) in &CUBE_EDGES {
            surface.stroke_line(points[a], points[b]);
        }
        surface.set_global_alpha(1.0);

        surface.set_fill_style(&c.color);
        for &(x, y) in &points {
            surface.fill_circle(x, y, c.vertex_radius);
        }
    }
}
