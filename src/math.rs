//! Rotation and perspective projection primitives for the wireframe backdrop.

/// Distance from the camera to the object-space origin, in world units.
pub const CAMERA_DISTANCE: f64 = 5.0;
/// Pixels per world unit after perspective division.
pub const PROJECTION_SCALE: f64 = 140.0;
/// Vertical anchor of the origin as a fraction of canvas height.
pub const VERTICAL_ANCHOR: f64 = 0.45;

/// A point in 3D object space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Applies the X, Y and Z rotations in that order.
    pub fn rotated(self, angle_x: f64, angle_y: f64, angle_z: f64) -> Self {
        rotate_z(rotate_y(rotate_x(self, angle_x), angle_y), angle_z)
    }
}

pub fn rotate_x(p: Vec3, angle: f64) -> Vec3 {
    let (s, c) = angle.sin_cos();
    Vec3::new(p.x, p.y * c - p.z * s, p.y * s + p.z * c)
}

pub fn rotate_y(p: Vec3, angle: f64) -> Vec3 {
    let (s, c) = angle.sin_cos();
    Vec3::new(p.x * c + p.z * s, p.y, -p.x * s + p.z * c)
}

pub fn rotate_z(p: Vec3, angle: f64) -> Vec3 {
    let (s, c) = angle.sin_cos();
    Vec3::new(p.x * c - p.y * s, p.x * s + p.y * c, p.z)
}

/// Perspective-projects `p` onto a canvas of the given size.
///
/// The origin lands at `(width / 2, height * 0.45)`. There is no near-plane
/// clipping: `p.z` must stay well above `-CAMERA_DISTANCE`.
pub fn project(p: Vec3, width: f64, height: f64) -> (f64, f64) {
    let factor = CAMERA_DISTANCE / (CAMERA_DISTANCE + p.z);
    (
        p.x * factor * PROJECTION_SCALE + width / 2.0,
        p.y * factor * PROJECTION_SCALE + height * VERTICAL_ANCHOR,
    )
}
