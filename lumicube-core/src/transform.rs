/// Rotation state and point rotation
use nalgebra::{Matrix3, Point3};

/// Rotation state around three axes (in radians)
///
/// Angles accumulate in `f64` so the per-frame step still registers after
/// days of running; they are narrowed only once converted to sin/cos.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RotationState {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl RotationState {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Accumulate per-axis deltas. Angles are never wrapped.
    pub fn advance(&mut self, step: &RotationState) {
        self.x += step.x;
        self.y += step.y;
        self.z += step.z;
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

/// `(sin, cos)` of an accumulated angle, narrowed for single precision math
fn sin_cos(angle: f64) -> (f32, f32) {
    let (sin, cos) = angle.sin_cos();
    (sin as f32, cos as f32)
}

/// Rotate a point about the origin: first around X, then Y, then Z.
pub fn rotate_point(point: &Point3<f32>, rotation: &RotationState) -> Point3<f32> {
    let (mut x, mut y, mut z) = (point.x, point.y, point.z);

    let (sin, cos) = sin_cos(rotation.x);
    (y, z) = (y * cos - z * sin, y * sin + z * cos);

    let (sin, cos) = sin_cos(rotation.y);
    (x, z) = (x * cos + z * sin, -x * sin + z * cos);

    let (sin, cos) = sin_cos(rotation.z);
    (x, y) = (x * cos - y * sin, x * sin + y * cos);

    Point3::new(x, y, z)
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Matrix form of [`rotate_point`]
    pub fn rotation_matrix(rotation: &RotationState) -> Matrix3<f32> {
        let (sx, cx) = sin_cos(rotation.x);
        let (sy, cy) = sin_cos(rotation.y);
        let (sz, cz) = sin_cos(rotation.z);

        #[rustfmt::skip]
        let rx = Matrix3::new(
            1.0, 0.0, 0.0,
            0.0, cx, -sx,
            0.0, sx, cx,
        );
        #[rustfmt::skip]
        let ry = Matrix3::new(
            cy, 0.0, sy,
            0.0, 1.0, 0.0,
            -sy, 0.0, cy,
        );
        #[rustfmt::skip]
        let rz = Matrix3::new(
            cz, -sz, 0.0,
            sz, cz, 0.0,
            0.0, 0.0, 1.0,
        );

        // Apply rotations in order: X, Y, Z
        rz * ry * rx
    }

    /// Rotate every point of a fixed-size set in one pass
    pub fn rotate_all<const N: usize>(
        points: &[Point3<f32>; N],
        rotation: &RotationState,
    ) -> [Point3<f32>; N] {
        points.map(|p| rotate_point(&p, rotation))
    }
}
