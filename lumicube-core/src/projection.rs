/// Fixed-camera projection from rotated model space to screen space
use nalgebra::{Point2, Point3};

/// Depths closer to the camera plane than this are rejected
const MIN_DEPTH: f32 = 1e-6;

/// Divide-by-depth projection with the camera `camera_offset` units down -Z.
///
/// `screen = (x * W / (z + d) + W / 2, y * H / (z + d) + H / 2)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub width: f32,
    pub height: f32,
    pub camera_offset: f32,
}

impl Projection {
    pub fn new(width: u32, height: u32, camera_offset: f32) -> Self {
        Self {
            width: width as f32,
            height: height as f32,
            camera_offset,
        }
    }

    /// Project a 3D point to 2D screen space.
    ///
    /// Returns `None` when the point sits on the camera plane or the result
    /// is not a finite coordinate.
    pub fn project(&self, point: &Point3<f32>) -> Option<Point2<f32>> {
        let depth = point.z + self.camera_offset;

        // Prevent division by near-zero depth values
        if depth.abs() < MIN_DEPTH {
            return None;
        }

        let screen_x = point.x * self.width / depth + self.width / 2.0;
        let screen_y = point.y * self.height / depth + self.height / 2.0;

        if !screen_x.is_finite() || !screen_y.is_finite() {
            return None;
        }

        Some(Point2::new(screen_x, screen_y))
    }

    /// Project every point, failing if any one of them is rejected
    pub fn project_all<const N: usize>(&self, points: &[Point3<f32>; N]) -> Option<[Point2<f32>; N]> {
        let mut out = [Point2::origin(); N];
        for (slot, point) in out.iter_mut().zip(points) {
            *slot = self.project(point)?;
        }
        Some(out)
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(800, 600, 4.0)
    }
}
