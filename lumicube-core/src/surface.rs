/// Drawing and platform collaborators the renderer talks to
use nalgebra::Point2;

use crate::color::Rgb;
use crate::error::SurfaceError;

/// A 2D target that accepts flat polygons and lines in screen coordinates
pub trait Surface {
    /// Drawable size in pixels as `(width, height)`
    fn size(&self) -> (u32, u32);

    fn clear(&mut self, color: Rgb) -> Result<(), SurfaceError>;

    fn fill_polygon(&mut self, points: &[Point2<f32>], color: Rgb) -> Result<(), SurfaceError>;

    fn draw_line(
        &mut self,
        from: Point2<f32>,
        to: Point2<f32>,
        color: Rgb,
        thickness: u32,
    ) -> Result<(), SurfaceError>;

    /// Show everything drawn since the last clear
    fn present(&mut self) -> Result<(), SurfaceError>;
}

/// A surface that also owns the event queue and the frame clock
pub trait Platform: Surface {
    /// `true` once the user asked to quit
    fn poll_quit(&mut self) -> Result<bool, SurfaceError>;

    /// Block until the current frame has used up its `1 / target_fps` slot
    fn limit_rate(&mut self, target_fps: u32);
}
