/// Software rasterizer for flat polygons and lines
use nalgebra::Point2;

use crate::color::Rgb;
use crate::error::SurfaceError;
use crate::surface::Surface;

/// An RGB pixel buffer implementing [`Surface`]
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
    presented: u64,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb::BLACK; width * height],
            presented: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    /// Number of frames presented so far
    pub fn presented(&self) -> u64 {
        self.presented
    }

    /// Change the buffer size, clearing it to black
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(width * height, Rgb::BLACK);
    }

    pub fn fill(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Rgb) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.pixels[y as usize * self.width + x as usize] = color;
        }
    }

    /// Fill a convex polygon as a fan of triangles around its first vertex
    pub fn fill_convex(&mut self, points: &[Point2<f32>], color: Rgb) {
        if points.len() < 3 {
            return;
        }
        for i in 1..points.len() - 1 {
            self.fill_triangle([points[0], points[i], points[i + 1]], color);
        }
    }

    fn fill_triangle(&mut self, tri: [Point2<f32>; 3], color: Rgb) {
        let [v0, v1, v2] = tri;

        // Bounding box
        let min_x = v0.x.min(v1.x).min(v2.x).floor() as i32;
        let max_x = v0.x.max(v1.x).max(v2.x).ceil() as i32;
        let min_y = v0.y.min(v1.y).min(v2.y).floor() as i32;
        let max_y = v0.y.max(v1.y).max(v2.y).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = Point2::new(x as f32 + 0.5, y as f32 + 0.5);

                // Either winding is accepted
                if let Some((w0, w1, w2)) = barycentric(v0, v1, v2, p) {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        self.set_pixel(x, y, color);
                    }
                }
            }
        }
    }

    /// Bresenham line between pixel centers
    pub fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            self.set_pixel(x, y, color);

            if x == x1 && y == y1 {
                break;
            }

            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Line of the given thickness, drawn as parallel offset lines
    pub fn thick_line(&mut self, from: Point2<f32>, to: Point2<f32>, thickness: u32, color: Rgb) {
        let (x0, y0) = (from.x.floor() as i32, from.y.floor() as i32);
        let (x1, y1) = (to.x.floor() as i32, to.y.floor() as i32);

        if thickness <= 1 {
            self.line(x0, y0, x1, y1, color);
            return;
        }

        let dir = to - from;
        let len = dir.norm();
        if len < 1e-3 {
            self.line(x0, y0, x1, y1, color);
            return;
        }
        let (px, py) = (-dir.y / len, dir.x / len);

        // Exactly `thickness` offsets; even widths lean towards +perpendicular
        let t = thickness as i32;
        for i in -(t - 1) / 2..=t / 2 {
            let offset = i as f32;
            self.line(
                (from.x + px * offset).floor() as i32,
                (from.y + py * offset).floor() as i32,
                (to.x + px * offset).floor() as i32,
                (to.y + py * offset).floor() as i32,
                color,
            );
        }
    }
}

impl Surface for Framebuffer {
    fn size(&self) -> (u32, u32) {
        (self.width as u32, self.height as u32)
    }

    fn clear(&mut self, color: Rgb) -> Result<(), SurfaceError> {
        self.fill(color);
        Ok(())
    }

    fn fill_polygon(&mut self, points: &[Point2<f32>], color: Rgb) -> Result<(), SurfaceError> {
        self.fill_convex(points, color);
        Ok(())
    }

    fn draw_line(
        &mut self,
        from: Point2<f32>,
        to: Point2<f32>,
        color: Rgb,
        thickness: u32,
    ) -> Result<(), SurfaceError> {
        self.thick_line(from, to, thickness, color);
        Ok(())
    }

    fn present(&mut self) -> Result<(), SurfaceError> {
        self.presented += 1;
        Ok(())
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: Point2<f32>,
    v1: Point2<f32>,
    v2: Point2<f32>,
    p: Point2<f32>,
) -> Option<(f32, f32, f32)> {
    let denom = (v1.y - v2.y) * (v0.x - v2.x) + (v2.x - v1.x) * (v0.y - v2.y);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.y - v2.y) * (p.x - v2.x) + (v2.x - v1.x) * (p.y - v2.y)) / denom;
    let w1 = ((v2.y - v0.y) * (p.x - v2.x) + (v0.x - v2.x) * (p.y - v2.y)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
