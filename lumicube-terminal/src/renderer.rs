/// Truecolor half-block presentation of a framebuffer
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use lumicube_core::{Framebuffer, Rgb, Surface, SurfaceError};
use nalgebra::Point2;
use std::io::{self, ErrorKind, Write};

/// Upper half block: foreground paints the top pixel, background the bottom
const HALF_BLOCK: char = '▀';

/// Terminal surface; each character cell shows two stacked pixels
pub struct TerminalSurface<W: Write> {
    framebuffer: Framebuffer,
    writer: W,
    /// Terminal row the image starts at
    origin_row: u16,
}

impl<W: Write> TerminalSurface<W> {
    /// A surface `columns` wide and `rows` cells tall (`2 * rows` pixels)
    pub fn new(writer: W, columns: u16, rows: u16, origin_row: u16) -> Self {
        Self {
            framebuffer: Framebuffer::new(columns as usize, rows as usize * 2),
            writer,
            origin_row,
        }
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    pub fn resize(&mut self, columns: u16, rows: u16) {
        self.framebuffer.resize(columns as usize, rows as usize * 2);
    }

    /// Queue the framebuffer as half-block cells, only emitting color
    /// changes between neighbors.
    fn draw(&mut self) -> io::Result<()> {
        let fb = &self.framebuffer;
        let mut current: Option<(Rgb, Rgb)> = None;

        for row in 0..fb.height() / 2 {
            self.writer
                .queue(cursor::MoveTo(0, self.origin_row + row as u16))?;
            for x in 0..fb.width() {
                let top = fb.pixel(x, row * 2).unwrap_or(Rgb::BLACK);
                let bottom = fb.pixel(x, row * 2 + 1).unwrap_or(Rgb::BLACK);

                if current != Some((top, bottom)) {
                    self.writer.queue(SetForegroundColor(to_color(top)))?;
                    self.writer.queue(SetBackgroundColor(to_color(bottom)))?;
                    current = Some((top, bottom));
                }
                self.writer.queue(Print(HALF_BLOCK))?;
            }
        }
        self.writer.queue(ResetColor)?;
        Ok(())
    }
}

/// A write that was interrupted or would block only loses this frame; the
/// next present redraws every cell.
pub(crate) fn present_error(e: io::Error) -> SurfaceError {
    match e.kind() {
        ErrorKind::Interrupted | ErrorKind::WouldBlock => {
            SurfaceError::FrameDropped(e.to_string())
        }
        _ => SurfaceError::Io(e),
    }
}

fn to_color(c: Rgb) -> Color {
    Color::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn size(&self) -> (u32, u32) {
        self.framebuffer.size()
    }

    fn clear(&mut self, color: Rgb) -> Result<(), SurfaceError> {
        self.framebuffer.clear(color)
    }

    fn fill_polygon(&mut self, points: &[Point2<f32>], color: Rgb) -> Result<(), SurfaceError> {
        self.framebuffer.fill_polygon(points, color)
    }

    fn draw_line(
        &mut self,
        from: Point2<f32>,
        to: Point2<f32>,
        color: Rgb,
        thickness: u32,
    ) -> Result<(), SurfaceError> {
        self.framebuffer.draw_line(from, to, color, thickness)
    }

    fn present(&mut self) -> Result<(), SurfaceError> {
        self.draw().map_err(present_error)?;
        self.writer.flush().map_err(present_error)?;
        self.framebuffer.present()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(surface: TerminalSurface<Vec<u8>>) -> String {
        String::from_utf8(surface.into_writer()).unwrap()
    }

    #[test]
    fn test_surface_size_doubles_rows() {
        let surface = TerminalSurface::new(Vec::new(), 20, 5, 0);
        assert_eq!(surface.size(), (20, 10));
    }

    #[test]
    fn test_present_emits_one_block_per_cell() {
        let mut surface = TerminalSurface::new(Vec::new(), 4, 3, 1);
        surface.clear(Rgb::BLACK).unwrap();
        surface.present().unwrap();
        assert_eq!(surface.framebuffer().presented(), 1);

        let text = output(surface);
        assert_eq!(text.chars().filter(|&c| c == HALF_BLOCK).count(), 12);
        // Uniform image needs a single color change
        assert_eq!(text.matches("38;2;0;0;0").count(), 1);
    }

    #[test]
    fn test_top_and_bottom_pixels_map_to_fg_and_bg() {
        let mut surface = TerminalSurface::new(Vec::new(), 1, 1, 0);
        surface.clear(Rgb::BLACK).unwrap();
        // Only the top pixel row is covered
        surface
            .draw_line(Point2::new(0.0, 0.0), Point2::new(0.0, 0.0), Rgb::RED, 1)
            .unwrap();
        surface.present().unwrap();

        let text = output(surface);
        assert!(text.contains("38;2;255;0;0"), "foreground should be red: {:?}", text);
        assert!(text.contains("48;2;0;0;0"), "background should be black: {:?}", text);
    }

    /// Accepts writes but fails every flush with the given kind
    struct FailingFlush(ErrorKind);

    impl Write for FailingFlush {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(self.0, "terminal busy"))
        }
    }

    #[test]
    fn test_blocked_flush_drops_the_frame() {
        for kind in [ErrorKind::WouldBlock, ErrorKind::Interrupted] {
            let mut surface = TerminalSurface::new(FailingFlush(kind), 2, 2, 0);
            let err = surface.present().unwrap_err();
            assert!(err.is_transient(), "{:?} should drop the frame", kind);
            assert_eq!(surface.framebuffer().presented(), 0);
        }
    }

    #[test]
    fn test_other_write_errors_stay_fatal() {
        let mut surface = TerminalSurface::new(FailingFlush(ErrorKind::BrokenPipe), 2, 2, 0);
        let err = surface.present().unwrap_err();
        assert!(!err.is_transient());
        assert!(matches!(err, SurfaceError::Io(_)));
    }

    #[test]
    fn test_resize() {
        let mut surface = TerminalSurface::new(Vec::new(), 4, 4, 0);
        surface.resize(10, 2);
        assert_eq!(surface.size(), (10, 4));
    }
}
