/// Terminal platform for the rotating lit cube
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use log::debug;
use lumicube_core::{
    Animation, CubeModel, CubeRenderer, LightSource, Platform, RenderConfig, Rgb, RunSummary,
    Surface, SurfaceError,
};
use nalgebra::Point2;
use std::io::{self, stdout, Stdout, Write};
use std::time::{Duration, Instant};

pub mod renderer;

pub use renderer::TerminalSurface;

/// Rows reserved above the image for the status line
const STATUS_ROWS: u16 = 1;

/// Sleeps away whatever is left of each frame's time slot
#[derive(Debug)]
pub struct FrameLimiter {
    frame_start: Instant,
}

impl FrameLimiter {
    pub fn new() -> Self {
        Self {
            frame_start: Instant::now(),
        }
    }

    /// Time still owed to a frame that has run for `elapsed`
    pub fn remaining(elapsed: Duration, target_fps: u32) -> Duration {
        let target_frame_time = Duration::from_secs(1) / target_fps.max(1);
        target_frame_time.saturating_sub(elapsed)
    }

    /// Block until the current frame has lasted `1 / target_fps`, then start
    /// timing the next one.
    pub fn wait(&mut self, target_fps: u32) {
        let remaining = Self::remaining(self.frame_start.elapsed(), target_fps);
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }
        self.frame_start = Instant::now();
    }
}

impl Default for FrameLimiter {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether a key event asks the application to quit
pub fn is_quit_key(key: &KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Terminal surface plus input polling, frame pacing and a status line
pub struct TerminalPlatform<W: Write> {
    surface: TerminalSurface<W>,
    limiter: FrameLimiter,
    resized: Option<(u16, u16)>,
    last_second: Instant,
    frames_this_second: u32,
    fps: f32,
}

impl<W: Write> TerminalPlatform<W> {
    pub fn new(writer: W, columns: u16, rows: u16) -> Self {
        let image_rows = rows.saturating_sub(STATUS_ROWS).max(1);
        Self {
            surface: TerminalSurface::new(writer, columns.max(1), image_rows, STATUS_ROWS),
            limiter: FrameLimiter::new(),
            resized: None,
            last_second: Instant::now(),
            frames_this_second: 0,
            fps: 0.0,
        }
    }

    /// Terminal size change seen since the last call, as pixel dimensions
    pub fn take_resize(&mut self) -> Option<(u32, u32)> {
        let (columns, rows) = self.resized.take()?;
        let image_rows = rows.saturating_sub(STATUS_ROWS).max(1);
        self.surface.resize(columns.max(1), image_rows);
        Some(self.surface.size())
    }

    fn draw_status(&mut self) -> io::Result<()> {
        let now = Instant::now();
        self.frames_this_second += 1;
        if (now - self.last_second).as_secs() >= 1 {
            self.fps = self.frames_this_second as f32 / (now - self.last_second).as_secs_f32();
            self.frames_this_second = 0;
            self.last_second = now;
        }

        let (width, height) = self.surface.size();
        let status = format!(
            "Lumicube | {}x{} | FPS: {:.1} | Q=Quit",
            width, height, self.fps
        );
        queue!(
            self.surface.writer_mut(),
            cursor::MoveTo(0, 0),
            terminal::Clear(terminal::ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(status),
            ResetColor
        )
    }
}

impl<W: Write> Surface for TerminalPlatform<W> {
    fn size(&self) -> (u32, u32) {
        self.surface.size()
    }

    fn clear(&mut self, color: Rgb) -> Result<(), SurfaceError> {
        self.surface.clear(color)
    }

    fn fill_polygon(&mut self, points: &[Point2<f32>], color: Rgb) -> Result<(), SurfaceError> {
        self.surface.fill_polygon(points, color)
    }

    fn draw_line(
        &mut self,
        from: Point2<f32>,
        to: Point2<f32>,
        color: Rgb,
        thickness: u32,
    ) -> Result<(), SurfaceError> {
        self.surface.draw_line(from, to, color, thickness)
    }

    fn present(&mut self) -> Result<(), SurfaceError> {
        self.draw_status().map_err(renderer::present_error)?;
        self.surface.present()
    }
}

impl<W: Write> Platform for TerminalPlatform<W> {
    fn poll_quit(&mut self) -> Result<bool, SurfaceError> {
        // Drain everything queued so a burst of events is handled in one frame
        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(key) if is_quit_key(&key) => return Ok(true),
                Event::Resize(columns, rows) => self.resized = Some((columns, rows)),
                _ => {}
            }
        }
        Ok(false)
    }

    fn limit_rate(&mut self, target_fps: u32) {
        self.limiter.wait(target_fps);
    }
}

/// Main application struct for terminal rendering
pub struct TerminalApp {
    animation: Animation,
    platform: TerminalPlatform<Stdout>,
    title: String,
}

impl TerminalApp {
    /// Size the renderer to the current terminal, overriding `config`'s
    /// width and height.
    pub fn new(config: RenderConfig) -> lumicube_core::Result<Self> {
        let (columns, rows) = terminal::size()?;
        let platform = TerminalPlatform::new(stdout(), columns, rows);
        let (width, height) = platform.size();

        let title = config.title.clone();
        let config = RenderConfig {
            width,
            height,
            ..config
        };
        let renderer = CubeRenderer::new(CubeModel::unit(), LightSource::rgb_basis(), config)?;

        Ok(Self {
            animation: Animation::new(renderer),
            platform,
            title,
        })
    }

    /// Take over the terminal, animate until quit, and restore it on every
    /// exit path.
    pub fn run(&mut self) -> lumicube_core::Result<RunSummary> {
        terminal::enable_raw_mode()?;
        let setup = execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            terminal::SetTitle(&self.title),
            cursor::Hide
        );

        let result = match setup {
            Ok(()) => self.main_loop(),
            Err(e) => Err(e.into()),
        };

        // Cleanup
        let restored = execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)
            .and(terminal::disable_raw_mode());

        let summary = result?;
        restored?;
        Ok(summary)
    }

    fn main_loop(&mut self) -> lumicube_core::Result<RunSummary> {
        debug!("terminal surface {:?}", self.platform.size());
        loop {
            if let Some((width, height)) = self.platform.take_resize() {
                debug!("terminal resized to {}x{}", width, height);
                self.animation.renderer_mut().resize(width, height)?;
            }
            if self.animation.step(&mut self.platform)? == lumicube_core::LoopState::Terminated {
                return Ok(self.animation.summary());
            }
        }
    }
}
