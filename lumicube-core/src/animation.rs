/// Fixed-rate animation loop with an explicit Running/Terminated state
use log::{debug, info, warn};

use crate::error::Result;
use crate::renderer::CubeRenderer;
use crate::surface::Platform;
use crate::transform::RotationState;

/// Loop state; `Terminated` is final
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Terminated,
}

/// What a finished run did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub frames_rendered: u64,
    pub frames_dropped: u64,
}

/// Owns the rotation state and advances it once per rendered frame
pub struct Animation {
    renderer: CubeRenderer,
    rotation: RotationState,
    state: LoopState,
    summary: RunSummary,
}

impl Animation {
    pub fn new(renderer: CubeRenderer) -> Self {
        Self {
            renderer,
            rotation: RotationState::zero(),
            state: LoopState::Running,
            summary: RunSummary::default(),
        }
    }

    pub fn rotation(&self) -> &RotationState {
        &self.rotation
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn summary(&self) -> RunSummary {
        self.summary
    }

    pub fn renderer_mut(&mut self) -> &mut CubeRenderer {
        &mut self.renderer
    }

    /// One iteration: poll quit, draw, advance the angles, wait for the next
    /// frame slot. Returns the state after the iteration.
    ///
    /// A dropped frame still advances the rotation so the animation keeps its
    /// speed. Any other surface error is returned and leaves the loop running
    /// so the caller decides what to do with it.
    pub fn step<P: Platform + ?Sized>(&mut self, platform: &mut P) -> Result<LoopState> {
        if self.state == LoopState::Terminated {
            return Ok(self.state);
        }

        if platform.poll_quit()? {
            debug!("quit requested after {} frames", self.summary.frames_rendered);
            self.state = LoopState::Terminated;
            return Ok(self.state);
        }

        match self.renderer.render_frame(platform, &self.rotation) {
            Ok(_) => self.summary.frames_rendered += 1,
            Err(e) if e.is_transient() => {
                warn!("{}", e);
                self.summary.frames_dropped += 1;
            }
            Err(e) => return Err(e.into()),
        }

        self.rotation.advance(&self.renderer.config().rotation_step);
        platform.limit_rate(self.renderer.config().target_fps);

        Ok(self.state)
    }

    /// Run until the platform reports quit. This is the only exit path.
    pub fn run<P: Platform + ?Sized>(&mut self, platform: &mut P) -> Result<RunSummary> {
        debug!(
            "animation started at {} fps",
            self.renderer.config().target_fps
        );

        while self.step(platform)? == LoopState::Running {}

        info!(
            "rendered {} frames ({} dropped)",
            self.summary.frames_rendered, self.summary.frames_dropped
        );
        Ok(self.summary)
    }
}
