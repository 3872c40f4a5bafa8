/// Lumicube Core Library - Rotating lit cube pipeline
///
/// This library provides the platform independent part of the renderer:
/// cube geometry, rotation, projection, per-face lighting, a software
/// framebuffer and the fixed-rate animation loop. Window, terminal and
/// timing concerns live behind the `Surface` and `Platform` traits.

pub mod animation;
pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod lighting;
pub mod projection;
pub mod raster;
pub mod renderer;
pub mod surface;
pub mod transform;

// Re-export commonly used types
pub use animation::{Animation, LoopState, RunSummary};
pub use color::Rgb;
pub use config::RenderConfig;
pub use error::{ConfigError, Error, GeometryError, Result, SurfaceError};
pub use geometry::{CubeModel, Edge, Face, LightSource};
pub use projection::Projection;
pub use raster::Framebuffer;
pub use renderer::{CubeRenderer, FrameStats};
pub use surface::{Platform, Surface};
pub use transform::{rotate_point, RotationState, Transform};
