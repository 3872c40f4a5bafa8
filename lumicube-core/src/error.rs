/// Error types for model construction, configuration and drawing
use std::fmt;
use std::io;

/// A cube model referenced a vertex that does not exist
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryError {
    EdgeIndexOutOfRange { edge: usize, index: usize },
    FaceIndexOutOfRange { face: usize, index: usize },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::EdgeIndexOutOfRange { edge, index } => {
                write!(f, "edge {} references missing vertex {}", edge, index)
            }
            GeometryError::FaceIndexOutOfRange { face, index } => {
                write!(f, "face {} references missing vertex {}", face, index)
            }
        }
    }
}

impl std::error::Error for GeometryError {}

/// Rejected render configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    ZeroSize { width: u32, height: u32 },
    ZeroFrameRate,
    NonFinite(&'static str),
    /// The camera offset must exceed the model's bounding radius, otherwise
    /// some rotation brings `z + offset` to zero.
    CameraTooClose { offset: f32, radius: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroSize { width, height } => {
                write!(f, "surface size {}x{} has no pixels", width, height)
            }
            ConfigError::ZeroFrameRate => write!(f, "target frame rate must be positive"),
            ConfigError::NonFinite(field) => write!(f, "{} must be a finite number", field),
            ConfigError::CameraTooClose { offset, radius } => write!(
                f,
                "camera offset {} does not clear model radius {}",
                offset, radius
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Failure reported by a drawing surface
#[derive(Debug)]
pub enum SurfaceError {
    Io(io::Error),
    /// The frame could not be shown but the surface is still usable.
    FrameDropped(String),
}

impl SurfaceError {
    pub fn is_transient(&self) -> bool {
        matches!(self, SurfaceError::FrameDropped(_))
    }
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceError::Io(e) => write!(f, "surface I/O error: {}", e),
            SurfaceError::FrameDropped(reason) => write!(f, "frame dropped: {}", reason),
        }
    }
}

impl std::error::Error for SurfaceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SurfaceError::Io(e) => Some(e),
            SurfaceError::FrameDropped(_) => None,
        }
    }
}

impl From<io::Error> for SurfaceError {
    fn from(e: io::Error) -> Self {
        SurfaceError::Io(e)
    }
}

/// Any error the rendering pipeline can raise
#[derive(Debug)]
pub enum Error {
    Geometry(GeometryError),
    Config(ConfigError),
    Surface(SurfaceError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Geometry(e) => write!(f, "invalid geometry: {}", e),
            Error::Config(e) => write!(f, "invalid configuration: {}", e),
            Error::Surface(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Geometry(e) => Some(e),
            Error::Config(e) => Some(e),
            Error::Surface(e) => Some(e),
        }
    }
}

impl From<GeometryError> for Error {
    fn from(e: GeometryError) -> Self {
        Error::Geometry(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<SurfaceError> for Error {
    fn from(e: SurfaceError) -> Self {
        Error::Surface(e)
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Surface(SurfaceError::Io(e))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
