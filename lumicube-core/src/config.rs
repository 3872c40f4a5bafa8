/// Construction-time settings for the renderer and the animation loop
use crate::color::Rgb;
use crate::error::ConfigError;
use crate::geometry::CubeModel;
use crate::projection::Projection;
use crate::transform::RotationState;

/// Renderer and loop configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub target_fps: u32,
    /// Radians added to each axis after every rendered frame
    pub rotation_step: RotationState,
    /// Distance from the camera to the model origin along Z
    pub camera_offset: f32,
    pub background: Rgb,
    pub outline: Rgb,
    pub outline_thickness: u32,
    pub title: String,
}

impl RenderConfig {
    /// Defaults resized to a given surface
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn projection(&self) -> Projection {
        Projection::new(self.width, self.height, self.camera_offset)
    }

    /// Check that the settings can drive `model` without a degenerate frame.
    pub fn validate(&self, model: &CubeModel) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroSize {
                width: self.width,
                height: self.height,
            });
        }
        if self.target_fps == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }
        let step = &self.rotation_step;
        if !(step.x.is_finite() && step.y.is_finite() && step.z.is_finite()) {
            return Err(ConfigError::NonFinite("rotation_step"));
        }
        if !self.camera_offset.is_finite() {
            return Err(ConfigError::NonFinite("camera_offset"));
        }

        let radius = model.bounding_radius();
        if self.camera_offset <= radius {
            return Err(ConfigError::CameraTooClose {
                offset: self.camera_offset,
                radius,
            });
        }

        Ok(())
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            target_fps: 60,
            rotation_step: RotationState::new(0.01, 0.02, 0.03),
            camera_offset: 4.0,
            background: Rgb::BLACK,
            outline: Rgb::WHITE,
            outline_thickness: 1,
            title: String::from("Rotating Cube with Light Sources"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RenderConfig::default();
        assert_eq!((config.width, config.height), (800, 600));
        assert_eq!(config.target_fps, 60);
        assert_eq!(config.rotation_step, RotationState::new(0.01, 0.02, 0.03));
        assert_eq!(config.camera_offset, 4.0);
        assert_eq!(config.background, Rgb::BLACK);
        assert_eq!(config.outline, Rgb::WHITE);
        assert_eq!(config.outline_thickness, 1);
        assert!(config.validate(&CubeModel::unit()).is_ok());
    }

    #[test]
    fn test_with_size_keeps_other_defaults() {
        let config = RenderConfig::with_size(120, 80);
        assert_eq!((config.width, config.height), (120, 80));
        assert_eq!(config.target_fps, 60);
        assert_eq!(config.projection(), Projection::new(120, 80, 4.0));
    }

    #[test]
    fn test_rejects_bad_values() {
        let cube = CubeModel::unit();

        let config = RenderConfig::with_size(0, 10);
        assert_eq!(
            config.validate(&cube),
            Err(ConfigError::ZeroSize { width: 0, height: 10 })
        );

        let config = RenderConfig {
            target_fps: 0,
            ..RenderConfig::default()
        };
        assert_eq!(config.validate(&cube), Err(ConfigError::ZeroFrameRate));

        let config = RenderConfig {
            rotation_step: RotationState::new(f64::NAN, 0.0, 0.0),
            ..RenderConfig::default()
        };
        assert_eq!(
            config.validate(&cube),
            Err(ConfigError::NonFinite("rotation_step"))
        );
    }

    #[test]
    fn test_camera_must_clear_the_cube() {
        let cube = CubeModel::unit();
        let config = RenderConfig {
            camera_offset: 1.5,
            ..RenderConfig::default()
        };
        assert!(matches!(
            config.validate(&cube),
            Err(ConfigError::CameraTooClose { .. })
        ));

        let config = RenderConfig {
            camera_offset: 1.8,
            ..RenderConfig::default()
        };
        assert!(config.validate(&cube).is_ok());
    }
}
