/// Per-frame draw sequence: clear, shaded faces, outline edges, present
use log::trace;
use nalgebra::Point3;

use crate::config::RenderConfig;
use crate::error::{Result, SurfaceError};
use crate::geometry::{CubeModel, LightSource, VERTEX_COUNT};
use crate::lighting;
use crate::projection::Projection;
use crate::surface::Surface;
use crate::transform::{RotationState, Transform};

/// Primitive counts for one rendered frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub faces_drawn: usize,
    pub faces_skipped: usize,
    pub edges_drawn: usize,
    pub edges_skipped: usize,
}

/// Draws the lit, outlined cube onto any [`Surface`]
#[derive(Debug, Clone)]
pub struct CubeRenderer {
    model: CubeModel,
    lights: [LightSource; 3],
    projection: Projection,
    config: RenderConfig,
}

impl CubeRenderer {
    /// Validate `config` against `model` and build a renderer.
    pub fn new(model: CubeModel, lights: [LightSource; 3], config: RenderConfig) -> Result<Self> {
        config.validate(&model)?;
        Ok(Self {
            projection: config.projection(),
            model,
            lights,
            config,
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn model(&self) -> &CubeModel {
        &self.model
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Follow a surface that changed size. Invalid sizes are rejected and the
    /// previous projection kept.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        let config = RenderConfig {
            width,
            height,
            ..self.config.clone()
        };
        config.validate(&self.model)?;
        self.projection = config.projection();
        self.config = config;
        Ok(())
    }

    /// Rotate all vertices once for the frame
    pub fn rotated_vertices(&self, rotation: &RotationState) -> [Point3<f32>; VERTEX_COUNT] {
        Transform::rotate_all(self.model.vertices(), rotation)
    }

    /// Draw one complete frame and present it.
    ///
    /// Faces go down in their declared order with no depth sorting, so a far
    /// face may cover a near one. Primitives with a vertex on the camera
    /// plane are skipped.
    pub fn render_frame<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        rotation: &RotationState,
    ) -> std::result::Result<FrameStats, SurfaceError> {
        let mut stats = FrameStats::default();

        surface.clear(self.config.background)?;

        let rotated = self.rotated_vertices(rotation);

        for face in self.model.faces() {
            let color = lighting::shade(face, &rotated, &self.lights);
            let corners = face.0.map(|i| rotated[i]);
            match self.projection.project_all(&corners) {
                Some(points) => {
                    surface.fill_polygon(&points, color)?;
                    stats.faces_drawn += 1;
                }
                None => {
                    trace!("skipping face {:?}: vertex on camera plane", face);
                    stats.faces_skipped += 1;
                }
            }
        }

        for edge in self.model.edges() {
            let ends = [rotated[edge.0], rotated[edge.1]];
            match self.projection.project_all(&ends) {
                Some([from, to]) => {
                    surface.draw_line(from, to, self.config.outline, self.config.outline_thickness)?;
                    stats.edges_drawn += 1;
                }
                None => {
                    trace!("skipping edge {:?}: endpoint on camera plane", edge);
                    stats.edges_skipped += 1;
                }
            }
        }

        surface.present()?;
        Ok(stats)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::error::Error;
    use crate::geometry::{Edge, Face};
    use crate::raster::Framebuffer;
    use nalgebra::Point2;

    /// Surface that records every call in order
    #[derive(Debug, Default)]
    pub(crate) struct RecordingSurface {
        pub calls: Vec<Call>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum Call {
        Clear(Rgb),
        Fill(Vec<Point2<f32>>, Rgb),
        Line(Point2<f32>, Point2<f32>, Rgb, u32),
        Present,
    }

    impl Surface for RecordingSurface {
        fn size(&self) -> (u32, u32) {
            (800, 600)
        }

        fn clear(&mut self, color: Rgb) -> std::result::Result<(), SurfaceError> {
            self.calls.push(Call::Clear(color));
            Ok(())
        }

        fn fill_polygon(
            &mut self,
            points: &[Point2<f32>],
            color: Rgb,
        ) -> std::result::Result<(), SurfaceError> {
            self.calls.push(Call::Fill(points.to_vec(), color));
            Ok(())
        }

        fn draw_line(
            &mut self,
            from: Point2<f32>,
            to: Point2<f32>,
            color: Rgb,
            thickness: u32,
        ) -> std::result::Result<(), SurfaceError> {
            self.calls.push(Call::Line(from, to, color, thickness));
            Ok(())
        }

        fn present(&mut self) -> std::result::Result<(), SurfaceError> {
            self.calls.push(Call::Present);
            Ok(())
        }
    }

    fn renderer() -> CubeRenderer {
        CubeRenderer::new(
            CubeModel::unit(),
            LightSource::rgb_basis(),
            RenderConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_frame_call_sequence() {
        let mut surface = RecordingSurface::default();
        let stats = renderer()
            .render_frame(&mut surface, &RotationState::new(0.4, 1.2, 2.3))
            .unwrap();

        assert_eq!(surface.calls.len(), 1 + 6 + 12 + 1);
        assert_eq!(surface.calls[0], Call::Clear(Rgb::BLACK));
        assert!(surface.calls[1..7]
            .iter()
            .all(|c| matches!(c, Call::Fill(points, _) if points.len() == 4)));
        assert!(surface.calls[7..19]
            .iter()
            .all(|c| matches!(c, Call::Line(_, _, color, 1) if *color == Rgb::WHITE)));
        assert_eq!(surface.calls[19], Call::Present);

        assert_eq!(
            stats,
            FrameStats {
                faces_drawn: 6,
                faces_skipped: 0,
                edges_drawn: 12,
                edges_skipped: 0,
            }
        );
    }

    #[test]
    fn test_faces_in_declared_order_at_rest() {
        let mut surface = RecordingSurface::default();
        renderer()
            .render_frame(&mut surface, &RotationState::zero())
            .unwrap();

        let colors: Vec<Rgb> = surface.calls[1..7]
            .iter()
            .filter_map(|c| match c {
                Call::Fill(_, color) => Some(*color),
                _ => None,
            })
            .collect();
        assert_eq!(
            colors,
            vec![
                Rgb::BLACK,
                Rgb::BLUE,
                Rgb::BLACK,
                Rgb::RED,
                Rgb::BLACK,
                Rgb::GREEN,
            ]
        );

        // First face starts at vertex 0 = (-1, -1, -1)
        match &surface.calls[1] {
            Call::Fill(points, _) => {
                assert!((points[0].x - 133.333_33).abs() < 1e-3);
                assert!((points[0].y - 100.0).abs() < 1e-3);
            }
            other => panic!("expected a fill, got {:?}", other),
        }
    }

    #[test]
    fn test_edges_follow_topology() {
        let r = renderer();
        let mut surface = RecordingSurface::default();
        let rotation = RotationState::new(0.1, 0.2, 0.3);
        r.render_frame(&mut surface, &rotation).unwrap();

        let rotated = r.rotated_vertices(&rotation);
        for (call, edge) in surface.calls[7..19].iter().zip(r.model().edges()) {
            let expected_from = r.projection().project(&rotated[edge.0]).unwrap();
            let expected_to = r.projection().project(&rotated[edge.1]).unwrap();
            assert_eq!(*call, Call::Line(expected_from, expected_to, Rgb::WHITE, 1));
        }
    }

    #[test]
    fn test_config_is_validated() {
        let config = RenderConfig {
            camera_offset: 1.0,
            ..RenderConfig::default()
        };
        let result = CubeRenderer::new(CubeModel::unit(), LightSource::rgb_basis(), config);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_skips_primitives_on_camera_plane() {
        // A custom model with one corner sitting on the camera plane
        let mut vertices = *CubeModel::unit().vertices();
        vertices[0] = nalgebra::Point3::new(0.0, 0.0, -4.0);
        let model = CubeModel::new(
            vertices,
            vec![Edge(0, 1), Edge(1, 2)],
            vec![Face([0, 1, 2, 3]), Face([4, 5, 6, 7])],
        )
        .unwrap();
        let config = RenderConfig {
            camera_offset: 5.0,
            ..RenderConfig::default()
        };
        let mut r = CubeRenderer::new(model, LightSource::rgb_basis(), config).unwrap();
        r.projection.camera_offset = 4.0;

        let mut surface = RecordingSurface::default();
        let stats = r
            .render_frame(&mut surface, &RotationState::zero())
            .unwrap();
        assert_eq!(
            stats,
            FrameStats {
                faces_drawn: 1,
                faces_skipped: 1,
                edges_drawn: 1,
                edges_skipped: 1,
            }
        );
        assert_eq!(surface.calls.first(), Some(&Call::Clear(Rgb::BLACK)));
        assert_eq!(surface.calls.last(), Some(&Call::Present));
    }

    #[test]
    fn test_renders_into_framebuffer() {
        let r = CubeRenderer::new(
            CubeModel::unit(),
            LightSource::rgb_basis(),
            RenderConfig::with_size(80, 60),
        )
        .unwrap();
        let mut fb = Framebuffer::new(80, 60);
        r.render_frame(&mut fb, &RotationState::zero()).unwrap();

        assert_eq!(fb.presented(), 1);
        // Outline passes over the corner of the front face
        assert_eq!(fb.pixel(13, 10), Some(Rgb::WHITE));
        // Front face is drawn after the black back face and wins the center
        assert_eq!(fb.pixel(40, 30), Some(Rgb::BLUE));
        // Outside the cube stays background
        assert_eq!(fb.pixel(1, 1), Some(Rgb::BLACK));
    }

    #[test]
    fn test_resize_updates_projection() {
        let mut r = renderer();
        r.resize(200, 100).unwrap();
        assert_eq!(*r.projection(), Projection::new(200, 100, 4.0));
        assert!(r.resize(0, 100).is_err());
        assert_eq!(r.config().width, 200);
    }
}
