/// Cube topology and light sources
use nalgebra::{Point3, Vector3};

use crate::color::Rgb;
use crate::error::GeometryError;

/// Number of corners of the cube
pub const VERTEX_COUNT: usize = 8;

/// A wireframe edge between two vertex indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge(pub usize, pub usize);

/// A planar quad given as four vertex indices in winding order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face(pub [usize; 4]);

impl Face {
    pub fn indices(&self) -> &[usize; 4] {
        &self.0
    }
}

/// The static cube: corner positions, outline edges and shaded faces
#[derive(Debug, Clone)]
pub struct CubeModel {
    vertices: [Point3<f32>; VERTEX_COUNT],
    edges: Vec<Edge>,
    faces: Vec<Face>,
}

impl CubeModel {
    /// Build a model, checking that every edge and face index names a vertex.
    pub fn new(
        vertices: [Point3<f32>; VERTEX_COUNT],
        edges: Vec<Edge>,
        faces: Vec<Face>,
    ) -> Result<Self, GeometryError> {
        for (i, edge) in edges.iter().enumerate() {
            for index in [edge.0, edge.1] {
                if index >= VERTEX_COUNT {
                    return Err(GeometryError::EdgeIndexOutOfRange { edge: i, index });
                }
            }
        }
        for (i, face) in faces.iter().enumerate() {
            if let Some(&index) = face.0.iter().find(|&&index| index >= VERTEX_COUNT) {
                return Err(GeometryError::FaceIndexOutOfRange { face: i, index });
            }
        }

        Ok(Self {
            vertices,
            edges,
            faces,
        })
    }

    /// The cube spanning `[-1, 1]` on every axis: 8 corners, 12 edges, 6 faces.
    pub fn unit() -> Self {
        let vertices = [
            Point3::new(-1.0, -1.0, -1.0),
            Point3::new(-1.0, 1.0, -1.0),
            Point3::new(1.0, 1.0, -1.0),
            Point3::new(1.0, -1.0, -1.0),
            Point3::new(-1.0, -1.0, 1.0),
            Point3::new(-1.0, 1.0, 1.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(1.0, -1.0, 1.0),
        ];

        let edges = vec![
            // Back ring
            Edge(0, 1),
            Edge(1, 2),
            Edge(2, 3),
            Edge(3, 0),
            // Front ring
            Edge(4, 5),
            Edge(5, 6),
            Edge(6, 7),
            Edge(7, 4),
            // Connectors
            Edge(0, 4),
            Edge(1, 5),
            Edge(2, 6),
            Edge(3, 7),
        ];

        let faces = vec![
            Face([0, 1, 2, 3]),
            Face([4, 5, 6, 7]),
            Face([0, 1, 5, 4]),
            Face([2, 3, 7, 6]),
            Face([0, 3, 7, 4]),
            Face([1, 2, 6, 5]),
        ];

        Self {
            vertices,
            edges,
            faces,
        }
    }

    pub fn vertices(&self) -> &[Point3<f32>; VERTEX_COUNT] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Largest distance of any vertex from the origin. Rotation about the
    /// origin never moves a vertex further than this.
    pub fn bounding_radius(&self) -> f32 {
        self.vertices
            .iter()
            .map(|v| v.coords.norm())
            .fold(0.0, f32::max)
    }
}

impl Default for CubeModel {
    fn default() -> Self {
        Self::unit()
    }
}

/// A directional light whose direction also selects its color channel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSource {
    pub direction: Vector3<f32>,
    pub color: Rgb,
}

impl LightSource {
    pub fn new(direction: Vector3<f32>, color: Rgb) -> Self {
        Self { direction, color }
    }

    /// Red along +X, green along +Y, blue along +Z.
    pub fn rgb_basis() -> [LightSource; 3] {
        [
            LightSource::new(Vector3::x(), Rgb::RED),
            LightSource::new(Vector3::y(), Rgb::GREEN),
            LightSource::new(Vector3::z(), Rgb::BLUE),
        ]
    }
}
