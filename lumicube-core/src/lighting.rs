/// Per-face shading from three colored directional lights
use nalgebra::{Point3, Vector3};

use crate::color::Rgb;
use crate::geometry::{Face, LightSource, VERTEX_COUNT};

/// Mean of the face's four rotated vertex positions.
///
/// Stands in for the outward normal: on a cube centered at the origin the
/// face centroid points the same way, and has length 1 for the unit cube.
pub fn face_normal(face: &Face, rotated: &[Point3<f32>; VERTEX_COUNT]) -> Vector3<f32> {
    let sum = face
        .indices()
        .iter()
        .fold(Vector3::zeros(), |acc, &i| acc + rotated[i].coords);
    sum / face.indices().len() as f32
}

/// Lambert-style intensity, clamped so back-facing light contributes nothing
pub fn intensity(normal: &Vector3<f32>, light: &LightSource) -> f32 {
    normal.dot(&light.direction).max(0.0)
}

/// Combine the per-light intensities into a face color.
///
/// Light `i` only feeds channel `i`, scaled by that channel of the light's
/// own color, then truncated and clamped to `0..=255`.
pub fn color_from_intensities(intensities: &[f32; 3], lights: &[LightSource; 3]) -> Rgb {
    let channel = |i: usize| {
        let base = lights[i].color.channel(i).unwrap_or(0) as f32;
        Rgb::quantize((base * intensities[i]).floor())
    };
    Rgb::new(channel(0), channel(1), channel(2))
}

/// Shade one face of the rotated model
pub fn shade(face: &Face, rotated: &[Point3<f32>; VERTEX_COUNT], lights: &[LightSource; 3]) -> Rgb {
    let normal = face_normal(face, rotated);
    let intensities = [
        intensity(&normal, &lights[0]),
        intensity(&normal, &lights[1]),
        intensity(&normal, &lights[2]),
    ];
    color_from_intensities(&intensities, lights)
}
