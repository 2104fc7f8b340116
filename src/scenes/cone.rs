use std::f32::consts::TAU;

use glam::Vec3;

use super::MeshData;
use crate::types::Vertex;

/// Cone centred on the origin: apex at +height/2, base cap at -height/2
pub fn create_cone(radius: f32, height: f32, radial_segments: u32, color: [f32; 4]) -> MeshData {
    let segments = radial_segments.max(3);
    let half = height * 0.5;
    let slope = radius / height;
    let mut vertices = Vec::with_capacity(segments as usize * 6);

    let rim = |i: u32| {
        let theta = i as f32 / segments as f32 * TAU;
        (theta, Vec3::new(radius * theta.sin(), -half, radius * theta.cos()))
    };
    let side_normal = |theta: f32| Vec3::new(theta.sin(), slope, theta.cos()).normalize();

    for i in 0..segments {
        let (t0, p0) = rim(i);
        let (t1, p1) = rim(i + 1);
        let apex_normal = side_normal((t0 + t1) * 0.5);

        vertices.push(Vertex::new([0.0, half, 0.0], apex_normal.to_array(), color, 0));
        vertices.push(Vertex::new(p0.to_array(), side_normal(t0).to_array(), color, 0));
        vertices.push(Vertex::new(p1.to_array(), side_normal(t1).to_array(), color, 0));
    }

    let down = [0.0, -1.0, 0.0];
    for i in 0..segments {
        let (_, p0) = rim(i);
        let (_, p1) = rim(i + 1);
        vertices.push(Vertex::new([0.0, -half, 0.0], down, color, 0));
        vertices.push(Vertex::new(p1.to_array(), down, color, 0));
        vertices.push(Vertex::new(p0.to_array(), down, color, 0));
    }

    MeshData::from_triangle_list(vertices)
}
