use glam::Vec3;

use super::MeshData;
use crate::types::Vertex;

const PHI: f32 = 1.618_034;
const INV_PHI: f32 = 1.0 / PHI;

#[rustfmt::skip]
const DODECAHEDRON_VERTICES: [[f32; 3]; 20] = [
    // (±1, ±1, ±1)
    [-1.0, -1.0, -1.0], [-1.0, -1.0, 1.0],
    [-1.0, 1.0, -1.0], [-1.0, 1.0, 1.0],
    [1.0, -1.0, -1.0], [1.0, -1.0, 1.0],
    [1.0, 1.0, -1.0], [1.0, 1.0, 1.0],
    // (0, ±1/φ, ±φ)
    [0.0, -INV_PHI, -PHI], [0.0, -INV_PHI, PHI],
    [0.0, INV_PHI, -PHI], [0.0, INV_PHI, PHI],
    // (±1/φ, ±φ, 0)
    [-INV_PHI, -PHI, 0.0], [-INV_PHI, PHI, 0.0],
    [INV_PHI, -PHI, 0.0], [INV_PHI, PHI, 0.0],
    // (±φ, 0, ±1/φ)
    [-PHI, 0.0, -INV_PHI], [PHI, 0.0, -INV_PHI],
    [-PHI, 0.0, INV_PHI], [PHI, 0.0, INV_PHI],
];

// Each pentagon as three triangles
#[rustfmt::skip]
const DODECAHEDRON_FACES: [[usize; 3]; 36] = [
    [3, 11, 7], [3, 7, 15], [3, 15, 13],
    [7, 19, 17], [7, 17, 6], [7, 6, 15],
    [17, 4, 8], [17, 8, 10], [17, 10, 6],
    [8, 0, 16], [8, 16, 2], [8, 2, 10],
    [0, 12, 1], [0, 1, 18], [0, 18, 16],
    [6, 10, 2], [6, 2, 13], [6, 13, 15],
    [2, 16, 18], [2, 18, 3], [2, 3, 13],
    [18, 1, 9], [18, 9, 11], [18, 11, 3],
    [4, 14, 12], [4, 12, 0], [4, 0, 8],
    [11, 9, 5], [11, 5, 19], [11, 19, 7],
    [19, 5, 14], [19, 14, 4], [19, 4, 17],
    [1, 12, 14], [1, 14, 5], [1, 5, 9],
];

/// Dodecahedron of `radius`, each base triangle split into `(detail + 1)²`
/// triangles and pushed out onto the sphere
pub fn create_dodecahedron(radius: f32, detail: u32, color: [f32; 4]) -> MeshData {
    let base: Vec<Vec3> = DODECAHEDRON_VERTICES.iter().map(|v| Vec3::from_array(*v)).collect();
    subdivide_and_project(&base, &DODECAHEDRON_FACES, radius, detail, color)
}

/// Generic polyhedron builder
///
/// With `detail == 0` faces keep flat normals; otherwise normals point
/// radially so the subdivided surface shades smoothly.
pub fn subdivide_and_project(
    base: &[Vec3],
    faces: &[[usize; 3]],
    radius: f32,
    detail: u32,
    color: [f32; 4],
) -> MeshData {
    let cols = detail as usize + 1;
    let mut positions = Vec::with_capacity(faces.len() * cols * cols * 3);

    for face in faces {
        subdivide_face(base[face[0]], base[face[1]], base[face[2]], cols, &mut positions);
    }

    let projected: Vec<Vec3> = positions.iter().map(|p| p.normalize() * radius).collect();

    let vertices = projected
        .chunks_exact(3)
        .flat_map(|tri| {
            let mut flat = (tri[1] - tri[0]).cross(tri[2] - tri[0]).normalize_or_zero();
            if flat.dot(tri[0] + tri[1] + tri[2]) < 0.0 {
                flat = -flat;
            }
            tri.iter()
                .map(move |p| {
                    let normal = if detail == 0 { flat } else { p.normalize_or_zero() };
                    Vertex::new(p.to_array(), normal.to_array(), color, 0)
                })
                .collect::<Vec<_>>()
        })
        .collect();

    MeshData::from_triangle_list(vertices)
}

fn subdivide_face(a: Vec3, b: Vec3, c: Vec3, cols: usize, out: &mut Vec<Vec3>) {
    // grid[i][j]: row i walks from edge ab towards c
    let grid: Vec<Vec<Vec3>> = (0..=cols)
        .map(|i| {
            let t = i as f32 / cols as f32;
            let aj = a.lerp(c, t);
            let bj = b.lerp(c, t);
            let rows = cols - i;
            (0..=rows)
                .map(|j| if rows == 0 { aj } else { aj.lerp(bj, j as f32 / rows as f32) })
                .collect()
        })
        .collect();

    for i in 0..cols {
        for j in 0..2 * (cols - i) - 1 {
            let k = j / 2;
            if j % 2 == 0 {
                out.extend([grid[i][k + 1], grid[i + 1][k], grid[i][k]]);
            } else {
                out.extend([grid[i][k + 1], grid[i + 1][k + 1], grid[i + 1][k]]);
            }
        }
    }
}
