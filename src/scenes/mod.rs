mod cone;
mod mesh;
mod polyhedron;

pub use cone::create_cone;
pub use mesh::MeshData;
pub use polyhedron::{create_dodecahedron, subdivide_and_project};
