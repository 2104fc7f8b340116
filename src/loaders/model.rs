use glam::{Mat4, Quat, Vec3};

use super::animation::AnimationClip;
use crate::math::AABB;
use crate::scenes::MeshData;

/// Local translation/rotation/scale of a node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Node of a model hierarchy; parents always precede their children
#[derive(Debug, Clone, PartialEq)]
pub struct ModelNode {
    pub name: Option<String>,
    pub parent: Option<usize>,
    pub rest: Transform,
}

impl ModelNode {
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            parent: None,
            rest: Transform::IDENTITY,
        }
    }
}

/// A parsed 3D asset: node hierarchy, geometry and animation clips
#[derive(Debug, Clone, Default)]
pub struct ModelAsset {
    pub nodes: Vec<ModelNode>,
    pub mesh: MeshData,
    pub clips: Vec<AnimationClip>,
}

impl ModelAsset {
    /// Single-node asset around a mesh
    pub fn from_mesh(name: &str, mesh: MeshData) -> Self {
        Self {
            nodes: vec![ModelNode::root(name)],
            mesh,
            clips: Vec::new(),
        }
    }

    pub fn has_animations(&self) -> bool {
        !self.clips.is_empty()
    }

    pub fn rest_pose(&self) -> Vec<Transform> {
        self.nodes.iter().map(|n| n.rest).collect()
    }

    pub fn rest_world_matrices(&self) -> Vec<Mat4> {
        world_matrices(&self.nodes, &self.rest_pose())
    }

    /// Bounds of the geometry in its rest pose
    pub fn bounds(&self) -> Option<AABB> {
        let matrices = self.rest_world_matrices();
        AABB::from_points(self.mesh.vertices.iter().map(|v| {
            let m = matrices.get(v.node as usize).copied().unwrap_or(Mat4::IDENTITY);
            m.transform_point3(Vec3::from_array(v.position))
        }))
    }
}

/// Composes local transforms down the hierarchy
pub fn world_matrices(nodes: &[ModelNode], locals: &[Transform]) -> Vec<Mat4> {
    let mut world: Vec<Mat4> = Vec::with_capacity(nodes.len());
    for (node, local) in nodes.iter().zip(locals) {
        let parent = node.parent.and_then(|p| world.get(p)).copied().unwrap_or(Mat4::IDENTITY);
        world.push(parent * local.matrix());
    }
    world
}
