use std::f32::consts::TAU;
use std::sync::Arc;

use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::config::{LightConfig, LightingConfig};
use crate::error::{Result, ViewerError};
use crate::loaders::{AnimationPlayer, ModelAsset, ModelNode};
use crate::math::{hex_to_linear, AABB};
use crate::scenes::MeshData;
use crate::types::{LightUniform, MAX_DIRECTIONAL_LIGHTS};

/// Directional light aimed at the origin from `position`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub color: [f32; 3],
    pub intensity: f32,
    pub position: Vec3,
}

impl DirectionalLight {
    fn from_config(config: &LightConfig) -> Self {
        Self {
            color: hex_to_linear(config.color),
            intensity: config.intensity,
            position: Vec3::from_array(config.position),
        }
    }

    pub fn to_uniform(&self) -> LightUniform {
        let dir = self.position.normalize_or_zero();
        LightUniform {
            direction: [dir.x, dir.y, dir.z, 0.0],
            color: [
                self.color[0] * self.intensity,
                self.color[1] * self.intensity,
                self.color[2] * self.intensity,
                1.0,
            ],
        }
    }
}

/// Ambient term plus key, fill and rim lights
#[derive(Debug, Clone, PartialEq)]
pub struct LightRig {
    pub ambient: [f32; 3],
    pub ambient_intensity: f32,
    pub directional: [DirectionalLight; MAX_DIRECTIONAL_LIGHTS],
}

impl LightRig {
    pub fn from_config(config: &LightingConfig) -> Self {
        Self {
            ambient: hex_to_linear(config.ambient_color),
            ambient_intensity: config.ambient_intensity,
            directional: [
                DirectionalLight::from_config(&config.key),
                DirectionalLight::from_config(&config.fill),
                DirectionalLight::from_config(&config.rim),
            ],
        }
    }

    pub fn ambient_uniform(&self) -> [f32; 4] {
        let [r, g, b] = self.ambient;
        let k = self.ambient_intensity;
        [r * k, g * k, b * k, 1.0]
    }

    pub fn light_uniforms(&self) -> [LightUniform; MAX_DIRECTIONAL_LIGHTS] {
        self.directional.map(|l| l.to_uniform())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    /// Stand-in attached at bootstrap while an asset loads
    Placeholder,
    /// Built-in procedural shape
    Procedural,
    /// Loaded from an asset file
    Model,
    /// Substituted after an asset failed to load
    Fallback,
}

/// The single displayed object
#[derive(Debug, Clone)]
pub struct RenderObject {
    pub kind: ObjectKind,
    pub mesh: Arc<MeshData>,
    pub nodes: Vec<ModelNode>,
    /// Euler angles (XYZ order), each kept in [0, 2π)
    pub rotation: Vec3,
    pub scale: Vec3,
    pub position: Vec3,
    pub animation: Option<AnimationPlayer>,
    rest_matrices: Vec<Mat4>,
    local_bounds: Option<AABB>,
}

impl RenderObject {
    pub fn from_asset(kind: ObjectKind, asset: ModelAsset) -> Self {
        let rest_matrices = asset.rest_world_matrices();
        let local_bounds = asset.bounds();
        let animation = asset
            .has_animations()
            .then(|| AnimationPlayer::new(asset.clips.clone()));
        Self {
            kind,
            mesh: Arc::new(asset.mesh),
            nodes: asset.nodes,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            position: Vec3::ZERO,
            animation,
            rest_matrices,
            local_bounds,
        }
    }

    pub fn from_mesh(kind: ObjectKind, name: &str, mesh: MeshData) -> Self {
        Self::from_asset(kind, ModelAsset::from_mesh(name, mesh))
    }

    /// Empty object at the origin; draws nothing
    pub fn placeholder() -> Self {
        Self::from_mesh(ObjectKind::Placeholder, "placeholder", MeshData::empty())
    }

    pub fn rotate(&mut self, delta: Vec3) {
        self.rotation = (self.rotation + delta).map(|a| a.rem_euclid(TAU));
    }

    pub fn model_matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z);
        Mat4::from_scale_rotation_translation(self.scale, rotation, self.position)
    }

    /// World matrices of every node, animated when a player is attached
    pub fn node_matrices(&self) -> Vec<Mat4> {
        match &self.animation {
            Some(player) => player.world_matrices(&self.nodes),
            None => self.rest_matrices.clone(),
        }
    }

    /// Rest-pose bounds in object space
    pub fn local_bounds(&self) -> Option<AABB> {
        self.local_bounds
    }

    /// Bounds after scale and position, ignoring rotation
    pub fn placed_bounds(&self) -> Option<AABB> {
        let placement = Mat4::from_scale_rotation_translation(self.scale, Quat::IDENTITY, self.position);
        self.local_bounds.map(|b| b.transformed(&placement))
    }
}

/// Holds exactly one object; the placeholder is swapped for the final
/// object once
#[derive(Debug)]
pub struct SceneGraph {
    object: RenderObject,
    resolved: bool,
    generation: u64,
}

impl SceneGraph {
    pub fn new(placeholder: RenderObject) -> Self {
        Self {
            object: placeholder,
            resolved: false,
            generation: 0,
        }
    }

    pub fn object(&self) -> &RenderObject {
        &self.object
    }

    pub fn object_mut(&mut self) -> &mut RenderObject {
        &mut self.object
    }

    pub fn object_count(&self) -> usize {
        1
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Bumped whenever the object is replaced, so GPU buffers can follow
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Replace the placeholder with the final object
    pub fn resolve(&mut self, object: RenderObject) -> Result<()> {
        if self.resolved {
            return Err(ViewerError::AlreadyResolved);
        }
        self.object = object;
        self.resolved = true;
        self.generation += 1;
        Ok(())
    }
}
