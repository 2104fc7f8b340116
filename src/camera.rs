use glam::{Mat4, Vec3};

use crate::config::CameraConfig;

/// Perspective camera looking at a target point (y-up)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view in degrees
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(config: &CameraConfig, aspect: f32) -> Self {
        Self {
            position: Vec3::from_array(config.position),
            target: Vec3::ZERO,
            fov: config.fov,
            aspect,
            near: config.near,
            far: config.far,
        }
    }

    /// Aspect ratio for a surface; a zero height is treated as one pixel
    pub fn aspect_for(width: u32, height: u32) -> f32 {
        width as f32 / height.max(1) as f32
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    /// Projection with wgpu's [0, 1] depth range
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn distance(&self) -> f32 {
        self.position.distance(self.target)
    }
}
