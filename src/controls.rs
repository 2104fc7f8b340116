use std::f32::consts::{PI, TAU};

use glam::Vec3;

use crate::camera::Camera;
use crate::config::ControlsConfig;

const EPS: f32 = 1e-6;
const ZOOM_STEP: f32 = 0.95;

/// Spherical coordinates around the orbit target (y-up)
#[derive(Debug, Clone, Copy, PartialEq)]
struct Spherical {
    radius: f32,
    /// Polar angle from +Y
    phi: f32,
    /// Azimuth around +Y, 0 on +Z
    theta: f32,
}

impl Spherical {
    fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius < EPS {
            return Self {
                radius: 0.0,
                phi: 0.0,
                theta: 0.0,
            };
        }
        Self {
            radius,
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
            theta: offset.x.atan2(offset.z),
        }
    }

    fn to_offset(self) -> Vec3 {
        let sin_phi = self.phi.sin();
        Vec3::new(
            self.radius * sin_phi * self.theta.sin(),
            self.radius * self.phi.cos(),
            self.radius * sin_phi * self.theta.cos(),
        )
    }
}

/// Orbit camera controller with damping and auto-rotation
///
/// Input accumulates into a pending delta; `update` applies a damped share
/// of it each frame and writes the result into the camera.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    config: ControlsConfig,
    pub auto_rotate: bool,
    target: Vec3,
    delta_theta: f32,
    delta_phi: f32,
    scale: f32,
    dragging: bool,
    saved_target: Vec3,
    saved_position: Vec3,
}

impl OrbitControls {
    pub fn new(config: ControlsConfig, camera: &Camera, auto_rotate: bool) -> Self {
        Self {
            config,
            auto_rotate,
            target: camera.target,
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
            dragging: false,
            saved_target: camera.target,
            saved_position: camera.position,
        }
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn min_distance(&self) -> f32 {
        self.config.min_distance
    }

    pub fn max_distance(&self) -> f32 {
        self.config.max_distance
    }

    /// Pending azimuth still to be applied by damping
    pub fn pending_rotation(&self) -> f32 {
        self.delta_theta
    }

    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Lets a framed object sit outside the configured distance range
    pub fn include_distance(&mut self, distance: f32) {
        self.config.max_distance = self.config.max_distance.max(distance);
        self.config.min_distance = self.config.min_distance.min(distance);
    }

    /// Remember the current view as the reset state
    pub fn save_state(&mut self, camera: &Camera) {
        self.saved_target = self.target;
        self.saved_position = camera.position;
    }

    /// Restore the saved view and drop pending motion
    pub fn reset(&mut self, camera: &mut Camera) {
        self.target = self.saved_target;
        camera.position = self.saved_position;
        camera.target = self.saved_target;
        self.delta_theta = 0.0;
        self.delta_phi = 0.0;
        self.scale = 1.0;
        self.dragging = false;
    }

    pub fn begin_drag(&mut self) {
        self.dragging = true;
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Pointer drag in physical pixels relative to the surface height
    pub fn drag(&mut self, dx: f32, dy: f32, surface_height: u32) {
        let height = surface_height.max(1) as f32;
        self.rotate_left(TAU * dx / height * self.config.rotate_speed);
        self.rotate_up(TAU * dy / height * self.config.rotate_speed);
    }

    /// Wheel steps; positive zooms in
    pub fn zoom(&mut self, steps: f32) {
        let factor = ZOOM_STEP.powf(self.config.zoom_speed * steps.abs());
        if steps > 0.0 {
            self.scale *= factor;
        } else if steps < 0.0 {
            self.scale /= factor;
        }
    }

    pub fn rotate_left(&mut self, angle: f32) {
        self.delta_theta -= angle;
    }

    pub fn rotate_up(&mut self, angle: f32) {
        self.delta_phi -= angle;
    }

    fn auto_rotation_angle(&self) -> f32 {
        TAU / 60.0 / 60.0 * self.config.auto_rotate_speed
    }

    /// Advance one frame of orbit motion and write the camera
    pub fn update(&mut self, camera: &mut Camera) {
        if self.auto_rotate && !self.dragging {
            self.rotate_left(self.auto_rotation_angle());
        }

        let mut spherical = Spherical::from_offset(camera.position - self.target);
        let damping = self.config.damping_factor;

        spherical.theta += self.delta_theta * damping;
        spherical.phi += self.delta_phi * damping;
        spherical.phi = spherical.phi.clamp(EPS, PI - EPS);
        spherical.radius = (spherical.radius * self.scale)
            .clamp(self.config.min_distance, self.config.max_distance);

        camera.position = self.target + spherical.to_offset();
        camera.target = self.target;

        self.delta_theta *= 1.0 - damping;
        self.delta_phi *= 1.0 - damping;
        self.scale = 1.0;
    }
}
