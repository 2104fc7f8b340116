use glam::Vec3;

use super::AABB;

/// Closest a framed camera gets to its target
pub const MIN_FRAMING_DISTANCE: f32 = 0.1;

/// Camera placement that fits a bounding box in view
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Framing {
    pub target: Vec3,
    pub position: Vec3,
    pub distance: f32,
}

/// Distance at which an object of `bounding_size` fills a vertical fov,
/// multiplied by `padding`
///
/// `distance = (size / 2) / tan(fov / 2) * padding`
pub fn fit_distance(bounding_size: f32, fov_degrees: f32, padding: f32) -> f32 {
    let half_fov = fov_degrees.to_radians() * 0.5;
    (bounding_size * 0.5) / half_fov.tan() * padding
}

/// Places the camera on +Z looking at the centre of `bounds`, never closer
/// than `MIN_FRAMING_DISTANCE`
pub fn frame_bounds(bounds: &AABB, fov_degrees: f32, padding: f32) -> Framing {
    let target = bounds.center();
    let distance = fit_distance(bounds.max_extent(), fov_degrees, padding).max(MIN_FRAMING_DISTANCE);
    Framing {
        target,
        position: target + Vec3::new(0.0, 0.0, distance),
        distance,
    }
}
