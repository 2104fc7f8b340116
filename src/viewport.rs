use crate::camera::Camera;
use crate::context::ViewerContext;
use crate::core::{SurfaceTarget, WindowDimensions};

/// Size of the output surface as last seen from the hosting window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    pub aspect: f32,
    pub width: u32,
    pub height: u32,
    pub scale_factor: f64,
}

impl ViewportState {
    pub fn from_container(dimensions: WindowDimensions, scale_factor: f64) -> Self {
        Self {
            aspect: Camera::aspect_for(dimensions.width, dimensions.height),
            width: dimensions.width,
            height: dimensions.height,
            scale_factor,
        }
    }

    pub fn dimensions(&self) -> WindowDimensions {
        WindowDimensions::new(self.width, self.height)
    }

    /// Logical size in points, for the overlay
    pub fn logical_size(&self) -> [f32; 2] {
        let scale = self.scale_factor.max(f64::EPSILON) as f32;
        [self.width as f32 / scale, self.height as f32 / scale]
    }
}

/// Bring camera and surface in line with the container
///
/// Calling it twice with the same size leaves everything unchanged. An empty
/// container updates the camera but leaves the surface alone, since wgpu
/// rejects zero-sized surfaces.
pub fn sync<S: SurfaceTarget + ?Sized>(
    ctx: &mut ViewerContext,
    surface: &mut S,
    dimensions: WindowDimensions,
    scale_factor: f64,
) {
    let viewport = ViewportState::from_container(dimensions, scale_factor);
    ctx.camera.aspect = viewport.aspect;
    ctx.viewport = viewport;

    if dimensions.is_empty() {
        log::debug!("Skipping surface resize to {}x{}", dimensions.width, dimensions.height);
        return;
    }
    if surface.surface_size() != dimensions {
        surface.resize(dimensions);
    }
}
