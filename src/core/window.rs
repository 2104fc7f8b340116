/// Window dimensions in physical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowDimensions {
    pub width: u32,
    pub height: u32,
}

impl WindowDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Display surface the viewer is hosted in
pub trait WindowContext {
    /// Get window dimensions in physical pixels
    fn dimensions(&self) -> WindowDimensions;

    /// Physical pixels per logical pixel
    fn scale_factor(&self) -> f64;

    /// Request the window to redraw
    fn request_redraw(&self);
}

/// Output surface that can be resized
pub trait SurfaceTarget {
    fn resize(&mut self, dimensions: WindowDimensions);

    fn surface_size(&self) -> WindowDimensions;
}
