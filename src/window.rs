use std::sync::Arc;

use winit::window::Window as WinitWindow;

use crate::core::{WindowContext, WindowDimensions};

/// Wrapper around winit Window exposing the viewer's window interface
pub struct Window {
    inner: Arc<WinitWindow>,
}

impl Window {
    pub fn new(window: Arc<WinitWindow>) -> Self {
        Self { inner: window }
    }

    /// Current size, or `None` while the window has no drawable area yet
    pub fn surface(&self) -> Option<WindowDimensions> {
        let dims = self.dimensions();
        (!dims.is_empty()).then_some(dims)
    }
}

impl WindowContext for Window {
    fn dimensions(&self) -> WindowDimensions {
        let size = self.inner.inner_size();
        WindowDimensions::new(size.width, size.height)
    }

    fn scale_factor(&self) -> f64 {
        self.inner.scale_factor()
    }

    fn request_redraw(&self) {
        self.inner.request_redraw();
    }
}
