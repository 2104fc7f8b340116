use model_showcase::config::ViewerConfig;
use model_showcase::core::{SurfaceTarget, WindowDimensions};
use model_showcase::viewport::{self, ViewportState};
use model_showcase::{Variant, ViewerCommand, ViewerContext};

/// Surface that counts reconfigurations
struct CountingSurface {
    size: WindowDimensions,
    resizes: usize,
}

impl CountingSurface {
    fn new(width: u32, height: u32) -> Self {
        Self {
            size: WindowDimensions::new(width, height),
            resizes: 0,
        }
    }
}

impl SurfaceTarget for CountingSurface {
    fn resize(&mut self, dimensions: WindowDimensions) {
        self.size = dimensions;
        self.resizes += 1;
    }

    fn surface_size(&self) -> WindowDimensions {
        self.size
    }
}

fn context() -> ViewerContext {
    ViewerContext::bootstrap(
        Variant::Showcase,
        ViewerConfig::default(),
        Some(WindowDimensions::new(800, 600)),
    )
    .unwrap()
}

#[cfg(test)]
mod viewport_tests {
    use super::*;

    #[test]
    fn test_resize_updates_aspect_and_surface() {
        let mut ctx = context();
        let mut surface = CountingSurface::new(800, 600);

        viewport::sync(&mut ctx, &mut surface, WindowDimensions::new(1920, 1080), 1.5);

        assert!((ctx.camera.aspect - 1920.0 / 1080.0).abs() < 1e-6);
        assert_eq!(surface.size, WindowDimensions::new(1920, 1080));
        assert_eq!(surface.resizes, 1);
        assert_eq!(ctx.viewport.scale_factor, 1.5);
    }

    #[test]
    fn test_resize_is_idempotent() {
        let mut ctx = context();
        let mut surface = CountingSurface::new(800, 600);
        let size = WindowDimensions::new(1024, 768);

        viewport::sync(&mut ctx, &mut surface, size, 1.0);
        let after_first = (ctx.viewport, ctx.camera);
        viewport::sync(&mut ctx, &mut surface, size, 1.0);

        assert_eq!((ctx.viewport, ctx.camera), after_first);
        assert_eq!(surface.resizes, 1);
    }

    #[test]
    fn test_zero_height_skips_surface() {
        let mut ctx = context();
        let mut surface = CountingSurface::new(800, 600);

        viewport::sync(&mut ctx, &mut surface, WindowDimensions::new(640, 0), 1.0);

        assert_eq!(ctx.camera.aspect, 640.0);
        assert!(ctx.camera.aspect.is_finite());
        assert_eq!(surface.resizes, 0);
        assert_eq!(surface.size, WindowDimensions::new(800, 600));
    }

    #[test]
    fn test_resizes_apply_in_order() {
        let mut ctx = context();
        let mut surface = CountingSurface::new(800, 600);
        let sizes = [(1000, 500), (300, 600), (1200, 900)];

        for (w, h) in sizes {
            ctx.dispatch(
                ViewerCommand::Resize {
                    dimensions: WindowDimensions::new(w, h),
                    scale_factor: 2.0,
                },
                &mut surface,
            );
        }

        assert_eq!(surface.size, WindowDimensions::new(1200, 900));
        assert!((ctx.camera.aspect - 1200.0 / 900.0).abs() < 1e-6);
        assert_eq!(surface.resizes, 3);
    }

    #[test]
    fn test_viewport_from_container() {
        let state = ViewportState::from_container(WindowDimensions::new(300, 150), 1.0);
        assert_eq!(state.aspect, 2.0);
        assert_eq!(state.width, 300);
        assert_eq!(state.height, 150);
    }
}
