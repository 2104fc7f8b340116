use std::f32::consts::TAU;

use model_showcase::config::ViewerConfig;
use model_showcase::core::WindowDimensions;
use model_showcase::frame::FrameInfo;
use model_showcase::{FrameRenderer, RenderLoop, Result, Variant, ViewerContext};

/// Records how often it was asked to draw and the rotation it saw
#[derive(Default)]
struct RecordingRenderer {
    renders: usize,
    last_rotation_y: f32,
}

impl FrameRenderer for RecordingRenderer {
    fn render(&mut self, ctx: &ViewerContext) -> Result<()> {
        self.renders += 1;
        self.last_rotation_y = ctx.scene.object().rotation.y;
        Ok(())
    }
}

fn showcase() -> ViewerContext {
    ViewerContext::bootstrap(
        Variant::Showcase,
        ViewerConfig::default(),
        Some(WindowDimensions::new(1280, 720)),
    )
    .unwrap()
}

fn wrapped(angle: f32) -> f32 {
    angle.rem_euclid(TAU)
}

#[cfg(test)]
mod render_loop_tests {
    use super::*;

    #[test]
    fn test_rotation_after_n_cycles() {
        let mut ctx = showcase();
        let mut renderer = RecordingRenderer::default();
        let mut render_loop = RenderLoop::new(&ctx.config);

        let cycles = 100;
        for n in 0..cycles {
            let frame = FrameInfo::new(n, n as f32 / 60.0, 1.0 / 60.0);
            render_loop.cycle(&mut ctx, &mut renderer, &frame).unwrap();
        }

        let rotation = ctx.scene.object().rotation;
        assert!((rotation.x - wrapped(cycles as f32 * 0.002)).abs() < 1e-4);
        assert!((rotation.y - wrapped(cycles as f32 * 0.005)).abs() < 1e-4);
        assert_eq!(rotation.z, 0.0);
        assert_eq!(renderer.renders, cycles as usize);
    }

    #[test]
    fn test_rotation_wraps_past_full_turn() {
        let mut ctx = showcase();
        let mut renderer = RecordingRenderer::default();
        let mut render_loop = RenderLoop::new(&ctx.config);

        // 0.005 * 1500 = 7.5 rad, more than a full turn
        let cycles = 1500;
        for n in 0..cycles {
            render_loop
                .cycle(&mut ctx, &mut renderer, &FrameInfo::new(n, 0.0, 0.0))
                .unwrap();
        }

        let y = ctx.scene.object().rotation.y;
        assert!((0.0..TAU).contains(&y));
        assert!((y - wrapped(7.5)).abs() < 1e-3);
    }

    #[test]
    fn test_rotation_is_per_cycle_not_per_second() {
        let mut slow = showcase();
        let mut fast = showcase();
        let mut renderer = RecordingRenderer::default();
        let mut slow_loop = RenderLoop::new(&slow.config);
        let mut fast_loop = RenderLoop::new(&fast.config);

        for n in 0..10 {
            slow_loop
                .cycle(&mut slow, &mut renderer, &FrameInfo::new(n, 0.0, 1.0 / 30.0))
                .unwrap();
            fast_loop
                .cycle(&mut fast, &mut renderer, &FrameInfo::new(n, 0.0, 1.0 / 144.0))
                .unwrap();
        }

        assert_eq!(slow.scene.object().rotation, fast.scene.object().rotation);
    }

    #[test]
    fn test_renderer_sees_updated_rotation() {
        let mut ctx = showcase();
        let mut renderer = RecordingRenderer::default();
        let mut render_loop = RenderLoop::new(&ctx.config);

        render_loop
            .cycle(&mut ctx, &mut renderer, &FrameInfo::new(0, 0.0, 0.016))
            .unwrap();
        assert!((renderer.last_rotation_y - 0.005).abs() < 1e-6);
    }

    #[test]
    fn test_controls_orbit_with_auto_rotate() {
        let mut ctx = showcase();
        let mut renderer = RecordingRenderer::default();
        let mut render_loop = RenderLoop::new(&ctx.config);
        let start = ctx.camera.position;

        for n in 0..60 {
            render_loop
                .cycle(&mut ctx, &mut renderer, &FrameInfo::new(n, 0.0, 0.016))
                .unwrap();
        }

        assert!(ctx.camera.position.distance(start) > 1e-3);
        assert!((ctx.camera.distance() - 5.0).abs() < 1e-3);
    }
}
