use glam::Vec3;

use crate::config::ViewerConfig;
use crate::context::ViewerContext;
use crate::core::CancellationToken;
use crate::error::Result;
use crate::frame::FrameInfo;

/// Anything that can draw the current viewer state
pub trait FrameRenderer {
    fn render(&mut self, ctx: &ViewerContext) -> Result<()>;
}

/// Per-refresh update: rotate, advance controls, draw once
#[derive(Debug, Clone)]
pub struct RenderLoop {
    rotation_delta: Vec3,
    cycles: u64,
}

impl RenderLoop {
    pub fn new(config: &ViewerConfig) -> Self {
        let [x, y] = config.rotation_delta;
        Self {
            rotation_delta: Vec3::new(x, y, 0.0),
            cycles: 0,
        }
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// One display refresh
    ///
    /// The rotation step is per cycle, not per second, so rotation speed
    /// follows the refresh rate. Animation clips use the frame's wall-clock
    /// delta.
    pub fn cycle<R: FrameRenderer + ?Sized>(
        &mut self,
        ctx: &mut ViewerContext,
        renderer: &mut R,
        frame: &FrameInfo,
    ) -> Result<()> {
        let object = ctx.scene.object_mut();
        if ctx.auto_rotate {
            object.rotate(self.rotation_delta);
        }
        if let Some(player) = object.animation.as_mut() {
            player.advance(frame.delta);
        }

        ctx.controls.update(&mut ctx.camera);
        self.cycles += 1;

        renderer.render(ctx)
    }

    /// Whether the shell should request another redraw
    pub fn should_reschedule(&self, token: &CancellationToken) -> bool {
        !token.is_cancelled()
    }
}
