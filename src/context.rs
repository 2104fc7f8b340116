use std::time::Duration;

use chrono::NaiveDateTime;
use glam::Vec3;

use crate::camera::Camera;
use crate::config::ViewerConfig;
use crate::controls::OrbitControls;
use crate::core::{CancellationToken, SurfaceTarget, WindowDimensions};
use crate::effects::{BurstSequencer, ConfettiEffect, ConfettiSystem, CountdownEvent, CountdownTimer, LoadingIndicator};
use crate::error::{Result, ViewerError};
use crate::loaders::ModelAsset;
use crate::math::{frame_bounds, hex_to_linear};
use crate::resolver::Resolution;
use crate::scene::{LightRig, ObjectKind, RenderObject, SceneGraph};
use crate::scenes::{create_cone, create_dodecahedron};
use crate::viewport::{self, ViewportState};

const DODECAHEDRON_RADIUS: f32 = 1.0;
const DODECAHEDRON_DETAIL: u32 = 1;
const FALLBACK_CONE_RADIUS: f32 = 1.0;
const FALLBACK_CONE_HEIGHT: f32 = 2.0;
const FALLBACK_CONE_SEGMENTS: u32 = 32;

pub const AUTO_ROTATE_LABEL: &str = "Auto Rotate";
pub const MANUAL_CONTROL_LABEL: &str = "Manual Control";

/// Which page the viewer shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Variant {
    /// Procedural dodecahedron
    #[default]
    Showcase,
    /// Loaded model with countdown and confetti
    Launch,
}

impl Variant {
    /// Whether the object comes from the asset resolver
    pub fn loads_asset(self) -> bool {
        matches!(self, Variant::Launch)
    }
}

/// Input the viewer reacts to, in the order it arrives
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewerCommand {
    Resize {
        dimensions: WindowDimensions,
        scale_factor: f64,
    },
    ToggleAutoRotate,
    ResetCamera,
    BeginDrag,
    EndDrag,
    /// Pointer motion in physical pixels
    Orbit { dx: f32, dy: f32 },
    /// Wheel steps; positive zooms in
    Zoom(f32),
    Shutdown,
}

/// All viewer state, owned by the event-loop thread
pub struct ViewerContext {
    pub variant: Variant,
    pub config: ViewerConfig,
    pub camera: Camera,
    pub controls: OrbitControls,
    pub lights: LightRig,
    pub scene: SceneGraph,
    pub viewport: ViewportState,
    pub loading: LoadingIndicator,
    pub countdown: Option<CountdownTimer>,
    pub confetti: Option<ConfettiEffect>,
    pub auto_rotate: bool,
    shutdown: CancellationToken,
}

impl ViewerContext {
    /// Build the scene for `variant` inside a surface of the given size
    pub fn bootstrap(variant: Variant, config: ViewerConfig, surface: Option<WindowDimensions>) -> Result<Self> {
        Self::bootstrap_at(variant, config, surface, chrono::Local::now().naive_local())
    }

    /// Like [`bootstrap`](Self::bootstrap) with an explicit local time for the countdown
    pub fn bootstrap_at(
        variant: Variant,
        config: ViewerConfig,
        surface: Option<WindowDimensions>,
        now: NaiveDateTime,
    ) -> Result<Self> {
        let dimensions = surface.ok_or(ViewerError::SurfaceMissing)?;
        let viewport = ViewportState::from_container(dimensions, 1.0);

        let camera = Camera::new(&config.camera, viewport.aspect);
        let controls = OrbitControls::new(config.controls, &camera, config.auto_rotate);
        let lights = LightRig::from_config(&config.lighting);
        let mut loading = LoadingIndicator::new(config.loading_fade_ms as f32 / 1000.0);

        let (scene, countdown, confetti) = match variant {
            Variant::Showcase => {
                let mut scene = SceneGraph::new(RenderObject::placeholder());
                let color = object_color(config.object_color);
                let mesh = create_dodecahedron(DODECAHEDRON_RADIUS, DODECAHEDRON_DETAIL, color);
                scene.resolve(RenderObject::from_mesh(ObjectKind::Procedural, "dodecahedron", mesh))?;
                loading.hide_after(config.loading_hide_delay_ms as f32 / 1000.0);
                (scene, None, None)
            }
            Variant::Launch => {
                let countdown = CountdownTimer::start(config.countdown_target()?, now);
                let confetti = ConfettiEffect::new(BurstSequencer::new(&config.confetti), ConfettiSystem::new());
                (SceneGraph::new(RenderObject::placeholder()), Some(countdown), Some(confetti))
            }
        };

        log::info!(
            "Viewer bootstrapped: {:?} at {}x{}",
            variant,
            dimensions.width,
            dimensions.height
        );

        Ok(Self {
            variant,
            auto_rotate: config.auto_rotate,
            config,
            camera,
            controls,
            lights,
            scene,
            viewport,
            loading,
            countdown,
            confetti,
            shutdown: CancellationToken::new(),
        })
    }

    /// Token cancelled by [`ViewerCommand::Shutdown`]
    pub fn cancellation(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Attach the final object once the asset load settled
    pub fn apply_resolution(&mut self, resolution: Resolution) -> Result<()> {
        let object = match resolution {
            Resolution::Loaded(asset) => self.normalized_model(asset),
            Resolution::Failed(err) => {
                log::warn!("{}; showing fallback", err);
                self.fallback_object()
            }
        };

        self.scene.resolve(object)?;
        if self.scene.object().kind == ObjectKind::Model {
            self.frame_object();
        }
        self.loading.hide();
        Ok(())
    }

    fn normalized_model(&self, asset: ModelAsset) -> RenderObject {
        log::info!(
            "Model loaded: {} nodes, {} triangles, {} clips",
            asset.nodes.len(),
            asset.mesh.triangle_count(),
            asset.clips.len()
        );
        let mut object = RenderObject::from_asset(ObjectKind::Model, asset);
        object.scale = Vec3::splat(self.config.normalized_scale);
        object.position = Vec3::from_array(self.config.normalized_position);
        object
    }

    fn fallback_object(&self) -> RenderObject {
        let mesh = create_cone(
            FALLBACK_CONE_RADIUS,
            FALLBACK_CONE_HEIGHT,
            FALLBACK_CONE_SEGMENTS,
            object_color(self.config.object_color),
        );
        RenderObject::from_mesh(ObjectKind::Fallback, "fallback-cone", mesh)
    }

    /// Point camera and controls at the object's normalized bounds
    fn frame_object(&mut self) {
        let Some(bounds) = self.scene.object().placed_bounds() else {
            return;
        };
        let framing = frame_bounds(&bounds, self.camera.fov, self.config.framing_padding);
        log::debug!("Framing model at distance {:.2}", framing.distance);

        self.camera.position = framing.position;
        self.camera.target = framing.target;
        self.controls.set_target(framing.target);
        self.controls.include_distance(framing.distance);
        self.controls.save_state(&self.camera);
    }

    pub fn dispatch<S: SurfaceTarget + ?Sized>(&mut self, command: ViewerCommand, surface: &mut S) {
        match command {
            ViewerCommand::Resize {
                dimensions,
                scale_factor,
            } => viewport::sync(self, surface, dimensions, scale_factor),
            ViewerCommand::ToggleAutoRotate => self.set_auto_rotate(!self.auto_rotate),
            ViewerCommand::ResetCamera => self.controls.reset(&mut self.camera),
            ViewerCommand::BeginDrag => self.controls.begin_drag(),
            ViewerCommand::EndDrag => self.controls.end_drag(),
            ViewerCommand::Orbit { dx, dy } => {
                if self.controls.is_dragging() {
                    self.controls.drag(dx, dy, self.viewport.height);
                }
            }
            ViewerCommand::Zoom(steps) => self.controls.zoom(steps),
            ViewerCommand::Shutdown => {
                log::info!("Shutdown requested");
                self.shutdown.cancel();
            }
        }
    }

    pub fn set_auto_rotate(&mut self, enabled: bool) {
        self.auto_rotate = enabled;
        self.controls.auto_rotate = enabled;
        log::debug!("Auto-rotate {}", if enabled { "on" } else { "off" });
    }

    pub fn auto_rotate_label(&self) -> &'static str {
        if self.auto_rotate {
            AUTO_ROTATE_LABEL
        } else {
            MANUAL_CONTROL_LABEL
        }
    }

    /// Step the time-based effects by `delta` seconds against the wall clock `now`
    pub fn advance_effects(&mut self, delta: f32, now: NaiveDateTime) -> Option<CountdownEvent> {
        self.loading.advance(delta);
        self.countdown.as_mut().and_then(|c| c.advance(delta, now))
    }

    /// One confetti frame; `elapsed` is the time since bootstrap
    pub fn advance_confetti(&mut self, elapsed: Duration) {
        let viewport = self.viewport.logical_size();
        if let Some(confetti) = self.confetti.as_mut() {
            if !confetti.is_done() {
                confetti.advance(elapsed, viewport);
            }
        }
    }

    pub fn background(&self) -> [f32; 3] {
        hex_to_linear(self.config.background)
    }
}

fn object_color(hex: u32) -> [f32; 4] {
    let [r, g, b] = hex_to_linear(hex);
    [r, g, b, 1.0]
}
