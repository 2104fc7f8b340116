pub mod app;
pub mod camera;
pub mod cli;
pub mod config;
pub mod context;
pub mod controls;
pub mod core;
pub mod effects;
pub mod error;
pub mod frame;
pub mod loaders;
pub mod math;
pub mod overlay;
pub mod render_loop;
pub mod renderer;
pub mod resolver;
pub mod scene;
pub mod scenes;
pub mod types;
pub mod viewport;
pub mod window;

pub use context::{Variant, ViewerCommand, ViewerContext};
pub use error::{Result, ViewerError};
pub use render_loop::{FrameRenderer, RenderLoop};
pub use resolver::{AssetResolver, Resolution};
