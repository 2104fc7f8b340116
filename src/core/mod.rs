pub mod cancel;
pub mod clock;
pub mod gpu_context;
pub mod timer;
pub mod window;

pub use cancel::CancellationToken;
pub use clock::Clock;
pub use gpu_context::GpuContext;
pub use timer::{Delay, FixedHz};
pub use window::{SurfaceTarget, WindowContext, WindowDimensions};
