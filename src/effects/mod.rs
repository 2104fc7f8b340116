pub mod confetti;
pub mod countdown;
pub mod loading;

pub use confetti::{BurstSequencer, ConfettiEffect, ConfettiParticle, ConfettiSystem, Emission, Origin};
pub use countdown::{CountdownEvent, CountdownFields, CountdownState, CountdownTimer};
pub use loading::LoadingIndicator;
