mod aabb;
mod color;
mod framing;

pub use aabb::AABB;
pub use color::{hex_to_linear, hex_to_srgb, srgb_to_linear};
pub use framing::{fit_distance, frame_bounds, Framing, MIN_FRAMING_DISTANCE};
