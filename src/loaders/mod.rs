pub mod animation;
pub mod gltf;
pub mod model;

pub use animation::{AnimationClip, AnimationPlayer, Channel, ChannelValues, Interpolation};
pub use self::gltf::{load_model, model_from_document, LoadProgress};
pub use model::{world_matrices, ModelAsset, ModelNode, Transform};
