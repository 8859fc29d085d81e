//! Sub-formats stored inside resource payloads
//!
//! Each handler works on already-extracted resources and never touches the
//! archive container itself.

pub mod animation;
pub mod message;
pub mod texture;

// Re-export main model types
pub use animation::{ActorAnimation, AnimationEntry, AnimationKind, JointIndex, LinkAnimation};
pub use message::{MessageEntry, MessageTable, MessageText};
pub use texture::{TextureData, TextureType};
