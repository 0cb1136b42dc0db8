//! ECS Components module
//!
//! Plain data attached to every world entity

pub mod lifecycle;
pub mod lifetime;
pub mod movement;
pub mod transform;

pub use lifecycle::DestroyCause;
pub use lifetime::Lifetime;
pub use movement::Movement2D;
pub use transform::Transform2D;
