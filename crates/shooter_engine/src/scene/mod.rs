//! Scene registry and checked transitions
//!
//! Scenes are registered under a name and identified by a game-defined key.
//! Loading a scene never runs game code itself; the manager returns a
//! [`SceneChange`] and the caller tears down and sets up accordingly.

mod scene_manager;

pub use scene_manager::{SceneChange, SceneManager};

use std::fmt::Debug;
use std::hash::Hash;

/// Marker trait for scene identifiers.
///
/// Typically implemented by game-specific enums.
pub trait SceneKey: Clone + Copy + Eq + Hash + Debug + 'static {}

/// Scene loading errors
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// An empty scene name was requested
    #[error("Scene name is empty")]
    EmptyName,

    /// No scene is registered under the requested name
    #[error("Scene '{0}' is not registered")]
    NotFound(String),
}
