//! # Shooter Engine
//!
//! A small, headless engine core for 2D arcade games.
//!
//! ## Features
//!
//! - **Tick-driven world**: Entity storage with per-entity lifetimes
//! - **Cooperative timers**: Cancellable repeating timers driven by the game tick
//! - **Events**: Subscriber-based notifications for UI and game logic
//! - **Scenes**: Named scene registry with checked transitions
//! - **Configuration**: TOML and RON config files through serde
//!
//! ## Quick Start
//!
//! ```rust
//! use shooter_engine::prelude::*;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! enum Kind { Rock }
//!
//! let mut world: World<Kind> = World::new();
//! let rock = world.spawn(EntitySpec::new(Kind::Rock, "rock").with_lifetime(1.0));
//!
//! let expired = world.tick(1.5);
//! assert_eq!(expired.len(), 1);
//! assert_eq!(expired[0].handle, rock);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod ecs;
pub mod events;
pub mod scene;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        ecs::{
            components::{DestroyCause, Lifetime},
            DestroyedEntity, EntityHandle, EntitySpec, OwnerTag, World,
        },
        events::{Event, EventArg, EventHandler, EventSystem, EventType, HandlerId},
        foundation::{
            math::Vec2,
            scheduler::{Scheduler, TimerHandle},
            time::GameClock,
        },
        scene::{SceneChange, SceneError, SceneKey, SceneManager},
    };
}
