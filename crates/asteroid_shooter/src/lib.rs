//! # Asteroid Shooter
//!
//! Session core of a 2D asteroid shooter: population spawners for asteroids
//! and stars, score and game-over state, scene flow between the main menu,
//! gameplay and the end screen, and the high score record.
//!
//! Nothing here draws or reads devices. A front end feeds [`game::Game::tick`]
//! with frame deltas and [`player::PlayerInput`], reports contacts through
//! [`game::Game::report_collision`] and reads the shared UI cells in [`ui`].
//!
//! ```rust
//! use asteroid_shooter::prelude::*;
//!
//! let mut game = Game::new(
//!     GameConfig::default(),
//!     UiLayout::complete(),
//!     Box::new(MemoryHighScoreStore::new()),
//!     42,
//! )
//! .unwrap();
//! game.load_gameplay().unwrap();
//! game.tick(1.0 / 60.0, PlayerInput::default());
//! assert!(game.state().is_active());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod collision;
pub mod components;
pub mod config;
pub mod game;
pub mod game_state;
pub mod high_score;
pub mod placement;
pub mod player;
pub mod spawner;
pub mod ui;

#[cfg(test)]
mod tests;

/// Common imports for front ends
pub mod prelude {
    pub use crate::{
        components::{EntityKind, PoolKind},
        config::GameConfig,
        game::{Game, GameError, SceneId, TickReport},
        game_state::GameState,
        high_score::{FileHighScoreStore, HighScoreStore, MemoryHighScoreStore},
        player::PlayerInput,
        ui::{UiLayout, UiRefs},
    };
}
