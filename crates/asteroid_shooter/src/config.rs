//! Game configuration
//!
//! Every section has defaults, so a config file only needs the values it
//! overrides. Load with [`Config::load_from_file`] and check with
//! [`GameConfig::validate`].

use serde::{Deserialize, Serialize};
use shooter_engine::config::{Config, ConfigError};
use shooter_engine::foundation::math::Vec2;

use crate::placement::Viewport;

/// Complete game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Distance beyond the screen edge where hostiles appear
    pub spawn_padding: f32,

    /// Camera viewport
    pub viewport: Viewport,

    /// Asteroid pool and movement
    pub asteroids: AsteroidConfig,

    /// Star pool and reward
    pub stars: StarConfig,

    /// Score rules
    pub scoring: ScoringConfig,

    /// Player ship
    pub player: PlayerConfig,

    /// Player projectiles
    pub laser: LaserConfig,

    /// Scene names
    pub scenes: SceneConfig,
}

/// Settings shared by every spawning pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Seconds between periodic spawn attempts
    pub spawn_interval_secs: f32,

    /// Maximum number of live entities
    pub max_count: usize,

    /// Entities spawned immediately when the pool starts
    pub initial_burst: usize,

    /// Templates chosen from at random; blank names are ignored
    pub variants: Vec<String>,

    /// Template used when no variant is configured
    pub default_template: Option<String>,
}

impl PoolConfig {
    fn validate(&self, name: &str) -> Result<(), ConfigError> {
        if !(self.spawn_interval_secs.is_finite() && self.spawn_interval_secs > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "{}.spawn_interval_secs must be positive, got {}",
                name, self.spawn_interval_secs
            )));
        }
        if self.max_count == 0 {
            return Err(ConfigError::Invalid(format!("{}.max_count must be at least 1", name)));
        }
        Ok(())
    }
}

/// Asteroid configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsteroidConfig {
    /// Spawning pool
    pub pool: PoolConfig,

    /// Drift speed in units per second
    pub speed: f32,

    /// Spin in degrees per second
    pub rotation_speed: f32,

    /// Whether asteroids pick new drift directions over time
    pub random_movement: bool,

    /// Seconds between direction rolls
    pub direction_change_interval_secs: f32,

    /// Probability of changing direction on each roll
    pub direction_change_chance: f32,

    /// Asteroids despawn after this many seconds when set
    pub lifetime_secs: Option<f32>,
}

/// Star configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarConfig {
    /// Spawning pool
    pub pool: PoolConfig,

    /// Points granted on pickup
    pub score_value: i32,

    /// Spin in degrees per second
    pub rotation_speed: f32,

    /// Whether stars bob up and down around their spawn point
    pub float_animation: bool,

    /// Angular speed of the bob in radians per second
    pub float_speed: f32,

    /// Height of the bob above and below the spawn point
    pub float_amount: f32,
}

/// Scoring configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Score change applied when an asteroid hits the player
    pub hit_penalty: i32,

    /// Whether the hit penalty is applied at all
    pub apply_hit_penalty: bool,
}

/// Player ship configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Movement speed in units per second
    pub speed: f32,

    /// Margin kept between the ship and the screen edge
    pub padding: f32,

    /// Seconds between two shots
    pub fire_rate_secs: f32,

    /// Where the ship appears, relative to the camera origin
    pub spawn_offset: Vec2,

    /// Template name of the ship
    pub template: String,
}

/// Laser configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaserConfig {
    /// Travel speed in units per second
    pub speed: f32,

    /// Seconds before a laser despawns
    pub lifetime_secs: f32,

    /// Template name; lasers are not fired when unset
    pub template: Option<String>,
}

/// Scene configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Main menu scene
    pub main_menu: String,

    /// Gameplay scene
    pub gameplay: String,

    /// End screen scene
    pub end_game: String,

    /// Scenes available for loading
    pub registered: Vec<String>,
}

impl Config for GameConfig {}

impl GameConfig {
    /// Reject values that would stall or break the game loop
    pub fn validate(&self) -> Result<(), ConfigError> {
        let viewport = &self.viewport;
        let positive = |value: f32| value.is_finite() && value > 0.0;
        if !(positive(viewport.half_height) && positive(viewport.aspect)) {
            return Err(ConfigError::Invalid(format!(
                "viewport needs a finite positive half height and aspect, got {} and {}",
                viewport.half_height, viewport.aspect
            )));
        }
        if !(viewport.half_height * viewport.aspect).is_finite() {
            return Err(ConfigError::Invalid(format!(
                "viewport half width overflows: {} * {}",
                viewport.half_height, viewport.aspect
            )));
        }
        if !(viewport.origin.x.is_finite() && viewport.origin.y.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "viewport.origin must be finite, got ({}, {})",
                viewport.origin.x, viewport.origin.y
            )));
        }
        if !self.spawn_padding.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "spawn_padding must be finite, got {}",
                self.spawn_padding
            )));
        }
        self.asteroids.pool.validate("asteroids.pool")?;
        self.stars.pool.validate("stars.pool")?;
        if !(0.0..=1.0).contains(&self.asteroids.direction_change_chance) {
            return Err(ConfigError::Invalid(format!(
                "asteroids.direction_change_chance must be within [0, 1], got {}",
                self.asteroids.direction_change_chance
            )));
        }
        if !(self.stars.float_speed.is_finite() && self.stars.float_amount.is_finite()) {
            return Err(ConfigError::Invalid("stars float speed and amount must be finite".to_string()));
        }
        if self.player.fire_rate_secs < 0.0 {
            return Err(ConfigError::Invalid("player.fire_rate_secs cannot be negative".to_string()));
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            spawn_padding: 1.0,
            viewport: Viewport::default(),
            asteroids: AsteroidConfig::default(),
            stars: StarConfig::default(),
            scoring: ScoringConfig::default(),
            player: PlayerConfig::default(),
            laser: LaserConfig::default(),
            scenes: SceneConfig::default(),
        }
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            spawn_interval_secs: 1.0,
            max_count: 10,
            initial_burst: 0,
            variants: Vec::new(),
            default_template: None,
        }
    }
}

impl Default for AsteroidConfig {
    fn default() -> Self {
        Self {
            pool: PoolConfig {
                spawn_interval_secs: 0.5,
                max_count: 20,
                initial_burst: 5,
                variants: vec![
                    "asteroid_small".to_string(),
                    "asteroid_medium".to_string(),
                    "asteroid_large".to_string(),
                ],
                default_template: Some("asteroid".to_string()),
            },
            speed: 2.0,
            rotation_speed: 50.0,
            random_movement: true,
            direction_change_interval_secs: 2.0,
            direction_change_chance: 0.3,
            lifetime_secs: None,
        }
    }
}

impl Default for StarConfig {
    fn default() -> Self {
        Self {
            pool: PoolConfig {
                spawn_interval_secs: 1.0,
                max_count: 15,
                initial_burst: 3,
                variants: vec!["star_gold".to_string(), "star_silver".to_string()],
                default_template: Some("star".to_string()),
            },
            score_value: 10,
            rotation_speed: 100.0,
            float_animation: true,
            float_speed: 2.0,
            float_amount: 0.3,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            hit_penalty: -5,
            apply_hit_penalty: true,
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed: 5.0,
            padding: 0.5,
            fire_rate_secs: 0.5,
            spawn_offset: Vec2::new(0.0, -3.0),
            template: "player_ship".to_string(),
        }
    }
}

impl Default for LaserConfig {
    fn default() -> Self {
        Self {
            speed: 10.0,
            lifetime_secs: 5.0,
            template: Some("laser".to_string()),
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        let main_menu = "MainMenu".to_string();
        let gameplay = "Gameplay".to_string();
        let end_game = "EndGame".to_string();
        Self {
            registered: vec![main_menu.clone(), gameplay.clone(), end_game.clone()],
            main_menu,
            gameplay,
            end_game,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shooter_engine::config::ConfigFormat;

    #[test]
    fn test_defaults_match_tuning() {
        let config = GameConfig::default();
        assert!((config.asteroids.pool.spawn_interval_secs - 0.5).abs() < f32::EPSILON);
        assert_eq!(config.asteroids.pool.max_count, 20);
        assert_eq!(config.asteroids.pool.initial_burst, 5);
        assert_eq!(config.stars.pool.max_count, 15);
        assert_eq!(config.stars.pool.initial_burst, 3);
        assert_eq!(config.stars.score_value, 10);
        assert!(config.stars.float_animation);
        assert!((config.stars.float_speed - 2.0).abs() < f32::EPSILON);
        assert!((config.stars.float_amount - 0.3).abs() < f32::EPSILON);
        assert_eq!(config.scoring.hit_penalty, -5);
        assert!(config.scoring.apply_hit_penalty);
        assert_eq!(config.scenes.registered.len(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let text = r#"
            spawn_padding = 2.0

            [asteroids.pool]
            max_count = 4

            [scoring]
            apply_hit_penalty = false
        "#;
        let config = GameConfig::from_str_as(text, ConfigFormat::Toml).unwrap();
        assert_eq!(config.asteroids.pool.max_count, 4);
        assert!((config.asteroids.pool.spawn_interval_secs - 1.0).abs() < f32::EPSILON);
        assert!((config.asteroids.speed - 2.0).abs() < f32::EPSILON);
        assert!(!config.scoring.apply_hit_penalty);
        assert_eq!(config.scoring.hit_penalty, -5);
        assert_eq!(config.stars, StarConfig::default());
    }

    #[test]
    fn test_file_round_trip() {
        let path = std::env::temp_dir().join(format!("asteroid_shooter_{}_config.ron", std::process::id()));
        let mut config = GameConfig::default();
        config.stars.score_value = 25;
        config.asteroids.lifetime_secs = Some(12.0);
        config.save_to_file(&path).unwrap();
        let loaded = GameConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_validate_rejects_bad_pools() {
        let mut config = GameConfig::default();
        config.stars.pool.spawn_interval_secs = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = GameConfig::default();
        config.asteroids.pool.max_count = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = GameConfig::default();
        config.viewport.aspect = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_finite_viewport() {
        let mut config = GameConfig::default();
        config.viewport.aspect = f32::INFINITY;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = GameConfig::default();
        config.viewport.half_height = 2.0e38;
        config.viewport.aspect = 16.0 / 9.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = GameConfig::default();
        config.viewport.origin.x = f32::NAN;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.spawn_padding = f32::NEG_INFINITY;
        assert!(config.validate().is_err());

        let text = "[viewport]\naspect = inf\n";
        let config = GameConfig::from_str_as(text, shooter_engine::config::ConfigFormat::Toml).unwrap();
        assert!(config.validate().is_err());
    }
}
