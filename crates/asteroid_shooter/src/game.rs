//! Session coordinator
//!
//! [`Game`] owns the world, the timers, both population spawners and the
//! game state, and keeps them consistent across scene changes:
//!
//! ```text
//! leave Gameplay:  spawners end session ─► timers cleared ─► world cleared
//! enter Gameplay:  bounds ─► UI bound ─► ship ─► spawner bursts ─► deferred start
//! ```
//!
//! Ending the spawner sessions first moves them to a new generation, so the
//! teardown destruction records that follow are ignored by their counts.

use log::{debug, error, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use shooter_engine::config::ConfigError;
use shooter_engine::ecs::components::DestroyCause;
use shooter_engine::ecs::{DestroyedEntity, EntityHandle, World};
use shooter_engine::events::{Event, EventArg, EventSystem, EventType};
use shooter_engine::foundation::math::Vec2;
use shooter_engine::foundation::scheduler::Scheduler;
use shooter_engine::foundation::time::GameClock;
use shooter_engine::scene::{SceneChange, SceneError, SceneKey, SceneManager};
use slotmap::SecondaryMap;

use crate::collision::CollisionRouter;
use crate::components::{AsteroidDrift, EntityKind, PoolKind, StarFloat};
use crate::config::GameConfig;
use crate::game_state::GameState;
use crate::high_score::{HighScoreError, HighScoreStore};
use crate::placement::CameraBounds;
use crate::player::{PlayerController, PlayerInput};
use crate::spawner::{PopulationSpawner, SpawnContext, SpawnOutcome, SpawnTick};
use crate::ui::{EndScreen, Hud, MainMenu, UiLayout};

/// Lasers further than this outside the view are removed
pub const LASER_OFFSCREEN_MARGIN: f32 = 0.5;

/// Scenes of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneId {
    /// Title screen with play, instructions and quit
    MainMenu,
    /// The playable session
    Gameplay,
    /// Final and high score
    EndGame,
}

impl SceneKey for SceneId {}

/// Game level errors
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    /// Invalid configuration
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Scene could not be loaded
    #[error(transparent)]
    Scene(#[from] SceneError),

    /// High score could not be read or written
    #[error(transparent)]
    HighScore(#[from] HighScoreError),
}

/// What happened during one [`Game::tick`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Entities created by spawners
    pub spawned: usize,
    /// Lasers fired by the player
    pub lasers_fired: usize,
    /// Entities removed because their lifetime ran out
    pub expired: usize,
    /// Lasers removed after leaving the view
    pub off_screen: usize,
    /// Whether the deferred session start ran
    pub session_started: bool,
}

/// Owns every piece of a running game
pub struct Game {
    config: GameConfig,
    scenes: SceneManager<SceneId>,
    clock: GameClock,
    world: World<EntityKind>,
    scheduler: Scheduler<SpawnTick>,
    rng: StdRng,
    bounds: CameraBounds,
    asteroids: PopulationSpawner,
    stars: PopulationSpawner,
    drift: SecondaryMap<EntityHandle, AsteroidDrift>,
    floats: SecondaryMap<EntityHandle, StarFloat>,
    player: PlayerController,
    router: CollisionRouter,
    state: GameState,
    ui: UiLayout,
    hud: Hud,
    menu: MainMenu,
    end_screen: EndScreen,
    high_scores: Box<dyn HighScoreStore>,
    last_high_score: Option<i32>,
    quit_requested: bool,
}

impl Game {
    /// Build a game with nothing loaded yet
    pub fn new(
        config: GameConfig,
        ui: UiLayout,
        high_scores: Box<dyn HighScoreStore>,
        seed: u64,
    ) -> Result<Self, GameError> {
        config.validate()?;

        let mut scenes = SceneManager::new();
        for name in &config.scenes.registered {
            let key = if *name == config.scenes.main_menu {
                SceneId::MainMenu
            } else if *name == config.scenes.gameplay {
                SceneId::Gameplay
            } else if *name == config.scenes.end_game {
                SceneId::EndGame
            } else {
                warn!("Scene '{}' has no role in this game; not registered", name);
                continue;
            };
            scenes.register(name.clone(), key);
        }

        Ok(Self {
            scenes,
            clock: GameClock::new(),
            world: World::new(),
            scheduler: Scheduler::new(),
            rng: StdRng::seed_from_u64(seed),
            bounds: CameraBounds::from_viewport(&config.viewport),
            asteroids: PopulationSpawner::asteroids(&config),
            stars: PopulationSpawner::stars(&config),
            drift: SecondaryMap::new(),
            floats: SecondaryMap::new(),
            player: PlayerController::new(&config.player, &config.laser),
            router: CollisionRouter::new(config.stars.score_value),
            state: GameState::new(&config.scoring),
            hud: Hud::new(ui.hud_score_text.clone(), ui.pause_menu.clone()),
            menu: MainMenu::new(ui.instructions_panel.clone()),
            end_screen: EndScreen::new(ui.final_score_text.clone(), ui.high_score_text.clone()),
            ui,
            high_scores,
            last_high_score: None,
            quit_requested: false,
            config,
        })
    }

    //--- Scene transitions -------------------------------------------------

    /// Load the main menu
    pub fn load_main_menu(&mut self) -> Result<(), GameError> {
        let name = self.config.scenes.main_menu.clone();
        self.load_scene(&name)
    }

    /// Load the gameplay scene, starting a new session
    pub fn load_gameplay(&mut self) -> Result<(), GameError> {
        let name = self.config.scenes.gameplay.clone();
        self.load_scene(&name)
    }

    /// Load the end screen, recording the high score
    pub fn load_end_game(&mut self) -> Result<(), GameError> {
        let name = self.config.scenes.end_game.clone();
        self.load_scene(&name)
    }

    /// Leave the session for the main menu. Fails without side effects when
    /// the menu scene is not registered.
    pub fn return_to_main_menu(&mut self) -> Result<(), GameError> {
        self.hud.resume(&mut self.clock);
        let name = self.config.scenes.main_menu.clone();
        if !self.scenes.is_registered(&name) {
            error!("Scene '{}' is not registered; cannot return to the main menu", name);
            return Err(SceneError::NotFound(name).into());
        }
        self.load_scene(&name)
    }

    /// Load a scene by name. Unknown scenes leave the current one running.
    pub fn load_scene(&mut self, name: &str) -> Result<(), GameError> {
        let change = self.scenes.load(name)?;
        self.apply_scene_change(change, name);
        Ok(())
    }

    /// Throw the current session away and start a fresh one
    pub fn restart(&mut self) -> Result<(), GameError> {
        info!("Restarting session");
        match self.scenes.active() {
            Some(SceneId::Gameplay) => {
                if let Some(change) = self.scenes.reload_active() {
                    let name = self.config.scenes.gameplay.clone();
                    self.apply_scene_change(change, &name);
                }
            }
            _ => self.load_gameplay()?,
        }
        self.state.restart();
        Ok(())
    }

    /// Ask the host loop to exit
    pub fn quit(&mut self) {
        info!("Quit requested");
        self.quit_requested = true;
    }

    fn apply_scene_change(&mut self, change: SceneChange<SceneId>, name: &str) {
        self.hud.resume(&mut self.clock);

        if change.leaves(SceneId::Gameplay) {
            self.end_session();
        }
        if change.enters(SceneId::MainMenu) {
            self.menu.open();
        }
        if change.enters(SceneId::Gameplay) {
            self.begin_session();
        }
        if change.enters(SceneId::EndGame) {
            match self.end_screen.show(self.state.score(), self.high_scores.as_mut()) {
                Ok(high_score) => self.last_high_score = Some(high_score),
                Err(e) => error!("Could not update the high score: {}", e),
            }
        }

        let event = Event::new(EventType::SceneLoaded, self.clock.total_time())
            .with_arg("scene", EventArg::Scene(name.to_string()));
        self.state.events_mut().emit(&event);
    }

    fn begin_session(&mut self) {
        self.bounds = CameraBounds::from_viewport(&self.config.viewport);
        self.state.bind_ui(self.ui.game.clone());
        self.hud.attach(self.state.events_mut());
        self.player.spawn(&mut self.world, &self.bounds);

        for spawner in [&mut self.asteroids, &mut self.stars] {
            let mut ctx = SpawnContext {
                world: &mut self.world,
                scheduler: &mut self.scheduler,
                bounds: &self.bounds,
                rng: &mut self.rng,
            };
            spawner.start(&mut ctx);
        }
        for handle in self.world.handles_of_kind(EntityKind::Asteroid) {
            self.register_asteroid(handle);
        }
        for handle in self.world.handles_of_kind(EntityKind::Star) {
            self.register_star(handle);
        }

        self.state.defer_start();
        let event = Event::new(EventType::SessionStarted, self.clock.total_time());
        self.state.events_mut().emit(&event);
        info!("Gameplay session started");
    }

    fn end_session(&mut self) {
        self.asteroids.end_session(&mut self.scheduler);
        self.stars.end_session(&mut self.scheduler);
        self.scheduler.clear();

        let removed = self.world.clear(DestroyCause::Teardown);
        self.on_destroyed(&removed);
        self.drift.clear();
        self.floats.clear();
        self.player.despawn();

        self.hud.detach(self.state.events_mut());
        self.state.deactivate();
        let event = Event::new(EventType::SessionEnded, self.clock.total_time())
            .with_arg("score", EventArg::Score(self.state.score()));
        self.state.events_mut().emit(&event);
        info!("Gameplay session ended, {} entities torn down", removed.len());
    }

    //--- Frame update ------------------------------------------------------

    /// Advance the game by one host frame of `raw_delta` seconds
    pub fn tick(&mut self, raw_delta: f32, input: PlayerInput) -> TickReport {
        let mut report = TickReport::default();
        let delta = self.clock.advance(raw_delta);
        self.state.set_time(self.clock.total_time());

        if self.scenes.active() != Some(SceneId::Gameplay) {
            return report;
        }
        report.session_started = self.state.update();
        if delta <= 0.0 {
            return report;
        }

        if self
            .player
            .update(input, delta, &mut self.world, &self.bounds)
            .is_some()
        {
            report.lasers_fired += 1;
        }
        self.update_drift(delta);

        let expired = self.world.tick(delta);
        report.expired = expired.len();
        self.on_destroyed(&expired);
        self.update_floats();

        let off_screen = self.remove_off_screen_lasers();
        report.off_screen = off_screen.len();
        self.on_destroyed(&off_screen);

        report.spawned = self.run_timers(f64::from(delta));
        report
    }

    fn update_drift(&mut self, delta: f32) {
        let asteroids = &self.config.asteroids;
        if !asteroids.random_movement {
            return;
        }
        for (handle, drift) in &mut self.drift {
            let changed = drift.update(
                delta,
                asteroids.direction_change_interval_secs,
                asteroids.direction_change_chance,
                &mut self.rng,
            );
            if changed {
                if let Some(record) = self.world.get_mut(handle) {
                    record.movement.velocity = drift.direction * asteroids.speed;
                }
            }
        }
    }

    fn update_floats(&mut self) {
        let stars = &self.config.stars;
        if !stars.float_animation {
            return;
        }
        let time = self.world.now();
        for (handle, float) in &self.floats {
            if let Some(record) = self.world.get_mut(handle) {
                record.transform.position = float.position_at(time, stars.float_speed, stars.float_amount);
            }
        }
    }

    fn remove_off_screen_lasers(&mut self) -> Vec<DestroyedEntity<EntityKind>> {
        let outside: Vec<EntityHandle> = self
            .world
            .iter()
            .filter(|(_, record)| record.kind == EntityKind::Laser)
            .filter(|(_, record)| !self.bounds.contains(record.transform.position, LASER_OFFSCREEN_MARGIN))
            .map(|(handle, _)| handle)
            .collect();
        outside
            .into_iter()
            .filter_map(|handle| self.world.destroy(handle, DestroyCause::OffScreen))
            .collect()
    }

    /// Fire due spawn timers one at a time. Returns the number of spawns.
    fn run_timers(&mut self, delta: f64) -> usize {
        let until = self.scheduler.now() + delta;
        let mut spawned = 0;
        while let Some(fired) = self.scheduler.poll(until) {
            let SpawnTick(kind) = fired.payload;
            let spawner = match kind {
                PoolKind::Asteroids => &mut self.asteroids,
                PoolKind::Stars => &mut self.stars,
            };
            let mut ctx = SpawnContext {
                world: &mut self.world,
                scheduler: &mut self.scheduler,
                bounds: &self.bounds,
                rng: &mut self.rng,
            };
            if let SpawnOutcome::Spawned(handle) = spawner.on_timer(fired.handle, &mut ctx) {
                spawned += 1;
                match kind {
                    PoolKind::Asteroids => self.register_asteroid(handle),
                    PoolKind::Stars => self.register_star(handle),
                }
            }
        }
        self.scheduler.settle(until);
        spawned
    }

    fn register_asteroid(&mut self, handle: EntityHandle) {
        let speed = self.config.asteroids.speed;
        let Some(record) = self.world.get_mut(handle) else {
            return;
        };
        let direction = if self.config.asteroids.random_movement {
            record
                .movement
                .velocity
                .try_normalize(f32::EPSILON)
                .unwrap_or_else(|| Vec2::new(0.0, -1.0))
        } else {
            Vec2::new(0.0, -1.0)
        };
        record.movement.velocity = direction * speed;
        self.drift.insert(handle, AsteroidDrift::new(direction));
    }

    fn register_star(&mut self, handle: EntityHandle) {
        if let Some(record) = self.world.get(handle) {
            self.floats.insert(handle, StarFloat::new(record.transform.position));
        }
    }

    fn on_destroyed(&mut self, destroyed: &[DestroyedEntity<EntityKind>]) {
        for entity in destroyed {
            if !self.asteroids.on_destroyed(entity) {
                self.stars.on_destroyed(entity);
            }
            self.drift.remove(entity.handle);
            self.floats.remove(entity.handle);
            if self.player.ship() == Some(entity.handle) {
                self.player.despawn();
            }
        }
    }

    //--- Player actions ----------------------------------------------------

    /// Report that two entities touched
    pub fn report_collision(&mut self, a: EntityHandle, b: EntityHandle) {
        let destroyed = self.router.report(&mut self.world, &mut self.state, a, b);
        if !destroyed.is_empty() {
            debug!("Contact destroyed {} entities", destroyed.len());
        }
        self.on_destroyed(&destroyed);
    }

    /// Open or close the pause menu. Only has an effect during gameplay.
    pub fn toggle_pause(&mut self) -> bool {
        if self.scenes.active() != Some(SceneId::Gameplay) {
            return false;
        }
        let paused = self.hud.toggle_pause(&mut self.clock);
        info!("{}", if paused { "Paused" } else { "Resumed" });
        paused
    }

    /// Show or hide the main menu instructions
    pub fn toggle_instructions(&mut self) {
        self.menu.toggle_instructions();
    }

    /// Hide the main menu instructions
    pub fn close_instructions(&mut self) {
        self.menu.close_instructions();
    }

    //--- Queries -----------------------------------------------------------

    /// Session state
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Notification hub for subscribing to score and session events
    pub fn events_mut(&mut self) -> &mut EventSystem {
        self.state.events_mut()
    }

    /// Active scene
    pub fn scene(&self) -> Option<SceneId> {
        self.scenes.active()
    }

    /// Entity storage
    pub fn world(&self) -> &World<EntityKind> {
        &self.world
    }

    /// Pending timers
    pub fn scheduler(&self) -> &Scheduler<SpawnTick> {
        &self.scheduler
    }

    /// Spawner of a pool
    pub fn spawner(&self, kind: PoolKind) -> &PopulationSpawner {
        match kind {
            PoolKind::Asteroids => &self.asteroids,
            PoolKind::Stars => &self.stars,
        }
    }

    /// Current camera bounds
    pub fn bounds(&self) -> &CameraBounds {
        &self.bounds
    }

    /// Game clock
    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    /// Player ship, while a session is loaded
    pub fn player_ship(&self) -> Option<EntityHandle> {
        self.player.ship()
    }

    /// Whether the pause menu is open
    pub fn is_paused(&self) -> bool {
        self.hud.is_paused()
    }

    /// Whether the main menu instructions are shown
    pub fn instructions_visible(&self) -> bool {
        self.menu.instructions_visible()
    }

    /// High score shown by the last end screen
    pub fn last_high_score(&self) -> Option<i32> {
        self.last_high_score
    }

    /// Whether [`Game::quit`] was called
    pub fn is_quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Configuration in use
    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}
