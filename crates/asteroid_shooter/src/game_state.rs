//! Session score and game-over state
//!
//! [`GameState`] is the single writer of score and the active flag. It is
//! created once by the [`crate::game::Game`] coordinator and outlives scene
//! changes. Calls that arrive while no session is active are ignored.

use log::{debug, info, warn};
use shooter_engine::events::{Event, EventArg, EventSystem, EventType};

use crate::config::ScoringConfig;
use crate::ui::{final_score_text, score_text, set_text, set_visible, UiRefs};

/// Score, active flag and their notifications
#[derive(Debug)]
pub struct GameState {
    score: i32,
    active: bool,
    pending_start: bool,
    hit_penalty: i32,
    apply_hit_penalty: bool,
    asteroids_destroyed: u32,
    ui: UiRefs,
    events: EventSystem,
}

impl GameState {
    /// Inactive state with score zero
    pub fn new(scoring: &ScoringConfig) -> Self {
        Self {
            score: 0,
            active: false,
            pending_start: false,
            hit_penalty: scoring.hit_penalty,
            apply_hit_penalty: scoring.apply_hit_penalty,
            asteroids_destroyed: 0,
            ui: UiRefs::default(),
            events: EventSystem::new(),
        }
    }

    /// Replace the UI bindings, warning once for each missing element
    pub fn bind_ui(&mut self, ui: UiRefs) {
        for name in ui.missing() {
            warn!("{} is not bound; its updates will be skipped", name);
        }
        self.ui = ui;
    }

    /// Current UI bindings
    pub fn ui(&self) -> &UiRefs {
        &self.ui
    }

    /// Notification hub for score and session events
    pub fn events(&self) -> &EventSystem {
        &self.events
    }

    /// Mutable notification hub, for subscribing
    pub fn events_mut(&mut self) -> &mut EventSystem {
        &mut self.events
    }

    /// Set the timestamp stamped on emitted events
    pub fn set_time(&mut self, seconds: f64) {
        self.events.update_time(seconds);
    }

    fn emit(&mut self, event_type: EventType, score: Option<i32>) {
        let mut event = Event::new(event_type, self.events.current_time());
        if let Some(score) = score {
            event = event.with_arg("score", EventArg::Score(score));
        }
        self.events.emit(&event);
    }

    /// Begin a session: score zero, active, game over panel hidden
    pub fn start_game(&mut self) {
        self.pending_start = false;
        self.score = 0;
        self.active = true;
        self.asteroids_destroyed = 0;
        set_visible(self.ui.game_over_panel.as_ref(), false);
        set_text(self.ui.score_text.as_ref(), score_text(self.score));
        info!("Game started");
        self.emit(EventType::ScoreChanged, Some(self.score));
    }

    /// Start a session on the next [`GameState::update`]
    pub fn defer_start(&mut self) {
        self.pending_start = true;
    }

    /// Whether a deferred start is waiting
    pub fn has_pending_start(&self) -> bool {
        self.pending_start
    }

    /// Run deferred work. Returns `true` if a session was started.
    pub fn update(&mut self) -> bool {
        if self.pending_start {
            self.start_game();
            true
        } else {
            false
        }
    }

    /// Add `delta` to the score, clamping at zero
    pub fn add_score(&mut self, delta: i32) {
        if !self.active {
            return;
        }
        self.score = self.score.saturating_add(delta).max(0);
        set_text(self.ui.score_text.as_ref(), score_text(self.score));
        debug!("Score {:+} -> {}", delta, self.score);
        self.emit(EventType::ScoreChanged, Some(self.score));
    }

    /// A hostile touched the player: apply the penalty, then end the session
    pub fn on_hostile_collision(&mut self) {
        if !self.active {
            return;
        }
        if self.apply_hit_penalty && self.hit_penalty < 0 {
            self.add_score(self.hit_penalty);
        }
        self.game_over();
    }

    /// End the session. Only the first call per session has any effect.
    pub fn game_over(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        info!("Game over with score {}", self.score);
        self.emit(EventType::GameOver, Some(self.score));
        set_visible(self.ui.game_over_panel.as_ref(), true);
        set_text(self.ui.game_over_score_text.as_ref(), final_score_text(self.score));
    }

    /// Cancel a deferred start and begin a fresh session
    pub fn restart(&mut self) {
        self.pending_start = false;
        self.active = false;
        self.start_game();
    }

    /// Leave the session without a game over, e.g. when the scene unloads
    pub fn deactivate(&mut self) {
        self.pending_start = false;
        self.active = false;
    }

    /// Hook for destroyed asteroids; counts them without scoring
    pub fn asteroid_destroyed(&mut self) {
        self.asteroids_destroyed += 1;
    }

    /// Asteroids destroyed this session
    pub fn asteroids_destroyed(&self) -> u32 {
        self.asteroids_destroyed
    }

    /// Current score
    pub fn score(&self) -> i32 {
        self.score
    }

    /// Whether a session is running
    pub fn is_active(&self) -> bool {
        self.active
    }
}
