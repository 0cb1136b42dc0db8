//! Text and panel bindings
//!
//! The game does not draw anything. Labels and panels are shared cells that
//! a front end reads every frame; the game writes into them through the
//! bindings below. Every reference is optional: a missing one only costs the
//! visual update.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, warn};
use shooter_engine::events::{EventSystem, EventType, HandlerId};
use shooter_engine::foundation::time::GameClock;

use crate::high_score::{HighScoreError, HighScoreStore};

/// A text element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Label {
    /// Displayed text
    pub text: String,
}

/// A panel that can be shown or hidden
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Panel {
    /// Whether the panel is shown
    pub visible: bool,
}

/// Label shared with the front end
pub type SharedLabel = Rc<RefCell<Label>>;

/// Panel shared with the front end
pub type SharedPanel = Rc<RefCell<Panel>>;

/// Create an empty shared label
pub fn label() -> SharedLabel {
    Rc::new(RefCell::new(Label::default()))
}

/// Create a hidden shared panel
pub fn panel() -> SharedPanel {
    Rc::new(RefCell::new(Panel::default()))
}

/// `"Score: N"`
pub fn score_text(score: i32) -> String {
    format!("Score: {}", score)
}

/// `"Final Score: N"`
pub fn final_score_text(score: i32) -> String {
    format!("Final Score: {}", score)
}

/// `"High Score: N"`
pub fn high_score_text(score: i32) -> String {
    format!("High Score: {}", score)
}

pub(crate) fn set_text(label: Option<&SharedLabel>, text: String) {
    if let Some(label) = label {
        label.borrow_mut().text = text;
    }
}

pub(crate) fn set_visible(panel: Option<&SharedPanel>, visible: bool) {
    if let Some(panel) = panel {
        panel.borrow_mut().visible = visible;
    }
}

/// UI elements the game state writes to directly
#[derive(Debug, Clone, Default)]
pub struct UiRefs {
    /// In-game score label
    pub score_text: Option<SharedLabel>,
    /// Panel shown on game over
    pub game_over_panel: Option<SharedPanel>,
    /// Final score label on the game over panel
    pub game_over_score_text: Option<SharedLabel>,
}

impl UiRefs {
    /// Bindings with every element present
    pub fn complete() -> Self {
        Self {
            score_text: Some(label()),
            game_over_panel: Some(panel()),
            game_over_score_text: Some(label()),
        }
    }

    /// Names of the bindings that are not wired
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.score_text.is_none() {
            missing.push("ScoreText");
        }
        if self.game_over_panel.is_none() {
            missing.push("GameOverPanel");
        }
        if self.game_over_score_text.is_none() {
            missing.push("GameOverScoreText");
        }
        missing
    }
}

/// Every UI element a front end can share with the game
#[derive(Debug, Clone, Default)]
pub struct UiLayout {
    /// Elements written by the game state
    pub game: UiRefs,
    /// Score label owned by the gameplay overlay
    pub hud_score_text: Option<SharedLabel>,
    /// Pause menu panel
    pub pause_menu: Option<SharedPanel>,
    /// Main menu instructions panel
    pub instructions_panel: Option<SharedPanel>,
    /// End screen final score label
    pub final_score_text: Option<SharedLabel>,
    /// End screen high score label
    pub high_score_text: Option<SharedLabel>,
}

impl UiLayout {
    /// Layout with every element present
    pub fn complete() -> Self {
        Self {
            game: UiRefs::complete(),
            hud_score_text: Some(label()),
            pause_menu: Some(panel()),
            instructions_panel: Some(panel()),
            final_score_text: Some(label()),
            high_score_text: Some(label()),
        }
    }
}

/// Gameplay overlay: score subscriber and pause menu
#[derive(Debug, Default)]
pub struct Hud {
    score_text: Option<SharedLabel>,
    pause_menu: Option<SharedPanel>,
    paused: bool,
    subscription: Option<HandlerId>,
}

impl Hud {
    /// Overlay writing to the given elements
    pub fn new(score_text: Option<SharedLabel>, pause_menu: Option<SharedPanel>) -> Self {
        Self {
            score_text,
            pause_menu,
            paused: false,
            subscription: None,
        }
    }

    /// Subscribe to score changes and hide the pause menu
    pub fn attach(&mut self, events: &mut EventSystem) {
        self.detach(events);
        set_visible(self.pause_menu.as_ref(), false);
        self.paused = false;

        let Some(label) = self.score_text.clone() else {
            warn!("HUD has no score label; score changes will not be shown");
            return;
        };
        let id = events.subscribe(EventType::ScoreChanged, move |event| {
            if let Some(score) = event.get_score() {
                label.borrow_mut().text = score_text(score);
            }
            false
        });
        self.subscription = Some(id);
        debug!("HUD subscribed to score changes");
    }

    /// Drop the score subscription
    pub fn detach(&mut self, events: &mut EventSystem) {
        if let Some(id) = self.subscription.take() {
            events.unregister_handler(id);
            debug!("HUD unsubscribed from score changes");
        }
    }

    /// Whether the HUD is currently subscribed
    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    /// Flip pause, freezing or resuming game time. Returns the new state.
    pub fn toggle_pause(&mut self, clock: &mut GameClock) -> bool {
        self.paused = !self.paused;
        set_visible(self.pause_menu.as_ref(), self.paused);
        clock.set_time_scale(if self.paused { 0.0 } else { 1.0 });
        self.paused
    }

    /// Leave pause and restore normal time
    pub fn resume(&mut self, clock: &mut GameClock) {
        self.paused = false;
        set_visible(self.pause_menu.as_ref(), false);
        clock.set_time_scale(1.0);
    }

    /// Whether the pause menu is open
    pub fn is_paused(&self) -> bool {
        self.paused
    }
}

/// Main menu with an instructions panel
#[derive(Debug, Default)]
pub struct MainMenu {
    instructions: Option<SharedPanel>,
}

impl MainMenu {
    /// Menu using `instructions` as its instructions panel
    pub fn new(instructions: Option<SharedPanel>) -> Self {
        Self { instructions }
    }

    /// Reset the menu when its scene is entered
    pub fn open(&self) {
        set_visible(self.instructions.as_ref(), false);
    }

    /// Show or hide the instructions
    pub fn toggle_instructions(&self) {
        if let Some(panel) = &self.instructions {
            let mut panel = panel.borrow_mut();
            panel.visible = !panel.visible;
        }
    }

    /// Hide the instructions
    pub fn close_instructions(&self) {
        set_visible(self.instructions.as_ref(), false);
    }

    /// Whether the instructions are shown
    pub fn instructions_visible(&self) -> bool {
        self.instructions.as_ref().is_some_and(|panel| panel.borrow().visible)
    }
}

/// End screen showing the final and best score
#[derive(Debug, Default)]
pub struct EndScreen {
    final_score_text: Option<SharedLabel>,
    high_score_text: Option<SharedLabel>,
}

impl EndScreen {
    /// End screen writing to the given labels
    pub fn new(final_score_text: Option<SharedLabel>, high_score_text: Option<SharedLabel>) -> Self {
        Self {
            final_score_text,
            high_score_text,
        }
    }

    /// Display `final_score`, recording it as the high score when it is
    /// better. Returns the high score shown.
    pub fn show(&self, final_score: i32, store: &mut dyn HighScoreStore) -> Result<i32, HighScoreError> {
        set_text(self.final_score_text.as_ref(), final_score_text(final_score));
        let high_score = store.record(final_score)?;
        set_text(self.high_score_text.as_ref(), high_score_text(high_score));
        Ok(high_score)
    }
}
