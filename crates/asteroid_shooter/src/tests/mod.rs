//! End-to-end tests driving [`Game`] the way a front end does

mod session_flow;

use std::cell::RefCell;
use std::rc::Rc;

use shooter_engine::ecs::EntityHandle;
use shooter_engine::events::EventType;

use crate::components::EntityKind;
use crate::config::GameConfig;
use crate::game::{Game, TickReport};
use crate::high_score::MemoryHighScoreStore;
use crate::player::PlayerInput;
use crate::ui::UiLayout;

const FRAME: f32 = 1.0 / 60.0;

/// Game with every UI element bound and an in-memory high score
fn new_game(config: GameConfig, high_score: i32) -> (Game, UiLayout) {
    let ui = UiLayout::complete();
    let game = Game::new(
        config,
        ui.clone(),
        Box::new(MemoryHighScoreStore::with_score(high_score)),
        17,
    )
    .unwrap();
    (game, ui)
}

/// Gameplay loaded and its deferred start already run
fn running_game() -> (Game, UiLayout) {
    let (mut game, ui) = new_game(GameConfig::default(), 0);
    game.load_main_menu().unwrap();
    game.load_gameplay().unwrap();
    game.tick(FRAME, PlayerInput::default());
    assert!(game.state().is_active());
    (game, ui)
}

/// Tick idle frames for `seconds`, summing the reports
fn run(game: &mut Game, seconds: f32) -> TickReport {
    let mut total = TickReport::default();
    let frames = (seconds / FRAME).round() as usize;
    for _ in 0..frames {
        let report = game.tick(FRAME, PlayerInput::default());
        total.spawned += report.spawned;
        total.lasers_fired += report.lasers_fired;
        total.expired += report.expired;
        total.off_screen += report.off_screen;
        total.session_started |= report.session_started;
    }
    total
}

fn first_of(game: &Game, kind: EntityKind) -> EntityHandle {
    game.world().handles_of_kind(kind)[0]
}

fn text(label: Option<&crate::ui::SharedLabel>) -> String {
    label.map(|label| label.borrow().text.clone()).unwrap_or_default()
}

/// Record every event of `event_type` the game emits
fn record(game: &mut Game, event_type: EventType) -> Rc<RefCell<Vec<Option<String>>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    game.events_mut().subscribe(event_type, move |event| {
        sink.borrow_mut().push(event.get_scene().map(str::to_string));
        false
    });
    seen
}
