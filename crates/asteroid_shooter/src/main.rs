use anyhow::{Context, Result};
use asteroid_shooter::prelude::*;
use clap::{Arg, ArgAction, Command};
use shooter_engine::config::Config;
use shooter_engine::ecs::EntityHandle;
use shooter_engine::foundation::logging;
use shooter_engine::foundation::math::Vec2;

const FRAME_TIME: f32 = 1.0 / 60.0;
const CONTACT_RADIUS: f32 = 0.6;

fn main() -> Result<()> {
    logging::init();

    let matches = Command::new("asteroid_shooter")
        .about("Runs a headless asteroid shooter session driven by a simple autopilot")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Game configuration file (.toml or .ron)"),
        )
        .arg(
            Arg::new("seed")
                .short('s')
                .long("seed")
                .value_name("SEED")
                .help("Random seed")
                .default_value("1"),
        )
        .arg(
            Arg::new("seconds")
                .long("seconds")
                .value_name("SECONDS")
                .help("Longest session to simulate")
                .default_value("60"),
        )
        .arg(
            Arg::new("high-score-file")
                .long("high-score-file")
                .value_name("FILE")
                .help("Where the high score is kept")
                .default_value("high_score.toml"),
        )
        .arg(
            Arg::new("no-persist")
                .long("no-persist")
                .help("Keep the high score in memory only")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let config = match matches.get_one::<String>("config") {
        Some(path) => GameConfig::load_from_file(path).with_context(|| format!("Failed to load {}", path))?,
        None => GameConfig::default(),
    };
    let seed: u64 = matches
        .get_one::<String>("seed")
        .map_or(Ok(1), |s| s.parse())
        .context("Invalid seed")?;
    let seconds: f32 = matches
        .get_one::<String>("seconds")
        .map_or(Ok(60.0), |s| s.parse())
        .context("Invalid duration")?;

    let store: Box<dyn HighScoreStore> = if matches.get_flag("no-persist") {
        Box::new(MemoryHighScoreStore::new())
    } else {
        let path = matches
            .get_one::<String>("high-score-file")
            .map_or("high_score.toml", String::as_str);
        Box::new(FileHighScoreStore::new(path))
    };

    let ui = UiLayout::complete();
    let mut game = Game::new(config, ui.clone(), store, seed)?;
    game.load_main_menu()?;
    game.load_gameplay()?;

    let mut elapsed = 0.0;
    while elapsed < seconds && !game.is_quit_requested() {
        let input = autopilot(&game);
        game.tick(FRAME_TIME, input);
        for (a, b) in contacts(&game) {
            game.report_collision(a, b);
        }
        elapsed += FRAME_TIME;

        let state = game.state();
        if !state.is_active() && !state.has_pending_start() {
            break;
        }
    }
    if game.state().is_active() {
        log::info!("Time is up after {:.1}s", elapsed);
    }

    let score = game.state().score();
    game.load_end_game()?;
    println!("Survived {:.1}s", elapsed);
    println!("Final Score: {}", score);
    if let Some(high_score) = game.last_high_score() {
        println!("High Score: {}", high_score);
    }
    if let Some(label) = &ui.final_score_text {
        log::debug!("End screen shows '{}'", label.borrow().text);
    }
    Ok(())
}

/// Steer toward the nearest star, away from close asteroids, firing always
fn autopilot(game: &Game) -> PlayerInput {
    let Some(ship) = game.player_ship().and_then(|handle| game.world().get(handle)) else {
        return PlayerInput::default();
    };
    let position = ship.transform.position;

    let nearest = |kind: EntityKind| {
        game.world()
            .iter()
            .filter(|(_, record)| record.kind == kind)
            .map(|(_, record)| record.transform.position - position)
            .min_by(|a, b| a.norm().total_cmp(&b.norm()))
    };

    let mut axis = nearest(EntityKind::Star).unwrap_or_else(Vec2::zeros);
    if let Some(threat) = nearest(EntityKind::Asteroid) {
        if threat.norm() < 2.0 {
            axis -= threat * 2.0;
        }
    }
    PlayerInput {
        axis: axis.try_normalize(f32::EPSILON).unwrap_or_else(Vec2::zeros),
        fire: true,
    }
}

/// Pairs of entities close enough to touch
fn contacts(game: &Game) -> Vec<(EntityHandle, EntityHandle)> {
    let entities: Vec<_> = game
        .world()
        .iter()
        .map(|(handle, record)| (handle, record.transform.position))
        .collect();
    let mut pairs = Vec::new();
    for (i, (a, pa)) in entities.iter().enumerate() {
        for (b, pb) in &entities[i + 1..] {
            if (pa - pb).norm() < CONTACT_RADIUS {
                pairs.push((*a, *b));
            }
        }
    }
    pairs
}
