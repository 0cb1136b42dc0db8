//! Spawning, scoring and restart across whole sessions

use shooter_engine::events::EventType;
use shooter_engine::foundation::math::Vec2;

use super::*;
use crate::components::PoolKind;
use crate::spawner::SpawnerState;

#[test]
fn test_gameplay_starts_on_the_next_frame() {
    let (mut game, ui) = new_game(GameConfig::default(), 0);
    game.load_gameplay().unwrap();

    assert!(!game.state().is_active());
    assert!(game.state().has_pending_start());
    assert_eq!(game.world().count_of_kind(EntityKind::Player), 1);
    assert_eq!(game.world().count_of_kind(EntityKind::Asteroid), 5);
    assert_eq!(game.world().count_of_kind(EntityKind::Star), 3);
    assert_eq!(game.scheduler().len(), 2);

    let report = game.tick(FRAME, PlayerInput::default());
    assert!(report.session_started);
    assert!(game.state().is_active());
    assert_eq!(text(ui.hud_score_text.as_ref()), "Score: 0");
    assert_eq!(text(ui.game.score_text.as_ref()), "Score: 0");
}

#[test]
fn test_star_pickup_scores_and_frees_a_slot() {
    let (mut game, ui) = running_game();
    let player = game.player_ship().unwrap();
    let stars_before = game.spawner(PoolKind::Stars).live_count();

    game.report_collision(first_of(&game, EntityKind::Star), player);

    assert_eq!(game.state().score(), 10);
    assert_eq!(text(ui.game.score_text.as_ref()), "Score: 10");
    assert_eq!(text(ui.hud_score_text.as_ref()), "Score: 10");
    assert_eq!(game.spawner(PoolKind::Stars).live_count(), stars_before - 1);
    assert_eq!(
        game.spawner(PoolKind::Stars).live_count(),
        game.world().count_of_kind(EntityKind::Star)
    );
}

#[test]
fn test_asteroid_hit_applies_penalty_and_ends_the_session() {
    let (mut game, ui) = running_game();
    let over = record(&mut game, EventType::GameOver);
    let player = game.player_ship().unwrap();

    game.report_collision(player, first_of(&game, EntityKind::Star));
    game.report_collision(player, first_of(&game, EntityKind::Asteroid));

    assert_eq!(game.state().score(), 5);
    assert!(!game.state().is_active());
    assert_eq!(over.borrow().len(), 1);
    assert!(ui.game.game_over_panel.as_ref().unwrap().borrow().visible);
    assert_eq!(text(ui.game.game_over_score_text.as_ref()), "Final Score: 5");

    // A second hit after game over changes nothing
    game.report_collision(player, first_of(&game, EntityKind::Asteroid));
    assert_eq!(game.state().score(), 5);
    assert_eq!(over.borrow().len(), 1);
}

#[test]
fn test_laser_destroys_asteroid() {
    let (mut game, _ui) = running_game();
    let fire = PlayerInput {
        axis: Vec2::zeros(),
        fire: true,
    };
    let report = game.tick(FRAME, fire);
    assert_eq!(report.lasers_fired, 1);

    let asteroids_before = game.spawner(PoolKind::Asteroids).live_count();
    let laser = first_of(&game, EntityKind::Laser);
    game.report_collision(laser, first_of(&game, EntityKind::Asteroid));

    assert!(!game.world().contains(laser));
    assert_eq!(game.state().asteroids_destroyed(), 1);
    assert_eq!(game.state().score(), 0);
    assert_eq!(game.spawner(PoolKind::Asteroids).live_count(), asteroids_before - 1);
}

#[test]
fn test_fire_rate_limits_shots() {
    let (mut game, _ui) = running_game();
    let fire = PlayerInput {
        axis: Vec2::zeros(),
        fire: true,
    };
    let mut fired = 0;
    for _ in 0..60 {
        fired += game.tick(FRAME, fire).lasers_fired;
    }
    // One second at one shot per half second
    assert!((2..=3).contains(&fired), "fired {}", fired);
}

#[test]
fn test_lasers_are_removed_off_screen() {
    let (mut game, _ui) = running_game();
    let fire = PlayerInput {
        axis: Vec2::zeros(),
        fire: true,
    };
    game.tick(FRAME, fire);
    assert_eq!(game.world().count_of_kind(EntityKind::Laser), 1);

    let report = run(&mut game, 2.0);
    assert_eq!(report.off_screen, 1);
    assert_eq!(game.world().count_of_kind(EntityKind::Laser), 0);
}

#[test]
fn test_pools_fill_up_to_their_caps() {
    let (mut game, _ui) = running_game();
    run(&mut game, 30.0);

    for (kind, entity) in [(PoolKind::Asteroids, EntityKind::Asteroid), (PoolKind::Stars, EntityKind::Star)] {
        let spawner = game.spawner(kind);
        assert_eq!(spawner.live_count(), spawner.pool().max_count);
        assert_eq!(spawner.live_count(), game.world().count_of_kind(entity));
    }
}

#[test]
fn test_pause_freezes_spawning() {
    let (mut game, _ui) = running_game();
    assert!(game.toggle_pause());
    assert!(game.is_paused());

    let timers_now = game.scheduler().now();
    let population = game.world().len();
    let report = run(&mut game, 3.0);
    assert_eq!(report.spawned, 0);
    assert_eq!(game.world().len(), population);
    assert!((game.scheduler().now() - timers_now).abs() < f64::EPSILON);

    assert!(!game.toggle_pause());
    let report = run(&mut game, 3.0);
    assert!(report.spawned > 0);
}

#[test]
fn test_restart_mid_cycle_leaves_no_orphans() {
    let (mut game, ui) = running_game();
    let player = game.player_ship().unwrap();
    game.report_collision(player, first_of(&game, EntityKind::Star));
    run(&mut game, 1.3);
    let generation = game.spawner(PoolKind::Asteroids).generation();

    game.restart().unwrap();

    assert_eq!(game.scheduler().len(), 2);
    assert!(game.state().is_active());
    assert!(!game.state().has_pending_start());
    assert_eq!(game.state().score(), 0);
    assert_eq!(text(ui.hud_score_text.as_ref()), "Score: 0");
    assert_eq!(game.events_mut().handler_count(EventType::ScoreChanged), 1);
    assert_eq!(game.spawner(PoolKind::Asteroids).generation(), generation + 1);
    assert_eq!(game.spawner(PoolKind::Asteroids).live_count(), 5);
    assert_eq!(game.spawner(PoolKind::Stars).live_count(), 3);
    assert_eq!(game.world().len(), 1 + 5 + 3);

    // The old cycle's timers are gone; nothing spawns before a full interval
    let report = run(&mut game, 0.4);
    assert!(!report.session_started);
    assert_eq!(report.spawned, 0);

    run(&mut game, 5.0);
    assert_eq!(game.spawner(PoolKind::Asteroids).state(), SpawnerState::Spawning);
    for (kind, entity) in [(PoolKind::Asteroids, EntityKind::Asteroid), (PoolKind::Stars, EntityKind::Star)] {
        let spawner = game.spawner(kind);
        assert!(spawner.live_count() <= spawner.pool().max_count);
        assert_eq!(spawner.live_count(), game.world().count_of_kind(entity));
    }
}

#[test]
fn test_restart_after_game_over_starts_fresh() {
    let (mut game, ui) = running_game();
    let player = game.player_ship().unwrap();
    game.report_collision(player, first_of(&game, EntityKind::Asteroid));
    assert!(!game.state().is_active());

    game.restart().unwrap();
    assert!(game.state().is_active());
    assert!(!ui.game.game_over_panel.as_ref().unwrap().borrow().visible);

    let player = game.player_ship().unwrap();
    game.report_collision(player, first_of(&game, EntityKind::Star));
    assert_eq!(game.state().score(), 10);
}

#[test]
fn test_stars_bob_around_their_spawn_point() {
    let (mut game, _ui) = new_game(GameConfig::default(), 0);
    game.load_gameplay().unwrap();
    let star = first_of(&game, EntityKind::Star);
    let anchor = game.world().get(star).unwrap().transform.position;

    let mut heights = Vec::new();
    for _ in 0..30 {
        game.tick(FRAME, PlayerInput::default());
        let position = game.world().get(star).unwrap().transform.position;
        assert!((position.x - anchor.x).abs() < 1e-5);
        assert!((position.y - anchor.y).abs() <= 0.3 + 1e-4);
        let expected = anchor.y + (game.world().now() * 2.0).sin() * 0.3;
        assert!((position.y - expected).abs() < 1e-4);
        heights.push(position.y);
    }
    assert!(heights.windows(2).all(|pair| pair[1] > pair[0]));
}

#[test]
fn test_stars_hold_still_without_float_animation() {
    let mut config = GameConfig::default();
    config.stars.float_animation = false;
    let (mut game, _ui) = new_game(config, 0);
    game.load_gameplay().unwrap();
    let star = first_of(&game, EntityKind::Star);
    let anchor = game.world().get(star).unwrap().transform.position;

    run(&mut game, 1.0);
    assert_eq!(game.world().get(star).unwrap().transform.position, anchor);
}

#[test]
fn test_short_lived_asteroids_expire_and_free_slots() {
    let mut config = GameConfig::default();
    config.asteroids.lifetime_secs = Some(1.0);
    config.asteroids.pool.spawn_interval_secs = 10.0;
    let (mut game, _ui) = new_game(config, 0);
    game.load_gameplay().unwrap();

    let report = run(&mut game, 1.5);
    assert_eq!(report.expired, 5);
    assert_eq!(game.spawner(PoolKind::Asteroids).live_count(), 0);
    assert_eq!(game.world().count_of_kind(EntityKind::Asteroid), 0);
}
