//! Population spawners
//!
//! A [`PopulationSpawner`] keeps one bounded pool of entities alive: it
//! spawns an initial burst, then one entity per interval while the pool has
//! room. Every spawned entity carries an [`OwnerTag`] with the pool id and
//! the spawner's session generation, so destruction reports from an older
//! session never touch the current count.
//!
//! ```text
//!  Idle ──start──► Spawning ──stop──► Stopped
//!   ▲                 │  ▲               │
//!   └──end_session────┘  └─────start─────┘
//! ```

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::Rng;
use shooter_engine::ecs::{DestroyedEntity, EntityHandle, EntitySpec, OwnerTag, World};
use shooter_engine::foundation::scheduler::{Scheduler, TimerHandle};

use crate::components::{random_unit_vector, EntityKind, PoolKind};
use crate::config::{GameConfig, PoolConfig};
use crate::placement::{random_point_inside, random_point_on_edge, random_rotation_degrees, CameraBounds};

/// Timer payload asking a pool for its periodic spawn attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnTick(pub PoolKind);

/// Where new entities of a pool appear
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Just outside a random screen edge
    Edge,
    /// Inside the inner part of the screen
    Inside,
}

/// Spawner lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnerState {
    /// Never started in this session
    Idle,
    /// Periodic timer running
    Spawning,
    /// Periodic timer cancelled; live entities continue
    Stopped,
}

/// Result of one spawn attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnOutcome {
    /// A new entity was created
    Spawned(EntityHandle),
    /// The pool is full
    AtCapacity,
    /// Neither a variant nor a default template is configured
    NoTemplate,
    /// The timer does not belong to the running spawner
    Inactive,
}

/// Bounded pool bookkeeping
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnPool {
    /// Entities of this pool currently alive
    pub live_count: usize,
    /// Upper bound on `live_count`
    pub max_count: usize,
    /// Seconds between periodic attempts
    pub spawn_interval_secs: f32,
    /// Candidate templates
    pub variants: Vec<String>,
}

impl SpawnPool {
    /// Whether another entity fits
    pub fn has_capacity(&self) -> bool {
        self.live_count < self.max_count
    }
}

/// Initial motion given to spawned entities
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpawnMotion {
    /// Speed along a random direction
    pub speed: f32,
    /// Spin in degrees per second
    pub angular_velocity: f32,
    /// Self-destruct delay
    pub lifetime: Option<f32>,
}

/// Borrowed state a spawner needs to create entities
pub struct SpawnContext<'a> {
    /// Entity storage
    pub world: &'a mut World<EntityKind>,
    /// Timer storage
    pub scheduler: &'a mut Scheduler<SpawnTick>,
    /// Current camera bounds
    pub bounds: &'a CameraBounds,
    /// Random source
    pub rng: &'a mut StdRng,
}

/// Keeps one pool of entities populated on a timer
#[derive(Debug, Clone)]
pub struct PopulationSpawner {
    pool_kind: PoolKind,
    pool: SpawnPool,
    initial_burst: usize,
    default_template: Option<String>,
    placement: Placement,
    padding: f32,
    motion: SpawnMotion,
    state: SpawnerState,
    timer: Option<TimerHandle>,
    generation: u32,
}

impl PopulationSpawner {
    /// Create an idle spawner from pool settings
    pub fn new(pool_kind: PoolKind, config: &PoolConfig, placement: Placement, padding: f32) -> Self {
        Self {
            pool_kind,
            pool: SpawnPool {
                live_count: 0,
                max_count: config.max_count,
                spawn_interval_secs: config.spawn_interval_secs,
                variants: config.variants.clone(),
            },
            initial_burst: config.initial_burst,
            default_template: config.default_template.clone(),
            placement,
            padding,
            motion: SpawnMotion::default(),
            state: SpawnerState::Idle,
            timer: None,
            generation: 0,
        }
    }

    /// Set the motion of spawned entities
    #[must_use]
    pub fn with_motion(mut self, motion: SpawnMotion) -> Self {
        self.motion = motion;
        self
    }

    /// Hostile asteroid spawner placed on the screen edges
    pub fn asteroids(config: &GameConfig) -> Self {
        let asteroids = &config.asteroids;
        Self::new(PoolKind::Asteroids, &asteroids.pool, Placement::Edge, config.spawn_padding).with_motion(
            SpawnMotion {
                speed: asteroids.speed,
                angular_velocity: asteroids.rotation_speed,
                lifetime: asteroids.lifetime_secs,
            },
        )
    }

    /// Collectible star spawner placed inside the screen
    pub fn stars(config: &GameConfig) -> Self {
        Self::new(PoolKind::Stars, &config.stars.pool, Placement::Inside, config.spawn_padding).with_motion(
            SpawnMotion {
                speed: 0.0,
                angular_velocity: config.stars.rotation_speed,
                lifetime: None,
            },
        )
    }

    /// Pool this spawner manages
    pub fn pool_kind(&self) -> PoolKind {
        self.pool_kind
    }

    /// Pool bookkeeping
    pub fn pool(&self) -> &SpawnPool {
        &self.pool
    }

    /// Entities of this pool currently alive
    pub fn live_count(&self) -> usize {
        self.pool.live_count
    }

    /// Current lifecycle state
    pub fn state(&self) -> SpawnerState {
        self.state
    }

    /// Session generation stamped on spawned entities
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Handle of the running periodic timer
    pub fn timer(&self) -> Option<TimerHandle> {
        self.timer
    }

    fn owner_tag(&self) -> OwnerTag {
        OwnerTag::new(self.pool_kind.pool_id(), self.generation)
    }

    /// Spawn the initial burst, then start the periodic timer.
    ///
    /// Any periodic timer from an earlier `start` is cancelled first, so a
    /// pool never runs two loops. Returns the number of burst spawns.
    pub fn start(&mut self, ctx: &mut SpawnContext<'_>) -> usize {
        if let Some(previous) = self.timer.take() {
            ctx.scheduler.cancel(previous);
        }
        self.state = SpawnerState::Spawning;

        let spawned = (0..self.initial_burst)
            .filter(|_| matches!(self.try_spawn(ctx), SpawnOutcome::Spawned(_)))
            .count();

        let timer = ctx.scheduler.every(self.pool.spawn_interval_secs, SpawnTick(self.pool_kind));
        self.timer = Some(timer);
        info!(
            "{:?} spawner started: burst {} of {}, every {}s, max {}",
            self.pool_kind, spawned, self.initial_burst, self.pool.spawn_interval_secs, self.pool.max_count
        );
        spawned
    }

    /// Handle a fired periodic timer
    pub fn on_timer(&mut self, timer: TimerHandle, ctx: &mut SpawnContext<'_>) -> SpawnOutcome {
        if self.state != SpawnerState::Spawning || self.timer != Some(timer) {
            debug!("{:?} spawner ignoring stale timer {:?}", self.pool_kind, timer);
            return SpawnOutcome::Inactive;
        }
        self.try_spawn(ctx)
    }

    /// Spawn one entity if the pool has room and a template is available
    pub fn try_spawn(&mut self, ctx: &mut SpawnContext<'_>) -> SpawnOutcome {
        if !self.pool.has_capacity() {
            return SpawnOutcome::AtCapacity;
        }
        let Some(template) = self.choose_template(ctx.rng) else {
            warn!(
                "{:?} spawner has no template configured; skipping spawn",
                self.pool_kind
            );
            return SpawnOutcome::NoTemplate;
        };

        let position = match self.placement {
            Placement::Edge => random_point_on_edge(ctx.bounds, self.padding, ctx.rng).1,
            Placement::Inside => random_point_inside(ctx.bounds, ctx.rng),
        };
        let rotation = random_rotation_degrees(ctx.rng);

        let mut spec = EntitySpec::new(self.pool_kind.entity_kind(), template)
            .with_position(position)
            .with_rotation(rotation)
            .with_angular_velocity(self.motion.angular_velocity)
            .with_owner(self.owner_tag());
        if self.motion.speed > 0.0 {
            spec = spec.with_velocity(random_unit_vector(ctx.rng) * self.motion.speed);
        }
        if let Some(lifetime) = self.motion.lifetime {
            spec = spec.with_lifetime(lifetime);
        }

        let handle = ctx.world.spawn(spec);
        self.pool.live_count += 1;
        debug!(
            "{:?} spawned {:?} at ({:.2}, {:.2}), live {}/{}",
            self.pool_kind, handle, position.x, position.y, self.pool.live_count, self.pool.max_count
        );
        SpawnOutcome::Spawned(handle)
    }

    /// Uniform choice among non-blank variants, else the default template
    fn choose_template<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<String> {
        let candidates: Vec<&String> = self
            .pool
            .variants
            .iter()
            .filter(|name| !name.trim().is_empty())
            .collect();
        if candidates.is_empty() {
            return self
                .default_template
                .as_ref()
                .filter(|name| !name.trim().is_empty())
                .cloned();
        }
        Some(candidates[rng.gen_range(0..candidates.len())].clone())
    }

    /// Account for a destroyed entity. Returns `true` if it belonged to this
    /// pool in the current session.
    pub fn on_destroyed(&mut self, destroyed: &DestroyedEntity<EntityKind>) -> bool {
        let Some(owner) = destroyed.owner else {
            return false;
        };
        if owner.pool != self.pool_kind.pool_id() {
            return false;
        }
        if owner.generation != self.generation {
            debug!(
                "{:?} spawner ignoring destruction from generation {} (current {})",
                self.pool_kind, owner.generation, self.generation
            );
            return false;
        }
        self.pool.live_count = self.pool.live_count.saturating_sub(1);
        true
    }

    /// Cancel the periodic timer. Live entities are left alone.
    pub fn stop(&mut self, scheduler: &mut Scheduler<SpawnTick>) {
        if let Some(timer) = self.timer.take() {
            scheduler.cancel(timer);
        }
        if self.state == SpawnerState::Spawning {
            self.state = SpawnerState::Stopped;
            info!("{:?} spawner stopped with {} live", self.pool_kind, self.pool.live_count);
        }
    }

    /// Forget the current session: cancel the timer, reset the count and
    /// move to a new generation so older entities no longer count.
    pub fn end_session(&mut self, scheduler: &mut Scheduler<SpawnTick>) {
        if let Some(timer) = self.timer.take() {
            scheduler.cancel(timer);
        }
        self.generation = self.generation.wrapping_add(1);
        self.pool.live_count = 0;
        self.state = SpawnerState::Idle;
        debug!("{:?} spawner moved to generation {}", self.pool_kind, self.generation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::Viewport;
    use rand::SeedableRng;
    use shooter_engine::ecs::components::DestroyCause;

    struct Harness {
        world: World<EntityKind>,
        scheduler: Scheduler<SpawnTick>,
        bounds: CameraBounds,
        rng: StdRng,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                world: World::new(),
                scheduler: Scheduler::new(),
                bounds: CameraBounds::from_viewport(&Viewport::default()),
                rng: StdRng::seed_from_u64(7),
            }
        }

        fn ctx(&mut self) -> SpawnContext<'_> {
            SpawnContext {
                world: &mut self.world,
                scheduler: &mut self.scheduler,
                bounds: &self.bounds,
                rng: &mut self.rng,
            }
        }

        /// Advance time and route fired timers to the spawner
        fn run(&mut self, spawner: &mut PopulationSpawner, seconds: f64) -> Vec<SpawnOutcome> {
            let until = self.scheduler.now() + seconds;
            let mut outcomes = Vec::new();
            while let Some(fired) = self.scheduler.poll(until) {
                let mut ctx = SpawnContext {
                    world: &mut self.world,
                    scheduler: &mut self.scheduler,
                    bounds: &self.bounds,
                    rng: &mut self.rng,
                };
                outcomes.push(spawner.on_timer(fired.handle, &mut ctx));
            }
            self.scheduler.settle(until);
            outcomes
        }
    }

    fn pool(max_count: usize, initial_burst: usize) -> PoolConfig {
        PoolConfig {
            spawn_interval_secs: 1.0,
            max_count,
            initial_burst,
            variants: vec!["rock_a".to_string(), "rock_b".to_string()],
            default_template: None,
        }
    }

    #[test]
    fn test_burst_then_capacity_blocks_ticks() {
        let mut harness = Harness::new();
        let mut spawner = PopulationSpawner::new(PoolKind::Asteroids, &pool(2, 2), Placement::Edge, 1.0);

        assert_eq!(spawner.start(&mut harness.ctx()), 2);
        assert_eq!(harness.world.len(), 2);
        assert_eq!(spawner.state(), SpawnerState::Spawning);

        let outcomes = harness.run(&mut spawner, 1.0);
        assert_eq!(outcomes, vec![SpawnOutcome::AtCapacity]);
        assert_eq!(harness.world.len(), 2);

        let victim = harness.world.handles_of_kind(EntityKind::Asteroid)[0];
        let destroyed = harness.world.destroy(victim, DestroyCause::Collision).unwrap();
        assert!(spawner.on_destroyed(&destroyed));
        assert_eq!(spawner.live_count(), 1);

        let outcomes = harness.run(&mut spawner, 1.0);
        assert!(matches!(outcomes[..], [SpawnOutcome::Spawned(_)]));
        assert_eq!(spawner.live_count(), 2);
    }

    #[test]
    fn test_burst_is_bounded_by_max() {
        let mut harness = Harness::new();
        let mut spawner = PopulationSpawner::new(PoolKind::Stars, &pool(3, 10), Placement::Inside, 1.0);
        assert_eq!(spawner.start(&mut harness.ctx()), 3);
        assert_eq!(spawner.live_count(), 3);
    }

    #[test]
    fn test_restart_never_doubles_the_loop() {
        let mut harness = Harness::new();
        let mut spawner = PopulationSpawner::new(PoolKind::Asteroids, &pool(100, 0), Placement::Edge, 1.0);

        spawner.start(&mut harness.ctx());
        spawner.stop(&mut harness.scheduler);
        assert_eq!(spawner.state(), SpawnerState::Stopped);
        assert!(harness.scheduler.is_empty());

        spawner.start(&mut harness.ctx());
        spawner.start(&mut harness.ctx());
        assert_eq!(harness.scheduler.len(), 1);

        let outcomes = harness.run(&mut spawner, 3.0);
        assert_eq!(outcomes.len(), 3);
        assert_eq!(spawner.live_count(), 3);
    }

    #[test]
    fn test_stop_leaves_entities_alive() {
        let mut harness = Harness::new();
        let mut spawner = PopulationSpawner::new(PoolKind::Stars, &pool(5, 2), Placement::Inside, 1.0);
        spawner.start(&mut harness.ctx());
        let timer = spawner.timer().unwrap();
        spawner.stop(&mut harness.scheduler);

        assert_eq!(harness.world.len(), 2);
        assert!(harness.run(&mut spawner, 5.0).is_empty());
        let mut ctx = harness.ctx();
        assert_eq!(spawner.on_timer(timer, &mut ctx), SpawnOutcome::Inactive);
    }

    #[test]
    fn test_stale_generation_is_ignored() {
        let mut harness = Harness::new();
        let mut spawner = PopulationSpawner::new(PoolKind::Asteroids, &pool(5, 2), Placement::Edge, 1.0);
        spawner.start(&mut harness.ctx());
        let old = harness.world.handles_of_kind(EntityKind::Asteroid);

        spawner.end_session(&mut harness.scheduler);
        assert_eq!(spawner.state(), SpawnerState::Idle);
        spawner.start(&mut harness.ctx());
        assert_eq!(spawner.live_count(), 2);

        for handle in old {
            let destroyed = harness.world.destroy(handle, DestroyCause::Teardown).unwrap();
            assert!(!spawner.on_destroyed(&destroyed));
        }
        assert_eq!(spawner.live_count(), 2);
    }

    #[test]
    fn test_other_pool_is_ignored() {
        let mut harness = Harness::new();
        let mut rocks = PopulationSpawner::new(PoolKind::Asteroids, &pool(5, 1), Placement::Edge, 1.0);
        let mut stars = PopulationSpawner::new(PoolKind::Stars, &pool(5, 0), Placement::Inside, 1.0);
        rocks.start(&mut harness.ctx());

        let rock = harness.world.handles_of_kind(EntityKind::Asteroid)[0];
        let destroyed = harness.world.destroy(rock, DestroyCause::Expired).unwrap();
        assert!(!stars.on_destroyed(&destroyed));
        assert!(rocks.on_destroyed(&destroyed));
        assert_eq!(rocks.live_count(), 0);
    }

    #[test]
    fn test_template_fallbacks() {
        let mut harness = Harness::new();
        let mut config = pool(5, 0);
        config.variants = vec![String::new(), "  ".to_string()];
        config.default_template = Some("rock".to_string());
        let mut spawner = PopulationSpawner::new(PoolKind::Asteroids, &config, Placement::Edge, 1.0);

        let SpawnOutcome::Spawned(handle) = spawner.try_spawn(&mut harness.ctx()) else {
            panic!("expected a spawn");
        };
        assert_eq!(harness.world.get(handle).unwrap().template, "rock");

        config.default_template = None;
        let mut empty = PopulationSpawner::new(PoolKind::Asteroids, &config, Placement::Edge, 1.0);
        assert_eq!(empty.try_spawn(&mut harness.ctx()), SpawnOutcome::NoTemplate);
        assert_eq!(empty.live_count(), 0);
    }

    #[test]
    fn test_variants_are_all_used() {
        let mut harness = Harness::new();
        let mut spawner = PopulationSpawner::new(PoolKind::Stars, &pool(64, 64), Placement::Inside, 1.0);
        spawner.start(&mut harness.ctx());

        let templates: Vec<_> = harness.world.iter().map(|(_, record)| record.template.clone()).collect();
        assert!(templates.iter().any(|t| t == "rock_a"));
        assert!(templates.iter().any(|t| t == "rock_b"));
    }

    #[test]
    fn test_live_count_never_exceeds_max() {
        let mut harness = Harness::new();
        let mut spawner = PopulationSpawner::new(PoolKind::Asteroids, &pool(4, 2), Placement::Edge, 1.0);
        spawner.start(&mut harness.ctx());
        let mut ops = StdRng::seed_from_u64(99);

        for _ in 0..300 {
            if ops.gen_bool(0.6) {
                spawner.try_spawn(&mut harness.ctx());
            } else {
                let live = harness.world.handles_of_kind(EntityKind::Asteroid);
                if !live.is_empty() {
                    let victim = live[ops.gen_range(0..live.len())];
                    if let Some(destroyed) = harness.world.destroy(victim, DestroyCause::OffScreen) {
                        spawner.on_destroyed(&destroyed);
                    }
                }
            }
            assert!(spawner.live_count() <= spawner.pool().max_count);
            assert_eq!(spawner.live_count(), harness.world.count_of_kind(EntityKind::Asteroid));
        }
    }

    #[test]
    fn test_motion_is_applied() {
        let mut harness = Harness::new();
        let spawner_config = GameConfig::default();
        let mut spawner = PopulationSpawner::asteroids(&spawner_config);
        let SpawnOutcome::Spawned(handle) = spawner.try_spawn(&mut harness.ctx()) else {
            panic!("expected a spawn");
        };
        let record = harness.world.get(handle).unwrap();
        assert!((record.movement.velocity.norm() - 2.0).abs() < 1e-4);
        assert!((record.movement.angular_velocity - 50.0).abs() < f32::EPSILON);
        assert!(record.lifetime.is_none());
        assert!(!harness.bounds.contains(record.transform.position, 0.5));
    }
}
