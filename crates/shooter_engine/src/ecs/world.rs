//! ECS World implementation

use std::fmt::Debug;

use log::{debug, trace};
use slotmap::SlotMap;

use super::components::{DestroyCause, Lifetime};
use super::entity::{EntityHandle, EntityRecord, EntitySpec, OwnerTag};
use crate::foundation::math::Vec2;

/// Record produced exactly once when an entity leaves the world
#[derive(Debug, Clone, PartialEq)]
pub struct DestroyedEntity<K> {
    /// Handle the entity had
    pub handle: EntityHandle,
    /// Kind of the entity
    pub kind: K,
    /// Owning pool tag, if any
    pub owner: Option<OwnerTag>,
    /// Why it was removed
    pub cause: DestroyCause,
    /// Last position
    pub position: Vec2,
}

/// World containing all live entities
#[derive(Debug)]
pub struct World<K> {
    entities: SlotMap<EntityHandle, EntityRecord<K>>,
    now: f32,
}

impl<K: Copy + Eq + Debug> World<K> {
    /// Create an empty world at time zero
    pub fn new() -> Self {
        Self {
            entities: SlotMap::with_key(),
            now: 0.0,
        }
    }

    /// World time in seconds
    pub fn now(&self) -> f32 {
        self.now
    }

    /// Create an entity from a spawn description
    pub fn spawn(&mut self, spec: EntitySpec<K>) -> EntityHandle {
        let lifetime = spec.lifetime.map(|duration| Lifetime::new(self.now, duration));
        let record = EntityRecord {
            kind: spec.kind,
            template: spec.template,
            transform: spec.transform,
            movement: spec.movement,
            lifetime,
            owner: spec.owner,
        };
        let kind = record.kind;
        let position = record.transform.position;
        let handle = self.entities.insert(record);
        trace!("Spawned {:?} {:?} at ({:.2}, {:.2})", kind, handle, position.x, position.y);
        handle
    }

    /// Remove an entity. Returns `None` if it was already removed.
    pub fn destroy(&mut self, handle: EntityHandle, cause: DestroyCause) -> Option<DestroyedEntity<K>> {
        let record = self.entities.remove(handle)?;
        trace!("Destroyed {:?} {:?} ({:?})", record.kind, handle, cause);
        Some(DestroyedEntity {
            handle,
            kind: record.kind,
            owner: record.owner,
            cause,
            position: record.transform.position,
        })
    }

    /// Advance time, integrate movement and remove expired entities.
    ///
    /// Returns the entities whose lifetime ran out during this tick.
    pub fn tick(&mut self, delta_time: f32) -> Vec<DestroyedEntity<K>> {
        let delta_time = delta_time.max(0.0);
        self.now += delta_time;

        for record in self.entities.values_mut() {
            if record.movement.is_still() {
                continue;
            }
            record.transform.position += record.movement.velocity * delta_time;
            record.transform.rotate(record.movement.angular_velocity * delta_time);
        }

        let now = self.now;
        let expired: Vec<EntityHandle> = self
            .entities
            .iter()
            .filter(|(_, record)| record.lifetime.is_some_and(|lifetime| lifetime.is_expired(now)))
            .map(|(handle, _)| handle)
            .collect();

        expired
            .into_iter()
            .filter_map(|handle| self.destroy(handle, DestroyCause::Expired))
            .collect()
    }

    /// Remove every entity with the given cause
    pub fn clear(&mut self, cause: DestroyCause) -> Vec<DestroyedEntity<K>> {
        let handles: Vec<EntityHandle> = self.entities.keys().collect();
        let removed: Vec<_> = handles
            .into_iter()
            .filter_map(|handle| self.destroy(handle, cause))
            .collect();
        if !removed.is_empty() {
            debug!("Cleared {} entities ({:?})", removed.len(), cause);
        }
        removed
    }

    /// Get an entity
    pub fn get(&self, handle: EntityHandle) -> Option<&EntityRecord<K>> {
        self.entities.get(handle)
    }

    /// Get an entity mutably
    pub fn get_mut(&mut self, handle: EntityHandle) -> Option<&mut EntityRecord<K>> {
        self.entities.get_mut(handle)
    }

    /// Whether the entity is still alive
    pub fn contains(&self, handle: EntityHandle) -> bool {
        self.entities.contains_key(handle)
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the world has no entities
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Iterate over all live entities
    pub fn iter(&self) -> impl Iterator<Item = (EntityHandle, &EntityRecord<K>)> {
        self.entities.iter()
    }

    /// Handles of every live entity of `kind`
    pub fn handles_of_kind(&self, kind: K) -> Vec<EntityHandle> {
        self.entities
            .iter()
            .filter(|(_, record)| record.kind == kind)
            .map(|(handle, _)| handle)
            .collect()
    }

    /// Number of live entities of `kind`
    pub fn count_of_kind(&self, kind: K) -> usize {
        self.entities.values().filter(|record| record.kind == kind).count()
    }
}

impl<K: Copy + Eq + Debug> Default for World<K> {
    fn default() -> Self {
        Self::new()
    }
}
