//! Named scene registry

use std::collections::HashMap;

use log::{debug, error, info, warn};

use super::{SceneError, SceneKey};

/// Result of a successful scene load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneChange<K: SceneKey> {
    /// Scene that was active before the load
    pub from: Option<K>,
    /// Scene that is active now
    pub to: K,
    /// Whether the active scene was loaded again
    pub reload: bool,
}

impl<K: SceneKey> SceneChange<K> {
    /// Whether the change leaves `scene`, either to another scene or by reloading it
    pub fn leaves(&self, scene: K) -> bool {
        self.from == Some(scene) && (self.to != scene || self.reload)
    }

    /// Whether the change enters `scene`, including a reload of it
    pub fn enters(&self, scene: K) -> bool {
        self.to == scene && (self.from != Some(scene) || self.reload)
    }
}

/// Registry of named scenes with one active scene
#[derive(Debug)]
pub struct SceneManager<K: SceneKey> {
    scenes: HashMap<String, K>,
    active: Option<K>,
}

impl<K: SceneKey> SceneManager<K> {
    /// Create a manager with no scenes and nothing active
    pub fn new() -> Self {
        Self {
            scenes: HashMap::new(),
            active: None,
        }
    }

    /// Register a scene under `name`
    pub fn register(&mut self, name: impl Into<String>, key: K) {
        let name = name.into();
        if let Some(previous) = self.scenes.insert(name.clone(), key) {
            warn!(
                "Scene '{}' was already registered as {:?} and has been replaced by {:?}",
                name, previous, key
            );
        } else {
            debug!("Registered scene '{}' as {:?}", name, key);
        }
    }

    /// Whether a scene is registered under `name`
    pub fn is_registered(&self, name: &str) -> bool {
        self.scenes.contains_key(name)
    }

    /// Key registered under `name`
    pub fn key_for(&self, name: &str) -> Option<K> {
        self.scenes.get(name).copied()
    }

    /// Currently active scene
    pub fn active(&self) -> Option<K> {
        self.active
    }

    /// Make the scene registered under `name` active.
    ///
    /// On error the active scene is left untouched.
    pub fn load(&mut self, name: &str) -> Result<SceneChange<K>, SceneError> {
        if name.is_empty() {
            error!("Cannot load a scene with an empty name");
            return Err(SceneError::EmptyName);
        }
        let Some(to) = self.key_for(name) else {
            error!("Scene '{}' is not registered; staying in {:?}", name, self.active);
            return Err(SceneError::NotFound(name.to_string()));
        };

        let from = self.active.replace(to);
        let change = SceneChange {
            from,
            to,
            reload: from == Some(to),
        };
        info!("Loaded scene '{}' ({:?} -> {:?})", name, from, to);
        Ok(change)
    }

    /// Load the active scene again. Returns `None` when nothing is active.
    pub fn reload_active(&mut self) -> Option<SceneChange<K>> {
        let active = self.active?;
        info!("Reloading scene {:?}", active);
        Some(SceneChange {
            from: Some(active),
            to: active,
            reload: true,
        })
    }
}

impl<K: SceneKey> Default for SceneManager<K> {
    fn default() -> Self {
        Self::new()
    }
}
