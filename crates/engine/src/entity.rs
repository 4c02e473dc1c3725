//! Shared entity registry.
//!
//! Tracks every entity in the world by a stable integer id. Players are
//! entities with the `player` flag set; API namespaces that operate on "the
//! player" resolve through `first_player`.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicI32, Ordering};

use crate::world::position::Vec3;

/// A live entity: position, look angles, and an optional player identity.
#[derive(Clone, Debug)]
pub struct Entity {
    pub id: i32,
    pub name: String,
    pub player: bool,
    pub pos: Vec3,
    pub yaw: f32,
    pub pitch: f32,
}

/// Thread-safe registry of all entities.
///
/// Uses `std::sync::RwLock` because every operation is brief (no awaits while
/// the lock is held) and the access pattern is read-heavy.
pub struct EntityRegistry {
    entities: RwLock<HashMap<i32, Entity>>,
    next_id: AtomicI32,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self {
            entities: RwLock::new(HashMap::new()),
            next_id: AtomicI32::new(1),
        }
    }

    /// Add an entity at the given position and return its id.
    pub fn spawn(&self, name: &str, player: bool, pos: Vec3) -> i32 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let entity = Entity {
            id,
            name: name.to_owned(),
            player,
            pos,
            yaw: 0.0,
            pitch: 0.0,
        };
        self.entities
            .write()
            .expect("entity registry poisoned")
            .insert(id, entity);
        id
    }

    /// Add a player entity at the given position and return its id.
    pub fn spawn_player(&self, name: &str, pos: Vec3) -> i32 {
        self.spawn(name, true, pos)
    }

    pub fn contains(&self, id: i32) -> bool {
        self.entities
            .read()
            .expect("entity registry poisoned")
            .contains_key(&id)
    }

    /// Snapshot of one entity, if present.
    pub fn get(&self, id: i32) -> Option<Entity> {
        self.entities
            .read()
            .expect("entity registry poisoned")
            .get(&id)
            .cloned()
    }

    pub fn set_position(&self, id: i32, pos: Vec3) {
        if let Some(entity) = self
            .entities
            .write()
            .expect("entity registry poisoned")
            .get_mut(&id)
        {
            entity.pos = pos;
        }
    }

    pub fn set_rotation(&self, id: i32, yaw: f32, pitch: f32) {
        if let Some(entity) = self
            .entities
            .write()
            .expect("entity registry poisoned")
            .get_mut(&id)
        {
            entity.yaw = yaw;
            entity.pitch = pitch;
        }
    }

    /// Ids of all player entities, in join order (ids are allocated
    /// monotonically, so sorting by id reproduces it).
    pub fn player_ids(&self) -> Vec<i32> {
        let mut ids: Vec<i32> = self
            .entities
            .read()
            .expect("entity registry poisoned")
            .values()
            .filter(|e| e.player)
            .map(|e| e.id)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// The player with the given name, if connected.
    pub fn find_player(&self, name: &str) -> Option<i32> {
        self.entities
            .read()
            .expect("entity registry poisoned")
            .values()
            .find(|e| e.player && e.name == name)
            .map(|e| e.id)
    }

    /// The earliest-joined player still present.
    pub fn first_player(&self) -> Option<i32> {
        self.player_ids().first().copied()
    }

    pub fn remove(&self, id: i32) {
        self.entities
            .write()
            .expect("entity registry poisoned")
            .remove(&id);
    }

    pub fn len(&self) -> usize {
        self.entities
            .read()
            .expect("entity registry poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}
