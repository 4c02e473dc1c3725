pub mod block;
pub mod position;

use crate::entity::EntityRegistry;
use block::BlockState;
use dashmap::DashMap;
use position::BlockPos;
use std::sync::Mutex;
use tracing::info;

/// The host world: sparse block lattice plus the entities that live in it.
///
/// Thread-safe throughout -- blocks are lock-sharded by `DashMap`, entities
/// sit behind their own registry lock, and chat history behind a short-lived
/// mutex. No method holds a lock across anything blocking.
pub struct World {
    blocks: DashMap<BlockPos, BlockState>,
    entities: EntityRegistry,
    chat: Mutex<Vec<String>>,
}

impl World {
    pub fn new() -> Self {
        Self {
            blocks: DashMap::new(),
            entities: EntityRegistry::new(),
            chat: Mutex::new(Vec::new()),
        }
    }

    /// Read a block at an absolute position. Unset cells are AIR.
    pub fn get_block(&self, pos: BlockPos) -> BlockState {
        match self.blocks.get(&pos) {
            Some(state) => *state,
            None => BlockState::AIR,
        }
    }

    /// Write a block at an absolute position.
    ///
    /// Takes `&self` (not `&mut self`) because `DashMap` provides interior
    /// mutability via per-shard locking. AIR removes the cell so storage
    /// stays proportional to the non-empty world.
    pub fn set_block(&self, pos: BlockPos, state: BlockState) {
        if state == BlockState::AIR {
            self.blocks.remove(&pos);
        } else {
            self.blocks.insert(pos, state);
        }
    }

    /// Number of non-air cells currently stored.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn entities(&self) -> &EntityRegistry {
        &self.entities
    }

    /// Deliver a chat message to everyone in the world.
    pub fn broadcast_chat(&self, message: &str) {
        info!(text = message, "chat broadcast");
        self.chat
            .lock()
            .expect("chat history poisoned")
            .push(message.to_owned());
    }

    /// Every message broadcast so far, in order.
    pub fn chat_history(&self) -> Vec<String> {
        self.chat.lock().expect("chat history poisoned").clone()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
