//! Capability trait the command dispatcher uses to touch the world.
//!
//! The dispatcher never talks to the engine directly; everything it can do
//! to a world goes through `HostWorld`. Tests substitute their own worlds,
//! and the engine stays free of any protocol knowledge.

use rustberry_engine::world::World;
use rustberry_engine::world::block::BlockState;
use rustberry_engine::world::position::{BlockPos, Vec3};

/// Stable integer identity of an entity, as exposed on the wire.
pub type ActorId = i32;

/// Everything a command handler may do to the host world.
pub trait HostWorld: Send + Sync {
    fn get_block(&self, pos: BlockPos) -> BlockState;
    fn set_block(&self, pos: BlockPos, state: BlockState);

    /// Connected player ids in join order.
    fn player_ids(&self) -> Vec<ActorId>;
    /// Player id by exact name match.
    fn resolve_player(&self, name: &str) -> Option<ActorId>;
    /// The earliest-joined player, target of the `player.*` namespace.
    fn first_player(&self) -> Option<ActorId>;

    fn has_entity(&self, id: ActorId) -> bool;
    fn position(&self, id: ActorId) -> Option<Vec3>;
    fn set_position(&self, id: ActorId, pos: Vec3);
    /// (yaw, pitch) in degrees.
    fn rotation(&self, id: ActorId) -> Option<(f32, f32)>;
    fn set_rotation(&self, id: ActorId, yaw: f32, pitch: f32);
    fn entity_name(&self, id: ActorId) -> Option<String>;

    fn broadcast_chat(&self, message: &str);
}

impl HostWorld for World {
    fn get_block(&self, pos: BlockPos) -> BlockState {
        World::get_block(self, pos)
    }

    fn set_block(&self, pos: BlockPos, state: BlockState) {
        World::set_block(self, pos, state)
    }

    fn player_ids(&self) -> Vec<ActorId> {
        self.entities().player_ids()
    }

    fn resolve_player(&self, name: &str) -> Option<ActorId> {
        self.entities().find_player(name)
    }

    fn first_player(&self) -> Option<ActorId> {
        self.entities().first_player()
    }

    fn has_entity(&self, id: ActorId) -> bool {
        self.entities().contains(id)
    }

    fn position(&self, id: ActorId) -> Option<Vec3> {
        self.entities().get(id).map(|e| e.pos)
    }

    fn set_position(&self, id: ActorId, pos: Vec3) {
        self.entities().set_position(id, pos)
    }

    fn rotation(&self, id: ActorId) -> Option<(f32, f32)> {
        self.entities().get(id).map(|e| (e.yaw, e.pitch))
    }

    fn set_rotation(&self, id: ActorId, yaw: f32, pitch: f32) {
        self.entities().set_rotation(id, yaw, pitch)
    }

    fn entity_name(&self, id: ActorId) -> Option<String> {
        self.entities().get(id).map(|e| e.name)
    }

    fn broadcast_chat(&self, message: &str) {
        World::broadcast_chat(self, message)
    }
}
