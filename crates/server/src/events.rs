//! Shared event queues for the polling API.
//!
//! Gameplay reports block hits and chat posts here; clients poll them with
//! `events.block.hits()` and friends. Every read is destructive -- whichever
//! session asks first gets the events, and an actor-filtered read removes
//! only that actor's entries, leaving the rest for other pollers.

use std::mem;
use std::sync::Mutex;

use rustberry_engine::world::position::{BlockFace, BlockPos};

use crate::host::ActorId;

/// A right-click on a block, reported with the face that was struck.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockHit {
    pub actor: ActorId,
    pub pos: BlockPos,
    pub face: BlockFace,
}

impl BlockHit {
    /// Wire form: `x,y,z,faceId,actorId`.
    pub fn serialize(&self) -> String {
        format!(
            "{},{},{},{},{}",
            self.pos.x,
            self.pos.y,
            self.pos.z,
            self.face.id(),
            self.actor
        )
    }
}

/// A chat message, attributed to the actor that posted it.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatPost {
    pub actor: ActorId,
    pub message: String,
}

impl ChatPost {
    /// Wire form: `actorId, message` -- the space after the comma is part of
    /// the format and consumers strip it.
    pub fn serialize(&self) -> String {
        format!("{}, {}", self.actor, self.message)
    }
}

/// The two event collections, each behind its own brief mutex.
///
/// Reads take everything they return out of the collection under a single
/// lock acquisition, so two concurrent pollers can never see the same event.
#[derive(Default)]
pub struct EventStore {
    block_hits: Mutex<Vec<BlockHit>>,
    chat_posts: Mutex<Vec<ChatPost>>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report_block_hit(&self, hit: BlockHit) {
        self.block_hits
            .lock()
            .expect("block hit queue poisoned")
            .push(hit);
    }

    pub fn report_chat_post(&self, post: ChatPost) {
        self.chat_posts
            .lock()
            .expect("chat post queue poisoned")
            .push(post);
    }

    /// Remove and return every block hit, in report order.
    pub fn take_block_hits(&self) -> Vec<BlockHit> {
        mem::take(&mut *self.block_hits.lock().expect("block hit queue poisoned"))
    }

    /// Remove and return every chat post, in report order.
    pub fn take_chat_posts(&self) -> Vec<ChatPost> {
        mem::take(&mut *self.chat_posts.lock().expect("chat post queue poisoned"))
    }

    /// Remove and return this actor's block hits; other actors' stay queued.
    pub fn take_block_hits_for(&self, actor: ActorId) -> Vec<BlockHit> {
        let mut queue = self.block_hits.lock().expect("block hit queue poisoned");
        let mut taken = Vec::new();
        queue.retain(|hit| {
            if hit.actor == actor {
                taken.push(hit.clone());
                false
            } else {
                true
            }
        });
        taken
    }

    /// Remove and return this actor's chat posts; other actors' stay queued.
    pub fn take_chat_posts_for(&self, actor: ActorId) -> Vec<ChatPost> {
        let mut queue = self.chat_posts.lock().expect("chat post queue poisoned");
        let mut taken = Vec::new();
        queue.retain(|post| {
            if post.actor == actor {
                taken.push(post.clone());
                false
            } else {
                true
            }
        });
        taken
    }

    /// Drop everything, both collections.
    pub fn clear(&self) {
        self.block_hits
            .lock()
            .expect("block hit queue poisoned")
            .clear();
        self.chat_posts
            .lock()
            .expect("chat post queue poisoned")
            .clear();
    }

    /// Drop one actor's entries from both collections.
    pub fn clear_for(&self, actor: ActorId) {
        self.block_hits
            .lock()
            .expect("block hit queue poisoned")
            .retain(|hit| hit.actor != actor);
        self.chat_posts
            .lock()
            .expect("chat post queue poisoned")
            .retain(|post| post.actor != actor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(actor: ActorId, x: i32) -> BlockHit {
        BlockHit {
            actor,
            pos: BlockPos::new(x, 0, 0),
            face: BlockFace::Up,
        }
    }

    #[test]
    fn block_hit_wire_form() {
        let hit = BlockHit {
            actor: 7,
            pos: BlockPos::new(1, -2, 3),
            face: BlockFace::West,
        };
        assert_eq!(hit.serialize(), "1,-2,3,4,7");
    }

    #[test]
    fn chat_post_wire_form_keeps_the_space() {
        let post = ChatPost {
            actor: 3,
            message: "hello, world".to_owned(),
        };
        assert_eq!(post.serialize(), "3, hello, world");
    }

    #[test]
    fn global_take_is_destructive_and_ordered() {
        let store = EventStore::new();
        store.report_block_hit(hit(1, 10));
        store.report_block_hit(hit(2, 20));
        let taken = store.take_block_hits();
        assert_eq!(taken.len(), 2);
        assert_eq!(taken[0].pos.x, 10);
        assert_eq!(taken[1].pos.x, 20);
        assert!(store.take_block_hits().is_empty());
    }

    #[test]
    fn filtered_take_leaves_other_actors_queued() {
        let store = EventStore::new();
        store.report_block_hit(hit(1, 10));
        store.report_block_hit(hit(2, 20));
        store.report_block_hit(hit(1, 30));

        let mine = store.take_block_hits_for(1);
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].pos.x, 10);
        assert_eq!(mine[1].pos.x, 30);

        let rest = store.take_block_hits();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].actor, 2);
    }

    #[test]
    fn clear_for_touches_only_one_actor() {
        let store = EventStore::new();
        store.report_block_hit(hit(1, 10));
        store.report_block_hit(hit(2, 20));
        store.report_chat_post(ChatPost {
            actor: 1,
            message: "hi".to_owned(),
        });
        store.clear_for(1);
        assert_eq!(store.take_block_hits().len(), 1);
        assert!(store.take_chat_posts().is_empty());
    }

    #[test]
    fn clear_empties_both_collections() {
        let store = EventStore::new();
        store.report_block_hit(hit(1, 10));
        store.report_chat_post(ChatPost {
            actor: 1,
            message: "hi".to_owned(),
        });
        store.clear();
        assert!(store.take_block_hits().is_empty());
        assert!(store.take_chat_posts().is_empty());
    }
}
