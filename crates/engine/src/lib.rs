//! Minimal voxel world host.
//!
//! Provides the three things an API frontend needs from a world: sparse
//! block storage, an entity registry, and chat broadcast. Everything is
//! interior-mutable and safe to share behind an `Arc`.

pub mod entity;
pub mod world;
