//! Minecraft Pi Edition API server.
//!
//! Serves the classic `name(args)` text protocol over TCP on port 4711.
//! Connections queue inbound lines; the simulation tick executes them in
//! bounded batches and replies flow back through per-session writer tasks.

pub mod block;
pub mod command;
pub mod events;
pub mod host;
pub mod net;
pub mod settings;
pub mod tick;
