//! Runtime-tunable server settings.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Default cap on commands drained per session per tick.
pub const DEFAULT_MAX_COMMANDS_PER_TICK: usize = 9000;

/// Settings read every tick and mutable while the server runs. A change
/// takes effect on the next tick.
pub struct Settings {
    max_commands_per_tick: AtomicUsize,
}

impl Settings {
    pub fn new(max_commands_per_tick: usize) -> Self {
        Self {
            max_commands_per_tick: AtomicUsize::new(max_commands_per_tick),
        }
    }

    pub fn max_commands_per_tick(&self) -> usize {
        self.max_commands_per_tick.load(Ordering::Relaxed)
    }

    pub fn set_max_commands_per_tick(&self, limit: usize) {
        self.max_commands_per_tick.store(limit, Ordering::Relaxed);
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_COMMANDS_PER_TICK)
    }
}
