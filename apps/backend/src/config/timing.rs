//! Timer durations for the room: pause-before-bot-substitution and undo
//! expiry. Both are announced in the corresponding events so client
//! countdowns always match the server.

use std::env;

#[derive(Debug, Clone, Copy)]
pub struct TimingConfig {
    pub pause_timeout_secs: u64,
    pub undo_timeout_secs: u64,
}

impl TimingConfig {
    pub const DEFAULT_PAUSE_SECS: u64 = 60;
    pub const DEFAULT_UNDO_SECS: u64 = 30;

    /// Read overrides from `ROOM_PAUSE_TIMEOUT_SECS` / `ROOM_UNDO_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        Self {
            pause_timeout_secs: read_secs("ROOM_PAUSE_TIMEOUT_SECS", Self::DEFAULT_PAUSE_SECS),
            undo_timeout_secs: read_secs("ROOM_UNDO_TIMEOUT_SECS", Self::DEFAULT_UNDO_SECS),
        }
    }

    pub fn pause_std(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.pause_timeout_secs)
    }

    pub fn pause_time(&self) -> time::Duration {
        time::Duration::seconds(self.pause_timeout_secs as i64)
    }

    pub fn undo_std(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.undo_timeout_secs)
    }

    pub fn undo_time(&self) -> time::Duration {
        time::Duration::seconds(self.undo_timeout_secs as i64)
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            pause_timeout_secs: Self::DEFAULT_PAUSE_SECS,
            undo_timeout_secs: Self::DEFAULT_UNDO_SECS,
        }
    }
}

fn read_secs(var: &str, default: u64) -> u64 {
    env::var(var)
        .ok()
        .and_then(|v| v.parse().ok())
        .filter(|&v| v > 0)
        .unwrap_or(default)
}
