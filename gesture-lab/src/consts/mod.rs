use std::sync::atomic::{AtomicU64, Ordering};

pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const REPOSITORY_URL: &str = env!("CARGO_PKG_REPOSITORY");
pub const CONFIG_FILE: &str = "gesture-lab.toml";
pub const CONFIG_ENV: &str = "GESTURE_LAB_CONFIG";

// widget instance ids, a fresh id mounts a fresh widget
pub static GLOBAL_COUNTER: Counter = Counter::new();

pub struct Counter {
    value: AtomicU64,
}

impl Counter {
    pub const fn new() -> Counter {
        Self {
            value: AtomicU64::new(0),
        }
    }

    pub fn next(&self) -> u64 {
        self.value.fetch_add(1, Ordering::SeqCst)
    }
}

impl Default for Counter {
    fn default() -> Self {
        Self::new()
    }
}
