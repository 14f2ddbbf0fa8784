//! Environment access behind a small trait so the override and verification
//! routines can run against the real process environment or an in-memory map.

use std::collections::BTreeMap;

/// Read/write view over a set of environment variables.
pub trait EnvStore {
    fn get(&self, name: &str) -> Option<String>;
    fn set(&mut self, name: &str, value: &str);
    fn remove(&mut self, name: &str);
}

/// The current process environment.
///
/// Writes are visible to the rest of the process and to any child spawned
/// afterwards. They are lost when the process exits.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvStore for ProcessEnv {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn set(&mut self, name: &str, value: &str) {
        std::env::set_var(name, value);
    }

    fn remove(&mut self, name: &str) {
        std::env::remove_var(name);
    }
}

/// In-memory environment, starts empty.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemoryEnv {
    vars: BTreeMap<String, String>,
}

impl MemoryEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_var(mut self, name: &str, value: &str) -> Self {
        self.set(name, value);
        self
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl EnvStore for MemoryEnv {
    fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }

    fn set(&mut self, name: &str, value: &str) {
        self.vars.insert(name.to_string(), value.to_string());
    }

    fn remove(&mut self, name: &str) {
        self.vars.remove(name);
    }
}
