//! Root style hooks
//!
//! The equivalent of CSS custom properties set on the document root.
//! Passive consumers (anything that reads a duration or scroll behavior at
//! render time instead of running an animation) read these values, so a
//! preference change reaches them without any code of their own.

use rustc_hash::FxHashMap;

/// Custom-property style hooks (`--name` → value)
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleHooks {
    properties: FxHashMap<String, String>,
}

impl StyleHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a hook, returning the previous value
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> Option<String> {
        self.properties.insert(name.to_string(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    /// Read a hook as a number (e.g. `--motion-duration`)
    pub fn get_f32(&self, name: &str) -> Option<f32> {
        self.get(name).and_then(|v| v.trim_end_matches('s').parse().ok())
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.properties.remove(name)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn clear(&mut self) {
        self.properties.clear();
    }
}
