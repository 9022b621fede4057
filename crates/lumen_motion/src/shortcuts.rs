//! Global keyboard shortcuts
//!
//! Default bindings: Alt+Shift+A toggles every animation, Alt+Shift+P
//! pauses, Alt+Shift+R resumes.

use lumen_platform::{Key, KeyState, KeyboardEvent, Modifiers};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShortcutAction {
    ToggleAll,
    PauseAll,
    ResumeAll,
}

/// A key plus the exact modifier set that must be held
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortcut {
    pub key: Key,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl Shortcut {
    pub const fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    pub fn matches(&self, event: &KeyboardEvent) -> bool {
        event.state == KeyState::Pressed
            && event.key == self.key
            && event.modifiers == self.modifiers
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShortcutConfig {
    pub enabled: bool,
    pub toggle: Shortcut,
    pub pause: Shortcut,
    pub resume: Shortcut,
}

impl ShortcutConfig {
    /// Action bound to a key event, if any
    pub fn action_for(&self, event: &KeyboardEvent) -> Option<ShortcutAction> {
        if !self.enabled {
            return None;
        }
        [
            (self.toggle, ShortcutAction::ToggleAll),
            (self.pause, ShortcutAction::PauseAll),
            (self.resume, ShortcutAction::ResumeAll),
        ]
        .into_iter()
        .find(|(shortcut, _)| shortcut.matches(event))
        .map(|(_, action)| action)
    }
}

impl Default for ShortcutConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            toggle: Shortcut::new(Key::A, Modifiers::ALT_SHIFT),
            pause: Shortcut::new(Key::P, Modifiers::ALT_SHIFT),
            resume: Shortcut::new(Key::R, Modifiers::ALT_SHIFT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let config = ShortcutConfig::default();
        let press = |key| KeyboardEvent::pressed(key, Modifiers::ALT_SHIFT);

        assert_eq!(config.action_for(&press(Key::A)), Some(ShortcutAction::ToggleAll));
        assert_eq!(config.action_for(&press(Key::P)), Some(ShortcutAction::PauseAll));
        assert_eq!(config.action_for(&press(Key::R)), Some(ShortcutAction::ResumeAll));
        assert_eq!(config.action_for(&press(Key::Q)), None);
    }

    #[test]
    fn test_modifiers_must_match_exactly() {
        let config = ShortcutConfig::default();
        let alt_only = Modifiers {
            alt: true,
            ..Modifiers::NONE
        };
        assert_eq!(config.action_for(&KeyboardEvent::pressed(Key::A, alt_only)), None);
        assert_eq!(config.action_for(&KeyboardEvent::pressed(Key::A, Modifiers::NONE)), None);
    }

    #[test]
    fn test_release_and_disabled_are_ignored() {
        let mut config = ShortcutConfig::default();
        let release = KeyboardEvent {
            key: Key::A,
            state: KeyState::Released,
            modifiers: Modifiers::ALT_SHIFT,
        };
        assert_eq!(config.action_for(&release), None);

        config.enabled = false;
        assert_eq!(
            config.action_for(&KeyboardEvent::pressed(Key::A, Modifiers::ALT_SHIFT)),
            None
        );
    }
}
