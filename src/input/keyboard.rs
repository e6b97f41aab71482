use egui::{Key, Modifiers};

use crate::{controller::Intent, settings::KeyBindings};

/// Scales text with three keyboard shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyboardAdapter {
    bindings: KeyBindings,
}

impl KeyboardAdapter {
    pub fn new(bindings: KeyBindings) -> Self {
        Self { bindings }
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Intent of the first binding matching a pressed `key` with `held`
    /// modifiers, in up, down, default order.
    pub fn intent(&self, key: Key, held: Modifiers) -> Option<Intent> {
        [
            (self.bindings.scale_up, Intent::ScaleUp),
            (self.bindings.scale_down, Intent::ScaleDown),
            (self.bindings.scale_to_default, Intent::ScaleToDefault),
        ]
        .into_iter()
        .find(|(shortcut, _)| {
            shortcut.logical_key == key && held.matches_logically(shortcut.modifiers)
        })
        .map(|(_, intent)| intent)
    }

    /// Only key presses count, releases are ignored.
    pub fn intent_for_event(&self, event: &egui::Event) -> Option<Intent> {
        match event {
            egui::Event::Key {
                key,
                pressed: true,
                modifiers,
                ..
            } => self.intent(*key, *modifiers),
            _ => None,
        }
    }
}
