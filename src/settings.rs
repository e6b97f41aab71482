use std::path::PathBuf;

use egui::{Key, KeyboardShortcut, Modifiers};
use serde::{Deserialize, Serialize};

use crate::catalog::DEFAULT_CLASS_PREFIX;

/// Top level configuration of a [`crate::TextScaling`] session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub bounds: SettingsBounds,
    pub style: SettingsStyle,
    pub input: SettingsInput,
}

impl Settings {
    pub fn with_bounds(mut self, bounds: SettingsBounds) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_style(mut self, style: SettingsStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_input(mut self, input: SettingsInput) -> Self {
        self.input = input;
        self
    }
}

/// Starting values of the font size bounds.
///
/// Values are applied through the regular setters, so a bad combination is
/// clamped or rejected exactly like a runtime write would be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsBounds {
    /// Smallest reachable font size
    pub minimum: i32,

    /// Largest reachable font size
    pub maximum: i32,

    /// Size restored by scale-to-default, also the initial size
    pub default: i32,
}

impl Default for SettingsBounds {
    fn default() -> Self {
        Self {
            minimum: 6,
            maximum: 40,
            default: 12,
        }
    }
}

impl SettingsBounds {
    pub fn with_minimum(mut self, minimum: i32) -> Self {
        self.minimum = minimum;
        self
    }

    pub fn with_maximum(mut self, maximum: i32) -> Self {
        self.maximum = maximum;
        self
    }

    pub fn with_default(mut self, default: i32) -> Self {
        self.default = default;
        self
    }
}

/// Where the generated stylesheet lives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StylesheetBacking {
    /// Written once to a temporary `.css` file removed when the stylesheet is dropped
    #[default]
    TempFile,

    /// Handed to scenes as inline text, never touches the filesystem
    InMemory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsStyle {
    /// Prefix of every size class, the size is appended to it
    pub class_prefix: String,

    pub backing: StylesheetBacking,

    /// Directory for the temporary stylesheet file, system temp dir if `None`
    pub stylesheet_dir: Option<PathBuf>,
}

impl Default for SettingsStyle {
    fn default() -> Self {
        Self {
            class_prefix: DEFAULT_CLASS_PREFIX.to_string(),
            backing: StylesheetBacking::default(),
            stylesheet_dir: None,
        }
    }
}

impl SettingsStyle {
    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = prefix.into();
        self
    }

    pub fn with_backing(mut self, backing: StylesheetBacking) -> Self {
        self.backing = backing;
        self
    }

    pub fn with_stylesheet_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.stylesheet_dir = Some(dir.into());
        self
    }
}

/// Shortcuts recognized by the keyboard channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    pub scale_up: KeyboardShortcut,
    pub scale_down: KeyboardShortcut,
    pub scale_to_default: KeyboardShortcut,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            scale_up: KeyboardShortcut::new(Modifiers::COMMAND, Key::Plus),
            scale_down: KeyboardShortcut::new(Modifiers::COMMAND, Key::Minus),
            scale_to_default: KeyboardShortcut::new(Modifiers::COMMAND, Key::Num0),
        }
    }
}

/// Input channels enabled when a session starts. Both are off by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsInput {
    /// Modifiers that must be held for the wheel to scale text
    pub wheel: Option<Modifiers>,

    pub keyboard: Option<KeyBindings>,
}

impl SettingsInput {
    pub fn with_wheel(mut self, modifiers: Modifiers) -> Self {
        self.wheel = Some(modifiers);
        self
    }

    pub fn with_keyboard(mut self, bindings: KeyBindings) -> Self {
        self.keyboard = Some(bindings);
        self
    }
}
