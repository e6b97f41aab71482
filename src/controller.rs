use egui::Modifiers;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{
    input::{KeyboardAdapter, WheelAdapter},
    scale::FontScale,
    settings::{KeyBindings, SettingsInput},
};

/// Abstract scaling request produced by an input adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    ScaleUp,
    ScaleDown,
    ScaleToDefault,
}

/// Independent input pathway that can be switched on and off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    Wheel,
    Keyboard,
}

/// Trigger configuration used to enable a [`Channel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelConfig {
    /// Modifiers that must be held while scrolling
    Wheel(Modifiers),
    Keyboard(KeyBindings),
}

impl ChannelConfig {
    pub fn channel(&self) -> Channel {
        match self {
            ChannelConfig::Wheel(_) => Channel::Wheel,
            ChannelConfig::Keyboard(_) => Channel::Keyboard,
        }
    }
}

/// Entry point for scale intents.
///
/// The step operations check the bounds themselves, so a step at the edge of
/// the range never reaches the model.
#[derive(Debug, Clone)]
pub struct ScaleController {
    scale: FontScale,
    wheel: Option<WheelAdapter>,
    keyboard: Option<KeyboardAdapter>,
}

impl ScaleController {
    /// Controller with every channel disabled.
    pub fn new(scale: FontScale) -> Self {
        Self {
            scale,
            wheel: None,
            keyboard: None,
        }
    }

    pub fn with_input(mut self, input: &SettingsInput) -> Self {
        if let Some(modifiers) = input.wheel {
            self.enable_channel(ChannelConfig::Wheel(modifiers));
        }
        if let Some(bindings) = input.keyboard {
            self.enable_channel(ChannelConfig::Keyboard(bindings));
        }
        self
    }

    pub fn scale(&self) -> &FontScale {
        &self.scale
    }

    /// Returns `false` without touching the model when already at the maximum.
    pub fn scale_up(&self) -> bool {
        let bounds = self.scale.bounds();
        let next = bounds.current() + 1;
        if next > bounds.maximum() {
            return false;
        }
        self.scale.set_current(next);
        true
    }

    /// Returns `false` without touching the model when already at the minimum.
    pub fn scale_down(&self) -> bool {
        let bounds = self.scale.bounds();
        let next = bounds.current() - 1;
        if next < bounds.minimum() {
            return false;
        }
        self.scale.set_current(next);
        true
    }

    /// Requests the default size, the model clamps it into the current range.
    pub fn scale_to_default(&self) -> bool {
        self.scale.set_current(self.scale.default_size());
        true
    }

    /// Runs `intent` regardless of channel state.
    pub fn apply(&self, intent: Intent) -> bool {
        let issued = match intent {
            Intent::ScaleUp => self.scale_up(),
            Intent::ScaleDown => self.scale_down(),
            Intent::ScaleToDefault => self.scale_to_default(),
        };
        trace!(?intent, issued, size = self.scale.current(), "scale intent");
        issued
    }

    /// Runs `intent` if `channel` is enabled.
    pub fn dispatch(&self, channel: Channel, intent: Intent) -> bool {
        if !self.is_enabled(channel) {
            trace!(?channel, ?intent, "channel disabled, intent dropped");
            return false;
        }
        self.apply(intent)
    }

    /// Enables a channel, replacing its previous trigger configuration.
    pub fn enable_channel(&mut self, config: ChannelConfig) {
        match config {
            ChannelConfig::Wheel(modifiers) => self.wheel = Some(WheelAdapter::new(modifiers)),
            ChannelConfig::Keyboard(bindings) => {
                self.keyboard = Some(KeyboardAdapter::new(bindings));
            }
        }
    }

    /// Detaches a channel. The other channel is not affected.
    pub fn disable_channel(&mut self, channel: Channel) {
        match channel {
            Channel::Wheel => self.wheel = None,
            Channel::Keyboard => self.keyboard = None,
        }
    }

    pub fn is_enabled(&self, channel: Channel) -> bool {
        match channel {
            Channel::Wheel => self.wheel.is_some(),
            Channel::Keyboard => self.keyboard.is_some(),
        }
    }

    /// Feeds one egui event through the enabled adapters. Returns the intent
    /// if it reached the model, a step blocked at a bound yields `None`.
    pub fn handle_event(&self, event: &egui::Event) -> Option<Intent> {
        let (channel, intent) = self
            .wheel
            .and_then(|w| w.intent_for_event(event))
            .map(|intent| (Channel::Wheel, intent))
            .or_else(|| {
                self.keyboard
                    .and_then(|k| k.intent_for_event(event))
                    .map(|intent| (Channel::Keyboard, intent))
            })?;
        self.dispatch(channel, intent).then_some(intent)
    }

    /// Returns the number of intents that reached the model.
    pub fn handle_events(&self, events: &[egui::Event]) -> usize {
        events
            .iter()
            .filter_map(|event| self.handle_event(event))
            .count()
    }

    /// Processes the input of the current frame.
    pub fn ui(&self, ctx: &egui::Context) -> usize {
        ctx.input(|i| self.handle_events(&i.events))
    }
}
