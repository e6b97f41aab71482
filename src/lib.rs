//! Runtime text scaling for egui hosts.
//!
//! A [`FontScale`] holds a bounded font size. [`SceneStyleBinder`] keeps the
//! matching style class on the root node of every bound [`Scene`], and
//! [`ScaleController`] turns wheel and keyboard input into size steps.
//! [`TextScaling`] wires the three together.

mod binder;
mod bounds;
mod catalog;
mod controller;
mod error;
mod scale;
mod scaling;
mod scene;
mod settings;
mod stylesheet;

pub mod events;
pub mod input;

pub use self::binder::SceneStyleBinder;
pub use self::bounds::{Attribute, Change, FontBounds, Outcome, Resolution};
pub use self::catalog::{StyleCatalog, CATALOG_MAX, CATALOG_MIN, DEFAULT_CLASS_PREFIX};
pub use self::controller::{Channel, ChannelConfig, Intent, ScaleController};
pub use self::error::{Error, Result};
pub use self::scale::{FontScale, SubscriptionId};
pub use self::scaling::TextScaling;
pub use self::scene::{RootListener, Scene, SimpleScene, StyleClasses, StyledNode};
pub use self::settings::{
    KeyBindings, Settings, SettingsBounds, SettingsInput, SettingsStyle, StylesheetBacking,
};
pub use self::stylesheet::{StyleSource, Stylesheet};
