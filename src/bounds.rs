use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    catalog::{CATALOG_MAX, CATALOG_MIN},
    settings::SettingsBounds,
};

/// One of the four coupled attributes of [`FontBounds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attribute {
    Minimum,
    Maximum,
    Default,
    Current,
}

/// A settled value change of a single attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    pub attribute: Attribute,
    pub old: i32,
    pub new: i32,
}

/// What happened to the value passed to a setter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    /// The attribute already held the requested value
    Unchanged,
    Accepted,
    /// The request was moved into range before it was stored
    Clamped { requested: i32 },
    /// The request was dropped and the attribute kept its previous value
    Rejected { requested: i32 },
}

/// Result of a single setter call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub resolution: Resolution,

    /// Every attribute that ended with a different value, the written one
    /// first and `Current` last. Intermediate corrections never show up here.
    pub changes: Vec<Change>,
}

impl Outcome {
    pub fn is_rejected(&self) -> bool {
        matches!(self.resolution, Resolution::Rejected { .. })
    }

    pub fn changed(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Settled change of `attribute`, if it changed.
    pub fn change_of(&self, attribute: Attribute) -> Option<Change> {
        self.changes.iter().copied().find(|c| c.attribute == attribute)
    }
}

/// Four mutually dependent font size attributes.
///
/// After every setter returns:
/// - `minimum <= maximum`,
/// - `minimum <= current <= maximum`,
/// - both bounds lie inside the style catalog range `[1, 99]`.
///
/// `default` is only checked by its own setter. It may sit above `maximum`
/// (the setter accepts upward overshoot) or below a `minimum` raised later,
/// scale-to-default then clamps through [`FontBounds::set_current`].
///
/// Deserialized values are repaired into a state that satisfies the bounds
/// above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredBounds")]
pub struct FontBounds {
    minimum: i32,
    maximum: i32,
    default: i32,
    current: i32,
}

impl Default for FontBounds {
    fn default() -> Self {
        let SettingsBounds {
            minimum,
            maximum,
            default,
        } = SettingsBounds::default();
        Self {
            minimum,
            maximum,
            default,
            current: default,
        }
    }
}

/// Serialized form of [`FontBounds`], accepted as is from any source.
///
/// Bounds are clamped into `[1, 99]`, an inverted maximum is raised to the
/// minimum and `current` is clamped into the result. `default` is kept.
#[derive(Debug, Clone, Copy, Deserialize)]
struct StoredBounds {
    minimum: i32,
    maximum: i32,
    default: i32,
    current: i32,
}

impl From<StoredBounds> for FontBounds {
    fn from(stored: StoredBounds) -> Self {
        let minimum = stored.minimum.clamp(CATALOG_MIN, CATALOG_MAX);
        let maximum = stored.maximum.clamp(minimum, CATALOG_MAX);
        let bounds = Self {
            minimum,
            maximum,
            default: stored.default,
            current: stored.current.clamp(minimum, maximum),
        };
        if (bounds.minimum, bounds.maximum, bounds.current)
            != (stored.minimum, stored.maximum, stored.current)
        {
            debug!(?stored, ?bounds, "stored font bounds repaired");
        }
        bounds
    }
}

impl FontBounds {
    /// Starts from the built-in values and applies `settings` through the
    /// setters, widening the range before narrowing it.
    pub fn from_settings(settings: &SettingsBounds) -> Self {
        let mut bounds = Self::default();
        if settings.maximum >= bounds.minimum {
            bounds.set_maximum(settings.maximum);
            bounds.set_minimum(settings.minimum);
        } else {
            bounds.set_minimum(settings.minimum);
            bounds.set_maximum(settings.maximum);
        }
        bounds.set_default(settings.default);
        bounds.set_current(bounds.default);
        bounds
    }

    pub fn minimum(&self) -> i32 {
        self.minimum
    }

    pub fn maximum(&self) -> i32 {
        self.maximum
    }

    pub fn default_size(&self) -> i32 {
        self.default
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn get(&self, attribute: Attribute) -> i32 {
        match attribute {
            Attribute::Minimum => self.minimum,
            Attribute::Maximum => self.maximum,
            Attribute::Default => self.default,
            Attribute::Current => self.current,
        }
    }

    /// Rejected when `value > maximum`, values below 1 are raised to 1.
    /// Pulls `current` up when it falls below the new minimum.
    pub fn set_minimum(&mut self, value: i32) -> Outcome {
        if value > self.maximum {
            return self.reject(Attribute::Minimum, value);
        }
        self.write(Attribute::Minimum, value, value.max(CATALOG_MIN))
    }

    /// Rejected when `value < minimum`, values above 99 are lowered to 99.
    /// Pulls `current` down when it lies above the new maximum.
    pub fn set_maximum(&mut self, value: i32) -> Outcome {
        if value < self.minimum {
            return self.reject(Attribute::Maximum, value);
        }
        self.write(Attribute::Maximum, value, value.min(CATALOG_MAX))
    }

    /// Rejected when `value < minimum`. Anything else is stored as is,
    /// including values above `maximum`.
    pub fn set_default(&mut self, value: i32) -> Outcome {
        if value < self.minimum {
            return self.reject(Attribute::Default, value);
        }
        self.write(Attribute::Default, value, value)
    }

    /// Never rejected, clamped into `[minimum, maximum]`.
    pub fn set_current(&mut self, value: i32) -> Outcome {
        self.write(
            Attribute::Current,
            value,
            value.clamp(self.minimum, self.maximum),
        )
    }

    fn reject(&self, attribute: Attribute, requested: i32) -> Outcome {
        debug!(
            ?attribute,
            requested,
            kept = self.get(attribute),
            "font size write rejected"
        );
        Outcome {
            resolution: Resolution::Rejected { requested },
            changes: Vec::new(),
        }
    }

    fn write(&mut self, attribute: Attribute, requested: i32, value: i32) -> Outcome {
        let before = *self;
        match attribute {
            Attribute::Minimum => self.minimum = value,
            Attribute::Maximum => self.maximum = value,
            Attribute::Default => self.default = value,
            Attribute::Current => self.current = value,
        }
        while self.normalize() {}

        let changes = self.diff(&before, attribute);
        let resolution = if value != requested {
            debug!(?attribute, requested, stored = value, "font size write clamped");
            Resolution::Clamped { requested }
        } else if changes.is_empty() {
            Resolution::Unchanged
        } else {
            Resolution::Accepted
        };

        Outcome {
            resolution,
            changes,
        }
    }

    /// One resolution step, returns `true` if it corrected anything. Bounds
    /// only push `current` toward the interior of the range, so repeating
    /// it reaches a fixpoint after at most one correction.
    fn normalize(&mut self) -> bool {
        debug_assert!(self.minimum <= self.maximum);
        let settled = self.current.clamp(self.minimum, self.maximum);
        let corrected = settled != self.current;
        self.current = settled;
        corrected
    }

    fn diff(&self, before: &FontBounds, written: Attribute) -> Vec<Change> {
        let rest = [
            Attribute::Minimum,
            Attribute::Maximum,
            Attribute::Default,
            Attribute::Current,
        ];
        std::iter::once(written)
            .chain(rest.into_iter().filter(|&a| a != written))
            .filter_map(|attribute| {
                let (old, new) = (before.get(attribute), self.get(attribute));
                (old != new).then_some(Change {
                    attribute,
                    old,
                    new,
                })
            })
            .collect()
    }
}
