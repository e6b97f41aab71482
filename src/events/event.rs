use serde::{Deserialize, Serialize};

use crate::bounds::{Attribute, Change};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PayloadValueChange {
    pub old: i32,
    pub new: i32,
}

/// Settled change of one font size attribute, published once per value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Event {
    CurrentChanged(PayloadValueChange),
    MinimumChanged(PayloadValueChange),
    MaximumChanged(PayloadValueChange),
    DefaultChanged(PayloadValueChange),
}

impl Event {
    pub fn attribute(&self) -> Attribute {
        match self {
            Event::CurrentChanged(_) => Attribute::Current,
            Event::MinimumChanged(_) => Attribute::Minimum,
            Event::MaximumChanged(_) => Attribute::Maximum,
            Event::DefaultChanged(_) => Attribute::Default,
        }
    }

    pub fn payload(&self) -> PayloadValueChange {
        match self {
            Event::CurrentChanged(p)
            | Event::MinimumChanged(p)
            | Event::MaximumChanged(p)
            | Event::DefaultChanged(p) => *p,
        }
    }
}

impl From<Change> for Event {
    fn from(change: Change) -> Self {
        let payload = PayloadValueChange {
            old: change.old,
            new: change.new,
        };
        match change.attribute {
            Attribute::Current => Event::CurrentChanged(payload),
            Attribute::Minimum => Event::MinimumChanged(payload),
            Attribute::Maximum => Event::MaximumChanged(payload),
            Attribute::Default => Event::DefaultChanged(payload),
        }
    }
}
