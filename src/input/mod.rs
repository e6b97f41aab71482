//! Adapters turning raw egui input into scale intents.

mod keyboard;
mod wheel;

pub use keyboard::KeyboardAdapter;
pub use wheel::WheelAdapter;
