mod event;
mod sink;

pub use event::{Event, PayloadValueChange};

pub use sink::EventSink;
