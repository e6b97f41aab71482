use super::Event;

/// Receiver of scale events.
///
/// Implemented for closures `Fn(Event)` and, with the `events` feature, for
/// `crossbeam::channel::Sender<Event>`.
pub trait EventSink {
    fn send(&self, event: Event);
}

impl<F> EventSink for F
where
    F: Fn(Event),
{
    fn send(&self, event: Event) {
        self(event);
    }
}

#[cfg(feature = "events")]
impl EventSink for crossbeam::channel::Sender<Event> {
    fn send(&self, event: Event) {
        if crossbeam::channel::Sender::send(self, event).is_err() {
            tracing::trace!(?event, "event receiver disconnected");
        }
    }
}
