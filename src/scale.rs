use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    rc::Rc,
};

use tracing::trace;

use crate::{
    bounds::{FontBounds, Outcome},
    events::{Event, EventSink},
    settings::SettingsBounds,
};

/// Identifies a subscription made with [`FontScale::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
struct Subscribers {
    next_id: u64,
    sinks: Vec<(SubscriptionId, Rc<dyn EventSink>)>,
}

#[derive(Default)]
struct Dispatch {
    pending: RefCell<VecDeque<Event>>,
    running: Cell<bool>,
}

/// Resets the dispatch flag even if a sink panics.
struct RunningGuard<'a>(&'a Cell<bool>);

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

struct Shared {
    bounds: RefCell<FontBounds>,
    subscribers: RefCell<Subscribers>,
    dispatch: Dispatch,
}

/// Shared, observable font size.
///
/// Cloning yields another handle to the same value, every scene binder and
/// controller of a session holds one. All access happens on the thread that
/// owns the scenes.
///
/// Subscribers are called synchronously after a setter settled. They may read
/// or write the scale again: events raised meanwhile are queued and delivered,
/// in order, once the current event reached every subscriber.
#[derive(Clone)]
pub struct FontScale {
    shared: Rc<Shared>,
}

impl Default for FontScale {
    fn default() -> Self {
        Self::from_bounds(FontBounds::default())
    }
}

impl std::fmt::Debug for FontScale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontScale")
            .field("bounds", &*self.shared.bounds.borrow())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl FontScale {
    pub fn new(settings: &SettingsBounds) -> Self {
        Self::from_bounds(FontBounds::from_settings(settings))
    }

    pub fn from_bounds(bounds: FontBounds) -> Self {
        Self {
            shared: Rc::new(Shared {
                bounds: RefCell::new(bounds),
                subscribers: RefCell::default(),
                dispatch: Dispatch::default(),
            }),
        }
    }

    /// Snapshot of all four attributes.
    pub fn bounds(&self) -> FontBounds {
        *self.shared.bounds.borrow()
    }

    pub fn minimum(&self) -> i32 {
        self.bounds().minimum()
    }

    pub fn maximum(&self) -> i32 {
        self.bounds().maximum()
    }

    pub fn default_size(&self) -> i32 {
        self.bounds().default_size()
    }

    pub fn current(&self) -> i32 {
        self.bounds().current()
    }

    pub fn set_minimum(&self, value: i32) -> Outcome {
        self.update(|b| b.set_minimum(value))
    }

    pub fn set_maximum(&self, value: i32) -> Outcome {
        self.update(|b| b.set_maximum(value))
    }

    pub fn set_default(&self, value: i32) -> Outcome {
        self.update(|b| b.set_default(value))
    }

    pub fn set_current(&self, value: i32) -> Outcome {
        self.update(|b| b.set_current(value))
    }

    pub fn subscribe(&self, sink: impl EventSink + 'static) -> SubscriptionId {
        let sink: Rc<dyn EventSink> = Rc::new(sink);
        let mut subs = self.shared.subscribers.borrow_mut();
        let id = SubscriptionId(subs.next_id);
        subs.next_id += 1;
        subs.sinks.push((id, sink));
        id
    }

    /// Returns `false` if `id` was not subscribed. A sink removed while an
    /// event is being delivered still receives that event.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subs = self.shared.subscribers.borrow_mut();
        let before = subs.sinks.len();
        subs.sinks.retain(|(sid, _)| *sid != id);
        subs.sinks.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.shared.subscribers.borrow().sinks.len()
    }

    /// Whether both handles point to the same scale.
    pub fn ptr_eq(&self, other: &FontScale) -> bool {
        Rc::ptr_eq(&self.shared, &other.shared)
    }

    fn update(&self, f: impl FnOnce(&mut FontBounds) -> Outcome) -> Outcome {
        let outcome = f(&mut *self.shared.bounds.borrow_mut());
        self.publish(outcome.changes.iter().map(|&c| Event::from(c)));
        outcome
    }

    fn publish(&self, events: impl IntoIterator<Item = Event>) {
        let dispatch = &self.shared.dispatch;
        dispatch.pending.borrow_mut().extend(events);
        if dispatch.running.replace(true) {
            return;
        }
        let _guard = RunningGuard(&dispatch.running);

        loop {
            let Some(event) = dispatch.pending.borrow_mut().pop_front() else {
                break;
            };
            let sinks: Vec<_> = self
                .shared
                .subscribers
                .borrow()
                .sinks
                .iter()
                .map(|(_, sink)| Rc::clone(sink))
                .collect();

            trace!(?event, subscribers = sinks.len(), "dispatching scale event");
            for sink in sinks {
                sink.send(event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::PayloadValueChange;

    fn recorder(scale: &FontScale) -> Rc<RefCell<Vec<Event>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        scale.subscribe(move |e: Event| sink.borrow_mut().push(e));
        seen
    }

    #[test]
    fn test_setter_publishes_settled_changes_once() {
        let scale = FontScale::default();
        let seen = recorder(&scale);

        scale.set_minimum(20);

        assert_eq!(
            *seen.borrow(),
            vec![
                Event::MinimumChanged(PayloadValueChange { old: 6, new: 20 }),
                Event::CurrentChanged(PayloadValueChange { old: 12, new: 20 }),
            ]
        );
    }

    #[test]
    fn test_rejected_write_is_silent() {
        let scale = FontScale::default();
        let seen = recorder(&scale);

        assert!(scale.set_maximum(2).is_rejected());
        scale.set_current(12);

        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_clones_share_state() {
        let scale = FontScale::default();
        let other = scale.clone();
        other.set_current(30);
        assert_eq!(scale.current(), 30);
        assert!(scale.ptr_eq(&other));
        assert!(!scale.ptr_eq(&FontScale::default()));
    }

    #[test]
    fn test_unsubscribe() {
        let scale = FontScale::default();
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        let id = scale.subscribe(move |_: Event| c.set(c.get() + 1));

        scale.set_current(13);
        assert!(scale.unsubscribe(id));
        assert!(!scale.unsubscribe(id));
        scale.set_current(14);

        assert_eq!(count.get(), 1);
        assert_eq!(scale.subscriber_count(), 0);
    }

    #[test]
    fn test_reentrant_write_is_queued() {
        let scale = FontScale::default();
        let inner = scale.clone();
        // Keeps the size even: any odd size is bumped by one.
        scale.subscribe(move |e: Event| {
            if let Event::CurrentChanged(p) = e {
                if p.new % 2 == 1 {
                    inner.set_current(p.new + 1);
                }
            }
        });
        let seen = recorder(&scale);

        scale.set_current(13);

        assert_eq!(scale.current(), 14);
        assert_eq!(
            *seen.borrow(),
            vec![
                Event::CurrentChanged(PayloadValueChange { old: 12, new: 13 }),
                Event::CurrentChanged(PayloadValueChange { old: 13, new: 14 }),
            ]
        );
    }

    #[test]
    fn test_subscriber_reads_settled_state() {
        let scale = FontScale::default();
        let reader = scale.clone();
        let observed = Rc::new(Cell::new((0, 0)));
        let o = Rc::clone(&observed);
        scale.subscribe(move |_: Event| o.set((reader.minimum(), reader.current())));

        scale.set_minimum(25);

        assert_eq!(observed.get(), (25, 25));
    }
}
