//! Notification channel.
//!
//! A synchronous fire/bind event loop. Collaborators and external code
//! observe grid lifecycle events (`Draw`, `DecoratorDestroy`, model
//! changes, synthesized drag events) through it; dispatch is synchronous
//! and reaches every subscriber bound at fire time.

use crate::view::decorators::DecoratorId;
use crate::view::mouse::GridMouseEvent;

/// What happened to a set of row/column descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeAction {
    Add,
    Remove,
    Hide,
    Show,
    Resize,
}

/// A named grid event with its payload.
#[derive(Debug, Clone, PartialEq)]
pub enum GridEvent {
    /// A draw pass completed.
    Draw,
    /// The grid was destroyed.
    Destroy,
    /// A decorator was torn down and detached.
    DecoratorDestroy { decorator: DecoratorId },
    /// Row descriptors changed.
    RowChange {
        action: ChangeAction,
        indices: Vec<usize>,
    },
    /// Column descriptors changed.
    ColChange {
        action: ChangeAction,
        indices: Vec<usize>,
    },
    /// A drag gesture started (first move after a press).
    DragStart(GridMouseEvent),
    /// The pointer moved during a drag.
    Drag(GridMouseEvent),
    /// The drag crossed into a different cell.
    CellDrag(GridMouseEvent),
    /// The drag ended (release).
    DragEnd(GridMouseEvent),
}

/// Token returned by [`EventLoop::bind`]; pass to
/// [`EventLoop::unbind`] to remove the subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription(usize);

type Handler = Box<dyn FnMut(&GridEvent)>;

/// Synchronous fire/bind dispatch.
#[derive(Default)]
pub struct EventLoop {
    handlers: Vec<Option<Handler>>,
}

impl EventLoop {
    /// Create an empty loop.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to all events. Handlers filter on the variants they
    /// care about.
    pub fn bind(&mut self, handler: impl FnMut(&GridEvent) + 'static) -> Subscription {
        self.handlers.push(Some(Box::new(handler)));
        Subscription(self.handlers.len() - 1)
    }

    /// Remove a subscription. Unknown tokens are a no-op.
    pub fn unbind(&mut self, subscription: Subscription) {
        if let Some(slot) = self.handlers.get_mut(subscription.0) {
            *slot = None;
        }
    }

    /// Dispatch an event synchronously to every current subscriber.
    pub fn fire(&mut self, event: &GridEvent) {
        for slot in &mut self.handlers {
            if let Some(handler) = slot {
                handler(event);
            }
        }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.iter().filter(|h| h.is_some()).count()
    }

    /// Whether there are no live subscriptions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_fire_reaches_all_subscribers() {
        let mut events = EventLoop::new();
        let count = Rc::new(Cell::new(0));
        for _ in 0..3 {
            let count = Rc::clone(&count);
            events.bind(move |e| {
                if matches!(e, GridEvent::Draw) {
                    count.set(count.get() + 1);
                }
            });
        }
        events.fire(&GridEvent::Draw);
        events.fire(&GridEvent::Destroy);
        assert_eq!(count.get(), 3);
    }

    #[test]
    fn test_unbind_stops_delivery() {
        let mut events = EventLoop::new();
        let count = Rc::new(Cell::new(0));
        let sub = {
            let count = Rc::clone(&count);
            events.bind(move |_| count.set(count.get() + 1))
        };
        events.fire(&GridEvent::Draw);
        events.unbind(sub);
        events.fire(&GridEvent::Draw);
        assert_eq!(count.get(), 1);
        assert!(events.is_empty());
    }
}
