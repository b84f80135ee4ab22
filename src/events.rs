/// Typed event dispatch decoupling the booking core from whatever renders
/// it. Subscribers are plain closures invoked synchronously, in subscription
/// order, on the emitting thread.

pub struct EventBus<E> {
    subscribers: Vec<Box<dyn Fn(&E)>>,
}

impl<E> EventBus<E> {
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }

    pub fn subscribe<F: Fn(&E) + 'static>(&mut self, handler: F) {
        self.subscribers.push(Box::new(handler));
    }

    pub fn emit(&self, event: &E) {
        for handler in &self.subscribers {
            handler(event);
        }
    }
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Events the core emits toward the presentation layer.
#[derive(Clone, Debug, PartialEq)]
pub enum UiEvent {
    StationSelected(String),
    RouteSelected(String),
    BookingConfirmed(String),
    TicketUsed(String),
}
