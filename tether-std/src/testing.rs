//! Testing utilities for Tether.
//!
//! Delegates are single-threaded, so these helpers share state through
//! `Rc` rather than `Arc<Mutex<_>>`. Clones share the same log or count.
//!
//! # Features
//!
//! - [`Recorder`]: records every value it receives, in order
//! - [`Counter`]: counts invocations
//! - `EventLog` (with the `tracing` feature): captures `tracing` events

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

// ============================================================================
// Recorder
// ============================================================================

/// A shared call log.
///
/// # Example
///
/// ```rust,ignore
/// let log = Recorder::new();
/// let on_change: MultiDelegate<fn(i32)> = MultiDelegate::new();
/// on_change.add_closure(log.sink());
///
/// on_change.broadcast((3,));
/// assert_eq!(log.calls(), vec![3]);
/// ```
pub struct Recorder<T> {
    calls: Rc<RefCell<Vec<T>>>,
}

impl<T> Recorder<T> {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self {
            calls: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Append a value to the log.
    pub fn record(&self, value: T) {
        self.calls.borrow_mut().push(value);
    }

    /// Number of recorded values.
    pub fn count(&self) -> usize {
        self.calls.borrow().len()
    }

    /// Forget all recorded values.
    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Take the recorded values, leaving the log empty.
    pub fn take(&self) -> Vec<T> {
        std::mem::take(&mut *self.calls.borrow_mut())
    }
}

impl<T: 'static> Recorder<T> {
    /// A closure that records its single argument into this log.
    pub fn sink(&self) -> impl FnMut(T) + use<T> {
        let calls = Rc::clone(&self.calls);
        move |value| calls.borrow_mut().push(value)
    }
}

impl<T: Clone> Recorder<T> {
    /// A copy of the recorded values.
    pub fn calls(&self) -> Vec<T> {
        self.calls.borrow().clone()
    }
}

impl<T> Default for Recorder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Recorder<T> {
    fn clone(&self) -> Self {
        Self {
            calls: Rc::clone(&self.calls),
        }
    }
}

// ============================================================================
// Counter
// ============================================================================

/// A shared invocation counter.
///
/// # Example
///
/// ```rust,ignore
/// let counter = Counter::new();
/// let hits = counter.clone();
/// delegate.bind_closure(move || hits.hit());
///
/// delegate.execute(());
/// assert_eq!(counter.count(), 1);
/// ```
#[derive(Clone, Default)]
pub struct Counter {
    count: Rc<Cell<usize>>,
}

impl Counter {
    /// Create a counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one invocation.
    pub fn hit(&self) {
        self.count.set(self.count.get() + 1);
    }

    /// The current count.
    pub fn count(&self) -> usize {
        self.count.get()
    }

    /// Reset the count to zero.
    pub fn reset(&self) {
        self.count.set(0);
    }
}

// ============================================================================
// EventLog
// ============================================================================

/// One captured `tracing` event.
#[cfg(feature = "tracing")]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedEvent {
    /// Event level.
    pub level: tracing::Level,
    /// The event message.
    pub message: String,
    /// Structured fields other than the message, formatted.
    pub fields: std::collections::BTreeMap<&'static str, String>,
}

#[cfg(feature = "tracing")]
impl CapturedEvent {
    /// A formatted field value.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// A `tracing` subscriber that keeps every event it sees.
///
/// # Example
///
/// ```rust,ignore
/// let events = EventLog::new();
/// tracing::subscriber::with_default(events.clone(), || {
///     registry.add_closure(|| {});
/// });
/// assert!(events.find("listener added").is_some());
/// ```
#[cfg(feature = "tracing")]
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: std::sync::Arc<std::sync::Mutex<Vec<CapturedEvent>>>,
}

#[cfg(feature = "tracing")]
impl EventLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured events, in emission order.
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// The first captured event with `message`.
    pub fn find(&self, message: &str) -> Option<CapturedEvent> {
        self.events()
            .into_iter()
            .find(|event| event.message == message)
    }
}

#[cfg(feature = "tracing")]
impl tracing::Subscriber for EventLog {
    fn enabled(&self, _metadata: &tracing::Metadata<'_>) -> bool {
        true
    }

    fn new_span(&self, _span: &tracing::span::Attributes<'_>) -> tracing::span::Id {
        tracing::span::Id::from_u64(1)
    }

    fn record(&self, _span: &tracing::span::Id, _values: &tracing::span::Record<'_>) {}

    fn record_follows_from(&self, _span: &tracing::span::Id, _follows: &tracing::span::Id) {}

    fn event(&self, event: &tracing::Event<'_>) {
        let mut captured = CapturedEvent {
            level: *event.metadata().level(),
            message: String::new(),
            fields: std::collections::BTreeMap::new(),
        };
        event.record(&mut captured);
        if let Ok(mut events) = self.events.lock() {
            events.push(captured);
        }
    }

    fn enter(&self, _span: &tracing::span::Id) {}

    fn exit(&self, _span: &tracing::span::Id) {}
}

#[cfg(feature = "tracing")]
impl tracing::field::Visit for CapturedEvent {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.insert(field.name(), value.to_string());
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.record_str(field, &format!("{value:?}"));
    }
}
