use serde::Serialize;

use crate::revision::Revision;

/// A state change the host should react to.
///
/// `kind` is a stable machine-readable tag (`"layers.reorder"`,
/// `"dataset.sensor"`, ...); `message` is free text for logs and status bars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    pub revision: Revision,
    pub kind: &'static str,
    pub message: String,
}

/// Append-only event log drained by the host after each render.
#[derive(Debug, Default)]
pub struct EventBus {
    events: Vec<Event>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, revision: Revision, kind: &'static str, message: impl Into<String>) {
        self.events.push(Event {
            revision,
            kind,
            message: message.into(),
        });
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::EventBus;
    use crate::revision::Revision;

    #[test]
    fn records_events_with_revision() {
        let mut bus = EventBus::new();
        bus.emit(Revision(2), "test", "hello");
        assert_eq!(bus.events().len(), 1);
        assert_eq!(bus.events()[0].revision, Revision(2));
        assert_eq!(bus.events()[0].kind, "test");
    }

    #[test]
    fn drain_clears_events() {
        let mut bus = EventBus::new();
        bus.emit(Revision(1), "k", "m");
        let drained = bus.drain();
        assert_eq!(drained.len(), 1);
        assert!(bus.is_empty());
    }
}
