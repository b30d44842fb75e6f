/// Event categories recorded in the append-only event log (spec.md §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventCategory {
    Admit,
    Load,
    Fault,
    SwapOut,
    SwapIn,
    Evict,
    Terminate,
    State,
    Error,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EventCategory::Admit => "ADMIT",
            EventCategory::Load => "LOAD",
            EventCategory::Fault => "FAULT",
            EventCategory::SwapOut => "SWAP_OUT",
            EventCategory::SwapIn => "SWAP_IN",
            EventCategory::Evict => "EVICT",
            EventCategory::Terminate => "TERMINATE",
            EventCategory::State => "STATE",
            EventCategory::Error => "ERROR",
        };
        write!(f, "{s}")
    }
}

/// One entry of the event log: `(tick, category, message)` (spec.md §6).
/// The log is append-only and is never rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub tick: u64,
    pub category: EventCategory,
    pub message: String,
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:>6}] {:<9} {}", self.tick, self.category, self.message)
    }
}

/// Append-only event log.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> EventLog {
        EventLog::default()
    }

    pub fn push(&mut self, tick: u64, category: EventCategory, message: impl Into<String>) {
        self.events.push(Event {
            tick,
            category,
            message: message.into(),
        });
    }

    pub fn as_slice(&self) -> &[Event] {
        &self.events
    }
}
