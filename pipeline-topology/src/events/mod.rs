//! Event sink system for observability.
//!
//! Classification and extraction report what they saw through an
//! [`EventSink`]. Sinks are owned by the extractor that uses them; there is
//! no process-wide sink.

mod event;
mod sink;

pub use event::{TopologyEvent, CLASSIFIED, DANGLING_DEPENDENCY, EXTRACTED};
pub use sink::{CollectingEventSink, EventSink, LoggingEventSink, NoOpEventSink};

#[cfg(test)]
pub use sink::MockEventSink;
