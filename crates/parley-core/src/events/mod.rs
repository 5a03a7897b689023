//! Chat lifecycle events and the sinks that receive them.

pub mod sink;
pub mod types;

pub use sink::{EventBus, EventSink, NoopSink, TracingSink};
pub use types::{ChatEvent, MessageSent, ResponseReceived};
