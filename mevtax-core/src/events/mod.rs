pub mod channels;
pub mod sink;
pub mod types;

pub use channels::{CaptureEventReceiver, CaptureEventSender, capture_event_channel};
pub use sink::{EventSink, NoopSink};
pub use types::ProtocolEvent;
