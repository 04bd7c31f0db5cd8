//! Event channel factories and handles.
//!
//! Capture events travel from their source (demo feed or an external
//! watcher) to the indexer over a bounded tokio mpsc channel, so ledger
//! ingestion never blocks on the source's I/O.

use tokio::sync::mpsc;

use crate::entities::capture::CaptureEvent;

/// Default buffer size for the capture event channel.
///
/// Large enough to absorb bursts from a live log watcher while keeping
/// memory bounded.
pub const DEFAULT_CHANNEL_BUFFER: usize = 256;

/// Sender handle for capture events.
pub type CaptureEventSender = mpsc::Sender<CaptureEvent>;
/// Receiver handle for capture events.
pub type CaptureEventReceiver = mpsc::Receiver<CaptureEvent>;

/// Create a new capture event channel.
///
/// Multiple sources can clone the returned sender; the indexer owns the
/// receiver.
pub fn capture_event_channel() -> (CaptureEventSender, CaptureEventReceiver) {
    mpsc::channel(DEFAULT_CHANNEL_BUFFER)
}
