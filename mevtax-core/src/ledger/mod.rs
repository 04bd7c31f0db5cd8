//! In-memory ledgers.
//!
//! Each ledger exclusively owns its maps and exposes synchronous,
//! non-suspending mutations, so a caller that wraps one in a lock gets
//! atomic operations for free: no reader can observe a half-updated
//! aggregate. The process entry point instantiates the ledgers once and
//! hands out shared handles; there is no module-level global state.

pub mod capture;
pub mod channel;
pub mod session;

pub use capture::CaptureLedger;
pub use channel::ChannelLedger;
pub use session::SessionRegistry;
