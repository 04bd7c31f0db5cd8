//! Wire objects shared by the mevtax server and its clients.
//!
//! Everything in this crate is a serde-serializable type with a stable
//! JSON shape: request bodies, response DTOs, and the WebSocket frames
//! pushed by the live feed. The stateful core (`mevtax-core`) builds on
//! the primitive types defined here ([`objects::Address`],
//! [`objects::WeiAmount`]) so that validation happens once, at the type
//! boundary.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]

pub mod objects;
