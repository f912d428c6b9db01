//! # lacquer-std
//!
//! Standard behaviors for the Lacquer decoration framework.
//!
//! This crate provides:
//! - **Timed retry**: [`retry::TimedRetry`], the implicit-wait behavior
//! - **Stale recovery**: [`recovery::StaleRecovery`], transparent
//!   rediscovery of stale sub-resources
//! - **Event broadcast**: [`events::EventBroadcast`] and the
//!   [`events::Observer`] registry
//! - **Call logging**: [`logging::CallLogger`], structured `tracing` output
//! - **Testing utilities**: [`testing::FakeResource`],
//!   [`testing::FakeClock`], [`testing::RecordingObserver`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub mod events;
pub mod logging;
pub mod recovery;
pub mod retry;
pub mod testing;
