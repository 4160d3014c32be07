//! # tether-std
//!
//! Delegate implementations for the Tether callback binding primitives.
//!
//! This crate provides:
//! - **Entries**: [`Entry`] and the concrete callable forms in [`entry`]
//! - **Single-slot binding**: [`Delegate`]
//! - **Multicast binding**: [`MultiDelegate`]
//! - **Test doubles**: [`testing`]
//!
//! # Logging
//!
//! Enable the `tracing` feature to emit `tracing` events for binding,
//! removal, and broadcast activity.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use tether_core;

// Modules
pub mod delegate;
pub mod entry;
pub mod multicast;
pub mod testing;

pub use delegate::Delegate;
pub use entry::Entry;
pub use multicast::MultiDelegate;
