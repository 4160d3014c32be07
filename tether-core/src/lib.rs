//! # tether-core
//!
//! Core traits for the Tether callback binding primitives.
//!
//! This crate holds the contracts only; the delegate containers live in
//! `tether-std`. It is small enough to be imported by code that only needs to
//! name signatures or implement [`Invocable`] for a custom callable form.
//!
//! # Building Blocks
//!
//! - [`Signature`]: a call signature written as `fn(A0, ..) -> R`
//! - [`Callable`]: closures and free functions callable with an argument tuple
//! - [`Method`]: functions taking a receiver first, with an [`Exclusive`] or
//!   [`Shared`] access marker
//! - [`Concat`]: appends a curried payload tuple to the call-time arguments
//! - [`Invocable`]: the object-safe capability every stored entry exposes
//! - [`DelegateKey`] / [`KeyAllocator`]: removal handles for multicast entries
//!
//! # Error Types
//!
//! - [`DelegateError`] - failures surfaced while executing an entry

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod concat;
mod error;
mod invocable;
mod key;
mod signature;

// Re-exports
pub use concat::Concat;
pub use error::DelegateError;
pub use invocable::Invocable;
pub use key::{DelegateKey, KeyAllocator};
pub use signature::{Callable, Exclusive, Method, Shared, Signature};
