//! # tether - Typed Callback Binding
//!
//! `tether` stores "a callable with a given signature" without caring whether
//! it is a closure, a free function, or a method bound to a receiver, and
//! invokes it later through one uniform call.
//!
//! - [`Delegate`] holds at most one callback. Rebinding replaces it.
//! - [`MultiDelegate`] holds an ordered list of callbacks, each removable by
//!   the [`DelegateKey`] returned when it was added.
//!
//! Signatures are written as function pointer types, and arguments are
//! passed as a tuple.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::{cell::RefCell, rc::Rc};
//! use tether::prelude::*;
//!
//! struct Printer;
//! impl Printer {
//!     fn print_int(&mut self, value: i32) { println!("value -> {value}") }
//! }
//!
//! let printer = Rc::new(RefCell::new(Printer));
//!
//! let mut on_sum: Delegate<fn(i32)> = Delegate::new();
//! on_sum.bind_method(&printer, Printer::print_int);
//! on_sum.execute_if_bound((5,));
//!
//! let numbers: MultiDelegate<fn() -> f32> = MultiDelegate::new();
//! numbers.add_closure(|| 133.99f32);
//! let all = numbers.broadcast_collect(());
//! ```
//!
//! ## Currying
//!
//! Trailing arguments can be fixed at bind time. They are appended after the
//! call-time arguments:
//!
//! ```rust,ignore
//! let mut label: Delegate<fn(i32) -> String> = Delegate::new();
//! label.bind_closure_with(
//!     |n: i32, tag: String, times: i32| format!("{tag}{}", n * times),
//!     ("x".to_string(), 5),
//! );
//! assert_eq!(label.execute((10,)), "x50");
//! ```
//!
//! ## Receivers
//!
//! Methods are bound to an `Rc<RefCell<T>>` receiver, which the delegate does
//! not keep alive. Unbind or remove before dropping the receiver; executing
//! a method whose receiver is gone panics, and the `try_*` variants return
//! [`DelegateError::ReceiverDropped`].

#![deny(clippy::pub_use, clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use tether_core::{
    // Signatures
    Callable,
    Concat,
    // Error types
    DelegateError,
    // Keys
    DelegateKey,
    Exclusive,
    // Type erasure
    Invocable,
    KeyAllocator,
    Method,
    Shared,
    Signature,
};

// Containers
pub use tether_std::{Delegate, Entry, MultiDelegate};

/// Concrete entry forms.
pub mod entry {
    pub use tether_std::entry::{ClosureEntry, Curried, Entry, FunctionEntry, MethodEntry};
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use tether_std::testing::*;
}

/// Prelude module - common imports for Tether.
///
/// # Usage
///
/// ```rust,ignore
/// use tether::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Callable, Delegate, DelegateError, DelegateKey, Entry, Method, MultiDelegate, Signature,
    };
}
