//! Error types for Tether.
//!
//! Invocation is the only fallible operation in Tether. Binding never fails:
//! a receiver is an `Rc<RefCell<T>>`, so there is no null receiver to reject,
//! and signature mismatches are compile errors.
//!
//! - [`DelegateError::Unbound`] - executing an empty delegate
//! - [`DelegateError::ReceiverDropped`] - the bound receiver is gone
//! - [`DelegateError::ReceiverBusy`] - the bound receiver is already borrowed
//! - [`DelegateError::Reentered`] - a collecting broadcast reached a listener
//!   that is still running

use crate::key::DelegateKey;
use thiserror::Error;

/// Errors that can occur while executing a delegate entry.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelegateError {
    /// The delegate has no entry to execute.
    #[error("delegate is not bound")]
    Unbound,

    /// The receiver of a bound method was dropped while still bound.
    #[error("receiver `{receiver}` was dropped while still bound")]
    ReceiverDropped {
        /// Type name of the receiver.
        receiver: &'static str,
    },

    /// The receiver of a bound method is already borrowed in a conflicting way,
    /// usually because a method on it re-entered its own delegate.
    #[error("receiver `{receiver}` is already borrowed")]
    ReceiverBusy {
        /// Type name of the receiver.
        receiver: &'static str,
    },

    /// A collecting broadcast started from inside a listener reached that
    /// same listener, which cannot be entered twice.
    #[error("listener {key} is still running and cannot be re-entered")]
    Reentered {
        /// Key of the running listener.
        key: DelegateKey,
    },
}

impl DelegateError {
    /// Build a [`DelegateError::ReceiverDropped`] for receiver type `T`.
    pub fn receiver_dropped<T: ?Sized>() -> Self {
        DelegateError::ReceiverDropped {
            receiver: std::any::type_name::<T>(),
        }
    }

    /// Build a [`DelegateError::ReceiverBusy`] for receiver type `T`.
    pub fn receiver_busy<T: ?Sized>() -> Self {
        DelegateError::ReceiverBusy {
            receiver: std::any::type_name::<T>(),
        }
    }

    /// Returns `true` if the error is caused by a bound receiver, as opposed
    /// to the delegate itself.
    pub fn is_receiver_error(&self) -> bool {
        matches!(
            self,
            DelegateError::ReceiverDropped { .. } | DelegateError::ReceiverBusy { .. }
        )
    }
}
