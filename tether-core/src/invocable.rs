//! # Type-Erased Invocation
//!
//! [`Invocable`] is the single capability every stored callback exposes,
//! whatever form it was bound from. It is object-safe: containers keep
//! `Box<dyn Invocable<Args, Output = R>>` and never see the concrete form.

use crate::error::DelegateError;

/// The uniform invocation contract behind every delegate entry.
///
/// Implementations wrap one concrete callable form (a closure, a free
/// function, a method bound to a receiver, or a curried version of one of
/// those). Entries hold no state of their own between calls; any state lives
/// in the wrapped callable.
pub trait Invocable<Args> {
    /// The return type.
    type Output;

    /// Invokes the wrapped callable.
    ///
    /// Closures and free functions never fail. Bound methods fail when their
    /// receiver is gone or already borrowed.
    fn invoke(&mut self, args: Args) -> Result<Self::Output, DelegateError>;

    /// Returns `false` once a bound receiver has been dropped.
    fn is_live(&self) -> bool {
        true
    }

    /// Address of the bound receiver allocation, if any.
    ///
    /// Only used for identity comparison against a live receiver; never
    /// dereferenced.
    fn receiver_addr(&self) -> Option<*const ()> {
        None
    }
}

// Boxed entries can be wrapped again, e.g. by a curried entry.
impl<Args, R> Invocable<Args> for Box<dyn Invocable<Args, Output = R>> {
    type Output = R;

    fn invoke(&mut self, args: Args) -> Result<R, DelegateError> {
        (**self).invoke(args)
    }

    fn is_live(&self) -> bool {
        (**self).is_live()
    }

    fn receiver_addr(&self) -> Option<*const ()> {
        (**self).receiver_addr()
    }
}
