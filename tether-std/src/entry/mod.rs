//! # Entries
//!
//! An [`Entry`] is the type-erased unit of invocation stored by [`Delegate`]
//! and [`MultiDelegate`]. It wraps exactly one concrete callable form behind
//! [`Invocable`]:
//!
//! | Form | Concrete type | Constructor |
//! |------|---------------|-------------|
//! | closure | [`ClosureEntry`] | [`Entry::closure`] |
//! | free function | [`FunctionEntry`] | [`Entry::function`] |
//! | `&mut self` method | [`MethodEntry`] + [`Exclusive`] | [`Entry::method`] |
//! | `&self` method | [`MethodEntry`] + [`Shared`] | [`Entry::method`] |
//! | any of the above, curried | [`Curried`] | `Entry::*_with` |
//!
//! The form is chosen at bind time and is not observable afterwards.
//!
//! [`Delegate`]: crate::Delegate
//! [`MultiDelegate`]: crate::MultiDelegate
//! [`Exclusive`]: tether_core::Exclusive
//! [`Shared`]: tether_core::Shared

mod closure;
mod curried;
mod method;

pub use closure::{ClosureEntry, FunctionEntry};
pub use curried::Curried;
pub use method::MethodEntry;

use std::{cell::RefCell, fmt, rc::Rc};
use tether_core::{Callable, Concat, DelegateError, Invocable, Method, Signature};

/// Arguments of a signature followed by a curried payload.
type CurriedArgs<S, P> = <<S as Signature>::Args as Concat<P>>::Output;

/// A type-erased callback matching signature `S`.
pub struct Entry<S: Signature> {
    inner: Box<dyn Invocable<S::Args, Output = S::Output>>,
}

impl<S: Signature> Entry<S> {
    /// Erase any [`Invocable`] with a matching signature.
    pub fn new<I>(invocable: I) -> Self
    where
        I: Invocable<S::Args, Output = S::Output> + 'static,
    {
        Self {
            inner: Box::new(invocable),
        }
    }

    /// Entry for an owned closure.
    pub fn closure<F>(closure: F) -> Self
    where
        F: Callable<S::Args, Output = S::Output> + 'static,
    {
        Self::new(ClosureEntry::new(closure))
    }

    /// Entry for a closure taking the call arguments followed by `payload`.
    pub fn closure_with<F, P>(closure: F, payload: P) -> Self
    where
        S::Args: Concat<P>,
        P: Clone + 'static,
        F: Callable<CurriedArgs<S, P>, Output = S::Output> + 'static,
    {
        Self::new(Curried::new(ClosureEntry::new(closure), payload))
    }

    /// Entry for a free function.
    pub fn function<F>(function: F) -> Self
    where
        F: Callable<S::Args, Output = S::Output> + Copy + 'static,
    {
        Self::new(FunctionEntry::new(function))
    }

    /// Entry for a free function taking the call arguments followed by `payload`.
    pub fn function_with<F, P>(function: F, payload: P) -> Self
    where
        S::Args: Concat<P>,
        P: Clone + 'static,
        F: Callable<CurriedArgs<S, P>, Output = S::Output> + Copy + 'static,
    {
        Self::new(Curried::new(FunctionEntry::new(function), payload))
    }

    /// Entry for `method` bound to `receiver`.
    ///
    /// Accepts both `fn(&mut T, ..)` and `fn(&T, ..)`. The receiver is not
    /// owned; see [`MethodEntry`] for the lifetime contract.
    pub fn method<T, M, A>(receiver: &Rc<RefCell<T>>, method: M) -> Self
    where
        T: 'static,
        A: 'static,
        M: Method<T, S::Args, A, Output = S::Output> + 'static,
    {
        Self::new(MethodEntry::new(receiver, method))
    }

    /// Entry for `method` bound to `receiver`, taking the call arguments
    /// followed by `payload`.
    pub fn method_with<T, M, A, P>(receiver: &Rc<RefCell<T>>, method: M, payload: P) -> Self
    where
        T: 'static,
        A: 'static,
        S::Args: Concat<P>,
        P: Clone + 'static,
        M: Method<T, CurriedArgs<S, P>, A, Output = S::Output> + 'static,
    {
        Self::new(Curried::new(MethodEntry::new(receiver, method), payload))
    }

    /// Invoke the wrapped callable.
    pub fn execute(&mut self, args: S::Args) -> Result<S::Output, DelegateError> {
        self.inner.invoke(args)
    }

    /// Returns `false` once a bound receiver has been dropped.
    pub fn is_live(&self) -> bool {
        self.inner.is_live()
    }

    /// Returns `true` if this entry is a method bound to exactly `receiver`.
    pub fn is_bound_to<T>(&self, receiver: &Rc<RefCell<T>>) -> bool {
        self.receiver_addr() == Some(Rc::as_ptr(receiver).cast())
    }

    pub(crate) fn receiver_addr(&self) -> Option<*const ()> {
        self.inner.receiver_addr()
    }
}

impl<S: Signature> fmt::Debug for Entry<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("live", &self.is_live())
            .field("has_receiver", &self.receiver_addr().is_some())
            .finish()
    }
}
