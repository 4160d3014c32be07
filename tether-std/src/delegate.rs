//! # Single-Slot Delegate
//!
//! A [`Delegate`] holds at most one callback. Binding always discards the
//! previous callback first, so a stale target is never invoked again.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut on_sum: Delegate<fn(i32)> = Delegate::new();
//! on_sum.execute_if_bound((5,)); // nothing bound, returns false
//!
//! let printer = Rc::new(RefCell::new(Printer::default()));
//! on_sum.bind_method(&printer, Printer::print_int);
//! on_sum.execute((5,));
//! ```

use crate::entry::Entry;
use std::{cell::RefCell, fmt, rc::Rc};
use tether_core::{Callable, Concat, DelegateError, Method, Signature};

type CurriedArgs<S, P> = <<S as Signature>::Args as Concat<P>>::Output;

/// A single-slot callback binder for signature `S`.
///
/// `S` is written as a function pointer type: `Delegate<fn(i32) -> String>`.
/// The default, `Delegate<fn()>`, takes no arguments and returns nothing.
pub struct Delegate<S: Signature = fn()> {
    entry: Option<Entry<S>>,
}

impl<S: Signature> Delegate<S> {
    /// Create an unbound delegate.
    pub const fn new() -> Self {
        Self { entry: None }
    }

    /// Returns `true` if a callback is bound.
    pub fn is_bound(&self) -> bool {
        self.entry.is_some()
    }

    /// Returns `true` if the bound callback is a method on exactly `receiver`.
    pub fn is_bound_to<T>(&self, receiver: &Rc<RefCell<T>>) -> bool {
        self.entry
            .as_ref()
            .is_some_and(|entry| entry.is_bound_to(receiver))
    }

    /// Bind a prebuilt entry, discarding any previous one.
    pub fn bind(&mut self, entry: Entry<S>) {
        let rebound = self.entry.take().is_some();
        #[cfg(feature = "tracing")]
        {
            tracing::trace!(
                rebound,
                signature = std::any::type_name::<S>(),
                "delegate bound"
            );
        }
        #[cfg(not(feature = "tracing"))]
        {
            let _ = rebound;
        }
        self.entry = Some(entry);
    }

    /// Bind `method` on `receiver`.
    ///
    /// Both `fn(&mut T, ..)` and `fn(&T, ..)` methods are accepted. The
    /// receiver is not kept alive by the delegate: unbind before dropping it.
    pub fn bind_method<T, M, A>(&mut self, receiver: &Rc<RefCell<T>>, method: M)
    where
        T: 'static,
        A: 'static,
        M: Method<T, S::Args, A, Output = S::Output> + 'static,
    {
        self.bind(Entry::method(receiver, method));
    }

    /// Bind `method` on `receiver` with trailing arguments fixed to `payload`.
    pub fn bind_method_with<T, M, A, P>(
        &mut self,
        receiver: &Rc<RefCell<T>>,
        method: M,
        payload: P,
    ) where
        T: 'static,
        A: 'static,
        S::Args: Concat<P>,
        P: Clone + 'static,
        M: Method<T, CurriedArgs<S, P>, A, Output = S::Output> + 'static,
    {
        self.bind(Entry::method_with(receiver, method, payload));
    }

    /// Bind a closure.
    pub fn bind_closure<F>(&mut self, closure: F)
    where
        F: Callable<S::Args, Output = S::Output> + 'static,
    {
        self.bind(Entry::closure(closure));
    }

    /// Bind a closure with trailing arguments fixed to `payload`.
    ///
    /// The closure takes the call arguments followed by the payload values.
    pub fn bind_closure_with<F, P>(&mut self, closure: F, payload: P)
    where
        S::Args: Concat<P>,
        P: Clone + 'static,
        F: Callable<CurriedArgs<S, P>, Output = S::Output> + 'static,
    {
        self.bind(Entry::closure_with(closure, payload));
    }

    /// Bind a free function.
    pub fn bind_function<F>(&mut self, function: F)
    where
        F: Callable<S::Args, Output = S::Output> + Copy + 'static,
    {
        self.bind(Entry::function(function));
    }

    /// Bind a free function with trailing arguments fixed to `payload`.
    pub fn bind_function_with<F, P>(&mut self, function: F, payload: P)
    where
        S::Args: Concat<P>,
        P: Clone + 'static,
        F: Callable<CurriedArgs<S, P>, Output = S::Output> + Copy + 'static,
    {
        self.bind(Entry::function_with(function, payload));
    }

    /// Discard the bound callback, if any.
    pub fn unbind(&mut self) {
        let unbound = self.entry.take().is_some();
        #[cfg(feature = "tracing")]
        {
            if unbound {
                tracing::trace!(signature = std::any::type_name::<S>(), "delegate unbound");
            }
        }
        #[cfg(not(feature = "tracing"))]
        {
            let _ = unbound;
        }
    }

    /// Invoke the bound callback.
    ///
    /// # Panics
    ///
    /// Panics if nothing is bound, or if the bound method's receiver was
    /// dropped or is already borrowed. Use [`try_execute`](Self::try_execute)
    /// or [`execute_if_bound`](Self::execute_if_bound) when binding is optional.
    #[track_caller]
    pub fn execute(&mut self, args: S::Args) -> S::Output {
        match self.try_execute(args) {
            Ok(output) => output,
            Err(err) => panic!("cannot execute delegate: {err}"),
        }
    }

    /// Invoke the bound callback, reporting failures instead of panicking.
    pub fn try_execute(&mut self, args: S::Args) -> Result<S::Output, DelegateError> {
        let entry = self.entry.as_mut().ok_or(DelegateError::Unbound)?;
        let result = entry.execute(args);
        #[cfg(feature = "tracing")]
        {
            if let Err(err) = &result {
                tracing::warn!(error = %err, "delegate execution failed");
            }
        }
        result
    }

    /// Invoke the bound callback if there is one.
    ///
    /// Returns `false` without invoking anything when unbound.
    ///
    /// # Panics
    ///
    /// Panics under the same receiver conditions as [`execute`](Self::execute).
    #[track_caller]
    pub fn execute_if_bound(&mut self, args: S::Args) -> bool {
        if !self.is_bound() {
            return false;
        }
        self.execute(args);
        true
    }

    /// Invoke the bound callback, or return `S::Output::default()` when unbound.
    ///
    /// # Panics
    ///
    /// Panics under the same receiver conditions as [`execute`](Self::execute).
    #[track_caller]
    pub fn execute_or_default(&mut self, args: S::Args) -> S::Output
    where
        S::Output: Default,
    {
        if self.is_bound() {
            self.execute(args)
        } else {
            Default::default()
        }
    }
}

impl<S: Signature> Default for Delegate<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Signature> fmt::Debug for Delegate<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Delegate")
            .field("entry", &self.entry)
            .finish()
    }
}
