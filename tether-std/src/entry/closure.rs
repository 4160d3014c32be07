//! Receiverless entries: closures and free functions.

use tether_core::{Callable, DelegateError, Invocable};

/// An owned closure, possibly capturing state by value.
pub struct ClosureEntry<F> {
    closure: F,
}

impl<F> ClosureEntry<F> {
    /// Wrap a closure.
    pub const fn new(closure: F) -> Self {
        Self { closure }
    }
}

impl<F, Args> Invocable<Args> for ClosureEntry<F>
where
    F: Callable<Args>,
{
    type Output = F::Output;

    fn invoke(&mut self, args: Args) -> Result<Self::Output, DelegateError> {
        Ok(self.closure.call(args))
    }
}

/// A free function: no receiver and no captured state.
///
/// Each call works on a fresh copy of the function value, so nothing carries
/// over between invocations.
pub struct FunctionEntry<F> {
    function: F,
}

impl<F: Copy> FunctionEntry<F> {
    /// Wrap a function item or function pointer.
    pub const fn new(function: F) -> Self {
        Self { function }
    }
}

impl<F, Args> Invocable<Args> for FunctionEntry<F>
where
    F: Callable<Args> + Copy,
{
    type Output = F::Output;

    fn invoke(&mut self, args: Args) -> Result<Self::Output, DelegateError> {
        let mut function = self.function;
        Ok(function.call(args))
    }
}
