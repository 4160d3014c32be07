//! Curried entries.
//!
//! [`Curried`] wraps any other entry together with a payload tuple captured at
//! bind time. On every call a clone of the payload is appended after the
//! call-time arguments, in declaration order, and the combined tuple is
//! forwarded to the wrapped entry:
//!
//! ```rust,ignore
//! // wrapped closure: (i32, String, i32) -> String
//! // call-time arguments: (10,)
//! // payload: ("X".to_string(), 5)
//! // wrapped closure sees: (10, "X".to_string(), 5)
//! ```

use tether_core::{Concat, DelegateError, Invocable};

/// An entry with trailing arguments fixed at bind time.
pub struct Curried<I, P> {
    inner: I,
    payload: P,
}

impl<I, P> Curried<I, P> {
    /// Curry `payload` onto `inner`.
    pub const fn new(inner: I, payload: P) -> Self {
        Self { inner, payload }
    }

    /// The payload appended on every call.
    pub fn payload(&self) -> &P {
        &self.payload
    }
}

impl<I, P, Args> Invocable<Args> for Curried<I, P>
where
    Args: Concat<P>,
    P: Clone,
    I: Invocable<<Args as Concat<P>>::Output>,
{
    type Output = I::Output;

    fn invoke(&mut self, args: Args) -> Result<Self::Output, DelegateError> {
        self.inner.invoke(args.concat(self.payload.clone()))
    }

    fn is_live(&self) -> bool {
        self.inner.is_live()
    }

    fn receiver_addr(&self) -> Option<*const ()> {
        self.inner.receiver_addr()
    }
}
