//! Methods bound to a receiver.
//!
//! # Receiver Lifetime
//!
//! A [`MethodEntry`] keeps a [`Weak`] reference to its receiver. It never keeps
//! the receiver alive beyond a single in-flight call, and it never owns it.
//! Unbind or remove the entry before dropping the receiver: invoking an entry
//! whose receiver is gone fails with [`DelegateError::ReceiverDropped`].

use std::{
    cell::RefCell,
    marker::PhantomData,
    rc::{Rc, Weak},
};
use tether_core::{DelegateError, Invocable, Method};

/// A method bound to a receiver it does not own.
///
/// `A` is the access marker ([`Exclusive`] or [`Shared`]) inferred from the
/// method's receiver parameter.
///
/// [`Exclusive`]: tether_core::Exclusive
/// [`Shared`]: tether_core::Shared
pub struct MethodEntry<T, M, A> {
    receiver: Weak<RefCell<T>>,
    method: M,
    _access: PhantomData<fn() -> A>,
}

impl<T, M, A> MethodEntry<T, M, A> {
    /// Bind `method` to `receiver` without taking ownership of it.
    pub fn new(receiver: &Rc<RefCell<T>>, method: M) -> Self {
        Self {
            receiver: Rc::downgrade(receiver),
            method,
            _access: PhantomData,
        }
    }
}

impl<T, M, A, Args> Invocable<Args> for MethodEntry<T, M, A>
where
    M: Method<T, Args, A>,
{
    type Output = M::Output;

    fn invoke(&mut self, args: Args) -> Result<Self::Output, DelegateError> {
        let receiver = self
            .receiver
            .upgrade()
            .ok_or_else(DelegateError::receiver_dropped::<T>)?;
        self.method.call_method(&receiver, args)
    }

    fn is_live(&self) -> bool {
        self.receiver.strong_count() > 0
    }

    fn receiver_addr(&self) -> Option<*const ()> {
        // The weak reference keeps the allocation, so this address cannot be
        // handed to another receiver while the entry exists.
        Some(self.receiver.as_ptr().cast())
    }
}
