//! # Call Signatures
//!
//! A delegate is parameterized by a call signature written as a function
//! pointer type, so `Delegate<fn(i32) -> String>` reads the same way the call
//! does. The [`Signature`] trait splits that type into an argument tuple and an
//! output type.
//!
//! Two families of callables are accepted against an argument tuple:
//!
//! - [`Callable`]: closures and free functions, `FnMut(A0, A1, ..) -> R`
//! - [`Method`]: functions taking a receiver first, `Fn(&mut T, A0, ..) -> R`
//!   ([`Exclusive`]) or `Fn(&T, A0, ..) -> R` ([`Shared`])
//!
//! Every family is implemented for arities 0 through 8.
//!
//! # Borrowed parameters
//!
//! `fn(&str)` is a higher-ranked type (`for<'a> fn(&'a str)`) and is not a
//! [`Signature`]. Name the lifetime instead: `fn(&'static str)`.

use crate::error::DelegateError;
use std::cell::RefCell;

/// A call signature `(A0, A1, ..) -> Output`, written as `fn(A0, A1, ..) -> Output`.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a delegate signature",
    label = "expected a function pointer type such as `fn(i32) -> bool`",
    note = "Signatures are written as `fn(..) -> R` with at most 8 parameters; borrowed parameters need a named lifetime."
)]
pub trait Signature {
    /// The parameters, as a tuple.
    type Args;
    /// The return type.
    type Output;
}

/// Something that can be called with an argument tuple.
///
/// Implemented for every `FnMut` of matching arity, which covers closures,
/// function items, and function pointers.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be called with arguments `{Args}`",
    label = "parameter list does not match the delegate signature",
    note = "Closures usually need annotated parameter types, e.g. `|x: i32| ..`."
)]
pub trait Callable<Args> {
    /// The return type.
    type Output;

    /// Calls with the unpacked argument tuple.
    fn call(&mut self, args: Args) -> Self::Output;
}

/// Access marker for methods taking `&mut self`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Exclusive;

/// Access marker for methods taking `&self`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Shared;

/// A method on `T` callable with an argument tuple.
///
/// `Access` is inferred from the method itself: [`Exclusive`] for
/// `fn(&mut T, ..)`, [`Shared`] for `fn(&T, ..)`. It only steers how the
/// receiver is borrowed when the method runs.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a method on `{T}` taking `{Args}`",
    label = "expected `fn(&mut {T}, ..)` or `fn(&{T}, ..)` with matching parameters"
)]
pub trait Method<T, Args, Access> {
    /// The return type.
    type Output;

    /// Borrows `receiver` as required by `Access` and calls the method.
    ///
    /// Fails with [`DelegateError::ReceiverBusy`] if the receiver is already
    /// borrowed incompatibly.
    fn call_method(&self, receiver: &RefCell<T>, args: Args)
    -> Result<Self::Output, DelegateError>;
}

macro_rules! impl_signature_arity {
    ($($A:ident),*) => {
        impl<R, $($A,)*> Signature for fn($($A),*) -> R {
            type Args = ($($A,)*);
            type Output = R;
        }

        impl<F, R, $($A,)*> Callable<($($A,)*)> for F
        where
            F: FnMut($($A),*) -> R,
        {
            type Output = R;

            #[allow(non_snake_case)]
            fn call(&mut self, ($($A,)*): ($($A,)*)) -> R {
                (self)($($A),*)
            }
        }

        impl<F, T, R, $($A,)*> Method<T, ($($A,)*), Exclusive> for F
        where
            F: Fn(&mut T, $($A),*) -> R,
        {
            type Output = R;

            #[allow(non_snake_case)]
            fn call_method(
                &self,
                receiver: &RefCell<T>,
                ($($A,)*): ($($A,)*),
            ) -> Result<R, DelegateError> {
                let mut target = receiver
                    .try_borrow_mut()
                    .map_err(|_| DelegateError::receiver_busy::<T>())?;
                Ok((self)(&mut *target, $($A),*))
            }
        }

        impl<F, T, R, $($A,)*> Method<T, ($($A,)*), Shared> for F
        where
            F: Fn(&T, $($A),*) -> R,
        {
            type Output = R;

            #[allow(non_snake_case)]
            fn call_method(
                &self,
                receiver: &RefCell<T>,
                ($($A,)*): ($($A,)*),
            ) -> Result<R, DelegateError> {
                let target = receiver
                    .try_borrow()
                    .map_err(|_| DelegateError::receiver_busy::<T>())?;
                Ok((self)(&*target, $($A),*))
            }
        }
    };
}

impl_signature_arity!();
impl_signature_arity!(A0);
impl_signature_arity!(A0, A1);
impl_signature_arity!(A0, A1, A2);
impl_signature_arity!(A0, A1, A2, A3);
impl_signature_arity!(A0, A1, A2, A3, A4);
impl_signature_arity!(A0, A1, A2, A3, A4, A5);
impl_signature_arity!(A0, A1, A2, A3, A4, A5, A6);
impl_signature_arity!(A0, A1, A2, A3, A4, A5, A6, A7);
