//! Tuple concatenation for curried payloads.
//!
//! A curried entry owns a payload tuple captured at bind time. On every call
//! the payload is appended after the call-time arguments:
//!
//! ```rust,ignore
//! assert_eq!((10,).concat(("X", 5)), (10, "X", 5));
//! ```
//!
//! Implemented for call tuples of arity 0..=4 and payload tuples of arity
//! 1..=4, which keeps the combined arity within what [`Callable`] and
//! [`Method`] support.
//!
//! [`Callable`]: crate::Callable
//! [`Method`]: crate::Method

/// Appends the tuple `P` after `Self`.
#[diagnostic::on_unimplemented(
    message = "cannot append payload `{P}` to arguments `{Self}`",
    note = "Curried payloads support up to 4 call parameters followed by 1 to 4 payload values."
)]
pub trait Concat<P> {
    /// `Self` followed by `P`, as one flat tuple.
    type Output;

    /// Concatenates the two tuples.
    fn concat(self, payload: P) -> Self::Output;
}

macro_rules! impl_concat {
    ([$($A:ident)*] [$($P:ident)*]) => {
        impl<$($A,)* $($P,)*> Concat<($($P,)*)> for ($($A,)*) {
            type Output = ($($A,)* $($P,)*);

            #[allow(non_snake_case)]
            fn concat(self, payload: ($($P,)*)) -> Self::Output {
                let ($($A,)*) = self;
                let ($($P,)*) = payload;
                ($($A,)* $($P,)*)
            }
        }
    };
}

macro_rules! impl_concat_payloads {
    ($args:tt; $($payload:tt)+) => {
        $(impl_concat!($args $payload);)+
    };
}

impl_concat_payloads!([]; [P0] [P0 P1] [P0 P1 P2] [P0 P1 P2 P3]);
impl_concat_payloads!([A0]; [P0] [P0 P1] [P0 P1 P2] [P0 P1 P2 P3]);
impl_concat_payloads!([A0 A1]; [P0] [P0 P1] [P0 P1 P2] [P0 P1 P2 P3]);
impl_concat_payloads!([A0 A1 A2]; [P0] [P0 P1] [P0 P1 P2] [P0 P1 P2 P3]);
impl_concat_payloads!([A0 A1 A2 A3]; [P0] [P0 P1] [P0 P1 P2] [P0 P1 P2 P3]);
