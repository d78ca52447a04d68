//! Invocation machinery for callables of any fixed arity from 0 to 7.
//!
//! A callable's arity, parameter types and return type come from its
//! signature at the point it is declared. [`Function`] covers plain functions
//! and static methods, [`Method`] covers callables that take the command set
//! itself as their first parameter. Both check the argument count first, then
//! convert tokens left to right, stopping at the first one that fails.

use crate::error::CommandError;
use crate::value::{Argument, Reply};

/// A free function or static method usable as a command.
///
/// Implemented for every `Fn(A0, .., An) -> R` where each `Ai` is an
/// [`Argument`] and `R` is a [`Reply`]. `Args` is the tuple of parameter types
/// and only exists to keep the per-arity implementations apart.
pub trait Function<Args>: 'static {
    /// Number of positional arguments.
    const ARITY: usize;

    /// Converts `args` and calls the function.
    fn invoke(&self, args: &[String]) -> Result<String, CommandError>;
}

/// A callable bound to the command set it is declared on.
///
/// Implemented for every `Fn(&mut S, A0, .., An) -> R`, which includes
/// methods taking `&mut self` and closures over the receiver.
pub trait Method<S, Args>: 'static {
    /// Number of positional arguments, not counting the receiver.
    const ARITY: usize;

    /// Converts `args` and calls the method on `receiver`.
    fn invoke(&self, receiver: &mut S, args: &[String]) -> Result<String, CommandError>;
}

fn check_arity(expected: usize, args: &[String]) -> Result<(), CommandError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(CommandError::Arity {
            expected,
            got: args.len(),
        })
    }
}

fn convert<T: Argument>(args: &[String], position: usize) -> Result<T, CommandError> {
    args.get(position)
        .and_then(|token| T::from_token(token))
        .ok_or(CommandError::Type {
            position,
            expected: T::TYPE_CODE,
        })
}

macro_rules! impl_arity {
    ($arity:literal; $($ty:ident $var:ident $idx:tt),*) => {
        impl<F, R, $($ty,)*> Function<($($ty,)*)> for F
        where
            F: Fn($($ty),*) -> R + 'static,
            R: Reply,
            $($ty: Argument,)*
        {
            const ARITY: usize = $arity;

            fn invoke(&self, args: &[String]) -> Result<String, CommandError> {
                check_arity(Self::ARITY, args)?;
                $(let $var = convert::<$ty>(args, $idx)?;)*
                (self)($($var),*).into_reply()
            }
        }

        impl<S, F, R, $($ty,)*> Method<S, ($($ty,)*)> for F
        where
            F: Fn(&mut S, $($ty),*) -> R + 'static,
            R: Reply,
            $($ty: Argument,)*
        {
            const ARITY: usize = $arity;

            fn invoke(&self, receiver: &mut S, args: &[String]) -> Result<String, CommandError> {
                check_arity(Self::ARITY, args)?;
                $(let $var = convert::<$ty>(args, $idx)?;)*
                (self)(receiver, $($var),*).into_reply()
            }
        }
    };
}

impl_arity!(0;);
impl_arity!(1; A0 a0 0);
impl_arity!(2; A0 a0 0, A1 a1 1);
impl_arity!(3; A0 a0 0, A1 a1 1, A2 a2 2);
impl_arity!(4; A0 a0 0, A1 a1 1, A2 a2 2, A3 a3 3);
impl_arity!(5; A0 a0 0, A1 a1 1, A2 a2 2, A3 a3 3, A4 a4 4);
impl_arity!(6; A0 a0 0, A1 a1 1, A2 a2 2, A3 a3 3, A4 a4 4, A5 a5 5);
impl_arity!(7; A0 a0 0, A1 a1 1, A2 a2 2, A3 a3 3, A4 a4 4, A5 a5 5, A6 a6 6);
