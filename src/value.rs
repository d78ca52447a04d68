//! Conversions between argument tokens and the native types of a command.
//!
//! [`Argument`] turns one token into a parameter value, [`Reply`] turns a
//! command's return value back into text.

use crate::error::CommandError;
use std::fmt::Display;

/// A type that a command parameter may have.
///
/// Hosts can implement this for their own types to accept them as arguments.
pub trait Argument: Sized {
    /// Compact identifier reported when a token fails to convert.
    const TYPE_CODE: &'static str;

    /// Converts a single token, or returns `None` if it is not a valid value.
    fn from_token(token: &str) -> Option<Self>;
}

macro_rules! parsed_argument {
    ($($ty:ty => $code:literal),* $(,)?) => {
        $(
            impl Argument for $ty {
                const TYPE_CODE: &'static str = $code;

                fn from_token(token: &str) -> Option<Self> {
                    token.parse().ok()
                }
            }
        )*
    };
}

parsed_argument! {
    i8 => "a",
    u8 => "h",
    i16 => "s",
    u16 => "t",
    i32 => "i",
    u32 => "j",
    i64 => "l",
    u64 => "m",
    i128 => "n",
    u128 => "o",
    isize => "x",
    usize => "y",
    f32 => "f",
    f64 => "d",
}

impl Argument for bool {
    const TYPE_CODE: &'static str = "b";

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        }
    }
}

impl Argument for char {
    const TYPE_CODE: &'static str = "c";

    fn from_token(token: &str) -> Option<Self> {
        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }
}

impl Argument for String {
    const TYPE_CODE: &'static str = "S";

    fn from_token(token: &str) -> Option<Self> {
        Some(token.to_owned())
    }
}

/// A type that a command may return.
pub trait Reply {
    /// Renders the value as the evaluation result.
    fn into_reply(self) -> Result<String, CommandError>;
}

macro_rules! displayed_reply {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Reply for $ty {
                fn into_reply(self) -> Result<String, CommandError> {
                    Ok(self.to_string())
                }
            }
        )*
    };
}

displayed_reply!(
    i8, u8, i16, u16, i32, u32, i64, u64, i128, u128, isize, usize, f32, f64, bool, char,
);

impl Reply for String {
    fn into_reply(self) -> Result<String, CommandError> {
        Ok(self)
    }
}

impl Reply for &str {
    fn into_reply(self) -> Result<String, CommandError> {
        Ok(self.to_owned())
    }
}

impl Reply for () {
    fn into_reply(self) -> Result<String, CommandError> {
        Ok(String::new())
    }
}

impl<T: Reply> Reply for Option<T> {
    fn into_reply(self) -> Result<String, CommandError> {
        match self {
            Some(value) => value.into_reply(),
            None => Ok(String::new()),
        }
    }
}

impl<T: Reply, E: Display> Reply for Result<T, E> {
    fn into_reply(self) -> Result<String, CommandError> {
        match self {
            Ok(value) => value.into_reply(),
            Err(e) => Err(CommandError::Failed(e.to_string())),
        }
    }
}
