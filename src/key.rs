//! Primitive-like keys: the closed set of types a `HashTable` accepts.
//!
//! A key's `Display` output is its canonical text form; the hash function
//! folds that text, so two keys of different kinds that print the same
//! (`5`, `5i64`, `"5"`) land in the same bucket but never compare equal.

use crate::symbol::Symbol;
use core::fmt;
use std::rc::Rc;

mod sealed {
    pub trait Sealed {}
}

/// Keys accepted by [`HashTable`](crate::HashTable).
///
/// Sealed: text, numbers, big integers and [`Symbol`]s only. Any other key
/// type is rejected at compile time.
pub trait PrimitiveKey: Eq + fmt::Display + sealed::Sealed {}

macro_rules! primitive_key {
    ($($t:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $t {}
            impl PrimitiveKey for $t {}
        )*
    };
}

// Text.
primitive_key!(str, String, Box<str>, Rc<str>);
// Numbers exactly representable as an f64.
primitive_key!(Number, i8, i16, i32, u8, u16, u32);
// Big integers.
primitive_key!(i64, u64, i128, u128);
primitive_key!(Symbol, Primitive);

impl<T: ?Sized + sealed::Sealed> sealed::Sealed for &T {}
impl<T: ?Sized + PrimitiveKey> PrimitiveKey for &T {}

/// A double-precision number key.
///
/// Equality is SameValueZero: `-0.0 == 0.0` and `NaN == NaN`, so every
/// number, NaN included, can be stored and found again.
#[derive(Clone, Copy)]
pub struct Number(f64);

impl Number {
    pub fn new(value: f64) -> Self {
        if value == 0.0 {
            Number(0.0)
        } else if value.is_nan() {
            Number(f64::NAN)
        } else {
            Number(value)
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        // Both sides are canonical (single zero, single NaN).
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for Number {}

impl fmt::Debug for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Number({self})")
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        if v.is_nan() {
            return f.write_str("NaN");
        }
        if v.is_infinite() {
            return f.write_str(if v > 0.0 { "Infinity" } else { "-Infinity" });
        }
        let magnitude = v.abs();
        if magnitude == 0.0 || (1e-6..1e21).contains(&magnitude) {
            return write!(f, "{v}");
        }
        // Exponent form carries an explicit sign: 1e+21, 1.5e-7.
        let sci = format!("{v:e}");
        match sci.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => write!(f, "{mantissa}e+{exp}"),
            _ => f.write_str(&sci),
        }
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::new(value)
    }
}

impl From<f32> for Number {
    fn from(value: f32) -> Self {
        Number::new(f64::from(value))
    }
}

macro_rules! number_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Number {
                fn from(value: $t) -> Self {
                    Number::new(f64::from(value))
                }
            }
        )*
    };
}

number_from_int!(i8, i16, i32, u8, u16, u32);

/// A key of any primitive kind, for tables mixing kinds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Primitive {
    Text(String),
    Number(Number),
    Symbol(Symbol),
    BigInt(i128),
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Primitive::Text(s) => f.write_str(s),
            Primitive::Number(n) => fmt::Display::fmt(n, f),
            Primitive::Symbol(s) => fmt::Display::fmt(s, f),
            Primitive::BigInt(i) => write!(f, "{i}"),
        }
    }
}

impl From<&str> for Primitive {
    fn from(value: &str) -> Self {
        Primitive::Text(value.to_owned())
    }
}

impl From<String> for Primitive {
    fn from(value: String) -> Self {
        Primitive::Text(value)
    }
}

impl From<Number> for Primitive {
    fn from(value: Number) -> Self {
        Primitive::Number(value)
    }
}

impl From<f64> for Primitive {
    fn from(value: f64) -> Self {
        Primitive::Number(Number::new(value))
    }
}

impl From<i32> for Primitive {
    fn from(value: i32) -> Self {
        Primitive::Number(Number::from(value))
    }
}

impl From<Symbol> for Primitive {
    fn from(value: Symbol) -> Self {
        Primitive::Symbol(value)
    }
}

impl From<i64> for Primitive {
    fn from(value: i64) -> Self {
        Primitive::BigInt(i128::from(value))
    }
}

impl From<i128> for Primitive {
    fn from(value: i128) -> Self {
        Primitive::BigInt(value)
    }
}
