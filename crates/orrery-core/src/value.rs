//! The [`Value`] tagged union, its [`ValueKind`] tag, and [`Complex`].

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::sync::Arc;

/// A complex floating-point number.
///
/// Kept as a plain `{re, im}` pair rather than pulling in a numerics
/// crate; the store only needs construction, arithmetic, and modulus.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Complex {
    /// Real part.
    pub re: f64,
    /// Imaginary part.
    pub im: f64,
}

impl Complex {
    /// Create a complex number from real and imaginary parts.
    pub fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// The modulus `sqrt(re² + im²)`.
    pub fn modulus(&self) -> f64 {
        (self.re * self.re + self.im * self.im).sqrt()
    }

    /// The complex conjugate `re - im·i`.
    pub fn conjugate(&self) -> Self {
        Self {
            re: self.re,
            im: -self.im,
        }
    }
}

impl Add for Complex {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            re: self.re + rhs.re,
            im: self.im + rhs.im,
        }
    }
}

impl Sub for Complex {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            re: self.re - rhs.re,
            im: self.im - rhs.im,
        }
    }
}

impl Mul for Complex {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self {
            re: self.re * rhs.re - self.im * rhs.im,
            im: self.re * rhs.im + self.im * rhs.re,
        }
    }
}

impl Neg for Complex {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            re: -self.re,
            im: -self.im,
        }
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:+}i", self.re, self.im)
    }
}

/// A scalar value in the store.
///
/// Closed union over the kinds the store can hold. A config slot or a
/// column never changes its active kind after creation; the typed
/// accessors on [`Store`](crate::store::Store) enforce this at
/// declaration time.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// A boolean flag.
    Bool(bool),
    /// An unsigned integer (counters, entity counts).
    UInt(u64),
    /// A signed integer.
    Int(i64),
    /// A double-precision float (the workhorse kind for physics state).
    Float(f64),
    /// A complex float.
    Complex(Complex),
    /// An opaque byte blob, relocatable as a unit.
    Blob(Arc<[u8]>),
}

impl Value {
    /// The kind tag of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Bool(_) => ValueKind::Bool,
            Self::UInt(_) => ValueKind::UInt,
            Self::Int(_) => ValueKind::Int,
            Self::Float(_) => ValueKind::Float,
            Self::Complex(_) => ValueKind::Complex,
            Self::Blob(_) => ValueKind::Blob,
        }
    }

    /// The float payload, if this value is a [`Value::Float`].
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// The unsigned-integer payload, if this value is a [`Value::UInt`].
    pub fn as_uint(&self) -> Option<u64> {
        match self {
            Self::UInt(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::UInt(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<Complex> for Value {
    fn from(v: Complex) -> Self {
        Self::Complex(v)
    }
}

/// Kind tag for [`Value`], used in error reporting and kind checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Boolean flag.
    Bool,
    /// Unsigned integer.
    UInt,
    /// Signed integer.
    Int,
    /// Double-precision float.
    Float,
    /// Complex float.
    Complex,
    /// Opaque byte blob.
    Blob,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bool => "bool",
            Self::UInt => "uint",
            Self::Int => "int",
            Self::Float => "float",
            Self::Complex => "complex",
            Self::Blob => "blob",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        assert_eq!(Value::Bool(true).kind(), ValueKind::Bool);
        assert_eq!(Value::UInt(1).kind(), ValueKind::UInt);
        assert_eq!(Value::Int(-1).kind(), ValueKind::Int);
        assert_eq!(Value::Float(0.5).kind(), ValueKind::Float);
        assert_eq!(Value::Complex(Complex::new(1.0, 2.0)).kind(), ValueKind::Complex);
        assert_eq!(Value::Blob(Arc::from(&b"x"[..])).kind(), ValueKind::Blob);
    }

    #[test]
    fn complex_arithmetic() {
        let a = Complex::new(1.0, 2.0);
        let b = Complex::new(3.0, -1.0);
        assert_eq!(a + b, Complex::new(4.0, 1.0));
        assert_eq!(a - b, Complex::new(-2.0, 3.0));
        // (1 + 2i)(3 - i) = 3 - i + 6i - 2i² = 5 + 5i
        assert_eq!(a * b, Complex::new(5.0, 5.0));
        assert_eq!(-a, Complex::new(-1.0, -2.0));
    }

    #[test]
    fn complex_modulus() {
        assert_eq!(Complex::new(3.0, 4.0).modulus(), 5.0);
        assert_eq!(Complex::new(0.0, 0.0).modulus(), 0.0);
    }

    #[test]
    fn float_accessor() {
        assert_eq!(Value::Float(2.5).as_float(), Some(2.5));
        assert_eq!(Value::UInt(3).as_float(), None);
        assert_eq!(Value::UInt(3).as_uint(), Some(3));
    }

    #[test]
    fn kind_display_is_lowercase() {
        assert_eq!(ValueKind::Float.to_string(), "float");
        assert_eq!(ValueKind::Blob.to_string(), "blob");
    }
}
