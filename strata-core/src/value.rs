use std::fmt::{self, Display};

/// The payload of one column or parameter.
///
/// Every native integer width is normalized to `Integer` and every native
/// float width to `Float` before a value enters a query or leaves a driver.
/// An `Integer` can be read through [`Scalar::as_float`] and a `Float`
/// through [`Scalar::as_int`], so the two numeric kinds compare against each
/// other without the caller converting first.
#[derive(Debug, Clone, Default)]
pub enum Scalar {
    /// Sentinel carried by the shared invalid instance that failed lookups
    /// return. Drivers never produce it inside a row.
    #[default]
    Invalid,
    Null,
    Integer(i64),
    Float(f64),
    Text(String),
    Blob(Box<[u8]>),
}

impl Scalar {
    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    pub fn is_valid(&self) -> bool {
        !matches!(self, Scalar::Invalid)
    }

    /// Integer view of a numeric payload. A `Float` is truncated.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Scalar::Integer(value) => Some(*value),
            Scalar::Float(value) => Some(*value as i64),
            _ => None,
        }
    }

    /// Float view of a numeric payload.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Scalar::Integer(value) => Some(*value as f64),
            Scalar::Float(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Scalar::Blob(value) => Some(value),
            _ => None,
        }
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Scalar::Integer(l), Scalar::Integer(r)) => l == r,
            (Scalar::Float(l), Scalar::Float(r)) => (l - r).abs() < f64::EPSILON,
            (Scalar::Text(l), Scalar::Text(r)) => l == r,
            (Scalar::Blob(l), Scalar::Blob(r)) => l == r,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

impl Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Invalid => f.write_str("INVALID"),
            Scalar::Null => f.write_str("NULL"),
            Scalar::Integer(value) => write!(f, "{}", value),
            Scalar::Float(value) => write!(f, "{}", value),
            Scalar::Text(value) => f.write_str(value),
            Scalar::Blob(value) => write!(f, "\\x{}", hex::encode(value)),
        }
    }
}

macro_rules! scalar_from_int {
    ($($from:ty),+) => {$(
        impl From<$from> for Scalar {
            fn from(value: $from) -> Self {
                Scalar::Integer(value as i64)
            }
        }
    )+};
}
scalar_from_int!(i8, i16, i32, i64, u8, u16, u32, usize);

impl From<f32> for Scalar {
    fn from(value: f32) -> Self {
        Scalar::Float(value as f64)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.into())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl From<&[u8]> for Scalar {
    fn from(value: &[u8]) -> Self {
        Scalar::Blob(value.into())
    }
}

impl From<Vec<u8>> for Scalar {
    fn from(value: Vec<u8>) -> Self {
        Scalar::Blob(value.into_boxed_slice())
    }
}

impl From<Box<[u8]>> for Scalar {
    fn from(value: Box<[u8]>) -> Self {
        Scalar::Blob(value)
    }
}

impl<T: Into<Scalar>> From<Option<T>> for Scalar {
    fn from(value: Option<T>) -> Self {
        value.map_or(Scalar::Null, Into::into)
    }
}

/// One column or parameter datum: a payload plus a name.
///
/// The name is the column name as reported by the backend, the parameter
/// name for a named binding, or empty for a positional binding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Value {
    name: String,
    scalar: Scalar,
}

static INVALID: Value = Value {
    name: String::new(),
    scalar: Scalar::Invalid,
};

impl Value {
    pub fn new(name: impl Into<String>, scalar: impl Into<Scalar>) -> Self {
        Self {
            name: name.into(),
            scalar: scalar.into(),
        }
    }

    pub fn null(name: impl Into<String>) -> Self {
        Self::new(name, Scalar::Null)
    }

    /// The shared instance returned by out-of-range and name-miss lookups.
    pub fn invalid() -> &'static Value {
        &INVALID
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scalar(&self) -> &Scalar {
        &self.scalar
    }

    pub fn into_scalar(self) -> Scalar {
        self.scalar
    }

    pub fn is_null(&self) -> bool {
        self.scalar.is_null()
    }

    pub fn is_valid(&self) -> bool {
        self.scalar.is_valid()
    }

    pub fn as_int(&self) -> Option<i64> {
        self.scalar.as_int()
    }

    pub fn as_float(&self) -> Option<f64> {
        self.scalar.as_float()
    }

    pub fn as_str(&self) -> Option<&str> {
        self.scalar.as_str()
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        self.scalar.as_bytes()
    }
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        Self {
            name: String::new(),
            scalar,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.scalar.fmt(f)
    }
}

/// Native integer tiers, by magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntWidth {
    I8,
    I16,
    I32,
    I64,
}

/// The narrowest signed tier that represents `value` without losing
/// precision. Drivers whose native API distinguishes integer widths bind
/// through this ladder.
pub fn int_width(value: i64) -> IntWidth {
    if i64::from(i8::MIN) <= value && value <= i64::from(i8::MAX) {
        IntWidth::I8
    } else if i64::from(i16::MIN) <= value && value <= i64::from(i16::MAX) {
        IntWidth::I16
    } else if i64::from(i32::MIN) <= value && value <= i64::from(i32::MAX) {
        IntWidth::I32
    } else {
        IntWidth::I64
    }
}

/// Builds an array of [`Scalar`] bindings out of heterogeneous values, to be
/// appended with [`Query::bind_all`](crate::Query::bind_all) as successive
/// positional entries.
#[macro_export]
macro_rules! values {
    ($($value:expr),* $(,)?) => {
        [$($crate::Scalar::from($value)),*]
    };
}
