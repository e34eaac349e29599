use std::{fmt};

use super::{Name, Map, Value, DEFAULT_DISCRIMINANT};

/// A discriminant value: the tag that says which variant a value is.
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Key {
    Int(i64),

    /// A number that is not an `i64`, as the bits of an `f64`.
    Float(u64),

    Str(Name),
}

impl Key {
    /// Interprets `value` as a `Key`, if it is a string or a number.
    pub fn from_value(value: &Value) -> Option<Self> {
        match *value {
            Value::Str(ref s) => Some(Self::Str(s.clone())),
            Value::Int(i) => Some(Self::Int(i)),
            Value::Float(f) => Some(Self::from_f64(f)),
            _ => None,
        }
    }

    /// Integral numbers become `Int`s, so that `4.0` and `4` are the same key.
    /// All NaNs are the same key.
    pub fn from_f64(f: f64) -> Self {
        if f.fract() == 0.0 && f.abs() < i64::MAX as f64 { return Self::Int(f as i64); }
        if f.is_nan() { return Self::Float(f64::NAN.to_bits()); }
        Self::Float(f.to_bits())
    }

    /// Returns `self` as a [`Value`].
    pub fn to_value(&self) -> Value {
        match self {
            Self::Int(i) => Value::Int(*i),
            Self::Float(bits) => Value::Float(f64::from_bits(*bits)),
            Self::Str(s) => Value::Str(s.clone()),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Int(i) => i.fmt(f),
            Self::Float(bits) => f64::from_bits(*bits).fmt(f),
            Self::Str(s) => s.fmt(f),
        }
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self { Self::Str(value.into()) }
}

impl From<String> for Key {
    fn from(value: String) -> Self { Self::Str(value.into()) }
}

impl From<Name> for Key {
    fn from(value: Name) -> Self { Self::Str(value) }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self { Self::Int(value) }
}

impl From<i32> for Key {
    fn from(value: i32) -> Self { Self::Int(value.into()) }
}

impl From<f64> for Key {
    fn from(value: f64) -> Self { Self::from_f64(value) }
}

impl From<&Key> for Key {
    fn from(value: &Key) -> Self { value.clone() }
}

// ----------------------------------------------------------------------------

/// Identifies the discriminant field of a tagged value: a record field by
/// name, or a tuple field by position.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum Field {
    Name(Name),
    Index(usize),
}

impl std::default::Default for Field {
    fn default() -> Self { Self::Name(DEFAULT_DISCRIMINANT.into()) }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Name(name) => name.fmt(f),
            Self::Index(index) => write!(f, "#{}", index),
        }
    }
}

impl From<&str> for Field {
    fn from(value: &str) -> Self { Self::Name(value.into()) }
}

impl From<Name> for Field {
    fn from(value: Name) -> Self { Self::Name(value) }
}

impl From<usize> for Field {
    fn from(value: usize) -> Self { Self::Index(value) }
}

// ----------------------------------------------------------------------------

/// Something that carries a discriminant.
///
/// Implementations must not fail: a value with no readable discriminant
/// returns `None`, which never matches any case.
pub trait Tagged {
    /// Read the discriminant of `self` from `field`.
    fn tag(&self, field: &Field) -> Option<Key>;
}

impl Tagged for Map<Value> {
    fn tag(&self, field: &Field) -> Option<Key> {
        let Field::Name(name) = field else { return None; };
        Key::from_value(self.get(name)?)
    }
}

impl Tagged for [Value] {
    fn tag(&self, field: &Field) -> Option<Key> {
        let Field::Index(index) = *field else { return None; };
        Key::from_value(self.get(index)?)
    }
}

impl Tagged for Value {
    fn tag(&self, field: &Field) -> Option<Key> {
        match self {
            Self::Map(map) => (**map).tag(field),
            Self::Slice(values) => (**values).tag(field),
            _ => None,
        }
    }
}

impl<T: Tagged + ?Sized> Tagged for &T {
    fn tag(&self, field: &Field) -> Option<Key> { (**self).tag(field) }
}

// ----------------------------------------------------------------------------
