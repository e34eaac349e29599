use std::{fmt};
use std::rc::{Rc};

use super::{Name, Map};

/// A dynamically typed value.
///
/// Records and tuples are reference counted and never mutated once built, so
/// cloning a `Value` is cheap and never copies the contents.
#[derive(Clone, PartialEq)]
pub enum Value {
    /// The absence of a value.
    None,

    Bool(bool),

    Int(i64),

    Float(f64),

    /// A string or a symbol.
    Str(Name),

    /// A tuple, whose fields are identified by position.
    Slice(Rc<[Value]>),

    /// A record, whose fields are identified by name.
    Map(Rc<Map<Value>>),
}

impl Value {
    /// Constructs a record from `(name, value)` pairs.
    pub fn record<'n>(fields: impl IntoIterator<Item=(&'n str, Value)>) -> Self {
        Self::Map(Rc::new(fields.into_iter().map(|(name, value)| (Name::from(name), value)).collect()))
    }

    /// Returns `true` if `self` is [`Value::None`].
    pub fn is_none(&self) -> bool { matches!(self, Self::None) }

    pub fn as_str(&self) -> Option<&Name> {
        if let Self::Str(s) = self { Some(s) } else { None }
    }

    pub fn as_slice(&self) -> Option<&[Value]> {
        if let Self::Slice(values) = self { Some(values) } else { None }
    }

    pub fn as_map(&self) -> Option<&Map<Value>> {
        if let Self::Map(map) = self { Some(map) } else { None }
    }

    /// Returns `self` as a number, if it is an `Int` or a `Float`.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::Int(i) => Some(i as f64),
            Self::Float(f) => Some(f),
            _ => None,
        }
    }

    /// Returns the fields of `self` if it is a tuple of size `N`.
    pub fn unpack<const N: usize>(&self) -> Option<&[Value; N]> {
        self.as_slice()?.try_into().ok()
    }
}

impl std::default::Default for Value {
    fn default() -> Self { Value::None }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::None => f.debug_tuple("None").finish(),
            Self::Bool(b) => b.fmt(f),
            Self::Int(i) => i.fmt(f),
            Self::Float(x) => x.fmt(f),
            Self::Str(string) => string.fmt(f),
            Self::Slice(values) => values.fmt(f),
            Self::Map(map) => map.fmt(f),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self { Self::Bool(value) }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self { Self::Int(value) }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self { Self::Int(value.into()) }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self { Self::Float(value) }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self { Self::Str(value.into()) }
}

impl From<Name> for Value {
    fn from(value: Name) -> Self { Self::Str(value) }
}

impl From<Vec<Value>> for Value {
    fn from(fields: Vec<Value>) -> Self { Self::Slice(fields.into()) }
}

impl<const N: usize> From<[Value; N]> for Value {
    fn from(fields: [Value; N]) -> Self { Self::Slice(Rc::new(fields)) }
}

impl From<Map<Value>> for Value {
    fn from(fields: Map<Value>) -> Self { Self::Map(Rc::new(fields)) }
}

// ----------------------------------------------------------------------------
