use std::rc::{Rc};

/// Represents the name of a field of a record, or a symbol.
pub type Name = Rc<str>;

/// Represents a map from `Name` to `T`.
pub type Map<T> = std::collections::HashMap<Name, T>;

/// The discriminant field used when the caller does not name one.
pub const DEFAULT_DISCRIMINANT: &str = "kind";

// ----------------------------------------------------------------------------

mod repr;
pub use repr::{Value};

mod key;
pub use key::{Key, Field, Tagged};
