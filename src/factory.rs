use std::cell::{RefCell};
use std::collections::{HashMap};
use std::rc::{Rc};
use std::{fmt};

use super::model::{Key, Field, Value};

/// Builds tagged values of one variant.
#[derive(Debug)]
pub struct Constructor {
    discriminant: Field,
    key: Key,
}

impl Constructor {
    /// The discriminant value attached to everything `self` builds.
    pub fn key(&self) -> &Key { &self.key }

    /// The field in which `self` stores [`Self::key()`].
    pub fn discriminant(&self) -> &Field { &self.discriminant }

    /// Build a tagged value from `fields`.
    ///
    /// With a named discriminant, `fields` should be a record: the result is
    /// `fields` with the discriminant set to `self.key()`, overriding any
    /// field of the same name. With a positional discriminant, `fields`
    /// should be a tuple: the key is inserted at that position, and the gap
    /// (if any) is filled with [`Value::None`]. If the gap cannot be
    /// allocated, the key is appended instead. Fields of the wrong shape are
    /// ignored.
    pub fn build(&self, fields: impl Into<Value>) -> Value {
        let fields = fields.into();
        match &self.discriminant {
            Field::Name(name) => {
                let mut record = fields.as_map().cloned().unwrap_or_default();
                record.insert(name.clone(), self.key.to_value());
                record.into()
            },
            &Field::Index(index) => {
                let mut tuple = fields.as_slice().map_or_else(Vec::new, <[Value]>::to_vec);
                if tuple.len() < index {
                    let gap = index - tuple.len();
                    if let Err(e) = tuple.try_reserve(gap.saturating_add(1)) {
                        log::warn!("Cannot pad a tuple to position {}: {}", index, e);
                        tuple.push(self.key.to_value());
                        return tuple.into();
                    }
                    tuple.resize(index, Value::None);
                }
                tuple.insert(index, self.key.to_value());
                tuple.into()
            },
        }
    }
}

// ----------------------------------------------------------------------------

/// An inexhaustible table of [`Constructor`]s, one per discriminant value.
///
/// Constructors are made on first use and remembered, so asking twice for the
/// same key returns the same `Rc`. Each `Factory` has its own table.
pub struct Factory {
    discriminant: Field,
    constructors: RefCell<HashMap<Key, Rc<Constructor>>>,
}

impl Factory {
    /// A `Factory` that tags values in the `kind` field.
    pub fn new() -> Self { Self::with_discriminant(Field::default()) }

    /// A `Factory` that tags values in `discriminant`.
    pub fn with_discriminant(discriminant: impl Into<Field>) -> Self {
        Self {discriminant: discriminant.into(), constructors: RefCell::new(HashMap::new())}
    }

    pub fn discriminant(&self) -> &Field { &self.discriminant }

    /// Returns the `Constructor` for variant `key`, making it if necessary.
    pub fn get(&self, key: impl Into<Key>) -> Rc<Constructor> {
        let key = key.into();
        let mut constructors = self.constructors.borrow_mut();
        constructors.entry(key).or_insert_with_key(|key| {
            log::trace!("New constructor for {} = {}", self.discriminant, key);
            Rc::new(Constructor {discriminant: self.discriminant.clone(), key: key.clone()})
        }).clone()
    }

    /// The number of constructors made so far.
    pub fn len(&self) -> usize { self.constructors.borrow().len() }

    pub fn is_empty(&self) -> bool { self.len() == 0 }
}

impl std::default::Default for Factory {
    fn default() -> Self { Self::new() }
}

impl fmt::Debug for Factory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Factory")
            .field("discriminant", &self.discriminant)
            .field("len", &self.len())
            .finish()
    }
}

// ----------------------------------------------------------------------------
