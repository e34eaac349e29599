//! Dispatch on the discriminant of a tagged value, and build tagged values
//! from their other fields.
//!
//! A tagged value is anything implementing [`Tagged`]. [`Value`] records are
//! tagged by a named field (`kind` by default) and [`Value`] tuples by a
//! position. A [`Pattern`] maps discriminant values to handlers, and
//! [`dispatch`] calls the one that matches. A [`Factory`] hands out a
//! [`Constructor`] for any discriminant value.

pub mod model;
pub use model::{Name, Map, Key, Field, Tagged, Value, DEFAULT_DISCRIMINANT};

mod dispatch;
pub use dispatch::{Handler, Pattern, dispatch, dispatch_on};

mod factory;
pub use factory::{Constructor, Factory};

pub mod sexpr;
