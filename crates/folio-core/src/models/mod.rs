//! Data models for the application
//!
//! One sub-module per domain entity. Request DTOs live next to the entity they
//! create or modify.

mod contact;
mod photo;
mod section;
mod stats;
mod user;

pub use contact::*;
pub use photo::*;
pub use section::*;
pub use stats::*;
pub use user::*;

use serde::{Deserialize, Deserializer};

/// Deserialize a field where `null` and "absent" mean different things.
///
/// Use together with `#[serde(default)]`: absent yields `None`, `null` yields
/// `Some(None)`, a value yields `Some(Some(v))`.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}
