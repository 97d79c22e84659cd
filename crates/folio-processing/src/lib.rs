//! Folio processing library
//!
//! Upload validation, image normalization and tag parsing. Everything here is
//! pure: no storage and no database access.

pub mod processor;
pub mod tags;
pub mod validator;

pub use processor::{ImageProcessor, NormalizedImage, ProcessingError};
pub use tags::parse_tags;
pub use validator::{MediaValidator, ValidationError};
