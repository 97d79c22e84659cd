//! Folio service layer
//!
//! Business rules live here: the ingestion pipeline that turns an upload into
//! a stored file plus a photo record, and the gallery read side that joins
//! photos with their sections. Handlers in folio-api stay thin.

pub mod gallery;
pub mod pipeline;

pub use gallery::GalleryService;
pub use pipeline::{IngestRequest, IngestionPipeline};
