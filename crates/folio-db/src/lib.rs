//! Metadata persistence for Folio
//!
//! [`MetadataStore`] and [`UserStore`] are the only interfaces the rest of the
//! workspace depends on. Two adapters implement them: the sqlx/Postgres
//! repositories in [`postgres`] and the lock-protected maps in [`memory`].

pub mod memory;
pub mod postgres;
pub mod store;

pub use memory::{InMemoryMetadataStore, InMemoryUserStore};
pub use postgres::{
    ContactMessageRepository, PgMetadataStore, PhotoRepository, SectionRepository,
    StatsRepository, UserRepository,
};
pub use store::{MetadataStore, UserStore};
