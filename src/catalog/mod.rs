//! Catalog domain: entities, the query decoder, the store contract and its
//! in-memory implementation.

pub mod memory;
pub mod models;
pub mod query;
pub mod service;

pub use memory::MemoryCatalog;
pub use models::{Book, BookPatch, Collection, CollectionPatch, NewBook, QueryFilter};
pub use query::{decode, DecodeError};
pub use service::{CatalogService, ServiceError, ServiceResult, SharedCatalog};
