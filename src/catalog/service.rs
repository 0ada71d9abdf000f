use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use super::models::{Book, BookPatch, Collection, CollectionPatch, NewBook, QueryFilter};

/// Failures a catalog store can report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("{entity} '{id}' not found")]
    NotFound { entity: &'static str, id: String },

    #[error("{entity} '{id}' already exists")]
    AlreadyExists { entity: &'static str, id: String },

    #[error("book '{book}' is not a member of collection '{collection}'")]
    NotAMember { collection: String, book: String },

    #[error("catalog store unavailable: {0}")]
    Unavailable(String),
}

impl ServiceError {
    pub fn book_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "book",
            id: id.into(),
        }
    }

    pub fn collection_not_found(name: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "collection",
            id: name.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// The operations a backing store must provide to serve the catalog API.
///
/// Handlers check existence before every mutation on a named entity and do
/// not rely on implementations to do it atomically; a mutation racing a
/// concurrent delete may therefore observe a missing entity.
#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn get_book(&self, id: &str) -> ServiceResult<Book>;

    /// Persist a new book and return its assigned identifier.
    async fn insert_book(&self, book: NewBook) -> ServiceResult<String>;

    /// Persist a new collection; the name must be unused.
    async fn insert_collection(&self, collection: Collection) -> ServiceResult<()>;

    async fn get_collection(&self, name: &str) -> ServiceResult<Collection>;

    /// Add a book to a collection. Adding an existing member succeeds.
    async fn collect(&self, collection: &str, book_id: &str) -> ServiceResult<()>;

    /// Membership test; an unknown book or collection is simply `false`.
    async fn belongs_to(&self, collection: &str, book_id: &str) -> bool;

    /// Remove a book from a collection it currently belongs to.
    async fn discard(&self, collection: &str, book_id: &str) -> ServiceResult<()>;

    /// Remove a book along with all of its memberships.
    async fn delete_book(&self, id: &str) -> ServiceResult<()>;

    /// Remove a collection along with all of its memberships.
    async fn delete_collection(&self, name: &str) -> ServiceResult<()>;

    async fn get_all_collections(&self) -> ServiceResult<Vec<Collection>>;

    /// Books matching every non-empty predicate in `filter`, capped by
    /// `filter.max` when it is positive.
    async fn query(&self, filter: &QueryFilter) -> ServiceResult<Vec<Book>>;

    /// Merge the present fields of `patch` and return the updated book.
    async fn update_book(&self, id: &str, patch: BookPatch) -> ServiceResult<Book>;

    /// Merge the present fields of `patch` and return the updated collection.
    async fn update_collection(
        &self,
        name: &str,
        patch: CollectionPatch,
    ) -> ServiceResult<Collection>;
}

/// Handle shared by every handler.
pub type SharedCatalog = Arc<dyn CatalogService>;
