//! In-process catalog store.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::models::{Book, BookPatch, Collection, CollectionPatch, NewBook, QueryFilter};
use super::service::{CatalogService, ServiceError, ServiceResult};

#[derive(Debug, Default)]
struct CatalogState {
    /// Keyed by UUIDv7 id, so iteration follows creation order.
    books: BTreeMap<String, Book>,
    collections: BTreeMap<String, Collection>,
    /// `(collection name, book id)`
    memberships: BTreeSet<(String, String)>,
}

impl CatalogState {
    fn require_book(&self, id: &str) -> ServiceResult<()> {
        if self.books.contains_key(id) {
            Ok(())
        } else {
            Err(ServiceError::book_not_found(id))
        }
    }

    fn require_collection(&self, name: &str) -> ServiceResult<()> {
        if self.collections.contains_key(name) {
            Ok(())
        } else {
            Err(ServiceError::collection_not_found(name))
        }
    }

    fn is_member(&self, collection: &str, book_id: &str) -> bool {
        self.memberships
            .contains(&(collection.to_owned(), book_id.to_owned()))
    }
}

/// [`CatalogService`] backed by maps behind a single lock.
///
/// Each call is atomic with respect to other calls; sequences of calls are
/// not.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    state: RwLock<CatalogState>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogService for MemoryCatalog {
    async fn get_book(&self, id: &str) -> ServiceResult<Book> {
        self.state
            .read()
            .await
            .books
            .get(id)
            .cloned()
            .ok_or_else(|| ServiceError::book_not_found(id))
    }

    async fn insert_book(&self, book: NewBook) -> ServiceResult<String> {
        let id = Uuid::now_v7().to_string();
        let mut state = self.state.write().await;
        state.books.insert(id.clone(), book.into_book(id.clone()));
        Ok(id)
    }

    async fn insert_collection(&self, collection: Collection) -> ServiceResult<()> {
        let mut state = self.state.write().await;
        if state.collections.contains_key(&collection.name) {
            return Err(ServiceError::AlreadyExists {
                entity: "collection",
                id: collection.name,
            });
        }
        state
            .collections
            .insert(collection.name.clone(), collection);
        Ok(())
    }

    async fn get_collection(&self, name: &str) -> ServiceResult<Collection> {
        self.state
            .read()
            .await
            .collections
            .get(name)
            .cloned()
            .ok_or_else(|| ServiceError::collection_not_found(name))
    }

    async fn collect(&self, collection: &str, book_id: &str) -> ServiceResult<()> {
        let mut state = self.state.write().await;
        state.require_book(book_id)?;
        state.require_collection(collection)?;
        state
            .memberships
            .insert((collection.to_owned(), book_id.to_owned()));
        Ok(())
    }

    async fn belongs_to(&self, collection: &str, book_id: &str) -> bool {
        self.state.read().await.is_member(collection, book_id)
    }

    async fn discard(&self, collection: &str, book_id: &str) -> ServiceResult<()> {
        let mut state = self.state.write().await;
        state.require_book(book_id)?;
        state.require_collection(collection)?;
        if !state
            .memberships
            .remove(&(collection.to_owned(), book_id.to_owned()))
        {
            return Err(ServiceError::NotAMember {
                collection: collection.to_owned(),
                book: book_id.to_owned(),
            });
        }
        Ok(())
    }

    async fn delete_book(&self, id: &str) -> ServiceResult<()> {
        let mut state = self.state.write().await;
        if state.books.remove(id).is_none() {
            return Err(ServiceError::book_not_found(id));
        }
        state.memberships.retain(|(_, book)| book != id);
        Ok(())
    }

    async fn delete_collection(&self, name: &str) -> ServiceResult<()> {
        let mut state = self.state.write().await;
        if state.collections.remove(name).is_none() {
            return Err(ServiceError::collection_not_found(name));
        }
        state.memberships.retain(|(collection, _)| collection != name);
        Ok(())
    }

    async fn get_all_collections(&self) -> ServiceResult<Vec<Collection>> {
        Ok(self
            .state
            .read()
            .await
            .collections
            .values()
            .cloned()
            .collect())
    }

    async fn query(&self, filter: &QueryFilter) -> ServiceResult<Vec<Book>> {
        let state = self.state.read().await;
        let matching = state.books.values().filter(|book| {
            filter.matches(book)
                && (filter.collection.is_empty() || state.is_member(&filter.collection, &book.id))
        });

        let books = match filter.limit() {
            Some(max) => matching.take(max).cloned().collect(),
            None => matching.cloned().collect(),
        };
        Ok(books)
    }

    async fn update_book(&self, id: &str, patch: BookPatch) -> ServiceResult<Book> {
        let mut state = self.state.write().await;
        let book = state
            .books
            .get_mut(id)
            .ok_or_else(|| ServiceError::book_not_found(id))?;
        patch.apply(book);
        Ok(book.clone())
    }

    async fn update_collection(
        &self,
        name: &str,
        patch: CollectionPatch,
    ) -> ServiceResult<Collection> {
        let mut state = self.state.write().await;
        let collection = state
            .collections
            .get_mut(name)
            .ok_or_else(|| ServiceError::collection_not_found(name))?;
        patch.apply(collection);
        Ok(collection.clone())
    }
}
