//! Catalog test double and request helpers for handler tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use tower::ServiceExt;

use crate::catalog::{
    Book, BookPatch, CatalogService, Collection, CollectionPatch, MemoryCatalog, NewBook,
    QueryFilter, ServiceError, ServiceResult,
};

/// Wraps [`MemoryCatalog`], records every call by operation name and can be
/// told to fail one operation with a store error.
#[derive(Default)]
pub struct RecordingCatalog {
    inner: MemoryCatalog,
    calls: Mutex<Vec<&'static str>>,
    failing: Mutex<Option<&'static str>>,
}

impl RecordingCatalog {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn fail_on(&self, operation: &'static str) {
        *self.failing.lock().unwrap() = Some(operation);
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, operation: &'static str) -> ServiceResult<()> {
        self.calls.lock().unwrap().push(operation);
        if *self.failing.lock().unwrap() == Some(operation) {
            return Err(ServiceError::Unavailable(format!("{operation} exploded")));
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogService for RecordingCatalog {
    async fn get_book(&self, id: &str) -> ServiceResult<Book> {
        self.record("get_book")?;
        self.inner.get_book(id).await
    }

    async fn insert_book(&self, book: NewBook) -> ServiceResult<String> {
        self.record("insert_book")?;
        self.inner.insert_book(book).await
    }

    async fn insert_collection(&self, collection: Collection) -> ServiceResult<()> {
        self.record("insert_collection")?;
        self.inner.insert_collection(collection).await
    }

    async fn get_collection(&self, name: &str) -> ServiceResult<Collection> {
        self.record("get_collection")?;
        self.inner.get_collection(name).await
    }

    async fn collect(&self, collection: &str, book_id: &str) -> ServiceResult<()> {
        self.record("collect")?;
        self.inner.collect(collection, book_id).await
    }

    async fn belongs_to(&self, collection: &str, book_id: &str) -> bool {
        if self.record("belongs_to").is_err() {
            return false;
        }
        self.inner.belongs_to(collection, book_id).await
    }

    async fn discard(&self, collection: &str, book_id: &str) -> ServiceResult<()> {
        self.record("discard")?;
        self.inner.discard(collection, book_id).await
    }

    async fn delete_book(&self, id: &str) -> ServiceResult<()> {
        self.record("delete_book")?;
        self.inner.delete_book(id).await
    }

    async fn delete_collection(&self, name: &str) -> ServiceResult<()> {
        self.record("delete_collection")?;
        self.inner.delete_collection(name).await
    }

    async fn get_all_collections(&self) -> ServiceResult<Vec<Collection>> {
        self.record("get_all_collections")?;
        self.inner.get_all_collections().await
    }

    async fn query(&self, filter: &QueryFilter) -> ServiceResult<Vec<Book>> {
        self.record("query")?;
        self.inner.query(filter).await
    }

    async fn update_book(&self, id: &str, patch: BookPatch) -> ServiceResult<Book> {
        self.record("update_book")?;
        self.inner.update_book(id, patch).await
    }

    async fn update_collection(
        &self,
        name: &str,
        patch: CollectionPatch,
    ) -> ServiceResult<Collection> {
        self.record("update_collection")?;
        self.inner.update_collection(name, patch).await
    }
}

/// Send one request through `router`, returning the status and JSON body.
pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = router
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}
