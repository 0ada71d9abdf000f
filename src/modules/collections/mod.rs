pub mod handlers;

use async_trait::async_trait;
use axum::{
    routing::{get, post},
    Router,
};
use bookshelf_kernel::{InitCtx, Module};
use serde_json::json;

use crate::catalog::SharedCatalog;
use crate::modules::openapi::{envelope_of, error_responses};

/// Named collections and their book memberships
pub struct CollectionsModule {
    catalog: SharedCatalog,
}

impl CollectionsModule {
    pub fn new(catalog: SharedCatalog) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl Module for CollectionsModule {
    fn name(&self) -> &'static str {
        "collections"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let existing = self.catalog.get_all_collections().await?;
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            collections = existing.len(),
            "collections module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route(
                "/",
                get(handlers::list_collections).post(handlers::create_collection),
            )
            .route(
                "/{name}",
                get(handlers::get_collection)
                    .put(handlers::update_collection)
                    .delete(handlers::delete_collection),
            )
            .route(
                "/{name}/books/{id}",
                post(handlers::collect_book).delete(handlers::discard_book),
            )
            .with_state(self.catalog.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let name_param = json!({
            "name": "name",
            "in": "path",
            "required": true,
            "schema": { "type": "string" }
        });
        let id_param = json!({
            "name": "id",
            "in": "path",
            "required": true,
            "schema": { "type": "string" }
        });
        let collection_ref = json!({ "$ref": "#/components/schemas/Collection" });

        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List collections",
                        "tags": ["Collections"],
                        "responses": error_responses(json!({
                            "200": envelope_of("Every collection", json!({
                                "type": "array",
                                "items": collection_ref
                            }))
                        }))
                    },
                    "post": {
                        "summary": "Create a collection",
                        "tags": ["Collections"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": { "schema": collection_ref }
                            }
                        },
                        "responses": error_responses(json!({
                            "201": envelope_of("Created", json!({}))
                        }))
                    }
                },
                "/{name}": {
                    "get": {
                        "summary": "Get a collection",
                        "tags": ["Collections"],
                        "parameters": [name_param],
                        "responses": error_responses(json!({
                            "200": envelope_of("The collection", collection_ref.clone())
                        }))
                    },
                    "put": {
                        "summary": "Update a collection's description",
                        "tags": ["Collections"],
                        "parameters": [name_param],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/CollectionPatch" }
                                }
                            }
                        },
                        "responses": error_responses(json!({
                            "200": envelope_of("The updated collection", collection_ref.clone())
                        }))
                    },
                    "delete": {
                        "summary": "Delete a collection and its memberships",
                        "tags": ["Collections"],
                        "parameters": [name_param],
                        "responses": error_responses(json!({
                            "200": envelope_of("Deleted", json!({}))
                        }))
                    }
                },
                "/{name}/books/{id}": {
                    "post": {
                        "summary": "Add a book to a collection",
                        "tags": ["Collections"],
                        "parameters": [name_param, id_param],
                        "responses": error_responses(json!({
                            "200": envelope_of("Collected", json!({}))
                        }))
                    },
                    "delete": {
                        "summary": "Remove a book from a collection",
                        "tags": ["Collections"],
                        "parameters": [name_param, id_param],
                        "responses": error_responses(json!({
                            "200": envelope_of("Discarded", json!({}))
                        }))
                    }
                }
            },
            "components": {
                "schemas": {
                    "Collection": {
                        "type": "object",
                        "properties": {
                            "name": { "type": "string" },
                            "description": { "type": "string" }
                        },
                        "required": ["name"]
                    },
                    "CollectionPatch": {
                        "type": "object",
                        "description": "`name` must be absent or empty.",
                        "properties": {
                            "name": { "type": "string" },
                            "description": { "type": "string" }
                        }
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "collections module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "collections module stopped");
        Ok(())
    }
}

/// Create a new instance of the collections module
pub fn create_module(catalog: SharedCatalog) -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(CollectionsModule::new(catalog))
}
