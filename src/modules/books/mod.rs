pub mod handlers;

use anyhow::Context;
use async_trait::async_trait;
use axum::{routing::get, Router};
use bookshelf_kernel::{InitCtx, Module};
use serde_json::json;

use crate::catalog::{query::RECOGNIZED_PARAMS, QueryFilter, SharedCatalog};
use crate::modules::openapi::{envelope_of, error_responses};

/// Book CRUD and filtered queries
pub struct BooksModule {
    catalog: SharedCatalog,
}

impl BooksModule {
    pub fn new(catalog: SharedCatalog) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let probe = QueryFilter {
            max: 1,
            ..QueryFilter::default()
        };
        self.catalog
            .query(&probe)
            .await
            .context("catalog store did not answer the startup probe")?;

        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", get(handlers::query_books).post(handlers::create_book))
            .route(
                "/{id}",
                get(handlers::get_book)
                    .put(handlers::update_book)
                    .delete(handlers::delete_book),
            )
            .with_state(self.catalog.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let id_param = json!({
            "name": "id",
            "in": "path",
            "required": true,
            "schema": { "type": "string" }
        });
        let filter_params: Vec<serde_json::Value> = RECOGNIZED_PARAMS
            .iter()
            .map(|param| {
                let kind = if param.integer { "integer" } else { "string" };
                json!({
                    "name": param.name,
                    "in": "query",
                    "required": false,
                    "description": param.description,
                    "schema": { "type": kind }
                })
            })
            .collect();

        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "Query books",
                        "tags": ["Books"],
                        "parameters": filter_params,
                        "responses": error_responses(json!({
                            "200": envelope_of("Books matching every filter", json!({
                                "type": "array",
                                "items": { "$ref": "#/components/schemas/Book" }
                            }))
                        }))
                    },
                    "post": {
                        "summary": "Create a book",
                        "tags": ["Books"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/NewBook" }
                                }
                            }
                        },
                        "responses": error_responses(json!({
                            "201": envelope_of("Identifier of the new book", json!({ "type": "string" }))
                        }))
                    }
                },
                "/{id}": {
                    "get": {
                        "summary": "Get a book",
                        "tags": ["Books"],
                        "parameters": [id_param],
                        "responses": error_responses(json!({
                            "200": envelope_of("The book", json!({ "$ref": "#/components/schemas/Book" }))
                        }))
                    },
                    "put": {
                        "summary": "Update some fields of a book",
                        "tags": ["Books"],
                        "parameters": [id_param],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/BookPatch" }
                                }
                            }
                        },
                        "responses": error_responses(json!({
                            "200": envelope_of("The updated book", json!({ "$ref": "#/components/schemas/Book" }))
                        }))
                    },
                    "delete": {
                        "summary": "Delete a book and its memberships",
                        "tags": ["Books"],
                        "parameters": [id_param],
                        "responses": error_responses(json!({
                            "200": envelope_of("Deleted", json!({}))
                        }))
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": book_schema(true),
                    "NewBook": book_schema(false),
                    "BookPatch": {
                        "type": "object",
                        "description": "Omitted fields are left unchanged; an empty string clears a field. `id` must be absent or empty.",
                        "properties": book_properties(true)
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

fn book_properties(with_id: bool) -> serde_json::Value {
    let mut properties = json!({
        "title": { "type": "string" },
        "description": { "type": "string" },
        "author": { "type": "string" },
        "edition": { "type": "string" },
        "genre": { "type": "string" },
        "publisher": { "type": "string" },
        "pub_date": { "type": "string" }
    });
    if with_id {
        properties["id"] = json!({ "type": "string", "description": "Store-assigned identifier" });
    }
    properties
}

fn book_schema(with_id: bool) -> serde_json::Value {
    json!({
        "type": "object",
        "properties": book_properties(with_id),
        "required": ["title"]
    })
}

/// Create a new instance of the books module
pub fn create_module(catalog: SharedCatalog) -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(BooksModule::new(catalog))
}
