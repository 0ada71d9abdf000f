use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use bookshelf_http::{ApiResponse, AppError};

use crate::catalog::{decode, Book, BookPatch, NewBook, SharedCatalog};
use crate::modules::errors::missing;

const BOOK_MISSING: &str = "book doesn't exist";

/// `GET /books/{id}`
pub async fn get_book(
    State(catalog): State<SharedCatalog>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Book>, AppError> {
    let book = catalog.get_book(&id).await.map_err(missing(BOOK_MISSING))?;
    Ok(ApiResponse::ok(book))
}

/// `POST /books`
pub async fn create_book(
    State(catalog): State<SharedCatalog>,
    payload: Result<Json<NewBook>, JsonRejection>,
) -> Result<ApiResponse<String>, AppError> {
    let Json(book) = payload?;

    if book.title.is_empty() {
        return Err(AppError::invalid("missing_title", "book must have a title"));
    }

    let id = catalog.insert_book(book).await?;
    tracing::info!(book_id = %id, "book created");

    Ok(ApiResponse::created(id))
}

/// `PUT /books/{id}`
pub async fn update_book(
    State(catalog): State<SharedCatalog>,
    Path(id): Path<String>,
    payload: Result<Json<BookPatch>, JsonRejection>,
) -> Result<ApiResponse<Book>, AppError> {
    catalog.get_book(&id).await.map_err(missing(BOOK_MISSING))?;

    let Json(patch) = payload?;

    if patch.changes_identifier() {
        return Err(AppError::invalid("immutable_id", "cannot update book ID"));
    }
    if patch.is_empty() {
        return Err(AppError::invalid("empty_update", "no fields provided"));
    }
    if patch.title.as_deref() == Some("") {
        return Err(AppError::invalid("missing_title", "book must have a title"));
    }

    let book = catalog.update_book(&id, patch).await?;
    tracing::info!(book_id = %id, "book updated");

    Ok(ApiResponse::ok(book))
}

/// `DELETE /books/{id}`
pub async fn delete_book(
    State(catalog): State<SharedCatalog>,
    Path(id): Path<String>,
) -> Result<ApiResponse<()>, AppError> {
    catalog.get_book(&id).await.map_err(missing(BOOK_MISSING))?;

    catalog.delete_book(&id).await?;
    tracing::info!(book_id = %id, "book deleted");

    Ok(ApiResponse::success())
}

/// `GET /books?titleFilter=..&max=..`
pub async fn query_books(
    State(catalog): State<SharedCatalog>,
    params: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<ApiResponse<Vec<Book>>, AppError> {
    let Query(params) = params?;
    let filter = decode(params)?;

    let books = catalog.query(&filter).await?;
    tracing::debug!(matched = books.len(), "book query served");

    Ok(ApiResponse::ok(books))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use crate::modules::books::BooksModule;
    use crate::modules::test_support::{send, RecordingCatalog};
    use bookshelf_kernel::Module;

    fn router(catalog: &Arc<RecordingCatalog>) -> axum::Router {
        BooksModule::new(catalog.clone()).routes()
    }

    async fn create(router: &axum::Router, body: serde_json::Value) -> String {
        let (status, json) = send(router, Method::POST, "/", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED, "{json}");
        json["data"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let catalog = RecordingCatalog::new();
        let router = router(&catalog);

        let (status, json) = send(&router, Method::POST, "/", Some(json!({"title": "Dune"}))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["status"], "created");
        let id = json["data"].as_str().unwrap();
        assert!(!id.is_empty());

        let (status, json) = send(&router, Method::GET, &format!("/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "success");
        assert_eq!(
            json["data"],
            json!({
                "id": id,
                "title": "Dune",
                "description": "",
                "author": "",
                "edition": "",
                "genre": "",
                "publisher": "",
                "pub_date": ""
            })
        );
    }

    #[tokio::test]
    async fn get_unknown_book_is_a_client_error() {
        let catalog = RecordingCatalog::new();
        let (status, json) = send(&router(&catalog), Method::GET, "/missing", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json, json!({"status": "error", "error": "book doesn't exist"}));
    }

    #[tokio::test]
    async fn empty_title_never_reaches_the_store() {
        let catalog = RecordingCatalog::new();
        let router = router(&catalog);

        for body in [json!({}), json!({"title": "", "author": "Anon"})] {
            let (status, json) = send(&router, Method::POST, "/", Some(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(json["error"], "book must have a title");
        }
        assert!(catalog.calls().is_empty());
    }

    #[tokio::test]
    async fn malformed_body_is_a_client_error() {
        let catalog = RecordingCatalog::new();
        let (status, json) =
            send(&router(&catalog), Method::POST, "/", Some(json!(42))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["status"], "error");
        assert!(catalog.calls().is_empty());
    }

    #[tokio::test]
    async fn store_failure_on_insert_is_a_server_error() {
        let catalog = RecordingCatalog::new();
        catalog.fail_on("insert_book");

        let (status, json) =
            send(&router(&catalog), Method::POST, "/", Some(json!({"title": "Dune"}))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "catalog store unavailable: insert_book exploded");
    }

    #[tokio::test]
    async fn update_rejects_identifier_change_and_leaves_book_alone() {
        let catalog = RecordingCatalog::new();
        let router = router(&catalog);
        let id = create(&router, json!({"title": "Dune"})).await;

        let (status, json) = send(
            &router,
            Method::PUT,
            &format!("/{id}"),
            Some(json!({"id": "xyz", "author": "X"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "cannot update book ID");
        assert!(!catalog.calls().contains(&"update_book"));

        let (_, json) = send(&router, Method::GET, &format!("/{id}"), None).await;
        assert_eq!(json["data"]["author"], "");
    }

    #[tokio::test]
    async fn update_rejects_empty_payloads() {
        let catalog = RecordingCatalog::new();
        let router = router(&catalog);
        let id = create(&router, json!({"title": "Dune"})).await;

        for body in [json!({}), json!({"id": ""})] {
            let (status, json) = send(&router, Method::PUT, &format!("/{id}"), Some(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(json["error"], "no fields provided");
        }

        let (status, json) =
            send(&router, Method::PUT, &format!("/{id}"), Some(json!({"title": ""}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "book must have a title");
        assert!(!catalog.calls().contains(&"update_book"));
    }

    #[tokio::test]
    async fn update_checks_existence_before_the_body() {
        let catalog = RecordingCatalog::new();
        let (status, json) = send(
            &router(&catalog),
            Method::PUT,
            "/missing",
            Some(json!({"id": "xyz"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "book doesn't exist");
    }

    #[tokio::test]
    async fn update_merges_and_returns_the_book() {
        let catalog = RecordingCatalog::new();
        let router = router(&catalog);
        let id = create(&router, json!({"title": "Dune", "genre": "sci-fi"})).await;

        let (status, json) = send(
            &router,
            Method::PUT,
            &format!("/{id}"),
            Some(json!({"author": "Frank Herbert", "genre": ""})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["id"], id.as_str());
        assert_eq!(json["data"]["title"], "Dune");
        assert_eq!(json["data"]["author"], "Frank Herbert");
        assert_eq!(json["data"]["genre"], "");
    }

    #[tokio::test]
    async fn delete_checks_existence_first() {
        let catalog = RecordingCatalog::new();
        let router = router(&catalog);

        let (status, _) = send(&router, Method::DELETE, "/missing", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(catalog.calls(), vec!["get_book"]);

        let id = create(&router, json!({"title": "Dune"})).await;
        let (status, json) = send(&router, Method::DELETE, &format!("/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!({"status": "success"}));

        let (status, _) = send(&router, Method::GET, &format!("/{id}"), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn query_filters_and_caps_results() {
        let catalog = RecordingCatalog::new();
        let router = router(&catalog);
        create(&router, json!({"title": "Dune", "author": "Frank Herbert"})).await;
        create(&router, json!({"title": "Emma", "author": "Jane Austen"})).await;
        create(&router, json!({"title": "Persuasion", "author": "Jane Austen"})).await;

        let (status, json) = send(&router, Method::GET, "/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"].as_array().unwrap().len(), 3);

        let (_, json) = send(&router, Method::GET, "/?authorFilter=Jane%20Austen", None).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 2);

        let (_, json) = send(&router, Method::GET, "/?authorFilter=Jane%20Austen&max=1", None).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 1);

        let (_, json) = send(
            &router,
            Method::GET,
            "/?authorFilter=Jane%20Austen&titleFilter=Dune",
            None,
        )
        .await;
        assert_eq!(json["data"], json!([]));
    }

    #[tokio::test]
    async fn query_decode_errors_are_client_errors() {
        let catalog = RecordingCatalog::new();
        let router = router(&catalog);

        let (status, json) = send(&router, Method::GET, "/?max=two", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json["error"],
            "invalid value for 'max': 'two' is not an integer"
        );

        let (status, json) = send(&router, Method::GET, "/?sort=title", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "unknown query parameter(s): 'sort'");

        assert!(catalog.calls().is_empty());
    }
}
