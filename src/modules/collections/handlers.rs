use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use bookshelf_http::{ApiResponse, AppError};

use crate::catalog::{Collection, CollectionPatch, SharedCatalog};
use crate::modules::errors::missing;

const BOOK_MISSING: &str = "book doesn't exist";
const COLLECTION_MISSING: &str = "collection doesn't exist";

/// `POST /collections`
pub async fn create_collection(
    State(catalog): State<SharedCatalog>,
    payload: Result<Json<Collection>, JsonRejection>,
) -> Result<ApiResponse<()>, AppError> {
    let Json(collection) = payload?;

    if collection.name.is_empty() {
        return Err(AppError::invalid(
            "missing_name",
            "collection must have a name",
        ));
    }

    let name = collection.name.clone();
    catalog.insert_collection(collection).await?;
    tracing::info!(collection = %name, "collection created");

    Ok(ApiResponse::created_empty())
}

/// `GET /collections`
pub async fn list_collections(
    State(catalog): State<SharedCatalog>,
) -> Result<ApiResponse<Vec<Collection>>, AppError> {
    let collections = catalog.get_all_collections().await?;
    Ok(ApiResponse::ok(collections))
}

/// `GET /collections/{name}`
pub async fn get_collection(
    State(catalog): State<SharedCatalog>,
    Path(name): Path<String>,
) -> Result<ApiResponse<Collection>, AppError> {
    let collection = catalog
        .get_collection(&name)
        .await
        .map_err(missing(COLLECTION_MISSING))?;
    Ok(ApiResponse::ok(collection))
}

/// `PUT /collections/{name}`
pub async fn update_collection(
    State(catalog): State<SharedCatalog>,
    Path(name): Path<String>,
    payload: Result<Json<CollectionPatch>, JsonRejection>,
) -> Result<ApiResponse<Collection>, AppError> {
    catalog
        .get_collection(&name)
        .await
        .map_err(missing(COLLECTION_MISSING))?;

    let Json(patch) = payload?;

    if patch.changes_identifier() {
        return Err(AppError::invalid(
            "immutable_name",
            "cannot update collection name",
        ));
    }
    if patch.is_empty() {
        return Err(AppError::invalid("empty_update", "no fields provided"));
    }

    let collection = catalog.update_collection(&name, patch).await?;
    tracing::info!(collection = %name, "collection updated");

    Ok(ApiResponse::ok(collection))
}

/// `DELETE /collections/{name}`
pub async fn delete_collection(
    State(catalog): State<SharedCatalog>,
    Path(name): Path<String>,
) -> Result<ApiResponse<()>, AppError> {
    catalog
        .get_collection(&name)
        .await
        .map_err(missing(COLLECTION_MISSING))?;

    catalog.delete_collection(&name).await?;
    tracing::info!(collection = %name, "collection deleted");

    Ok(ApiResponse::success())
}

/// `POST /collections/{name}/books/{id}`
pub async fn collect_book(
    State(catalog): State<SharedCatalog>,
    Path((name, book_id)): Path<(String, String)>,
) -> Result<ApiResponse<()>, AppError> {
    catalog
        .get_book(&book_id)
        .await
        .map_err(missing(BOOK_MISSING))?;
    catalog
        .get_collection(&name)
        .await
        .map_err(missing(COLLECTION_MISSING))?;

    catalog.collect(&name, &book_id).await?;
    tracing::info!(collection = %name, book_id = %book_id, "book collected");

    Ok(ApiResponse::success())
}

/// `DELETE /collections/{name}/books/{id}`
pub async fn discard_book(
    State(catalog): State<SharedCatalog>,
    Path((name, book_id)): Path<(String, String)>,
) -> Result<ApiResponse<()>, AppError> {
    catalog
        .get_book(&book_id)
        .await
        .map_err(missing(BOOK_MISSING))?;
    catalog
        .get_collection(&name)
        .await
        .map_err(missing(COLLECTION_MISSING))?;

    if !catalog.belongs_to(&name, &book_id).await {
        return Err(AppError::invalid(
            "not_a_member",
            "book isn't a part of this collection",
        ));
    }

    catalog.discard(&name, &book_id).await?;
    tracing::info!(collection = %name, book_id = %book_id, "book discarded");

    Ok(ApiResponse::success())
}
