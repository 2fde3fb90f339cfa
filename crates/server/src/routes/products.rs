use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use service::pagination::Limit;
use service::products::{NewProduct, Product, ProductPatch, ProductUpdated};
use tracing::info;

use crate::errors::JsonApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Return only the first `limit` products; ignored unless positive.
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub product: Product,
    pub message: &'static str,
}

#[utoipa::path(
    get, path = "/api/products", tag = "products",
    params(ListQuery),
    responses((status = 200, description = "Products in stored order", body = [crate::openapi::ProductDoc]))
)]
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<Product>>, JsonApiError> {
    let Query(q) = query?;
    let products = state.products.list(Limit(q.limit).normalize()).await;
    info!(count = products.len(), limit = ?q.limit, "list products");
    Ok(Json(products))
}

#[utoipa::path(
    get, path = "/api/products/{id}", tag = "products",
    params(("id" = u64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product", body = crate::openapi::ProductDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(State(state): State<AppState>, Path(id): Path<u64>) -> Result<Json<Product>, JsonApiError> {
    Ok(Json(state.products.get(id).await?))
}

#[utoipa::path(
    post, path = "/api/products", tag = "products",
    request_body = crate::openapi::NewProductDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Missing or mistyped field, or duplicate code", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<NewProduct>, JsonRejection>,
) -> Result<(StatusCode, Json<ProductResponse>), JsonApiError> {
    let Json(input) = body?;
    let product = state.products.add(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ProductResponse { product, message: "Product added successfully" }),
    ))
}

#[utoipa::path(
    put, path = "/api/products/{id}", tag = "products",
    params(("id" = u64, Path, description = "Product id")),
    request_body = crate::openapi::ProductPatchDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Mistyped field or duplicate code", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    body: Result<Json<ProductPatch>, JsonRejection>,
) -> Result<Json<ProductUpdated>, JsonApiError> {
    let Json(patch) = body?;
    Ok(Json(state.products.update(id, patch).await?))
}

#[utoipa::path(
    delete, path = "/api/products/{id}", tag = "products",
    params(("id" = u64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Deleted; echoes the removed product"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<u64>) -> Result<Json<ProductResponse>, JsonApiError> {
    let product = state.products.remove(id).await?;
    Ok(Json(ProductResponse { product, message: "Product deleted successfully" }))
}
