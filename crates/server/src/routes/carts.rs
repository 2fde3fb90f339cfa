use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use common::types::Message;
use serde::{Deserialize, Serialize};
use service::carts::Cart;

use crate::errors::JsonApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CartCreated {
    pub cart: Cart,
    pub message: &'static str,
}

/// Optional body of `POST /api/carts/:cid/product/:pid`.
#[derive(Debug, Deserialize)]
pub struct AddToCartInput {
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

fn default_quantity() -> i64 { 1 }

impl Default for AddToCartInput {
    fn default() -> Self {
        Self { quantity: default_quantity() }
    }
}

impl AddToCartInput {
    /// An empty body means "one unit"; anything else must be valid JSON.
    fn from_body(body: &[u8]) -> Result<Self, JsonApiError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body).map_err(|e| JsonApiError::bad_request(format!("invalid body: {e}")))
    }

    fn quantity(&self) -> Result<u32, JsonApiError> {
        match u32::try_from(self.quantity) {
            Ok(q) if q >= 1 => Ok(q),
            _ => Err(JsonApiError::bad_request("quantity must be a positive integer")),
        }
    }
}

#[utoipa::path(get, path = "/api/carts", tag = "carts", responses((status = 200, description = "All carts", body = [crate::openapi::CartDoc])))]
pub async fn list(State(state): State<AppState>) -> Json<Vec<Cart>> {
    Json(state.carts.list().await)
}

#[utoipa::path(post, path = "/api/carts", tag = "carts", responses((status = 201, description = "Created")))]
pub async fn create(State(state): State<AppState>) -> Result<(StatusCode, Json<CartCreated>), JsonApiError> {
    let cart = state.carts.create().await?;
    Ok((StatusCode::CREATED, Json(CartCreated { cart, message: "Cart created successfully" })))
}

#[utoipa::path(
    get, path = "/api/carts/{cid}", tag = "carts",
    params(("cid" = u64, Path, description = "Cart id")),
    responses(
        (status = 200, description = "Cart", body = crate::openapi::CartDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(State(state): State<AppState>, Path(cid): Path<u64>) -> Result<Json<Cart>, JsonApiError> {
    Ok(Json(state.carts.get(cid).await?))
}

#[utoipa::path(
    delete, path = "/api/carts/{cid}", tag = "carts",
    params(("cid" = u64, Path, description = "Cart id")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::MessageDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(State(state): State<AppState>, Path(cid): Path<u64>) -> Result<Json<Message>, JsonApiError> {
    state.carts.remove(cid).await?;
    Ok(Json(Message::new("Cart deleted successfully")))
}

#[utoipa::path(
    post, path = "/api/carts/{cid}/product/{pid}", tag = "carts",
    params(
        ("cid" = u64, Path, description = "Cart id"),
        ("pid" = u64, Path, description = "Product id")
    ),
    request_body = crate::openapi::AddToCartDoc,
    responses(
        (status = 200, description = "Added", body = crate::openapi::MessageDoc),
        (status = 400, description = "Invalid quantity", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Cart or product not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn add_product(
    State(state): State<AppState>,
    Path((cid, pid)): Path<(u64, u64)>,
    body: Bytes,
) -> Result<Json<Message>, JsonApiError> {
    let input = AddToCartInput::from_body(&body)?;
    let quantity = input.quantity()?;
    state.carts.add_product(cid, pid, quantity).await?;
    Ok(Json(Message::new("Product added to cart successfully")))
}
