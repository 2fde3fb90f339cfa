use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ErrorDoc { pub error: String, pub message: Option<String> }

#[derive(ToSchema)]
pub struct MessageDoc { pub message: String }

#[derive(ToSchema)]
pub struct ProductDoc {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub thumbnail: String,
    pub code: String,
    pub stock: i64,
}

/// Every field is required and must be non-empty / non-zero.
#[derive(ToSchema)]
pub struct NewProductDoc {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub thumbnail: String,
    pub code: String,
    pub stock: i64,
}

#[derive(ToSchema)]
pub struct ProductPatchDoc {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub thumbnail: Option<String>,
    pub code: Option<String>,
    pub stock: Option<i64>,
}

#[derive(serde::Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LineItemDoc { pub product_id: u64, pub quantity: u32 }

#[derive(ToSchema)]
pub struct CartDoc { pub id: u64, pub products: Vec<LineItemDoc> }

#[derive(ToSchema)]
pub struct AddToCartDoc { pub quantity: Option<u32> }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::products::list,
        crate::routes::products::get,
        crate::routes::products::create,
        crate::routes::products::update,
        crate::routes::products::delete,
        crate::routes::carts::list,
        crate::routes::carts::create,
        crate::routes::carts::get,
        crate::routes::carts::delete,
        crate::routes::carts::add_product,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorDoc,
            MessageDoc,
            ProductDoc,
            NewProductDoc,
            ProductPatchDoc,
            LineItemDoc,
            CartDoc,
            AddToCartDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "products"),
        (name = "carts")
    )
)]
pub struct ApiDoc;
