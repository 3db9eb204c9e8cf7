use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use prodplan_core::ProductId;
use prodplan_products::ProductInput;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

pub async fn list_products(Extension(services): Extension<Arc<AppServices>>) -> Response {
    let items = services
        .catalog
        .list_products()
        .iter()
        .map(dto::product_to_json)
        .collect::<Vec<_>>();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Response {
    let id: ProductId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    match services.catalog.get_product(id) {
        Ok(p) => (StatusCode::OK, Json(dto::product_to_json(&p))).into_response(),
        Err(e) => errors::domain_error_to_response(e, "product"),
    }
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<ProductInput>, JsonRejection>,
) -> Response {
    let Json(input) = match body {
        Ok(b) => b,
        Err(rej) => return errors::json_rejection_to_response(rej),
    };
    match services.catalog.create_product(&input) {
        Ok(p) => (StatusCode::CREATED, Json(dto::product_to_json(&p))).into_response(),
        Err(e) => errors::domain_error_to_response(e, "product"),
    }
}

pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<ProductInput>, JsonRejection>,
) -> Response {
    let id: ProductId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    let Json(input) = match body {
        Ok(b) => b,
        Err(rej) => return errors::json_rejection_to_response(rej),
    };
    match services.catalog.update_product(id, &input) {
        Ok(p) => (StatusCode::OK, Json(dto::product_to_json(&p))).into_response(),
        Err(e) => errors::domain_error_to_response(e, "product"),
    }
}

pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Response {
    let id: ProductId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    match services.catalog.delete_product(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e, "product"),
    }
}
