use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use prodplan_core::RawMaterialId;
use prodplan_inventory::RawMaterialInput;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_raw_materials).post(create_raw_material))
        .route(
            "/:id",
            get(get_raw_material)
                .put(update_raw_material)
                .delete(delete_raw_material),
        )
        .route("/:id/adjust", post(adjust_stock))
}

pub async fn list_raw_materials(Extension(services): Extension<Arc<AppServices>>) -> Response {
    let items = services
        .catalog
        .list_raw_materials()
        .iter()
        .map(dto::raw_material_to_json)
        .collect::<Vec<_>>();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn get_raw_material(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Response {
    let id: RawMaterialId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    match services.catalog.get_raw_material(id) {
        Ok(m) => (StatusCode::OK, Json(dto::raw_material_to_json(&m))).into_response(),
        Err(e) => errors::domain_error_to_response(e, "raw material"),
    }
}

pub async fn create_raw_material(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<RawMaterialInput>, JsonRejection>,
) -> Response {
    let Json(input) = match body {
        Ok(b) => b,
        Err(rej) => return errors::json_rejection_to_response(rej),
    };
    match services.catalog.create_raw_material(&input) {
        Ok(m) => (StatusCode::CREATED, Json(dto::raw_material_to_json(&m))).into_response(),
        Err(e) => errors::domain_error_to_response(e, "raw material"),
    }
}

pub async fn update_raw_material(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<RawMaterialInput>, JsonRejection>,
) -> Response {
    let id: RawMaterialId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    let Json(input) = match body {
        Ok(b) => b,
        Err(rej) => return errors::json_rejection_to_response(rej),
    };
    match services.catalog.update_raw_material(id, &input) {
        Ok(m) => (StatusCode::OK, Json(dto::raw_material_to_json(&m))).into_response(),
        Err(e) => errors::domain_error_to_response(e, "raw material"),
    }
}

pub async fn adjust_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<dto::AdjustStockRequest>, JsonRejection>,
) -> Response {
    let id: RawMaterialId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    let Json(req) = match body {
        Ok(b) => b,
        Err(rej) => return errors::json_rejection_to_response(rej),
    };
    match services.catalog.adjust_stock(id, req.delta) {
        Ok(m) => (StatusCode::OK, Json(dto::raw_material_to_json(&m))).into_response(),
        Err(e) => errors::domain_error_to_response(e, "raw material"),
    }
}

pub async fn delete_raw_material(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Response {
    let id: RawMaterialId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    match services.catalog.delete_raw_material(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e, "raw material"),
    }
}
