//! Requirement edges: which raw material, and how much of it, one unit of a product consumes.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Extension, Path, Query,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use prodplan_core::{ProductId, RequirementId};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_requirements).post(create_requirement))
        .route(
            "/:id",
            get(get_requirement)
                .put(update_requirement)
                .delete(delete_requirement),
        )
}

pub async fn list_requirements(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<dto::RequirementFilter>, QueryRejection>,
) -> Response {
    let Query(filter) = match query {
        Ok(q) => q,
        Err(rej) => return errors::query_rejection_to_response(rej),
    };
    let product_id = match filter.product_id.as_deref().map(errors::parse_id::<ProductId>) {
        Some(Ok(id)) => Some(id),
        Some(Err(res)) => return res,
        None => None,
    };

    let items = services
        .catalog
        .list_requirements(product_id)
        .iter()
        .map(dto::requirement_to_json)
        .collect::<Vec<_>>();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn get_requirement(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Response {
    let id: RequirementId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    match services.catalog.get_requirement(id) {
        Ok(d) => (StatusCode::OK, Json(dto::requirement_to_json(&d))).into_response(),
        Err(e) => errors::domain_error_to_response(e, "product material"),
    }
}

pub async fn create_requirement(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::RequirementRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match body {
        Ok(b) => b,
        Err(rej) => return errors::json_rejection_to_response(rej),
    };
    let input = match req.into_input() {
        Ok(i) => i,
        Err(res) => return res,
    };
    // NotFound here means one of the referenced ends is missing.
    match services.catalog.create_requirement(&input) {
        Ok(d) => (StatusCode::CREATED, Json(dto::requirement_to_json(&d))).into_response(),
        Err(e) => errors::domain_error_to_response(e, "product or raw material"),
    }
}

pub async fn update_requirement(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<dto::RequirementRequest>, JsonRejection>,
) -> Response {
    let id: RequirementId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    let Json(req) = match body {
        Ok(b) => b,
        Err(rej) => return errors::json_rejection_to_response(rej),
    };
    let input = match req.into_input() {
        Ok(i) => i,
        Err(res) => return res,
    };
    match services.catalog.update_requirement(id, &input) {
        Ok(d) => (StatusCode::OK, Json(dto::requirement_to_json(&d))).into_response(),
        Err(e) => errors::domain_error_to_response(e, "product material"),
    }
}

pub async fn delete_requirement(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Response {
    let id: RequirementId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    match services.catalog.delete_requirement(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e, "product material"),
    }
}
