use std::sync::Arc;

use axum::{extract::Extension, routing::get, Json, Router};

use prodplan_planning::ProductionPlan;

use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new().route("/", get(production_plan))
}

/// Greedy plan over the current catalog. Read-only: stock is not consumed.
pub async fn production_plan(Extension(services): Extension<Arc<AppServices>>) -> Json<ProductionPlan> {
    Json(services.planner.run())
}
