use axum::Router;

pub mod product_materials;
pub mod production_plan;
pub mod products;
pub mod raw_materials;
pub mod system;

/// Router for everything under the `/api` prefix.
pub fn router() -> Router {
    Router::new()
        .nest("/products", products::router())
        .nest("/raw-materials", raw_materials::router())
        .nest("/product-materials", product_materials::router())
        .nest("/production-plan", production_plan::router())
}
