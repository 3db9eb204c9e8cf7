use std::sync::Arc;

use prodplan_api::app::{self, services::AppServices};
use reqwest::StatusCode;
use serde_json::{json, Value};

struct TestServer {
    base_url: String,
    client: reqwest::Client,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod, fresh in-memory catalog, ephemeral port.
        let app = app::build_app(Arc::new(AppServices::in_memory()));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            client: reqwest::Client::new(),
            handle,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get(&self, path: &str) -> (StatusCode, Value) {
        let res = self.client.get(self.url(path)).send().await.unwrap();
        read(res).await
    }

    async fn post(&self, path: &str, body: Value) -> (StatusCode, Value) {
        let res = self.client.post(self.url(path)).json(&body).send().await.unwrap();
        read(res).await
    }

    async fn put(&self, path: &str, body: Value) -> (StatusCode, Value) {
        let res = self.client.put(self.url(path)).json(&body).send().await.unwrap();
        read(res).await
    }

    async fn delete(&self, path: &str) -> StatusCode {
        self.client.delete(self.url(path)).send().await.unwrap().status()
    }

    async fn create_product(&self, code: &str, price: &str) -> String {
        let (status, body) = self
            .post("/api/products", json!({"code": code, "name": code, "price": price}))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_str().unwrap().to_string()
    }

    async fn create_material(&self, code: &str, stock: &str) -> String {
        let (status, body) = self
            .post(
                "/api/raw-materials",
                json!({"code": code, "name": code, "stock_quantity": stock}),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_str().unwrap().to_string()
    }

    async fn link(&self, product: &str, material: &str, qty: &str) -> (StatusCode, Value) {
        self.post(
            "/api/product-materials",
            json!({"product_id": product, "raw_material_id": material, "quantity_required": qty}),
        )
        .await
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn read(res: reqwest::Response) -> (StatusCode, Value) {
    let status = res.status();
    let text = res.text().await.unwrap();
    let body = if text.is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&text).unwrap()
    };
    (status, body)
}

#[tokio::test]
async fn health_is_public_and_ok() {
    let srv = TestServer::spawn().await;
    let res = srv.client.get(srv.url("/health")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn product_lifecycle_create_update_delete() {
    let srv = TestServer::spawn().await;

    let id = srv.create_product("CHAIR", "12.5").await;

    let (status, body) = srv.get(&format!("/api/products/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], "CHAIR");
    assert_eq!(body["price"], "12.50");

    let (status, body) = srv
        .put(
            &format!("/api/products/{id}"),
            json!({"code": "CHAIR-2", "name": "Chair v2", "price": 15}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], "CHAIR-2");
    assert_eq!(body["price"], "15.00");

    let (_, list) = srv.get("/api/products").await;
    assert_eq!(list["items"].as_array().unwrap().len(), 1);

    assert_eq!(srv.delete(&format!("/api/products/{id}")).await, StatusCode::NO_CONTENT);
    let (status, body) = srv.get(&format!("/api/products/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn invalid_input_is_rejected_with_bad_request() {
    let srv = TestServer::spawn().await;

    let (status, body) = srv
        .post("/api/products", json!({"code": "", "name": "x", "price": "1"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    let (status, _) = srv
        .post("/api/products", json!({"code": "P", "name": "x", "price": "-1"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = srv.post("/api/products", json!({"code": "P"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    let (status, body) = srv.get("/api/products/not-a-uuid").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_id");
}

#[tokio::test]
async fn duplicate_codes_conflict() {
    let srv = TestServer::spawn().await;
    srv.create_product("P1", "1").await;

    let (status, body) = srv
        .post("/api/products", json!({"code": "P1", "name": "again", "price": "2"}))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "conflict");

    srv.create_material("M1", "1").await;
    let (status, _) = srv
        .post(
            "/api/raw-materials",
            json!({"code": "M1", "name": "again", "stock_quantity": "2"}),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn raw_material_stock_adjustment() {
    let srv = TestServer::spawn().await;
    let id = srv.create_material("WOOD", "10").await;

    let (status, body) = srv
        .post(&format!("/api/raw-materials/{id}/adjust"), json!({"delta": "-2.5"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stock_quantity"], "7.500");

    let (status, body) = srv
        .post(&format!("/api/raw-materials/{id}/adjust"), json!({"delta": "-8"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    // A delta far beyond storable precision is a client error, not a crash.
    let (status, body) = srv
        .post(
            &format!("/api/raw-materials/{id}/adjust"),
            json!({"delta": "79228162514264337593543950335"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    let (_, body) = srv.get(&format!("/api/raw-materials/{id}")).await;
    assert_eq!(body["stock_quantity"], "7.500");
}

#[tokio::test]
async fn production_plan_at_storable_maxima_stays_exact() {
    let srv = TestServer::spawn().await;
    for i in 0..8 {
        let p = srv.create_product(&format!("MAX{i}"), "9999999999999.99").await;
        let m = srv.create_material(&format!("M{i}"), "999999999999.999").await;
        let (status, _) = srv.link(&p, &m, "0.001").await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, plan) = srv.get("/api/production-plan").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(plan["items"].as_array().unwrap().len(), 1);
    assert_eq!(plan["total_value"], "792281625142639207718374857.36");
}

#[tokio::test]
async fn requirements_enforce_references_and_uniqueness() {
    let srv = TestServer::spawn().await;
    let p = srv.create_product("P", "1").await;
    let m = srv.create_material("M", "1").await;

    let (status, body) = srv.link(&p, &m, "2").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["product_code"], "P");
    assert_eq!(body["quantity_required"], "2.000");
    let req_id = body["id"].as_str().unwrap().to_string();

    let (status, _) = srv.link(&p, &m, "3").await;
    assert_eq!(status, StatusCode::CONFLICT);

    let missing = srv.create_product("Q", "1").await;
    assert_eq!(srv.delete(&format!("/api/products/{missing}")).await, StatusCode::NO_CONTENT);
    let (status, _) = srv.link(&missing, &m, "1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = srv.link("bogus", &m, "1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_id");

    // Referenced entities cannot be deleted.
    assert_eq!(srv.delete(&format!("/api/products/{p}")).await, StatusCode::CONFLICT);
    assert_eq!(srv.delete(&format!("/api/raw-materials/{m}")).await, StatusCode::CONFLICT);

    let (_, list) = srv.get(&format!("/api/product-materials?product_id={p}")).await;
    assert_eq!(list["items"].as_array().unwrap().len(), 1);

    let (status, body) = srv
        .put(
            &format!("/api/product-materials/{req_id}"),
            json!({"product_id": p, "raw_material_id": m, "quantity_required": "0.5"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["quantity_required"], "0.500");

    assert_eq!(
        srv.delete(&format!("/api/product-materials/{req_id}")).await,
        StatusCode::NO_CONTENT
    );
    assert_eq!(srv.delete(&format!("/api/products/{p}")).await, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn production_plan_prefers_higher_price_and_shares_stock() {
    let srv = TestServer::spawn().await;

    // Two products compete for 10 units of one material.
    let a = srv.create_product("A", "20").await;
    let b = srv.create_product("B", "5").await;
    let m = srv.create_material("M", "10").await;
    srv.link(&a, &m, "3").await;
    srv.link(&b, &m, "1").await;

    let (status, plan) = srv.get("/api/production-plan").await;
    assert_eq!(status, StatusCode::OK);

    let items = plan["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["product_code"], "A");
    assert_eq!(items[0]["units"], 3);
    assert_eq!(items[0]["unit_price"], "20.00");
    assert_eq!(items[0]["total_value"], "60.00");
    assert_eq!(items[1]["product_code"], "B");
    assert_eq!(items[1]["units"], 1);
    assert_eq!(plan["total_value"], "65.00");

    // Planning does not consume stock.
    let (_, material) = srv.get(&format!("/api/raw-materials/{m}")).await;
    assert_eq!(material["stock_quantity"], "10.000");
}

#[tokio::test]
async fn empty_catalog_yields_empty_plan() {
    let srv = TestServer::spawn().await;
    let (status, plan) = srv.get("/api/production-plan").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(plan, json!({"items": [], "total_value": "0.00"}));
}
