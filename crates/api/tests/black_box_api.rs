use std::path::PathBuf;

use menuprofit_inference::PipelineHandle;
use menuprofit_infra::DirectorySource;
use reqwest::StatusCode;
use serde_json::json;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(pipeline: PipelineHandle) -> Self {
        // Build app (same router as prod), but bind to an ephemeral port.
        let app = menuprofit_api::app::build_app(pipeline);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    async fn spawn_ready() -> Self {
        let pipeline = PipelineHandle::new();
        pipeline
            .initialize(&DirectorySource::new(shipped_artifacts()))
            .expect("shipped artifacts load");
        Self::spawn(pipeline).await
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn shipped_artifacts() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../../artifacts"))
}

async fn post_predict(
    srv: &TestServer,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let res = reqwest::Client::new()
        .post(format!("{}/predict", srv.base_url))
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = res.status();
    (status, res.json().await.unwrap())
}

#[tokio::test]
async fn health_and_readiness() {
    let srv = TestServer::spawn_ready().await;
    let client = reqwest::Client::new();

    let res = client.get(format!("{}/health", srv.base_url)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client.get(format!("{}/ready", srv.base_url)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["state"], "ready");
    assert_eq!(body["classifier"], "knn");
}

#[tokio::test]
async fn known_input_returns_label_and_normalized_echo() {
    let srv = TestServer::spawn_ready().await;

    let (status, body) = post_predict(
        &srv,
        json!({"restaurant_id": " R003 ", "menu_category": "Desserts ", "price": 15.5}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let label = body["label"].as_str().unwrap();
    assert!(["Low", "Medium", "High"].contains(&label), "unexpected label {label}");
    assert_eq!(body["input"]["restaurant_id"], "R003");
    assert_eq!(body["input"]["menu_category"], "Desserts");
    assert_eq!(body["input"]["price"], 15.5);
}

#[tokio::test]
async fn unknown_restaurant_is_422_with_field_value_and_allowed_set() {
    let srv = TestServer::spawn_ready().await;

    let (status, body) = post_predict(
        &srv,
        json!({"restaurant_id": "R999", "menu_category": "Desserts", "price": 15.5}),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "unknown_category");
    assert_eq!(body["field"], "restaurant_id");
    assert_eq!(body["value"], "R999");
    assert_eq!(body["allowed"], json!(["R001", "R002", "R003"]));
}

#[tokio::test]
async fn missing_fields_are_400_and_listed() {
    let srv = TestServer::spawn_ready().await;

    let (status, body) = post_predict(&srv, json!({"restaurant_id": "R001"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
    let fields: Vec<&str> = body["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["menu_category", "price"]);
}

#[tokio::test]
async fn negative_price_names_the_price_field() {
    let srv = TestServer::spawn_ready().await;

    let (status, body) = post_predict(
        &srv,
        json!({"restaurant_id": "R001", "menu_category": "Beverages", "price": -3}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "price");
}

#[tokio::test]
async fn malformed_body_is_rejected_as_invalid_json() {
    let srv = TestServer::spawn_ready().await;

    let res = reqwest::Client::new()
        .post(format!("{}/predict", srv.base_url))
        .header("content-type", "application/json")
        .body(r#"{"restaurant_id": "R001", "price": 15.5"#)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_json");
}

#[tokio::test]
async fn non_object_body_is_invalid_json() {
    let srv = TestServer::spawn_ready().await;

    let (status, body) = post_predict(&srv, json!(["R001", "Desserts", 15.5])).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_json");
}

#[tokio::test]
async fn price_sent_as_string_is_a_price_validation_error() {
    let srv = TestServer::spawn_ready().await;

    let (status, body) = post_predict(
        &srv,
        json!({"restaurant_id": "R003", "menu_category": "Desserts", "price": "15.5"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["field"], "price");
    assert_eq!(body["fields"][0]["reason"], "must be a number");
}

#[tokio::test]
async fn numeric_restaurant_id_is_reported_with_other_problems() {
    let srv = TestServer::spawn_ready().await;

    let (status, body) = post_predict(
        &srv,
        json!({"restaurant_id": 3, "menu_category": "  ", "price": 15.5}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
    assert!(body.get("field").is_none());
    assert_eq!(
        body["fields"],
        json!([
            {"field": "restaurant_id", "reason": "must be a string"},
            {"field": "menu_category", "reason": "is required"},
        ])
    );
}

#[tokio::test]
async fn vocabulary_lists_training_values() {
    let srv = TestServer::spawn_ready().await;

    let body: serde_json::Value = reqwest::get(format!("{}/vocabulary", srv.base_url))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["restaurant_id"], json!(["R001", "R002", "R003"]));
    assert_eq!(
        body["menu_category"],
        json!(["Appetizers", "Beverages", "Desserts", "Main Course"])
    );
    assert_eq!(body["labels"], json!(["Low", "Medium", "High"]));
}

#[tokio::test]
async fn uninitialized_pipeline_answers_503() {
    let srv = TestServer::spawn(PipelineHandle::new()).await;
    let client = reqwest::Client::new();

    let res = client.get(format!("{}/ready", srv.base_url)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);

    let (status, body) = post_predict(
        &srv,
        json!({"restaurant_id": "R003", "menu_category": "Desserts", "price": 15.5}),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "not_ready");
}

#[tokio::test]
async fn request_id_is_echoed() {
    let srv = TestServer::spawn_ready().await;
    let id = "0190a2b4-7c3e-7a4b-8f1e-2d3c4b5a6978";

    let res = reqwest::Client::new()
        .get(format!("{}/health", srv.base_url))
        .header("x-request-id", id)
        .send()
        .await
        .unwrap();

    assert_eq!(res.headers()["x-request-id"], id);
}
