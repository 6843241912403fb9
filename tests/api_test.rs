//! HTTP tests against the full router over a temporary SQLite store.

mod common;

use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use base64::Engine;
use serde_json::{json, Value};
use tower::ServiceExt;

use shelter_admin::api::{create_router, AppState};
use shelter_admin::config::{MAX_IMAGE_BYTES, MAX_REQUEST_BYTES};

use common::{seed, setup, TestDb, WAIT};

const EMAIL: &str = "coordenacao@abrigo.org";
const PASSWORD: &str = "Abrigo#2024";

struct TestApp {
    _db: TestDb,
    state: AppState,
    router: Router,
}

impl TestApp {
    async fn new(db: TestDb) -> Self {
        let state = AppState::from_config(db.database.clone(), db.config.clone())
            .await
            .expect("app state");
        state
            .auth_service
            .create_account(EMAIL.to_string(), PASSWORD.to_string(), "Coordenação".to_string())
            .await
            .expect("account");
        let router = create_router(state.clone());
        Self { _db: db, state, router }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    async fn login(&self) -> String {
        let (status, body) = self
            .send(json_request(
                Method::POST,
                "/auth/login",
                None,
                json!({ "email": EMAIL, "password": PASSWORD }),
            ))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["token_type"], "Bearer");
        body["access_token"].as_str().unwrap().to_string()
    }
}

fn json_request(method: Method, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

/// Poll a GET until `done` holds; list endpoints read from the projections.
async fn eventually<F>(app: &TestApp, uri: &str, token: &str, done: F) -> Value
where
    F: Fn(&Value) -> bool,
{
    let deadline = tokio::time::Instant::now() + WAIT;
    loop {
        let (status, body) = app.send(get(uri, Some(token))).await;
        assert_eq!(status, StatusCode::OK);
        if done(&body) {
            return body;
        }
        assert!(tokio::time::Instant::now() < deadline, "{} never converged: {}", uri, body);
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}

#[tokio::test]
async fn test_health_reports_database_and_mirror() {
    let db = setup().await;
    seed(&db.persistence).await;
    let app = TestApp::new(db).await;

    let (status, body) = app.send(get("/health", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["services"]["database"]["status"], "healthy");
    assert_eq!(body["services"]["animal_mirror"]["animals"], 1);
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = TestApp::new(setup().await).await;

    for uri in ["/animals", "/adopters", "/staff", "/adoptions", "/dashboard", "/auth/me"] {
        let (status, body) = app.send(get(uri, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{}", uri);
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    }

    let (status, _) = app.send(get("/animals", Some("not-a-jwt"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_rejects_wrong_password() {
    let app = TestApp::new(setup().await).await;

    let (status, body) = app
        .send(json_request(
            Method::POST,
            "/auth/login",
            None,
            json!({ "email": EMAIL, "password": "wrong-password" }),
        ))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_logout_revokes_token() {
    let app = TestApp::new(setup().await).await;
    let token = app.login().await;

    let (status, me) = app.send(get("/auth/me", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["email"], EMAIL);

    let (status, _) = app
        .send(json_request(Method::POST, "/auth/logout", Some(&token), json!({})))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.send(get("/auth/me", Some(&token))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(app.state.auth_service.verify_token(&token).is_err());
}

#[tokio::test]
async fn test_create_and_list_animals() {
    let app = TestApp::new(setup().await).await;
    let token = app.login().await;

    let (status, created) = app
        .send(json_request(
            Method::POST,
            "/animals",
            Some(&token),
            json!({
                "name": "Mel",
                "species": "gato",
                "breed": "Siamês",
                "color": "creme",
                "size": "pequeno",
                "sex": "F",
                "birth_date": "2020-03-01",
                "rescue_date": "2024-02-10"
            }),
        ))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], "Disponível");
    assert!(created["age"].as_str().unwrap().ends_with("anos"));

    let listed = eventually(&app, "/animals?q=mel", &token, |body| {
        body.as_array().map(|rows| rows.len()) == Some(1)
    })
    .await;
    assert_eq!(listed[0]["id"], created["id"]);

    let (status, body) = app
        .send(json_request(Method::POST, "/animals", Some(&token), json!({ "name": "" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

fn animal_with_image(image_bytes: usize) -> Value {
    json!({
        "name": "Bolt",
        "species": "cachorro",
        "breed": "Pastor",
        "color": "preto",
        "size": "grande",
        "sex": "M",
        "birth_date": "2019-08-20",
        "rescue_date": "2024-04-02",
        "image": {
            "content_type": "image/png",
            "data": base64::engine::general_purpose::STANDARD.encode(vec![7u8; image_bytes])
        }
    })
}

#[tokio::test]
async fn test_large_image_within_limit_is_accepted() {
    let app = TestApp::new(setup().await).await;
    let token = app.login().await;

    // encodes to well past axum's default 2 MB body limit
    let (status, created) = app
        .send(json_request(
            Method::POST,
            "/animals",
            Some(&token),
            animal_with_image(MAX_IMAGE_BYTES - 1024),
        ))
        .await;

    assert_eq!(status, StatusCode::CREATED, "{}", created);
    assert!(created["image"].as_str().unwrap().ends_with(".png"));
}

#[tokio::test]
async fn test_oversized_body_is_payload_too_large() {
    let app = TestApp::new(setup().await).await;
    let token = app.login().await;

    let (status, body) = app
        .send(json_request(
            Method::POST,
            "/animals",
            Some(&token),
            animal_with_image(MAX_REQUEST_BYTES),
        ))
        .await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error"]["code"], "PAYLOAD_TOO_LARGE");

    // fits the body limit but decodes past the image limit
    let (status, body) = app
        .send(json_request(
            Method::POST,
            "/animals",
            Some(&token),
            animal_with_image(MAX_IMAGE_BYTES + 1),
        ))
        .await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error"]["code"], "PAYLOAD_TOO_LARGE");
}

#[tokio::test]
async fn test_adoption_over_http_updates_animal() {
    let db = setup().await;
    let (animal, adopter, staff) = seed(&db.persistence).await;
    let app = TestApp::new(db).await;
    let token = app.login().await;

    let (status, adoption) = app
        .send(json_request(
            Method::POST,
            "/adoptions",
            Some(&token),
            json!({
                "adopter_id": adopter.id,
                "animal_id": animal.id,
                "employee_id": staff.id,
                "status": "Em andamento",
                "adoption_date": "2024-06-01"
            }),
        ))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, fetched) = app.send(get(&format!("/animals/{}", animal.id), Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["status"], "Em andamento");

    // second registration for the same animal is refused
    let (status, body) = app
        .send(json_request(
            Method::POST,
            "/adoptions",
            Some(&token),
            json!({
                "adopter_id": adopter.id,
                "animal_id": animal.id,
                "employee_id": staff.id,
                "status": "Adotado",
                "adoption_date": "2024-06-02"
            }),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let rows = eventually(&app, "/adoptions", &token, |body| {
        body.as_array().map(|rows| rows.len()) == Some(1)
    })
    .await;
    assert_eq!(rows[0]["animal_name"], "Rex");
    assert_eq!(rows[0]["employee_name"], "Ana Souza");

    let (status, _) = app
        .send(
            Request::builder()
                .method(Method::DELETE)
                .uri(format!("/adoptions/{}", adoption["id"].as_str().unwrap()))
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert!(status.is_success());

    let (_, fetched) = app.send(get(&format!("/animals/{}", animal.id), Some(&token))).await;
    assert_eq!(fetched["status"], "Disponível");

    let (status, stats) = app.send(get("/dashboard", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["animals"], 1);
    assert_eq!(stats["adoptions"], 0);
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = TestApp::new(setup().await).await;

    let (status, body) = app.send(get("/api-docs/openapi.json", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/adoptions"].is_object());
    assert!(body["components"]["securitySchemes"]["bearer_auth"].is_object());
}

#[tokio::test]
async fn test_unknown_animal_is_not_found() {
    let app = TestApp::new(setup().await).await;
    let token = app.login().await;

    let (status, body) = app
        .send(get(&format!("/animals/{}", uuid::Uuid::new_v4()), Some(&token)))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "Animal not found");
}
