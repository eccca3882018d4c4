//! Utilidades compartidas por las pruebas de integración

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    extract::ConnectInfo,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use rentcar_api::config::EnvironmentConfig;
use rentcar_api::create_app;
use rentcar_api::database::DatabaseConnection;
use rentcar_api::services::geolocation_service::{GeoLocation, GeoLocator};
use rentcar_api::state::AppState;

pub const JWT_SECRET: &str = "secreto-de-pruebas";
pub const ROOT_PASSWORD: &str = "root-de-pruebas";
pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "Admin123!";

/// Geolocalización fija, sin red
pub struct FixedLocator;

#[async_trait]
impl GeoLocator for FixedLocator {
    async fn locate(&self, _ip: &str) -> GeoLocation {
        GeoLocation {
            country: "Turkey".to_string(),
            city: "Istanbul".to_string(),
        }
    }
}

pub struct TestApp {
    pub router: Router,
    pub db: DatabaseConnection,
    _backups: TempDir,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub bytes: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.bytes).unwrap_or(Value::Null)
    }
}

/// Aplicación completa sobre SQLite en memoria con los datos iniciales
pub async fn create_test_app() -> TestApp {
    create_test_app_with(|_| {}).await
}

/// Igual que `create_test_app`, ajustando antes la configuración
pub async fn create_test_app_with(configure: impl FnOnce(&mut EnvironmentConfig)) -> TestApp {
    let db = DatabaseConnection::in_memory().await.unwrap();
    db.seed().await.unwrap();

    let backups = tempfile::tempdir().unwrap();
    let mut config = EnvironmentConfig::for_tests(JWT_SECRET);
    config.root_password_hash = bcrypt::hash(ROOT_PASSWORD, 4).unwrap();
    config.backup_dir = backups.path().to_path_buf();
    configure(&mut config);

    let state = AppState::with_geolocator(db.pool().clone(), config, Arc::new(FixedLocator));

    TestApp {
        router: create_app(state),
        db,
        _backups: backups,
    }
}

fn build(builder: axum::http::request::Builder, body: Option<Value>) -> Request<Body> {
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

impl TestApp {
    pub async fn request(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        self.send(build(builder, body)).await
    }

    /// Petición llegada desde `peer`, como la vería el servidor real
    pub async fn request_from(
        &self,
        peer: SocketAddr,
        method: Method,
        uri: &str,
        headers: &[(&str, &str)],
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }

        let mut request = build(builder, body);
        request.extensions_mut().insert(ConnectInfo(peer));
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec();

        TestResponse { status, headers, bytes }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.request(Method::PUT, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::DELETE, uri, token, None).await
    }

    pub async fn count(&self, table: &str) -> i64 {
        sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(self.db.pool())
            .await
            .unwrap()
    }

    /// Crea el primer administrador y devuelve su token
    pub async fn admin_token(&self) -> String {
        let setup = self
            .post(
                "/api/auth/setup",
                None,
                json!({ "username": ADMIN_USERNAME, "password": ADMIN_PASSWORD, "email": "admin@example.com" }),
            )
            .await;
        assert_eq!(setup.status, StatusCode::CREATED, "setup: {:?}", setup.json());

        self.login(ADMIN_USERNAME, ADMIN_PASSWORD).await
    }

    pub async fn root_token(&self) -> String {
        self.login("root", ROOT_PASSWORD).await
    }

    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .post("/api/auth/login", None, json!({ "username": username, "password": password }))
            .await;
        assert_eq!(response.status, StatusCode::OK, "login: {:?}", response.json());
        response.json()["token"].as_str().unwrap().to_string()
    }

    pub async fn customer_token(&self, email: &str) -> String {
        let response = self
            .post(
                "/api/customers/register",
                None,
                json!({
                    "fullName": "Ayşe Yılmaz",
                    "email": email,
                    "password": "secreta123",
                    "phone": "0555 123 45 67"
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "register: {:?}", response.json());
        response.json()["token"].as_str().unwrap().to_string()
    }
}
