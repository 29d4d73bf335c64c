#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use shared::models::Role;
use tower::ServiceExt;
use tower_http::normalize_path::NormalizePath;

use hr_server::auth::TokenType;
use hr_server::{AppState, Config, api, db, util};

pub const PASSWORD: &str = "password123";

/// Router over a fresh in-memory database with one user per role
pub struct TestApp {
    pub state: AppState,
    pub app: NormalizePath<Router>,
    pub admin: String,
    pub manager: String,
    pub employee: String,
}

impl TestApp {
    pub async fn new() -> Self {
        let state = AppState::new(&Config::for_tests()).await.unwrap();

        let admin = create_user(&state, "admin@acme.test", Role::Admin).await;
        let manager = create_user(&state, "manager@acme.test", Role::Manager).await;
        let employee = create_user(&state, "staff@acme.test", Role::Employee).await;

        Self {
            app: api::build_service(state.clone()),
            state,
            admin,
            manager,
            employee,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn patch(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PATCH, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, Some(token), None).await
    }

    // ========================================================================
    // Fixtures (created as admin, asserted to succeed)
    // ========================================================================

    pub async fn create_company(&self, name: &str) -> i64 {
        let (status, body) = self
            .post("/api/companies", &self.admin, json!({ "name": name }))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"]["id"].as_i64().unwrap()
    }

    pub async fn create_department(&self, company: i64, name: &str) -> i64 {
        let (status, body) = self
            .post(
                "/api/departments",
                &self.admin,
                json!({ "company": company, "name": name }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"]["id"].as_i64().unwrap()
    }

    pub async fn create_employee(&self, company: i64, department: Option<i64>, name: &str) -> i64 {
        let (status, body) = self
            .post(
                "/api/employees",
                &self.admin,
                employee_body(company, department, name),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"]["id"].as_i64().unwrap()
    }
}

pub fn employee_body(company: i64, department: Option<i64>, name: &str) -> Value {
    json!({
        "company": company,
        "department": department,
        "name": name,
        "email": format!("{}@acme.test", name.to_lowercase().replace(' ', ".")),
        "phone": "+1234567890",
        "address": "1 Main Street",
        "designation": "Engineer",
    })
}

/// Insert a user directly and return an access token for it
async fn create_user(state: &AppState, email: &str, role: Role) -> String {
    let password_hash = util::hash_password(PASSWORD).unwrap();
    let id = db::users::insert(
        &state.db.pool,
        &db::users::NewUser {
            username: email.split('@').next().unwrap(),
            email,
            password_hash: &password_hash,
            role,
            first_name: "",
            last_name: "",
        },
        util::now_millis(),
    )
    .await
    .unwrap();
    let user = db::users::find_by_id(&state.db.pool, id)
        .await
        .unwrap()
        .unwrap();
    state.jwt.generate_token(&user, TokenType::Access).unwrap()
}
