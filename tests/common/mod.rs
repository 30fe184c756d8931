#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use chrono::NaiveDate;
use fake::Fake;
use fake::faker::name::en::Name;
use fake::faker::phone_number::en::PhoneNumber;
use http_body_util::BodyExt;
use tutordesk::router::init_router;
use tutordesk::state::AppState;
use tutordesk_config::{CorsConfig, JwtConfig};
use tutordesk_db::InMemoryCredentialStore;
use tutordesk_models::{Admin, Category, StudentFields, Teacher, TeacherPaymentDto};
use uuid::Uuid;

/// bcrypt's minimum cost keeps fixture hashing fast.
pub const TEST_BCRYPT_COST: u32 = 4;

pub fn quick_hash(password: &str) -> String {
    bcrypt::hash(password, TEST_BCRYPT_COST).unwrap()
}

pub fn store() -> Arc<InMemoryCredentialStore> {
    Arc::new(InMemoryCredentialStore::new())
}

pub fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret".to_string(),
        access_token_expiry: 3600,
    }
}

pub fn app(store: Arc<InMemoryCredentialStore>) -> Router {
    let state = AppState::new(
        store,
        jwt_config(),
        CorsConfig {
            allowed_origins: vec!["http://localhost:5173".to_string()],
        },
    );
    init_router(state)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn add_admin(store: &InMemoryCredentialStore, user: &str, password: &str) -> Admin {
    store.add_admin(
        user,
        &format!("{user}@agency.test"),
        &Name().fake::<String>(),
        &quick_hash(password),
    )
}

pub fn add_teacher(
    store: &InMemoryCredentialStore,
    user: &str,
    password: &str,
    approved: Option<bool>,
) -> Teacher {
    store.add_teacher(
        user,
        &format!("{user}@agency.test"),
        &Name().fake::<String>(),
        &quick_hash(password),
        approved,
    )
}

pub fn student_fields(category: Category) -> StudentFields {
    StudentFields {
        full_name: Name().fake(),
        category: Some(category),
        guardian_name: Name().fake(),
        guardian_phone: PhoneNumber().fake(),
        email: None,
        address: None,
    }
}

pub fn payment(teacher_id: Uuid, amount: i64, payment_date: NaiveDate) -> TeacherPaymentDto {
    TeacherPaymentDto {
        teacher_id,
        amount,
        payment_date,
        next_payment_due: None,
    }
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
