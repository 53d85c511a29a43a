//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use hotel_api::AppState;
use hotel_auth::PasswordHasher;
use hotel_core::config::{AppConfig, AuthConfig};
use hotel_database::{MemoryStore, PrincipalStore, RoomStore, Stores};
use hotel_entity::principal::{AccessType, NewPrincipal};
use hotel_entity::room::{NewRoom, Room, RoomType};
use hotel_mail::MemorySender;

pub const SECRET: &str = "integration-test-secret";
pub const PASSWORD: &str = "correct-horse-battery";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Backing store for direct setup and assertions
    pub store: MemoryStore,
    /// Captured outbound email
    pub mail: MemorySender,
    /// Application config
    pub config: AppConfig,
}

/// Parsed response
pub struct TestResponse {
    /// HTTP status
    pub status: StatusCode,
    /// Parsed JSON body, `Null` for non-JSON bodies
    pub body: Value,
    /// Raw body text
    pub text: String,
}

pub fn test_config() -> AppConfig {
    AppConfig {
        server: Default::default(),
        database: Default::default(),
        auth: AuthConfig {
            secret_key: SECRET.to_string(),
            access_ttl_hours: 24,
            refresh_ttl_hours: 168,
            password_min_length: 8,
            bootstrap_admin: None,
        },
        email: Default::default(),
        reservation: Default::default(),
        logging: Default::default(),
    }
}

impl TestApp {
    /// Create a new test application on an empty in-memory store
    pub async fn new() -> Self {
        let config = test_config();
        let store = MemoryStore::new();
        let mail = MemorySender::new();

        let state = AppState::new(
            config.clone(),
            Stores::memory(store.clone()),
            Arc::new(mail.clone()),
        );

        Self {
            router: hotel_api::build_app(state),
            store,
            mail,
            config,
        }
    }

    /// Sends one request through the full middleware stack
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("X-Auth-Token", token);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let text = String::from_utf8_lossy(&bytes).to_string();
        let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse { status, body, text }
    }

    /// Creates a staff principal directly in the store
    pub async fn create_staff(&self, kind: AccessType, email: &str) -> Uuid {
        let hasher = PasswordHasher::new(&self.config.auth);
        let principal = self
            .store
            .insert_principal(NewPrincipal {
                access_type: kind,
                email: email.to_string(),
                first_name: "Staff".to_string(),
                last_name: kind.to_string(),
                password_hash: hasher.hash_password(PASSWORD).expect("hash"),
            })
            .await
            .expect("Failed to create staff");
        principal.id
    }

    /// Logs in through the API and returns the access token
    pub async fn login(&self, kind: AccessType, email: &str) -> String {
        let response = self
            .request(
                "POST",
                &format!("/{kind}/login"),
                Some(serde_json::json!({ "email": email, "password": PASSWORD })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "login failed: {}", response.text);
        response.body["token"]
            .as_str()
            .expect("token in login response")
            .to_string()
    }

    /// Staff login shortcut
    pub async fn staff_token(&self, kind: AccessType) -> String {
        let email = format!("{kind}-{}@hotel.test", Uuid::new_v4());
        self.create_staff(kind, &email).await;
        self.login(kind, &email).await
    }

    /// Signs a guest up through the API
    pub async fn signup(&self, email: &str) -> TestResponse {
        self.request(
            "POST",
            "/guest/signup",
            Some(serde_json::json!({
                "email": email,
                "password": PASSWORD,
                "first_name": "Grace",
                "last_name": "Hopper",
                "phone": "+15550100",
                "country": "US",
                "id_proof_type": "passport"
            })),
            None,
        )
        .await
    }

    /// The confirmation path (with query) from the most recent email
    pub async fn last_confirm_path(&self) -> String {
        let html = self.mail.last().await.expect("an email was sent").html;
        let start = html.find("href=\"").expect("link in email") + 6;
        let end = html[start..].find('"').expect("closing quote") + start;
        let url = html[start..end].replace("&amp;", "&");
        let path_start = url.find("/guest/verify-email/confirm").expect("confirm path");
        url[path_start..].to_string()
    }

    /// Signs up, confirms and logs in a guest; returns (guest_id, token)
    pub async fn verified_guest(&self, email: &str) -> (Uuid, String) {
        let response = self.signup(email).await;
        assert_eq!(response.status, StatusCode::OK, "signup failed: {}", response.text);

        let confirm = self.request("GET", &self.last_confirm_path().await, None, None).await;
        assert_eq!(confirm.status, StatusCode::OK, "confirm failed: {}", confirm.text);

        let token = self.login(AccessType::Guest, email).await;
        let guest = self
            .store
            .find_principal_by_email(AccessType::Guest, email)
            .await
            .expect("lookup")
            .expect("guest exists");
        (guest.id, token)
    }

    /// Inserts an available room directly in the store
    pub async fn create_room(&self, price: f64, capacity: i32) -> Room {
        let room = Room::from_new(NewRoom {
            branch_id: Uuid::new_v4(),
            room_number: 100,
            room_type: RoomType::Double,
            cleaning_status: None,
            price,
            capacity,
            images: vec![],
        });
        self.store.insert_room(&room).await.expect("insert room");
        room
    }
}
