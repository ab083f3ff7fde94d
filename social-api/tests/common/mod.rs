use std::sync::Arc;

use auth::AccessPolicy;
use auth::AnyAuthenticated;
use auth::Authenticator;
use auth::HashCost;
use auth::JwtHandler;
use auth::PasswordHasher;
use chrono::Duration;
use serde_json::json;
use serde_json::Value;
use social_api::domain::user::service::UserService;
use social_api::inbound::http::router::create_router;
use social_api::outbound::repositories::InMemoryUserRepository;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const JWT_ISSUER: &str = "social-api-test";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
}

// Hashing at full strength would dominate test time.
fn test_hasher() -> PasswordHasher {
    PasswordHasher::with_cost(HashCost {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    })
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        Self::spawn_with_policy(Arc::new(AnyAuthenticated)).await
    }

    /// Spawn the application with a custom admin access policy
    pub async fn spawn_with_policy(access_policy: Arc<dyn AccessPolicy>) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let user_repository = Arc::new(InMemoryUserRepository::new());
        let user_service = Arc::new(UserService::new(user_repository, test_hasher()));

        let authenticator = Arc::new(
            Authenticator::new(JWT_SECRET, JWT_ISSUER, Duration::hours(24))
                .expect("Failed to create authenticator")
                .with_password_hasher(test_hasher()),
        );

        let router = create_router(user_service, authenticator, access_policy);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::new(JWT_SECRET).expect("Failed to create JWT handler"),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Register a user and return the parsed response body
    pub async fn register(&self, username: &str, email: &str, password: &str) -> Value {
        let response = self
            .post("/api/auth/register")
            .json(&json!({
                "username": username,
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.expect("Failed to parse response")
    }

    /// Register a user and return their token
    pub async fn register_token(&self, username: &str, email: &str, password: &str) -> String {
        let body = self.register(username, email, password).await;
        body["data"]["token"]
            .as_str()
            .expect("Missing token")
            .to_string()
    }

    /// Log in and return the raw response
    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/auth/login")
            .json(&json!({
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }
}
