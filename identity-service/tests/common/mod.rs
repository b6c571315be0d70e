#![allow(dead_code)]

use std::sync::Arc;

use chrono::Duration;
use identity_service::domain::session::ports::TokenVerifier;
use identity_service::domain::session::service::AuthenticationService;
use identity_service::domain::user::models::EmailAddress;
use identity_service::domain::user::models::User;
use identity_service::domain::user::service::UserService;
use identity_service::inbound::http::router::create_router;
use identity_service::outbound::repositories::InMemoryUserDirectory;
use identity_service::outbound::security::Argon2CredentialHasher;
use identity_service::outbound::security::JwtTokenIssuer;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

pub type TestAuthenticationService =
    AuthenticationService<InMemoryUserDirectory, Argon2CredentialHasher, JwtTokenIssuer>;

/// Collaborators wired the way the server wires them, minus Postgres.
pub struct TestComponents {
    pub directory: Arc<InMemoryUserDirectory>,
    pub hasher: Arc<Argon2CredentialHasher>,
    pub issuer: Arc<JwtTokenIssuer>,
}

impl TestComponents {
    pub fn new() -> Self {
        Self {
            directory: Arc::new(InMemoryUserDirectory::new()),
            // Minimal Argon2 cost keeps the suite fast.
            hasher: Arc::new(Argon2CredentialHasher::new(
                auth::PasswordHasher::with_params(8, 1, 1).expect("Failed to build hasher"),
            )),
            issuer: Arc::new(JwtTokenIssuer::new(JWT_SECRET, Duration::hours(24))),
        }
    }

    /// Store a user whose password hash is computed from `password`.
    pub async fn create_user(&self, name: &str, email: &str, password: &str) -> User {
        let user = User::new(
            name.to_string(),
            EmailAddress::new(email.to_string()).expect("Invalid test email"),
            self.hasher.hash(password).expect("Failed to hash password"),
        );

        self.directory
            .insert(user)
            .await
            .expect("Failed to insert user")
    }

    pub fn authentication_service(&self) -> TestAuthenticationService {
        AuthenticationService::new(
            Arc::clone(&self.directory),
            Arc::clone(&self.hasher),
            Arc::clone(&self.issuer),
        )
    }
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub components: TestComponents,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let components = TestComponents::new();

        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let token_verifier: Arc<dyn TokenVerifier> = components.issuer.clone();
        let router = create_router(
            Arc::new(components.authentication_service()),
            Arc::new(UserService::new(Arc::clone(&components.directory))),
            token_verifier,
        );

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            components,
            api_client: reqwest::Client::new(),
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
}
