use std::sync::Arc;

use chrono::Duration;
use identity_service::config::Config;
use identity_service::config::DirectoryBackend;
use identity_service::domain::session::ports::AuthenticationServicePort;
use identity_service::domain::session::service::AuthenticationService;
use identity_service::domain::user::ports::UserDirectory;
use identity_service::domain::user::ports::UserServicePort;
use identity_service::domain::user::service::UserService;
use identity_service::inbound::http::router::create_router;
use identity_service::outbound::repositories::InMemoryUserDirectory;
use identity_service::outbound::repositories::PostgresUserDirectory;
use identity_service::outbound::security::Argon2CredentialHasher;
use identity_service::outbound::security::JwtTokenIssuer;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

type Services = (Arc<dyn AuthenticationServicePort>, Arc<dyn UserServicePort>);

fn build_services<D: UserDirectory>(
    directory: Arc<D>,
    hasher: Arc<Argon2CredentialHasher>,
    issuer: Arc<JwtTokenIssuer>,
) -> Services {
    let authentication_service =
        AuthenticationService::new(Arc::clone(&directory), hasher, issuer);
    let user_service = UserService::new(directory);

    (Arc::new(authentication_service), Arc::new(user_service))
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "identity_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "identity-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        directory = ?config.directory.backend,
        jwt_expiration_hours = config.jwt.expiration_hours,
        "Configuration loaded"
    );

    let hasher = Arc::new(Argon2CredentialHasher::new(
        auth::PasswordHasher::with_params(
            config.password.memory_kib,
            config.password.iterations,
            config.password.parallelism,
        )?,
    ));

    let mut issuer = JwtTokenIssuer::new(
        config.jwt.secret.as_bytes(),
        Duration::hours(config.jwt.expiration_hours),
    );
    if let Some(name) = &config.jwt.issuer {
        issuer = issuer.with_issuer(name);
    }
    let issuer = Arc::new(issuer);

    let (authentication_service, user_service) = match config.directory.backend {
        DirectoryBackend::Postgres => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(&config.database.url)
                .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            let directory = Arc::new(PostgresUserDirectory::new(pg_pool));
            build_services(directory, hasher, Arc::clone(&issuer))
        }
        DirectoryBackend::Memory => {
            tracing::warn!("Using in-memory user directory; it starts empty");
            let directory = Arc::new(InMemoryUserDirectory::new());
            build_services(directory, hasher, Arc::clone(&issuer))
        }
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(authentication_service, user_service, issuer);

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}
