use std::sync::Arc;

use auth::Authenticator;
use auth::PasswordHasher;
use cache::RedisCache;
use sqlx::postgres::PgPoolOptions;
use task_service::config::Config;
use task_service::domain::auth::guard::AuthorizationGuard;
use task_service::domain::auth::service::AuthService;
use task_service::domain::task::service::TaskService;
use task_service::domain::user::service::UserService;
use task_service::inbound::http::router::create_router;
use task_service::outbound::audit::TracingAuditSink;
use task_service::outbound::repositories::PostgresTaskRepository;
use task_service::outbound::repositories::PostgresUserRepository;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "task_service=debug,cache=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "task-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        redis_command_timeout_secs = config.redis.command_timeout_secs,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let redis_cache = Arc::new(RedisCache::connect(&config.redis).await?);

    let authenticator = Arc::new(Authenticator::new(
        config.jwt.access_secret.as_bytes(),
        config.jwt.refresh_secret.as_bytes(),
    ));
    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let task_repository = Arc::new(PostgresTaskRepository::new(pg_pool));
    let audit_sink = Arc::new(TracingAuditSink::new());

    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&user_repository),
        audit_sink,
        Arc::clone(&authenticator),
    ));
    let authorizer = Arc::new(AuthorizationGuard::new(
        Arc::clone(&user_repository),
        authenticator,
    ));
    let user_service = Arc::new(UserService::new(user_repository, PasswordHasher::new()));
    let task_service = Arc::new(TaskService::new(task_repository, redis_cache));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(auth_service, user_service, task_service, authorizer);

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}
