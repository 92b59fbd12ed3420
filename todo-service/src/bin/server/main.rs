use std::sync::Arc;

use auth::Authenticator;
use auth::JwtHandler;
use auth::PasswordHasher;
use todo_service::config::Config;
use todo_service::config::StorageBackend;
use todo_service::domain::identity::bootstrap::ensure_initial_identity;
use todo_service::domain::identity::ports::IdentityRepository;
use todo_service::domain::identity::service::IdentityService;
use todo_service::domain::todo::ports::TodoRepository;
use todo_service::domain::todo::service::TodoService;
use todo_service::inbound::http::router::create_router;
use todo_service::outbound::database;
use todo_service::outbound::repositories::InMemoryIdentityRepository;
use todo_service::outbound::repositories::InMemoryTodoRepository;
use todo_service::outbound::repositories::PostgresIdentityRepository;
use todo_service::outbound::repositories::PostgresTodoRepository;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "todo-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        backend = ?config.database.backend,
        http_port = config.server.http_port,
        jwt_algorithm = %config.jwt.algorithm,
        token_ttl_minutes = config.jwt.expiration_minutes,
        bootstrap_username = %config.bootstrap.username,
        "Configuration loaded"
    );

    let authenticator = Arc::new(build_authenticator(&config)?);

    match config.database.backend {
        StorageBackend::Postgres => {
            let pg_pool = database::connect_lazy(&config.database)?;
            database::run_migrations(&pg_pool).await;

            serve(
                &config,
                authenticator,
                Arc::new(PostgresIdentityRepository::new(pg_pool.clone())),
                Arc::new(PostgresTodoRepository::new(pg_pool)),
            )
            .await
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage, data is lost on exit");

            serve(
                &config,
                authenticator,
                Arc::new(InMemoryIdentityRepository::new()),
                Arc::new(InMemoryTodoRepository::new()),
            )
            .await
        }
    }
}

/// Build the hasher and token codec. Fails on a short secret, a non-HMAC
/// algorithm or a non-positive token lifetime so a misconfigured process
/// never starts.
fn build_authenticator(config: &Config) -> Result<Authenticator, anyhow::Error> {
    let password_hasher = PasswordHasher::with_cost(
        config.password.memory_cost_kib,
        config.password.time_cost,
        config.password.parallelism,
    )?;

    let algorithm = auth::parse_algorithm(&config.jwt.algorithm)?;
    let jwt_handler = JwtHandler::with_algorithm(config.jwt.secret.as_bytes(), algorithm)?;

    Ok(Authenticator::new(password_hasher, jwt_handler).with_token_ttl(config.jwt.token_ttl()?))
}

async fn serve<IR, TR>(
    config: &Config,
    authenticator: Arc<Authenticator>,
    identity_repository: Arc<IR>,
    todo_repository: Arc<TR>,
) -> Result<(), anyhow::Error>
where
    IR: IdentityRepository,
    TR: TodoRepository,
{
    ensure_initial_identity(
        identity_repository.as_ref(),
        &authenticator,
        &config.bootstrap,
    )
    .await;

    let identity_service = Arc::new(IdentityService::new(identity_repository, authenticator));
    let todo_service = Arc::new(TodoService::new(todo_repository));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(identity_service, todo_service)).await?;

    tracing::info!("Server exited successfully");
    Ok(())
}
