use std::path::PathBuf;
use std::sync::Arc;

use account_service::config::Config;
use account_service::domain::account::ports::AccountServicePort;
use account_service::domain::account::service::AccountService;
use account_service::inbound::http::router::create_router;
use account_service::outbound::repositories::InMemoryAccountDirectory;
use account_service::outbound::repositories::PostgresAccountDirectory;
use auth::Authenticator;
use auth::SigningKey;
use auth::TokenService;
use clap::Parser;
use clap::Subcommand;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "account-service", version, about = "Account registration and login API")]
struct Cli {
    /// Config file path
    #[arg(short = 'c', long = "conf", global = true)]
    conf: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Start the web server (default)
    #[command(alias = "s")]
    Server,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "account_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command.unwrap_or(Command::Server) {
        Command::Server => serve(cli.conf).await,
    }
}

async fn serve(conf: Option<PathBuf>) -> Result<(), anyhow::Error> {
    tracing::info!(
        service = "account-service",
        version = env!("CARGO_PKG_VERSION"),
        config_file = ?conf,
        "Service starting"
    );

    let config = Config::load(conf.as_deref())?;

    tracing::info!(
        http_port = config.server.http_port,
        expiration_hours = config.jwt.expiration_hours,
        persistent = config.database.is_some(),
        "Configuration loaded"
    );

    let signing_key = Arc::new(SigningKey::from_secret(config.jwt.secret.as_bytes())?);
    let tokens = TokenService::new(
        signing_key,
        chrono::Duration::hours(config.jwt.expiration_hours),
    );
    let authenticator = Arc::new(Authenticator::new(tokens)?);

    let account_service: Arc<dyn AccountServicePort> = match &config.database {
        Some(database) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(database.max_connections)
                .connect(&database.url)
                .await?;
            tracing::info!(
                max_connections = database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            let directory = Arc::new(PostgresAccountDirectory::new(pg_pool));
            Arc::new(AccountService::new(directory, Arc::clone(&authenticator)))
        }
        None => {
            tracing::warn!("No database configured, accounts are kept in memory");
            let directory = Arc::new(InMemoryAccountDirectory::new());
            Arc::new(AccountService::new(directory, Arc::clone(&authenticator)))
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

    let http_application = create_router(account_service, authenticator);

    axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server exited successfully");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
