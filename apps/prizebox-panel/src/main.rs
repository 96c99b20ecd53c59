mod cli;
mod config;
mod handlers;
mod routes;
mod services;
mod utils;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::PanelConfig;
use services::Stores;
use services::activity_service::ActivityService;
use services::catalog_service::CatalogService;
use services::redeem_service::RedeemService;
use services::setup_service::SetupService;

#[derive(Clone)]
pub struct AppState {
    pub config: PanelConfig,
    pub redeem_service: Arc<RedeemService>,
    pub catalog_service: Arc<CatalogService>,
    pub activity_service: Arc<ActivityService>,
    pub setup_service: Arc<SetupService>,
}

impl AppState {
    pub fn new(config: PanelConfig, stores: Stores) -> Self {
        let setup_service = Arc::new(SetupService::new(stores.schema));
        let activity_service = Arc::new(ActivityService::new(
            stores.activities,
            setup_service.clone(),
        ));
        let catalog_service = Arc::new(CatalogService::new(stores.prizes, setup_service.clone()));
        let redeem_service = Arc::new(RedeemService::new(
            stores.promo_codes,
            activity_service.clone(),
            setup_service.clone(),
        ));

        Self {
            config,
            redeem_service,
            catalog_service,
            activity_service,
            setup_service,
        }
    }
}

#[derive(Parser)]
#[command(name = "prizebox")]
#[command(about = "Promo code redemption service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve,
    /// Create missing tables and insert the sample data, then exit
    Setup,
    /// Redeem a single code and print the result
    Redeem {
        /// The code as a visitor would type it
        code: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        println!("Warning: Failed to load .env file: {}", e);
    }

    let cli = Cli::parse();

    let file_appender = tracing_appender::rolling::never(".", "prizebox.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "prizebox_panel=debug,prizebox_db=info,tower_http=info,sqlx=warn".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stdout))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .init();

    let config = PanelConfig::load()?;
    let pool = prizebox_db::db::init_pool(&config.database_url, config.max_connections).await?;
    let state = AppState::new(config, Stores::postgres(pool));

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => run_server(state).await?,
        Commands::Setup => cli::run_setup(&state).await?,
        Commands::Redeem { code } => cli::redeem(&state, &code).await?,
    }

    Ok(())
}

async fn run_server(state: AppState) -> Result<()> {
    if state.config.auto_setup && state.setup_service.setup_needed().await {
        tracing::info!("Prizes table missing, running database setup");
        if !state.setup_service.setup().await {
            tracing::warn!("Database setup finished with errors");
        }
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], state.config.listen_port));
    let app = routes::router(state);

    tracing::info!("Prizebox listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
