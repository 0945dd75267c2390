//! Quote API Server
//!
//! A minimal HTTP service exposing a collection of quotes (text + author)
//! backed by a flat JSON file on disk. The full store is held in memory and
//! rewritten to the file on every mutation.

mod handlers;
mod storage;

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use storage::QuoteStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<QuoteStore>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("[FATAL] Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!("Starting Quote API server v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run_server().await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server() -> Result<()> {
    let config = load_config().context("Failed to load configuration")?;
    info!(
        "Config loaded: bind={}, quotes={}",
        config.bind_address,
        config.quotes_path.display()
    );

    // A malformed backing file is fatal here, with no fallback to seed data
    let store = Arc::new(
        QuoteStore::load(&config.quotes_path)
            .await
            .context("Failed to load quote store")?,
    );

    let app = app(AppState { store });

    let addr: SocketAddr = config
        .bind_address
        .parse()
        .context("Failed to parse bind address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!("Quote API running at http://{}", addr);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Build the router with CORS open to all origins and request tracing.
fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .nest("/api", api_routes())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/quotes",
            get(handlers::quotes::list).post(handlers::quotes::create),
        )
        .route("/quotes/random", get(handlers::quotes::random))
        .route("/quotes/bulk", post(handlers::quotes::bulk_create))
        .route("/quotes/:id", get(handlers::quotes::get))
}

#[derive(Debug, Clone)]
struct Config {
    bind_address: String,
    quotes_path: PathBuf,
}

fn load_config() -> Result<Config> {
    let bind_address =
        std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

    // Default to quotes.json next to the executable
    let quotes_path = match std::env::var("QUOTES_PATH") {
        Ok(path) => PathBuf::from(path),
        Err(_) => {
            let exe = std::env::current_exe().context("Failed to locate executable")?;
            exe.parent()
                .map(|dir| dir.join("quotes.json"))
                .unwrap_or_else(|| PathBuf::from("quotes.json"))
        }
    };

    Ok(Config {
        bind_address,
        quotes_path,
    })
}
