use std::{net::SocketAddr, sync::Arc};

use axum::{
    Router,
    extract::{DefaultBodyLimit, OriginalUri},
    http::{HeaderValue, Method, header},
    routing::get,
};
use dotenv::dotenv;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

mod blog;
mod config;
mod envelope;
mod error;
mod health;
mod json;
mod logging;
mod query;
mod schema;
mod store;

use config::{Env, ServerConfig, StoreBackend};
use error::AppError;
use store::{BlogStore, MemoryBlogStore, PgBlogStore};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

const BODY_LIMIT: usize = 10 * 1024;

#[derive(Clone)]
pub struct App {
    pub store: Arc<dyn BlogStore>,
    pub env: Env,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    dotenv().ok();

    let env = Env::from_env();
    logging::init(env);

    let config = ServerConfig::new_from_env(env);

    let store: Arc<dyn BlogStore> = match &config.store {
        StoreBackend::Postgres {
            database_url,
            max_connections,
        } => {
            let store = PgBlogStore::new(database_url, *max_connections)?;
            store.migrate().await?;
            tracing::info!("Database connected successfully");
            Arc::new(store)
        }
        StoreBackend::Memory => Arc::new(MemoryBlogStore::new()),
    };

    let app = router(App {
        store,
        env: config.env,
    })
        .layer(cors(config.frontend_url.as_deref()))
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::new(config.host, config.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, env = ?config.env, "Server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn router(app: App) -> Router {
    Router::new()
        .route("/", get(health::welcome))
        .route("/api/healthchecker", get(health::healthchecker))
        .nest("/api/blogs", blog::routes::route())
        .fallback(route_not_found)
        .method_not_allowed_fallback(route_not_found)
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .with_state(app)
}

fn cors(frontend_url: Option<&str>) -> CorsLayer {
    let origins: Vec<HeaderValue> = ["http://localhost:3000"]
        .into_iter()
        .chain(frontend_url)
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(origin) => Some(origin),
            Err(e) => {
                tracing::warn!(%origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

/// Unknown paths and unsupported methods on known paths both answer 404,
/// echoing the full request target as it was received.
async fn route_not_found(OriginalUri(uri): OriginalUri) -> AppError {
    let target = uri
        .path_and_query()
        .map_or_else(|| uri.path(), |target| target.as_str());

    AppError::RouteNotFound(target.to_string())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutting down");
}
