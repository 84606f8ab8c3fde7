use chrono::Utc;
use clap::Parser;
use dotenvy::dotenv;
use grid_transfer_backend::config::ServerConfig;
use grid_transfer_backend::services::grid_tool::{Grid2GridTool, GridTool};
use grid_transfer_backend::services::storage::GridStore;
use grid_transfer_backend::{AppState, create_app};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port for the HTTP server
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let args = Args::parse();

    let default_filter = if args.verbose {
        "grid_transfer_backend=debug,tower_http=debug"
    } else {
        "grid_transfer_backend=info,tower_http=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("🚀 Starting Grid Transfer Backend v{}...", env!("CARGO_PKG_VERSION"));
    info!("Server startup at: {}", Utc::now());
    if args.verbose {
        info!("Working in the verbose mode.");
    }

    let config = ServerConfig::from_env();
    info!(
        "🧰 Grid tool: {} (timeout {}s)",
        config.tool_path.display(),
        config.tool_timeout_secs
    );
    info!("📁 Storage area: {}", config.uploads_dir.display());

    let storage = Arc::new(GridStore::new(&config.uploads_dir));
    storage.init().await?;

    let tool: Arc<dyn GridTool> = Arc::new(Grid2GridTool::new(
        config.tool_path.clone(),
        Duration::from_secs(config.tool_timeout_secs),
    ));

    let state = AppState {
        storage,
        tool,
        config,
    };

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &axum::http::Request<_>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
            )
        })
        .on_request(|request: &axum::http::Request<_>, _span: &tracing::Span| {
            info!("📥 {} {}", request.method(), request.uri());
        })
        .on_response(
            |response: &axum::http::Response<_>,
             latency: std::time::Duration,
             _span: &tracing::Span| {
                info!(
                    "📤 Finished in {:?} with status {}",
                    latency,
                    response.status()
                );
            },
        );

    let app = create_app(state).layer(trace_layer);
    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("✅ Server listening on: http://0.0.0.0:{}", args.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Backend exited cleanly.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("⌨️  Ctrl+C received, initiating graceful shutdown...");
        },
        _ = terminate => {
            info!("💤 SIGTERM received, initiating graceful shutdown...");
        },
    }
}
