//! bizfeed server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use bizfeed_api::{AppState, app};
use bizfeed_common::Config;
use bizfeed_core::{AuthService, FeedService, PostService, VerificationService};
use bizfeed_db::repositories::{
    BusinessRepository, CommentRepository, FollowRepository, PostLikeRepository, PostRepository,
    ProfileRepository,
};
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
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
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the default filter.
fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "bizfeed=debug,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration first so the log format can follow it
    let config = Config::load()?;
    init_tracing(config.logging.json);

    info!("Starting bizfeed server...");

    let db = bizfeed_db::init(&config).await?;
    info!("Connected to database");

    info!("Running database migrations...");
    bizfeed_db::migrate(&db).await?;
    info!("Migrations completed");

    // Initialize repositories
    let db = Arc::new(db);
    let post_repo = PostRepository::new(Arc::clone(&db));
    let follow_repo = FollowRepository::new(Arc::clone(&db));
    let profile_repo = ProfileRepository::new(Arc::clone(&db));
    let business_repo = BusinessRepository::new(Arc::clone(&db));
    let like_repo = PostLikeRepository::new(Arc::clone(&db));
    let comment_repo = CommentRepository::new(Arc::clone(&db));

    // Initialize services
    let feed_service = FeedService::new(
        post_repo.clone(),
        follow_repo,
        profile_repo.clone(),
        business_repo.clone(),
        like_repo,
        comment_repo,
    );
    let post_service = PostService::new(post_repo, business_repo);
    let verification_service =
        VerificationService::new(profile_repo, config.verification.token_ttl()?);
    let auth_service = AuthService::new(&config.auth);

    let state = AppState {
        feed_service,
        post_service,
        verification_service,
        auth_service,
        public_origin: config.public_origin(),
    };

    let app = app(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
