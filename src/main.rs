use std::sync::Arc;

use ouchipog::api::router::create_router;
use ouchipog::config::AppConfig;
use ouchipog::site::Site;
use ouchipog::{db, metrics, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    let addr = format!("{}:{}", config.host, config.port);
    let metrics_handle = metrics::init_metrics();

    tracing::info!("Connecting to database...");
    let db = db::init_pool(&config.database_url).await?;
    tracing::info!("Database connected");

    // Full static build up front; POST /api/race revalidates selectively.
    let site = Arc::new(Site::new(db.clone(), &config));
    let pages = site.render_all().await?;
    tracing::info!(pages, season = %config.season, "Initial render complete");

    let state = AppState {
        db,
        config,
        site,
        metrics_handle,
    };
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {addr}");
    axum::serve(listener, router).await?;

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();
}
