use crate::cli::ServeArgs;
use crate::infra::{build_catalog, AppState};
use crate::routes::with_catalog_routes;
use axum::{Extension, Router};
use axum_prometheus::PrometheusMetricLayer;
use bifl_catalog::catalog::{ProductCatalog, ProductRepository};
use bifl_catalog::compare::{
    CompareSessions, CompareStore, JsonFileCompareStore, MemoryCompareStore,
};
use bifl_catalog::config::AppConfig;
use bifl_catalog::error::AppError;
use bifl_catalog::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{debug, info};

const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);
const SESSION_IDLE_MINUTES: i64 = 30;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let catalog = Arc::new(build_catalog(config.storage.catalog_csv.as_deref())?);

    let router = match &config.storage.compare_store_dir {
        Some(dir) => {
            info!(dir = %dir.display(), "persisting compare sets to disk");
            compare_routes(catalog, Arc::new(JsonFileCompareStore::new(dir.clone())))
        }
        None => compare_routes(catalog, Arc::new(MemoryCompareStore::default())),
    };

    let app = router.layer(Extension(app_state)).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "catalog service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn compare_routes<R, S>(catalog: Arc<ProductCatalog<R>>, store: Arc<S>) -> Router
where
    R: ProductRepository + 'static,
    S: CompareStore + 'static,
{
    let sessions = Arc::new(CompareSessions::new(store));
    spawn_session_sweeper(sessions.clone());
    with_catalog_routes(catalog, sessions)
}

/// Periodically drop compare sessions nobody has touched recently.
fn spawn_session_sweeper<S>(sessions: Arc<CompareSessions<S>>)
where
    S: CompareStore + 'static,
{
    tokio::spawn(async move {
        let mut ticker = interval(SESSION_SWEEP_INTERVAL);
        loop {
            ticker.tick().await;
            let evicted = sessions.evict_idle(chrono::Duration::minutes(SESSION_IDLE_MINUTES));
            if evicted > 0 {
                debug!(evicted, "swept idle compare sessions");
            }
        }
    });
}
