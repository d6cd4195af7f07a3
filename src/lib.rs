pub mod api;
pub mod chiba;
pub mod config;
pub mod db;
pub mod errors;
pub mod form;
pub mod metrics;
pub mod models;
pub mod scoring;
pub mod site;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::site::Site;

#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub config: AppConfig,
    pub site: Arc<Site>,
    pub metrics_handle: metrics_exporter_prometheus::PrometheusHandle,
}
