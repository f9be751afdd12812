use metrics_exporter_prometheus::PrometheusHandle;
use rent_to_sa::config::{NotificationConfig, RateSourceConfig};
use rent_to_sa::error::AppError;
use rent_to_sa::workflows::profitability::{RateCatalog, WebhookNotifier};
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Standard tables, or the standard tables with base rates from a CSV export
/// when one is configured.
pub(crate) fn load_catalog(
    config: &RateSourceConfig,
    override_path: Option<&Path>,
) -> Result<RateCatalog, AppError> {
    match override_path.or(config.base_rates_csv.as_deref()) {
        Some(path) => {
            let catalog = RateCatalog::from_base_rates_path(path)?;
            info!(path = %path.display(), "loaded base rates from CSV");
            Ok(catalog)
        }
        None => Ok(RateCatalog::standard()),
    }
}

pub(crate) fn build_notifier(
    config: &NotificationConfig,
) -> Result<Option<Arc<WebhookNotifier>>, AppError> {
    match config.webhook_url.as_deref() {
        Some(url) => {
            let notifier = WebhookNotifier::try_new(url, config.webhook_timeout)?;
            info!(url, "result webhook enabled");
            Ok(Some(Arc::new(notifier)))
        }
        None => Ok(None),
    }
}
