use anyhow::{Context, Result};
use complication_config::config::Config;
use complication_config::controller::SelectionAndPreviewController;
use complication_config::logger;
use complication_config::preferences::FilePreferencesStore;
use complication_config::provider::{ProviderInfoGateway, StaticProviderSource};
use log::{info, warn};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

/// How long to wait for the bulk lookup before printing what we have
const LOOKUP_SETTLE_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;
    logger::init(&config.logging)?;

    let preferences_path = config.preferences_path()?;
    info!("Using preferences file {}", preferences_path.display());
    let store = FilePreferencesStore::with_namespace(&preferences_path, &config.preferences.namespace);

    let source = Arc::new(StaticProviderSource::from_config(&config.providers));
    let gateway = ProviderInfoGateway::new(source, config.gateway.worker_threads);

    let mut controller = SelectionAndPreviewController::new(Box::new(store), gateway)
        .context("Failed to start configuration controller")?;

    let slot_count = controller.registry().all_slots().len();
    let settle = async {
        let mut resolved = 0;
        while resolved < slot_count {
            match controller.wait_for_lookup_result().await {
                Some(Ok(_)) => resolved += 1,
                Some(Err(e)) => warn!("Lookup result not applied: {}", e),
                None => break,
            }
        }
        resolved
    };

    match tokio::time::timeout(LOOKUP_SETTLE_TIMEOUT, settle).await {
        Ok(resolved) => info!("Resolved {} of {} slots", resolved, slot_count),
        Err(_) => warn!("Bulk lookup still pending after {:?}", LOOKUP_SETTLE_TIMEOUT),
    }

    let report = json!({
        "preview": controller.preview(),
        "background_preview_color": controller.background_preview_color(),
        "hand_palette": controller.hand_palette(),
        "unread_notifications_enabled": controller.preferences().unread_notifications_enabled,
        "rows": controller.rows(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    controller.dismiss();
    Ok(())
}
