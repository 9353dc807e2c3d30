//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run UI.
//! No business logic here.

use dotenv::dotenv;
use site_select::adapters::ai::{GeminiAdapter, MockModelAdapter};
use site_select::adapters::ui::map::{MapRegistry, OsmMapRenderer};
use site_select::adapters::ui::tui::TuiInputPort;
use site_select::ports::{GenerativeModelPort, InputPort, MapRenderer};
use site_select::shared::config::AppConfig;
use site_select::usecases::{AnalysisController, AnalysisService};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    // Logs go to stderr so they don't interleave with the dashboard on stdout.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    let cfg = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "invalid configuration, using defaults");
        AppConfig::default()
    });

    // --- Generative model ---
    let model: Arc<dyn GenerativeModelPort> = if cfg.is_ai_configured() {
        info!(
            model = %cfg.model_or_default(),
            url = %cfg.api_url_or_default(),
            "analysis enabled with Gemini adapter"
        );
        Arc::new(
            GeminiAdapter::new(
                cfg.api_url_or_default(),
                cfg.api_key().unwrap_or_default(),
                cfg.model_or_default(),
                cfg.request_timeout(),
            )
            .map_err(|e| anyhow::anyhow!("{}", e))?,
        )
    } else {
        warn!("SITE_SELECT_API_KEY not set, using mock model adapter");
        Arc::new(MockModelAdapter::with_delay(cfg.mock_delay_ms_or_default()))
    };

    // --- Services ---
    let service = Arc::new(AnalysisService::new(model));
    let controller = Arc::new(AnalysisController::new(service));

    // --- Maps ---
    let registry = Arc::new(MapRegistry::new());
    let maps: Arc<dyn MapRenderer> = Arc::new(OsmMapRenderer::new(
        cfg.map_zoom_or_default(),
        cfg.tile_url_or_default(),
        Arc::clone(&registry),
    ));
    info!(zoom = cfg.map_zoom_or_default(), "map tiles: {}", cfg.tile_url_or_default());

    site_select::adapters::ui::init_ui();

    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(controller, maps));

    // --- Run (form -> dashboard loop) ---
    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    info!(
        mounted = registry.mounted_total(),
        live = registry.live(),
        "maps released"
    );
    Ok(())
}
