use issuance_ledger::{JsonFileStore, LedgerStore, SqliteStore};
use label_render::RasterRenderer;
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, LedgerBackend};

/// Install the stderr log subscriber. `RUST_LOG` overrides the `info` default.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Load .env from multiple candidate paths.
pub fn load_dotenv() {
    let candidates = [".env", "../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::debug!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::debug!("No .env file found, using system environment variables");
}

/// Open the configured ledger backend.
pub fn open_store(config: &AppConfig) -> Result<Box<dyn LedgerStore>, anyhow::Error> {
    let path = config.ledger_path();
    tracing::debug!(path = %path.display(), backend = ?config.ledger_backend, "Opening ledger");
    let store: Box<dyn LedgerStore> = match config.ledger_backend {
        LedgerBackend::Json => Box::new(JsonFileStore::new(path)),
        LedgerBackend::Sqlite => Box::new(SqliteStore::open(&path)?),
    };
    Ok(store)
}

/// Build the raster renderer, falling back to text-less output when no font
/// can be loaded.
pub fn build_renderer(config: &AppConfig) -> RasterRenderer {
    match label_render::load_font(config.font_path.as_deref()) {
        Ok(font) => RasterRenderer::new(Some(font)),
        Err(e) => {
            tracing::warn!("Labels will be rendered without text: {e}");
            RasterRenderer::without_font()
        }
    }
}
