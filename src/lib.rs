pub mod audio;
pub mod catalog;
mod config;
pub mod effects;
pub mod error;
pub mod geometry;
pub mod image_cache;
pub mod logging;
pub mod overlay;
pub mod routing;
pub mod showcase;
pub mod state;
pub use error::{AppError, AppResult};

use audio::{AudioManager, LogSink};
use catalog::{CatalogError, DeskCatalog, JsonFileSource};
use image_cache::ImageCache;
use routing::Route;
use showcase::Showcase;

/// Entrypoint used by the CLI: loads the catalog and optionally opens the desk at `path`.
pub fn run(path: Option<&str>) -> AppResult<()> {
    logging::init();
    tracing::info!("starting desk-showcase");

    let config = config::load_app_config();
    let mut audio = AudioManager::new(LogSink);
    audio.initialize(&config.audio());
    audio.set_muted(config.muted);

    let mut showcase = Showcase::new(DeskCatalog::new(), audio);
    showcase.set_effects_enabled(config.effects_enabled());

    let source = JsonFileSource::new(config.desks_path());
    if let Err(err) = showcase.load_catalog(&source) {
        tracing::warn!(%err, "continuing with an empty gallery");
    }

    if let Some(path) = path {
        let route = Route::parse(path);
        match showcase.navigate(&route) {
            Ok(_) => {}
            Err(AppError::Catalog(CatalogError::UnknownSlug(slug))) => {
                tracing::warn!(%slug, "no desk matches route; showing gallery");
            }
            Err(err) => return Err(err),
        }
    }

    if let Some(desk) = showcase.selected_desk() {
        let mut images = ImageCache::new(config.asset_root());
        let report = images.preload_desk(desk);
        tracing::info!(
            desk = %desk.slug,
            cached = report.cached,
            failed = report.failed,
            "preloaded selected desk"
        );
    }

    tracing::info!(
        desks = showcase.catalog().len(),
        gates = ?showcase.gates(),
        "startup complete with {}",
        showcase.viewer()
    );
    Ok(())
}
