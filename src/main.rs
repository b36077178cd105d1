use demai_wasm::config::Config;
use demai_wasm::views::App;
use dioxus::prelude::LaunchBuilder;
use tracing::{info, warn, Level};

fn main() {
    // Load config before logging so the level can come from it.
    let loaded = Config::embedded();
    let config: Config = loaded.as_ref().cloned().unwrap_or_default();
    let level = config.log_level().unwrap_or(Level::INFO);

    dioxus_logger::init(level).expect("failed to init logger");

    if let Err(e) = &loaded {
        warn!(error = %e, "invalid embedded config, using defaults");
    }
    if config.log_level().is_err() {
        warn!(level = %config.logging.level, "unknown log level, using info");
    }
    info!("demai v{} starting", env!("CARGO_PKG_VERSION"));

    // App reads this config from the root context.
    LaunchBuilder::new().with_context(config).launch(App);
}
