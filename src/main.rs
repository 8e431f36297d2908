use clap::Parser;
use color_eyre::eyre::Result;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use multiscreen::application::{BootstrapScreensUseCase, ScreenManager};
use multiscreen::domain::entities::AppInfo;
use multiscreen::infrastructure::{
    AppConfig, CliArgs, ConfigSource, ConfigStore, TomlViewLoader, open_bundle,
};
use multiscreen::presentation::{App, demo_registry};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

fn load_config() -> Result<(AppConfig, ConfigSource)> {
    let args = CliArgs::parse();
    let store = ConfigStore::open()?;
    let (mut config, source) = store.load(args.config.as_deref())?;
    config.merge_with_args(args);
    Ok((config, source))
}

fn create_app() -> Result<App> {
    let (config, source) = load_config()?;

    init_logging(&config)?;

    info!(version = multiscreen::VERSION, config = ?source, "Starting multiscreen");
    if source == ConfigSource::Fallback {
        warn!("Config file could not be parsed, running with defaults");
    }

    let loader = TomlViewLoader::new(demo_registry());
    let mut manager = ScreenManager::new(AppInfo::default(), Box::new(loader));

    let views_path = config.effective_views_path();
    let bundle = open_bundle(&views_path)?;
    let outcome = BootstrapScreensUseCase::new(bundle.as_ref()).execute(
        &mut manager,
        Some(config.skin.as_str()),
        config.initial_screen.as_deref(),
    );

    if outcome.initial.is_none() {
        warn!(path = %views_path.display(), "No screens found in view bundle");
    }

    Ok(App::new(manager, &config.ui))
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let app = create_app()?;

    let mut terminal = ratatui::init();

    let result = app.run(&mut terminal).await;

    ratatui::restore();

    result
}
