use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hubkit", about = "Speech-to-text gateway and dashboard registry")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = hubkit_core::AppConfig::load_from_file(&cli.config)
        .with_context(|| format!("failed to load config from {:?}", cli.config))?;

    let env_filter = EnvFilter::try_new(&config.general.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::Registry::default()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        );

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    tracing::info!("hubkit starting");

    let registry = hubkit_stt::PlatformRegistry::new();
    let providers = hubkit_stt::setup_providers(&config.stt, &registry).await;
    if providers.is_empty() {
        tracing::warn!("no STT providers available");
    } else {
        tracing::info!(providers = ?providers.keys(), "STT providers ready");
    }

    let lovelace_config = hubkit_lovelace::LovelaceConfig::from_value(config.lovelace.clone())
        .context("invalid [lovelace] section")?;
    let panels = hubkit_lovelace::PanelRegistry::new();
    let options = hubkit_lovelace::SetupOptions {
        safe_mode: config.general.safe_mode,
        config_dir: config_dir(&cli.config),
    };
    let lovelace = hubkit_lovelace::Lovelace::setup(lovelace_config, panels.clone(), options)
    .context("failed to set up lovelace")?;
    tracing::info!(
        mode = %lovelace.mode(),
        panels = ?panels.url_paths(),
        "lovelace ready"
    );
    let lovelace = Arc::new(RwLock::new(lovelace));

    let app = hubkit_stt::router(providers, config.http.api_token.clone())
        .merge(hubkit_lovelace::router(lovelace));

    let listener = tokio::net::TcpListener::bind(&config.http.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.http.bind))?;
    tracing::info!("listening on {}", config.http.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    tracing::info!("shutting down");
    Ok(())
}

/// Dashboard yaml files live next to the config file.
fn config_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
}
