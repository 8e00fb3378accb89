//! sharktrack server binary.
//!
//! Reads `sharktrack.toml` (or the path given with `--config`) layered under
//! `SHARKTRACK_*` environment variables, loads the sighting snapshot, and
//! serves the JSON API over HTTP.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Parser;
use sharktrack_api::{AppState, ServerConfig};
use sharktrack_store_fs::SnapshotProvider;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "sharktrack API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "sharktrack.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("SHARKTRACK"))
    .build()
    .context("failed to read config file")?;

  let mut server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;
  server_cfg.data_dir = expand_tilde(&server_cfg.data_dir);
  server_cfg.snapshot_path = expand_tilde(&server_cfg.snapshot_path);

  let provider = SnapshotProvider::open(&server_cfg.snapshot_path).with_context(|| {
    format!("failed to load snapshot {:?}", server_cfg.snapshot_path)
  })?;

  let address = format!("{}:{}", server_cfg.host, server_cfg.port);
  let data_dir = server_cfg.data_dir.clone();
  let state = AppState::open(provider, server_cfg)
    .with_context(|| format!("failed to open data directory {data_dir:?}"))?;
  tracing::info!(
    data_dir = %data_dir.display(),
    default_profile = %state.config.default_profile,
    "state ready"
  );

  let app = sharktrack_api::router(state);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
