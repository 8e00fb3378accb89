//! `sharktrack`: command-line client for the sharktrack API.
//!
//! # Usage
//!
//! ```
//! sharktrack search --window week --gender Female
//! sharktrack --profile alice follow "Mary Lee"
//! sharktrack --config ~/.config/sharktrack/cli.toml favourites
//! ```

mod client;
mod output;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client::{ApiClient, SearchQuery};
use serde::Deserialize;
use sharktrack_core::sighting::Window;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

const DEFAULT_URL: &str = "http://localhost:5280";
const DEFAULT_PROFILE: &str = "default";

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "sharktrack", about = "Query shark sightings and manage favourites")]
struct Args {
  /// Path to a TOML config file (url, profile).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the sharktrack server (default: http://localhost:5280).
  #[arg(long, env = "SHARKTRACK_URL")]
  url: Option<String>,

  /// Profile whose favourites to use (default: default).
  #[arg(long, env = "SHARKTRACK_PROFILE")]
  profile: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Sharks seen within a window, most recent first.
  Search {
    #[arg(short, long, default_value_t = Window::Day)]
    window:       Window,
    #[arg(long)]
    gender:       Option<String>,
    #[arg(long)]
    life_stage:   Option<String>,
    #[arg(long)]
    tag_location: Option<String>,
  },
  /// Attribute counts over the sharks seen within a window.
  Stats {
    #[arg(short, long, default_value_t = Window::Day)]
    window: Window,
  },
  /// Details and last sighting of one shark.
  Show { id: String },
  /// The shark of the day.
  Featured,
  /// Create or select a profile.
  Profile {
    #[command(subcommand)]
    action: ProfileAction,
  },
  /// Add a shark to the profile's favourites.
  Follow { id: String },
  /// Remove a shark from the profile's favourites.
  Unfollow { id: String },
  /// Favourites ranked by distance, nearest first.
  Favourites,
}

#[derive(Subcommand, Debug)]
enum ProfileAction {
  /// Create a new, empty profile.
  Create { name: String },
  /// Show an existing profile and what it follows.
  Use { name: String },
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url:     String,
  #[serde(default)]
  profile: String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let url = args
    .url
    .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
    .unwrap_or_else(|| DEFAULT_URL.to_string());
  let profile = args
    .profile
    .or_else(|| (!file_cfg.profile.is_empty()).then(|| file_cfg.profile.clone()))
    .unwrap_or_else(|| DEFAULT_PROFILE.to_string());
  tracing::debug!(%url, %profile, "resolved settings");

  let client = ApiClient::new(url)?;
  let text = match args.command {
    Command::Search {
      window,
      gender,
      life_stage,
      tag_location,
    } => {
      let query = SearchQuery {
        window,
        gender,
        life_stage,
        tag_location,
      };
      output::search(&client.search(&query).await?)
    }
    Command::Stats { window } => output::statistics(&client.statistics(window).await?),
    Command::Show { id } => output::subject(&client.subject(&id).await?),
    Command::Featured => output::featured(&client.featured().await?),
    Command::Profile { action } => match action {
      ProfileAction::Create { name } => output::profile(&client.create_profile(&name).await?),
      ProfileAction::Use { name } => output::profile(&client.profile(&name).await?),
    },
    Command::Follow { id } => output::membership(&client.follow(&profile, &id).await?),
    Command::Unfollow { id } => output::membership(&client.unfollow(&profile, &id).await?),
    Command::Favourites => output::favourites(&client.favourites(&profile).await?),
  };
  print!("{text}");

  Ok(())
}
