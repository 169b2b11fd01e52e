//! walkin operator shell binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! SQLite key/value store, loads the enquiry tracker from it, and hands
//! control to the interactive shell. The core never renders anything; all
//! presentation lives in this crate.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use walkin_core::session::Tracker;
use walkin_store_sqlite::SqliteStore;

mod shell;

#[derive(Parser)]
#[command(author, version, about = "Walkin enquiry tracker")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

/// Host configuration. Every field has a default so a missing config file
/// still starts the shell.
#[derive(Debug, Clone, serde::Deserialize)]
struct HostConfig {
  /// Path of the SQLite store file.
  #[serde(default = "default_store_path")]
  store_path: String,
}

fn default_store_path() -> String {
  "~/.local/share/walkin/walkin.db".to_owned()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("WALKIN"))
    .build()
    .context("failed to read config file")?;

  let host_cfg: HostConfig = settings
    .try_deserialize()
    .context("failed to deserialise HostConfig")?;

  // Expand `~` in the store path and make sure its directory exists.
  let store_path = expand_tilde(Path::new(&host_cfg.store_path));
  if let Some(parent) = store_path.parent()
    && !parent.as_os_str().is_empty()
  {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {parent:?}"))?;
  }

  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  // Startup load blocks the shell until the collection is in memory.
  let tracker = Tracker::load(store.clone()).await;

  shell::run(tracker, store).await
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
