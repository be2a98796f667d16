//! Entry point for CineLingua.
//!
//! Responsibilities here are intentionally minimal:
//! - Parse command-line arguments.
//! - Load user configuration from `conf/config.toml` plus per-video overrides.
//! - Resolve the video entry and open the local store.
//! - Launch the GUI application.

mod app;
mod cache;
mod config;
mod error;
mod lookup;
mod player;
mod storage;
mod sync;
mod transcript;
mod wordbook;

use crate::app::run_app;
use crate::cache::{load_video_config, local_store_path, merge_with_base};
use crate::config::load_config;
use crate::storage::FileStore;
use crate::transcript::Session;
use anyhow::{Context, Result};
use std::env;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

type ReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

static SIGINT_REQUESTED: AtomicBool = AtomicBool::new(false);

/// Consume a pending Ctrl-C request.
pub(crate) fn take_sigint_requested() -> bool {
    SIGINT_REQUESTED.swap(false, Ordering::SeqCst)
}

fn main() {
    let reload_handle = init_tracing();
    if let Err(err) = ctrlc::set_handler(|| SIGINT_REQUESTED.store(true, Ordering::SeqCst)) {
        warn!("Failed to install Ctrl-C handler: {err}");
    }
    if let Err(err) = run(&reload_handle) {
        error!("{err:?}");
        std::process::exit(1);
    }
}

fn run(reload_handle: &ReloadHandle) -> Result<()> {
    let base_config = load_config(Path::new("conf/config.toml"));
    let video_key = parse_args().unwrap_or_else(|| base_config.default_video.clone());

    let config = match load_video_config(&video_key) {
        Some(overrides) => {
            info!(video = %video_key, "Loaded per-video overrides from cache");
            merge_with_base(&base_config, overrides)
        }
        None => base_config,
    };
    set_log_level(reload_handle, config.log_level.as_filter_str());
    info!(
        video = %video_key,
        map = %config.video_map_path,
        level = %config.log_level,
        "Starting CineLingua"
    );

    let session = Session::resolve(Path::new(&config.video_map_path), &video_key);
    if let Some(reason) = &session.load_error {
        warn!(video = %video_key, "Session incomplete: {reason}");
    }
    let store = FileStore::open(local_store_path());
    info!(path = %store.path().display(), "Opened local store");

    run_app(config, session, Box::new(store)).context("Failed to start the GUI")?;
    Ok(())
}

/// Optional video key as the first argument.
fn parse_args() -> Option<String> {
    env::args()
        .nth(1)
        .map(|arg| arg.trim().to_string())
        .filter(|arg| !arg.is_empty())
}

fn init_tracing() -> ReloadHandle {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let (filter_layer, handle) = reload::Layer::new(env_filter);
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(filter_layer),
        )
        .init();
    warn!("Logging initialized; override level with config.log_level or RUST_LOG");
    handle
}

fn set_log_level(handle: &ReloadHandle, level: &str) {
    let parsed = EnvFilter::builder()
        .parse(level)
        .unwrap_or_else(|_| EnvFilter::new("debug"));
    if let Err(err) = handle.modify(|filter| *filter = parsed.clone()) {
        warn!(%level, "Failed to update log level from config: {err}");
    } else {
        info!(%level, "Applied log level from config");
    }
}
