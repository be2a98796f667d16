//! Per-video preference cache and the local store location.
//!
//! Files live under `.cache/`, keyed by a hash of the video key to avoid
//! filesystem issues. Each video keeps its own `config.toml` with the UI
//! preferences in effect when it was last closed.

use crate::config::{AppConfig, parse_config, serialize_config};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const CACHE_DIR: &str = ".cache";
const LOCAL_STORE_FILE: &str = "local_storage.json";

fn hash_dir_in(root: &Path, video_key: &str) -> PathBuf {
    let mut hasher = Sha256::new();
    hasher.update(video_key.as_bytes());
    let hash = format!("{:x}", hasher.finalize());
    root.join(hash)
}

/// Path of the JSON key-value store shared by all videos.
pub fn local_store_path() -> PathBuf {
    Path::new(CACHE_DIR).join(LOCAL_STORE_FILE)
}

pub fn load_video_config(video_key: &str) -> Option<AppConfig> {
    load_video_config_in(Path::new(CACHE_DIR), video_key)
}

pub fn save_video_config(video_key: &str, config: &AppConfig) {
    save_video_config_in(Path::new(CACHE_DIR), video_key, config)
}

/// Per-video overrides keep only display preferences; everything else comes
/// from the base config so edits to `conf/config.toml` always take effect.
pub fn merge_with_base(base: &AppConfig, overrides: AppConfig) -> AppConfig {
    AppConfig {
        theme: overrides.theme,
        font_size: overrides.font_size,
        line_spacing: overrides.line_spacing,
        scroll_anchor: overrides.scroll_anchor,
        side_by_side: overrides.side_by_side,
        show_wordbook: overrides.show_wordbook,
        show_lookup: overrides.show_lookup,
        forward_clicks_to_wordbook: overrides.forward_clicks_to_wordbook,
        ..base.clone()
    }
}

fn load_video_config_in(root: &Path, video_key: &str) -> Option<AppConfig> {
    let path = hash_dir_in(root, video_key).join("config.toml");
    let data = fs::read_to_string(&path).ok()?;
    match parse_config(&data) {
        Ok(config) => {
            debug!(path = %path.display(), "Loaded per-video config");
            Some(config)
        }
        Err(err) => {
            warn!(path = %path.display(), "Ignoring invalid per-video config: {err}");
            None
        }
    }
}

/// Errors are logged and otherwise ignored to keep the UI responsive.
fn save_video_config_in(root: &Path, video_key: &str, config: &AppConfig) {
    let path = hash_dir_in(root, video_key).join("config.toml");
    if let Some(parent) = path.parent() {
        if let Err(err) = fs::create_dir_all(parent) {
            warn!(path = %parent.display(), "Failed to create cache dir: {err}");
            return;
        }
    }
    match serialize_config(config) {
        Ok(contents) => {
            if let Err(err) = fs::write(&path, contents) {
                warn!(path = %path.display(), "Failed to save per-video config: {err}");
            }
        }
        Err(err) => warn!("Failed to serialize per-video config: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_dirs_differ_per_video() {
        let root = Path::new(CACHE_DIR);
        assert_ne!(hash_dir_in(root, "intro"), hash_dir_in(root, "default"));
        assert_eq!(hash_dir_in(root, "intro"), hash_dir_in(root, "intro"));
        assert!(hash_dir_in(root, "intro").starts_with(CACHE_DIR));
    }

    #[test]
    fn overrides_keep_base_keys_and_logging() {
        let mut base = AppConfig::default();
        base.key_safe_quit = "ctrl+q".into();
        base.lookup_endpoint = "https://dict.example/api".into();

        let mut overrides = AppConfig::default();
        overrides.font_size = 30;
        overrides.side_by_side = true;
        overrides.key_safe_quit = "x".into();

        let merged = merge_with_base(&base, overrides);
        assert_eq!(merged.font_size, 30);
        assert!(merged.side_by_side);
        assert_eq!(merged.key_safe_quit, "ctrl+q");
        assert_eq!(merged.lookup_endpoint, "https://dict.example/api");
    }

    #[test]
    fn per_video_config_round_trips() {
        let root = std::env::temp_dir().join(format!("cinelingua-cache-{}", std::process::id()));
        let _ = fs::remove_dir_all(&root);

        assert!(load_video_config_in(&root, "intro").is_none());

        let mut config = AppConfig::default();
        config.side_by_side = true;
        config.font_size = 24;
        save_video_config_in(&root, "intro", &config);

        let written = fs::read_to_string(hash_dir_in(&root, "intro").join("config.toml"))
            .expect("config written");
        assert!(written.contains("[ui]"));
        assert!(written.contains("side_by_side = true"));
        assert_eq!(load_video_config_in(&root, "intro"), Some(config));
        assert!(load_video_config_in(&root, "other").is_none());
    }
}
