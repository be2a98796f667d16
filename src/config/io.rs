use super::models::AppConfig;
use super::tables::ConfigTables;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Load `path`, falling back to defaults when the file is missing or invalid.
pub fn load_config(path: &Path) -> AppConfig {
    let contents = match fs::read_to_string(path) {
        Ok(data) => {
            info!(path = %path.display(), "Loaded base config");
            data
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                "Falling back to default config: {err}"
            );
            return AppConfig::default();
        }
    };

    match parse_config(&contents) {
        Ok(cfg) => {
            debug!("Parsed configuration from disk");
            cfg
        }
        Err(err) => {
            warn!(path = %path.display(), "Invalid config TOML: {err}");
            AppConfig::default()
        }
    }
}

pub fn parse_config(contents: &str) -> Result<AppConfig, toml::de::Error> {
    toml::from_str::<ConfigTables>(contents).map(AppConfig::from)
}

pub fn serialize_config(config: &AppConfig) -> Result<String, toml::ser::Error> {
    toml::to_string_pretty(&ConfigTables::from(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LogLevel, ScrollAnchorMode, ThemeMode};
    use crate::sync::ScrollAnchor;

    #[test]
    fn empty_document_yields_defaults() {
        let cfg = parse_config("").expect("empty TOML is valid");
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.poll_interval_ms, 100);
        assert_eq!(cfg.scroll_animation_ms, 100);
        assert_eq!(cfg.anchor(), ScrollAnchor::Centered);
        assert!(!cfg.forward_clicks_to_wordbook);
    }

    #[test]
    fn tables_map_onto_flat_config() {
        let cfg = parse_config(
            r#"
            [appearance]
            theme = "day"
            font_size = 22

            [sync]
            poll_interval_ms = 50
            scroll_anchor = "top-offset"
            anchor_offset_px = 30.0

            [ui]
            side_by_side = true

            [lookup]
            endpoint = "https://dict.example/lookup"

            [logging]
            log_level = "debug"

            [keys]
            jump_to_active = "ctrl+j"
            "#,
        )
        .expect("valid TOML");

        assert_eq!(cfg.theme, ThemeMode::Day);
        assert_eq!(cfg.font_size, 22);
        assert_eq!(cfg.poll_interval_ms, 50);
        assert_eq!(cfg.scroll_anchor, ScrollAnchorMode::TopOffset);
        assert_eq!(cfg.anchor(), ScrollAnchor::TopOffset(30.0));
        assert!(cfg.side_by_side);
        assert_eq!(cfg.lookup_endpoint, "https://dict.example/lookup");
        assert_eq!(cfg.log_level, LogLevel::Debug);
        assert_eq!(cfg.key_jump_to_active, "ctrl+j");
        assert_eq!(cfg.key_safe_quit, "q");
    }

    #[test]
    fn serialized_config_parses_back_unchanged() {
        let mut cfg = AppConfig::default();
        cfg.side_by_side = true;
        cfg.scroll_anchor = ScrollAnchorMode::TopOffset;
        cfg.video_map_path = "clips/map.json".into();
        let text = serialize_config(&cfg).expect("serializable");
        assert!(text.contains("[sync]"));
        assert_eq!(parse_config(&text).expect("valid TOML"), cfg);
    }

    #[test]
    fn invalid_file_falls_back_to_defaults() {
        let dir = std::env::temp_dir().join(format!("cinelingua-config-{}", std::process::id()));
        fs::create_dir_all(&dir).expect("mkdir");
        let path = dir.join("config.toml");
        fs::write(&path, "[appearance\nfont_size = ").expect("write");
        assert_eq!(load_config(&path), AppConfig::default());
        let missing = load_config(&dir.join("missing.toml"));
        assert_eq!(missing, AppConfig::default());
        assert!(!missing.forward_clicks_to_wordbook);
    }
}
