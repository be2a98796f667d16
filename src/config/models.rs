use crate::config::defaults;
use crate::sync::{LayoutMetrics, ScrollAnchor};
use serde::Deserialize;
use std::time::Duration;

/// High-level app configuration; deserializable from TOML.
#[derive(Debug, Clone, Deserialize, serde::Serialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub theme: ThemeMode,
    #[serde(default = "crate::config::defaults::default_font_size")]
    pub font_size: u32,
    #[serde(default = "crate::config::defaults::default_line_spacing")]
    pub line_spacing: f32,
    #[serde(default = "crate::config::defaults::default_window_width")]
    pub window_width: f32,
    #[serde(default = "crate::config::defaults::default_window_height")]
    pub window_height: f32,
    #[serde(default = "crate::config::defaults::default_day_highlight")]
    pub day_highlight: HighlightColor,
    #[serde(default = "crate::config::defaults::default_night_highlight")]
    pub night_highlight: HighlightColor,
    #[serde(default = "crate::config::defaults::default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    #[serde(default = "crate::config::defaults::default_player_event_poll_ms")]
    pub player_event_poll_ms: u64,
    #[serde(default = "crate::config::defaults::default_scroll_animation_ms")]
    pub scroll_animation_ms: u64,
    #[serde(default)]
    pub scroll_anchor: ScrollAnchorMode,
    #[serde(default = "crate::config::defaults::default_anchor_offset_px")]
    pub anchor_offset_px: f32,
    #[serde(default)]
    pub side_by_side: bool,
    #[serde(default = "crate::config::defaults::default_show_wordbook")]
    pub show_wordbook: bool,
    #[serde(default = "crate::config::defaults::default_show_lookup")]
    pub show_lookup: bool,
    #[serde(default = "crate::config::defaults::default_forward_clicks_to_wordbook")]
    pub forward_clicks_to_wordbook: bool,
    #[serde(default = "crate::config::defaults::default_video_map_path")]
    pub video_map_path: String,
    #[serde(default = "crate::config::defaults::default_video_key")]
    pub default_video: String,
    #[serde(default = "crate::config::defaults::default_lookup_endpoint")]
    pub lookup_endpoint: String,
    #[serde(default = "crate::config::defaults::default_lookup_timeout_secs")]
    pub lookup_timeout_secs: u64,
    #[serde(default = "crate::config::defaults::default_log_level")]
    pub log_level: LogLevel,
    #[serde(default = "crate::config::defaults::default_key_toggle_play_pause")]
    pub key_toggle_play_pause: String,
    #[serde(default = "crate::config::defaults::default_key_jump_to_active")]
    pub key_jump_to_active: String,
    #[serde(default = "crate::config::defaults::default_key_switch_pane")]
    pub key_switch_pane: String,
    #[serde(default = "crate::config::defaults::default_key_toggle_wordbook")]
    pub key_toggle_wordbook: String,
    #[serde(default = "crate::config::defaults::default_key_toggle_lookup")]
    pub key_toggle_lookup: String,
    #[serde(default = "crate::config::defaults::default_key_safe_quit")]
    pub key_safe_quit: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            theme: ThemeMode::default(),
            font_size: defaults::default_font_size(),
            line_spacing: defaults::default_line_spacing(),
            window_width: defaults::default_window_width(),
            window_height: defaults::default_window_height(),
            day_highlight: defaults::default_day_highlight(),
            night_highlight: defaults::default_night_highlight(),
            poll_interval_ms: defaults::default_poll_interval_ms(),
            player_event_poll_ms: defaults::default_player_event_poll_ms(),
            scroll_animation_ms: defaults::default_scroll_animation_ms(),
            scroll_anchor: ScrollAnchorMode::default(),
            anchor_offset_px: defaults::default_anchor_offset_px(),
            side_by_side: false,
            show_wordbook: defaults::default_show_wordbook(),
            show_lookup: defaults::default_show_lookup(),
            forward_clicks_to_wordbook: defaults::default_forward_clicks_to_wordbook(),
            video_map_path: defaults::default_video_map_path(),
            default_video: defaults::default_video_key(),
            lookup_endpoint: defaults::default_lookup_endpoint(),
            lookup_timeout_secs: defaults::default_lookup_timeout_secs(),
            log_level: defaults::default_log_level(),
            key_toggle_play_pause: defaults::default_key_toggle_play_pause(),
            key_jump_to_active: defaults::default_key_jump_to_active(),
            key_switch_pane: defaults::default_key_switch_pane(),
            key_toggle_wordbook: defaults::default_key_toggle_wordbook(),
            key_toggle_lookup: defaults::default_key_toggle_lookup(),
            key_safe_quit: defaults::default_key_safe_quit(),
        }
    }
}

impl AppConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(10))
    }

    pub fn player_event_poll_interval(&self) -> Duration {
        Duration::from_millis(self.player_event_poll_ms.max(10))
    }

    pub fn scroll_animation(&self) -> Duration {
        Duration::from_millis(self.scroll_animation_ms)
    }

    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.lookup_timeout_secs.max(1))
    }

    pub fn anchor(&self) -> ScrollAnchor {
        match self.scroll_anchor {
            ScrollAnchorMode::Centered => ScrollAnchor::Centered,
            ScrollAnchorMode::TopOffset => ScrollAnchor::TopOffset(self.anchor_offset_px.max(0.0)),
        }
    }

    pub fn layout_metrics(&self) -> LayoutMetrics {
        LayoutMetrics {
            font_size: self.font_size as f32,
            line_spacing: self.line_spacing,
            ..LayoutMetrics::default()
        }
    }

    pub fn highlight(&self) -> HighlightColor {
        match self.theme {
            ThemeMode::Day => self.day_highlight,
            ThemeMode::Night => self.night_highlight,
        }
    }
}

/// Theme mode.
#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeMode {
    Day,
    #[default]
    Night,
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ThemeMode::Day => "Day",
            ThemeMode::Night => "Night",
        };
        write!(f, "{}", label)
    }
}

/// Where auto-follow places the active line.
#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ScrollAnchorMode {
    #[default]
    Centered,
    TopOffset,
}

impl std::fmt::Display for ScrollAnchorMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ScrollAnchorMode::Centered => "Centered",
            ScrollAnchorMode::TopOffset => "Top offset",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Copy, serde::Deserialize, serde::Serialize, PartialEq)]
pub struct HighlightColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Supported logging verbosity levels.
#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_filter_str())
    }
}
