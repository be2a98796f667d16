use super::defaults;
use super::models::{AppConfig, HighlightColor, LogLevel, ScrollAnchorMode, ThemeMode};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, serde::Serialize, Default)]
pub(super) struct ConfigTables {
    #[serde(default)]
    appearance: AppearanceConfig,
    #[serde(default)]
    sync: SyncConfig,
    #[serde(default)]
    ui: UiConfig,
    #[serde(default)]
    media: MediaConfig,
    #[serde(default)]
    lookup: LookupConfig,
    #[serde(default)]
    logging: LoggingConfig,
    #[serde(default)]
    keys: KeysConfig,
}

impl From<ConfigTables> for AppConfig {
    fn from(tables: ConfigTables) -> Self {
        AppConfig {
            theme: tables.appearance.theme,
            font_size: tables.appearance.font_size,
            line_spacing: tables.appearance.line_spacing,
            window_width: tables.appearance.window_width,
            window_height: tables.appearance.window_height,
            day_highlight: tables.appearance.day_highlight,
            night_highlight: tables.appearance.night_highlight,
            poll_interval_ms: tables.sync.poll_interval_ms,
            player_event_poll_ms: tables.sync.player_event_poll_ms,
            scroll_animation_ms: tables.sync.scroll_animation_ms,
            scroll_anchor: tables.sync.scroll_anchor,
            anchor_offset_px: tables.sync.anchor_offset_px,
            side_by_side: tables.ui.side_by_side,
            show_wordbook: tables.ui.show_wordbook,
            show_lookup: tables.ui.show_lookup,
            forward_clicks_to_wordbook: tables.ui.forward_clicks_to_wordbook,
            video_map_path: tables.media.video_map_path,
            default_video: tables.media.default_video,
            lookup_endpoint: tables.lookup.endpoint,
            lookup_timeout_secs: tables.lookup.timeout_secs,
            log_level: tables.logging.log_level,
            key_toggle_play_pause: tables.keys.toggle_play_pause,
            key_jump_to_active: tables.keys.jump_to_active,
            key_switch_pane: tables.keys.switch_pane,
            key_toggle_wordbook: tables.keys.toggle_wordbook,
            key_toggle_lookup: tables.keys.toggle_lookup,
            key_safe_quit: tables.keys.safe_quit,
        }
    }
}

impl From<&AppConfig> for ConfigTables {
    fn from(config: &AppConfig) -> Self {
        ConfigTables {
            appearance: AppearanceConfig {
                theme: config.theme,
                font_size: config.font_size,
                line_spacing: config.line_spacing,
                window_width: config.window_width,
                window_height: config.window_height,
                day_highlight: config.day_highlight,
                night_highlight: config.night_highlight,
            },
            sync: SyncConfig {
                poll_interval_ms: config.poll_interval_ms,
                player_event_poll_ms: config.player_event_poll_ms,
                scroll_animation_ms: config.scroll_animation_ms,
                scroll_anchor: config.scroll_anchor,
                anchor_offset_px: config.anchor_offset_px,
            },
            ui: UiConfig {
                side_by_side: config.side_by_side,
                show_wordbook: config.show_wordbook,
                show_lookup: config.show_lookup,
                forward_clicks_to_wordbook: config.forward_clicks_to_wordbook,
            },
            media: MediaConfig {
                video_map_path: config.video_map_path.clone(),
                default_video: config.default_video.clone(),
            },
            lookup: LookupConfig {
                endpoint: config.lookup_endpoint.clone(),
                timeout_secs: config.lookup_timeout_secs,
            },
            logging: LoggingConfig {
                log_level: config.log_level,
            },
            keys: KeysConfig {
                toggle_play_pause: config.key_toggle_play_pause.clone(),
                jump_to_active: config.key_jump_to_active.clone(),
                switch_pane: config.key_switch_pane.clone(),
                toggle_wordbook: config.key_toggle_wordbook.clone(),
                toggle_lookup: config.key_toggle_lookup.clone(),
                safe_quit: config.key_safe_quit.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct AppearanceConfig {
    #[serde(default)]
    theme: ThemeMode,
    #[serde(default = "defaults::default_font_size")]
    font_size: u32,
    #[serde(default = "defaults::default_line_spacing")]
    line_spacing: f32,
    #[serde(default = "defaults::default_window_width")]
    window_width: f32,
    #[serde(default = "defaults::default_window_height")]
    window_height: f32,
    #[serde(default = "defaults::default_day_highlight")]
    day_highlight: HighlightColor,
    #[serde(default = "defaults::default_night_highlight")]
    night_highlight: HighlightColor,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        AppearanceConfig {
            theme: ThemeMode::default(),
            font_size: defaults::default_font_size(),
            line_spacing: defaults::default_line_spacing(),
            window_width: defaults::default_window_width(),
            window_height: defaults::default_window_height(),
            day_highlight: defaults::default_day_highlight(),
            night_highlight: defaults::default_night_highlight(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct SyncConfig {
    #[serde(default = "defaults::default_poll_interval_ms")]
    poll_interval_ms: u64,
    #[serde(default = "defaults::default_player_event_poll_ms")]
    player_event_poll_ms: u64,
    #[serde(default = "defaults::default_scroll_animation_ms")]
    scroll_animation_ms: u64,
    #[serde(default)]
    scroll_anchor: ScrollAnchorMode,
    #[serde(default = "defaults::default_anchor_offset_px")]
    anchor_offset_px: f32,
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig {
            poll_interval_ms: defaults::default_poll_interval_ms(),
            player_event_poll_ms: defaults::default_player_event_poll_ms(),
            scroll_animation_ms: defaults::default_scroll_animation_ms(),
            scroll_anchor: ScrollAnchorMode::default(),
            anchor_offset_px: defaults::default_anchor_offset_px(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct UiConfig {
    #[serde(default)]
    side_by_side: bool,
    #[serde(default = "defaults::default_show_wordbook")]
    show_wordbook: bool,
    #[serde(default = "defaults::default_show_lookup")]
    show_lookup: bool,
    #[serde(default = "defaults::default_forward_clicks_to_wordbook")]
    forward_clicks_to_wordbook: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            side_by_side: false,
            show_wordbook: defaults::default_show_wordbook(),
            show_lookup: defaults::default_show_lookup(),
            forward_clicks_to_wordbook: defaults::default_forward_clicks_to_wordbook(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct MediaConfig {
    #[serde(default = "defaults::default_video_map_path")]
    video_map_path: String,
    #[serde(default = "defaults::default_video_key")]
    default_video: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        MediaConfig {
            video_map_path: defaults::default_video_map_path(),
            default_video: defaults::default_video_key(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct LookupConfig {
    #[serde(default = "defaults::default_lookup_endpoint")]
    endpoint: String,
    #[serde(default = "defaults::default_lookup_timeout_secs")]
    timeout_secs: u64,
}

impl Default for LookupConfig {
    fn default() -> Self {
        LookupConfig {
            endpoint: defaults::default_lookup_endpoint(),
            timeout_secs: defaults::default_lookup_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct LoggingConfig {
    #[serde(default = "defaults::default_log_level")]
    log_level: LogLevel,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            log_level: defaults::default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct KeysConfig {
    #[serde(default = "defaults::default_key_toggle_play_pause")]
    toggle_play_pause: String,
    #[serde(default = "defaults::default_key_jump_to_active")]
    jump_to_active: String,
    #[serde(default = "defaults::default_key_switch_pane")]
    switch_pane: String,
    #[serde(default = "defaults::default_key_toggle_wordbook")]
    toggle_wordbook: String,
    #[serde(default = "defaults::default_key_toggle_lookup")]
    toggle_lookup: String,
    #[serde(default = "defaults::default_key_safe_quit")]
    safe_quit: String,
}

impl Default for KeysConfig {
    fn default() -> Self {
        KeysConfig {
            toggle_play_pause: defaults::default_key_toggle_play_pause(),
            jump_to_active: defaults::default_key_jump_to_active(),
            switch_pane: defaults::default_key_switch_pane(),
            toggle_wordbook: defaults::default_key_toggle_wordbook(),
            toggle_lookup: defaults::default_key_toggle_lookup(),
            safe_quit: defaults::default_key_safe_quit(),
        }
    }
}
