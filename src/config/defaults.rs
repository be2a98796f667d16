pub(crate) fn default_font_size() -> u32 {
    18
}

pub(crate) fn default_line_spacing() -> f32 {
    1.3
}

pub(crate) fn default_window_width() -> f32 {
    1100.0
}

pub(crate) fn default_window_height() -> f32 {
    760.0
}

pub(crate) fn default_day_highlight() -> crate::config::HighlightColor {
    crate::config::HighlightColor {
        r: 1.0,
        g: 0.85,
        b: 0.3,
        a: 0.35,
    }
}

pub(crate) fn default_night_highlight() -> crate::config::HighlightColor {
    crate::config::HighlightColor {
        r: 0.8,
        g: 0.8,
        b: 0.5,
        a: 0.25,
    }
}

pub(crate) fn default_poll_interval_ms() -> u64 {
    100
}

pub(crate) fn default_player_event_poll_ms() -> u64 {
    250
}

pub(crate) fn default_scroll_animation_ms() -> u64 {
    100
}

pub(crate) fn default_anchor_offset_px() -> f32 {
    48.0
}

pub(crate) fn default_show_wordbook() -> bool {
    true
}

pub(crate) fn default_show_lookup() -> bool {
    true
}

pub(crate) fn default_forward_clicks_to_wordbook() -> bool {
    false
}

pub(crate) fn default_video_map_path() -> String {
    "data/videos.json".to_string()
}

pub(crate) fn default_video_key() -> String {
    crate::transcript::DEFAULT_VIDEO_KEY.to_string()
}

pub(crate) fn default_lookup_endpoint() -> String {
    "http://127.0.0.1:8787/lookup".to_string()
}

pub(crate) fn default_lookup_timeout_secs() -> u64 {
    10
}

pub(crate) fn default_log_level() -> crate::config::LogLevel {
    crate::config::LogLevel::Info
}

pub(crate) fn default_key_toggle_play_pause() -> String {
    "space".to_string()
}

pub(crate) fn default_key_jump_to_active() -> String {
    "j".to_string()
}

pub(crate) fn default_key_switch_pane() -> String {
    "tab".to_string()
}

pub(crate) fn default_key_toggle_wordbook() -> String {
    "ctrl+w".to_string()
}

pub(crate) fn default_key_toggle_lookup() -> String {
    "ctrl+l".to_string()
}

pub(crate) fn default_key_safe_quit() -> String {
    "q".to_string()
}
