use super::super::state::{App, MAX_FONT_SIZE, MAX_LINE_SPACING, MIN_FONT_SIZE, MIN_LINE_SPACING};
use super::Effect;
use crate::config::{ScrollAnchorMode, ThemeMode};
use crate::sync::SyncEvent;
use std::time::Instant;
use tracing::{debug, info};

impl App {
    pub(super) fn handle_font_size_changed(&mut self, size: u32, effects: &mut Vec<Effect>) {
        let clamped = size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
        if clamped != self.config.font_size {
            debug!(
                old = self.config.font_size,
                new = clamped,
                "Font size changed"
            );
            self.config.font_size = clamped;
            self.relayout(effects);
            effects.push(Effect::SaveConfig);
        }
    }

    pub(super) fn handle_line_spacing_changed(&mut self, spacing: f32, effects: &mut Vec<Effect>) {
        let clamped = spacing.clamp(MIN_LINE_SPACING, MAX_LINE_SPACING);
        if (clamped - self.config.line_spacing).abs() > f32::EPSILON {
            debug!(
                old = self.config.line_spacing,
                new = clamped,
                "Line spacing changed"
            );
            self.config.line_spacing = clamped;
            self.relayout(effects);
            effects.push(Effect::SaveConfig);
        }
    }

    pub(super) fn handle_toggle_theme(&mut self, effects: &mut Vec<Effect>) {
        let next = match self.config.theme {
            ThemeMode::Night => ThemeMode::Day,
            ThemeMode::Day => ThemeMode::Night,
        };
        info!(
            night_mode = matches!(next, ThemeMode::Night),
            "Toggled theme"
        );
        self.config.theme = next;
        effects.push(Effect::SaveConfig);
    }

    pub(super) fn handle_anchor_mode_changed(
        &mut self,
        mode: ScrollAnchorMode,
        effects: &mut Vec<Effect>,
    ) {
        if mode == self.config.scroll_anchor {
            return;
        }
        info!(%mode, "Scroll anchor changed");
        self.config.scroll_anchor = mode;
        self.relayout(effects);
        effects.push(Effect::SaveConfig);
    }

    pub(super) fn handle_side_by_side_changed(&mut self, enabled: bool, effects: &mut Vec<Effect>) {
        debug!(enabled, "Side-by-side layout toggled");
        self.config.side_by_side = enabled;
        self.relayout(effects);
        effects.push(Effect::SaveConfig);
    }

    pub(super) fn handle_forward_clicks_changed(
        &mut self,
        enabled: bool,
        effects: &mut Vec<Effect>,
    ) {
        debug!(enabled, "Forward clicked lines to wordbook");
        self.config.forward_clicks_to_wordbook = enabled;
        self.apply_display_config();
        effects.push(Effect::SaveConfig);
    }

    pub(super) fn handle_toggle_wordbook_panel(&mut self, effects: &mut Vec<Effect>) {
        debug!("Toggled wordbook panel");
        self.config.show_wordbook = !self.config.show_wordbook;
        self.relayout(effects);
        effects.push(Effect::SaveConfig);
    }

    pub(super) fn handle_toggle_lookup_panel(&mut self, effects: &mut Vec<Effect>) {
        debug!("Toggled lookup panel");
        self.config.show_lookup = !self.config.show_lookup;
        self.relayout(effects);
        effects.push(Effect::SaveConfig);
    }

    /// Push display settings into the panes and keep a followed line in view.
    fn relayout(&mut self, effects: &mut Vec<Effect>) {
        self.apply_display_config();
        if self.sync.is_auto_follow() && self.sync.active_index().is_some() {
            self.dispatch_sync(
                SyncEvent::JumpToActive {
                    now: Instant::now(),
                },
                effects,
            );
        }
    }
}
