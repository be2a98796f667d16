use super::super::state::App;
use super::Effect;
use crate::sync::{Pane, PaneViewport, SyncEvent};
use tracing::{debug, trace};

impl App {
    pub(super) fn handle_pane_scrolled(
        &mut self,
        pane: Pane,
        viewport: PaneViewport,
        effects: &mut Vec<Effect>,
    ) {
        let sanitized = PaneViewport {
            offset_y: finite_or_zero(viewport.offset_y),
            viewport_width: finite_or_zero(viewport.viewport_width),
            viewport_height: finite_or_zero(viewport.viewport_height),
            content_height: finite_or_zero(viewport.content_height),
        };
        trace!(%pane, offset = sanitized.offset_y, "Pane scrolled");
        self.panes.record_viewport(pane, sanitized);
        self.dispatch_sync(SyncEvent::ScrollObserved(pane), effects);
    }

    /// Wheel and touch input over a pane means the viewer took over scrolling.
    pub(super) fn handle_user_scroll_gesture(&mut self, effects: &mut Vec<Effect>) {
        let Some(pane) = self.hovered_pane else {
            return;
        };
        if self.sync.is_auto_follow() {
            debug!(%pane, "Manual scroll; auto-follow paused");
        }
        self.dispatch_sync(SyncEvent::UserScroll(pane), effects);
    }

    pub(super) fn handle_window_resized(
        &mut self,
        width: f32,
        height: f32,
        effects: &mut Vec<Effect>,
    ) {
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return;
        }
        let changed = (self.config.window_width - width).abs() > 0.5
            || (self.config.window_height - height).abs() > 0.5;
        if changed {
            self.config.window_width = width;
            self.config.window_height = height;
            effects.push(Effect::SaveConfig);
        }
    }
}

fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::test_app;
    use crate::transcript::parse_transcript;
    use std::time::Instant;

    fn following_app() -> App {
        let mut app = test_app();
        let mut effects = Vec::new();
        app.handle_transcript_fetched(
            parse_transcript(r#"[{"text":"Hi","start":0.0},{"text":"Bye","start":2.0}]"#),
            &mut effects,
        );
        app.dispatch_sync(
            SyncEvent::LineClicked {
                index: 1,
                pane: Pane::Source,
                now: Instant::now(),
            },
            &mut effects,
        );
        assert!(app.sync.is_auto_follow());
        app
    }

    #[test]
    fn wheel_outside_panes_keeps_follow() {
        let mut app = following_app();
        let mut effects = Vec::new();
        app.hovered_pane = None;
        app.handle_user_scroll_gesture(&mut effects);
        assert!(app.sync.is_auto_follow());
    }

    #[test]
    fn wheel_over_hovered_pane_stops_follow() {
        let mut app = following_app();
        let mut effects = Vec::new();
        app.hovered_pane = Some(Pane::Target);
        app.handle_user_scroll_gesture(&mut effects);
        assert!(!app.sync.is_auto_follow());
        assert!(!app.sync.is_animating());
    }

    #[test]
    fn reported_scroll_position_keeps_follow() {
        let mut app = following_app();
        let mut effects = Vec::new();
        app.handle_pane_scrolled(
            Pane::Source,
            PaneViewport {
                offset_y: f32::NAN,
                viewport_width: 400.0,
                viewport_height: 300.0,
                content_height: 900.0,
            },
            &mut effects,
        );
        assert!(app.sync.is_auto_follow());
    }

    #[test]
    fn resize_ignores_degenerate_sizes() {
        let mut app = test_app();
        let mut effects = Vec::new();
        app.handle_window_resized(0.0, 500.0, &mut effects);
        assert!(effects.is_empty());
        app.handle_window_resized(900.0, 600.0, &mut effects);
        assert_eq!(effects, vec![Effect::SaveConfig]);
        assert_eq!(app.config.window_width, 900.0);
    }
}
