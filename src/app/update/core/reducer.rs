use super::super::super::messages::Message;
use super::super::super::state::App;
use super::super::Effect;
use crate::sync::SyncEvent;
use std::time::Instant;
use tracing::info;

impl App {
    pub(super) fn reduce(&mut self, message: Message) -> Vec<Effect> {
        let mut effects = Vec::new();

        match message {
            Message::TranscriptFetched(result) => {
                self.handle_transcript_fetched(result, &mut effects)
            }
            Message::PollTick { generation, now } => {
                self.handle_poll_tick(generation, now, &mut effects)
            }
            Message::AnimationFrame(now) => {
                self.dispatch_sync(SyncEvent::AnimationFrame { now }, &mut effects)
            }
            Message::PollSystemSignals => self.handle_poll_system_signals(&mut effects),
            Message::TogglePlayPause => self.handle_toggle_play_pause(&mut effects),
            Message::Play => self.handle_play(&mut effects),
            Message::Pause => self.handle_pause(&mut effects),
            Message::LineClicked { pane, index } => self.dispatch_sync(
                SyncEvent::LineClicked {
                    index,
                    pane,
                    now: Instant::now(),
                },
                &mut effects,
            ),
            Message::SelectPane(pane) => self.handle_select_pane(pane, &mut effects),
            Message::SwitchPane => self.handle_switch_pane(&mut effects),
            Message::JumpToActive => self.dispatch_sync(
                SyncEvent::JumpToActive {
                    now: Instant::now(),
                },
                &mut effects,
            ),
            Message::PaneHovered(pane) => self.hovered_pane = pane,
            Message::PaneScrolled { pane, viewport } => {
                self.handle_pane_scrolled(pane, viewport, &mut effects)
            }
            Message::UserScrollGesture => self.handle_user_scroll_gesture(&mut effects),
            Message::ToggleTheme => self.handle_toggle_theme(&mut effects),
            Message::FontSizeChanged(size) => self.handle_font_size_changed(size, &mut effects),
            Message::LineSpacingChanged(spacing) => {
                self.handle_line_spacing_changed(spacing, &mut effects)
            }
            Message::AnchorModeChanged(mode) => {
                self.handle_anchor_mode_changed(mode, &mut effects)
            }
            Message::SideBySideChanged(enabled) => {
                self.handle_side_by_side_changed(enabled, &mut effects)
            }
            Message::ForwardClicksChanged(enabled) => {
                self.handle_forward_clicks_changed(enabled, &mut effects)
            }
            Message::ToggleWordbookPanel => self.handle_toggle_wordbook_panel(&mut effects),
            Message::ToggleLookupPanel => self.handle_toggle_lookup_panel(&mut effects),
            Message::WordbookSourceChanged(value) => self.wordbook_form.source = value,
            Message::WordbookTranslationChanged(value) => self.wordbook_form.translation = value,
            Message::WordbookAddSubmitted => self.handle_wordbook_add_submitted(&mut effects),
            Message::WordbookToggleLearned(index) => {
                self.handle_wordbook_toggle_learned(index, &mut effects)
            }
            Message::WordbookDelete(index) => self.handle_wordbook_delete(index, &mut effects),
            Message::LookupQueryChanged(query) => self.lookup.query = query,
            Message::LookupSubmitted => self.handle_lookup_submitted(&mut effects),
            Message::LookupFinished { request_id, result } => {
                self.handle_lookup_finished(request_id, result)
            }
            Message::KeyPressed { key, modifiers } => {
                if let Some(shortcut) = self.shortcut_message_for_key(key, modifiers) {
                    effects.extend(self.reduce(shortcut));
                }
            }
            Message::WindowResized { width, height } => {
                self.handle_window_resized(width, height, &mut effects)
            }
            Message::SafeQuit => effects.push(Effect::QuitSafely),
        }

        effects
    }

    fn handle_poll_system_signals(&mut self, effects: &mut Vec<Effect>) {
        if crate::take_sigint_requested() {
            info!("Interrupt received; quitting");
            effects.push(Effect::QuitSafely);
            return;
        }
        self.drain_player_events(effects);
    }
}
