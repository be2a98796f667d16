use super::super::state::{App, TranscriptStatus};
use super::Effect;
use crate::error::SyncResult;
use crate::player::PlayerState;
use crate::sync::{Pane, SyncAction, SyncDeps, SyncEvent};
use crate::transcript::SubtitleEvent;
use crate::wordbook::AddOutcome;
use std::time::Instant;
use tracing::{debug, info, trace, warn};

impl App {
    /// Run one engine transition and turn its outputs into effects.
    pub(super) fn dispatch_sync(&mut self, event: SyncEvent, effects: &mut Vec<Effect>) {
        let actions = self.sync.handle(
            event,
            SyncDeps {
                store: &self.transcript,
                clock: &mut self.clock,
                surface: &mut self.panes,
            },
        );
        for action in actions {
            match action {
                SyncAction::StartPolling(handle) => debug!(%handle, "Poll timer armed"),
                SyncAction::StopPolling(handle) => debug!(%handle, "Poll timer cleared"),
                SyncAction::AddWord(text) => self.add_clicked_word(&text, effects),
            }
        }
        if let Some(offsets) = self.panes.take_scroll_command() {
            effects.push(Effect::ScrollPanes(offsets));
        }
    }

    pub(super) fn handle_transcript_fetched(
        &mut self,
        result: SyncResult<Vec<SubtitleEvent>>,
        effects: &mut Vec<Effect>,
    ) {
        self.transcript_status = match self.transcript.load(result) {
            Ok(count) => TranscriptStatus::Ready(count),
            Err(err) => TranscriptStatus::Failed(err.to_string()),
        };
        self.dispatch_sync(SyncEvent::TranscriptLoaded, effects);

        if !self.clock.is_ready() {
            let player = self.build_player();
            self.clock.attach(player);
            self.drain_player_events(effects);
        }
    }

    pub(super) fn handle_poll_tick(
        &mut self,
        generation: u64,
        now: Instant,
        effects: &mut Vec<Effect>,
    ) {
        let live = self.sync.poll_handle().map(|handle| handle.generation());
        if live != Some(generation) {
            trace!(generation, ?live, "Dropping tick from a stale poll timer");
            return;
        }
        self.dispatch_sync(SyncEvent::Tick { now }, effects);
    }

    /// Feed queued player state transitions to the engine.
    pub(super) fn drain_player_events(&mut self, effects: &mut Vec<Effect>) {
        for state in self.clock.drain_state_changes() {
            info!(%state, "Player state changed");
            self.dispatch_sync(SyncEvent::PlayerStateChanged(state), effects);
        }
    }

    pub(super) fn handle_toggle_play_pause(&mut self, effects: &mut Vec<Effect>) {
        match self.clock.get_state() {
            Ok(PlayerState::Playing) => self.handle_pause(effects),
            Ok(_) => self.handle_play(effects),
            Err(err) => debug!("Play/pause ignored: {err}"),
        }
    }

    pub(super) fn handle_play(&mut self, effects: &mut Vec<Effect>) {
        if let Err(err) = self.clock.play() {
            debug!("Play ignored: {err}");
            return;
        }
        self.drain_player_events(effects);
    }

    pub(super) fn handle_pause(&mut self, effects: &mut Vec<Effect>) {
        if let Err(err) = self.clock.pause() {
            debug!("Pause ignored: {err}");
            return;
        }
        self.drain_player_events(effects);
    }

    pub(super) fn handle_select_pane(&mut self, pane: Pane, effects: &mut Vec<Effect>) {
        self.dispatch_sync(
            SyncEvent::TabSwitched {
                pane,
                now: Instant::now(),
            },
            effects,
        );
    }

    pub(super) fn handle_switch_pane(&mut self, effects: &mut Vec<Effect>) {
        let next = match self.panes.visible() {
            Pane::Source => Pane::Target,
            Pane::Target => Pane::Source,
        };
        self.handle_select_pane(next, effects);
    }

    fn add_clicked_word(&mut self, text: &str, effects: &mut Vec<Effect>) {
        match self.wordbook.add_word(text) {
            AddOutcome::Added => {
                self.wordbook_form.notice = Some(format!("Added \"{text}\" to the wordbook."));
                effects.push(Effect::SaveWordbook);
            }
            AddOutcome::Duplicate => {
                self.wordbook_form.notice = Some(format!("\"{text}\" is already saved."));
            }
            AddOutcome::Empty => warn!("Ignoring empty clicked line"),
        }
    }
}
