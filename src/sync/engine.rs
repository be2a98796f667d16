use super::scheduler::{PollScheduler, SchedulerCommand, SchedulerState};
use super::{Clock, Pane, PollHandle, RenderSurface, SyncAction, SyncDeps, SyncEvent};
use crate::error::SyncError;
use crate::player::PlayerState;
use crate::transcript::TranscriptStore;
use std::time::Instant;
use tracing::{debug, info, trace};

#[derive(Debug, Clone, Copy, Default)]
pub struct SyncSettings {
    /// Clicked lines are also offered to the wordbook.
    pub forward_clicks_to_wordbook: bool,
}

/// Snapshot of the engine's observable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncState {
    pub active_index: Option<usize>,
    pub is_auto_follow: bool,
    pub is_animating: bool,
    pub poll: SchedulerState,
}

#[derive(Debug)]
pub struct SyncEngine {
    active_index: Option<usize>,
    is_auto_follow: bool,
    is_animating: bool,
    scheduler: PollScheduler,
    settings: SyncSettings,
}

impl SyncEngine {
    pub fn new(settings: SyncSettings) -> Self {
        Self {
            active_index: None,
            is_auto_follow: true,
            is_animating: false,
            scheduler: PollScheduler::default(),
            settings,
        }
    }

    pub fn state(&self) -> SyncState {
        SyncState {
            active_index: self.active_index,
            is_auto_follow: self.is_auto_follow,
            is_animating: self.is_animating,
            poll: self.scheduler.state(),
        }
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    pub fn is_auto_follow(&self) -> bool {
        self.is_auto_follow
    }

    pub fn is_polling(&self) -> bool {
        self.scheduler.is_polling()
    }

    pub fn is_animating(&self) -> bool {
        self.is_animating
    }

    pub fn poll_handle(&self) -> Option<PollHandle> {
        self.scheduler.handle()
    }

    pub fn set_settings(&mut self, settings: SyncSettings) {
        self.settings = settings;
    }

    pub fn handle<C, S>(&mut self, event: SyncEvent, deps: SyncDeps<'_, C, S>) -> Vec<SyncAction>
    where
        C: Clock + ?Sized,
        S: RenderSurface + ?Sized,
    {
        let SyncDeps {
            store,
            clock,
            surface,
        } = deps;
        match event {
            SyncEvent::TranscriptLoaded => self.on_transcript_loaded(store, surface),
            SyncEvent::PlayerStateChanged(state) => {
                self.on_player_state(state, store, clock, surface)
            }
            SyncEvent::Tick { now } => self.on_tick(now, store, clock, surface),
            SyncEvent::UserScroll(pane) => self.on_user_scroll(pane, surface),
            SyncEvent::ScrollObserved(pane) => {
                trace!(%pane, animating = self.is_animating, "Pane scroll observed");
                Vec::new()
            }
            SyncEvent::AnimationFrame { now } => {
                surface.advance_animation(now);
                self.is_animating = surface.is_animating();
                Vec::new()
            }
            SyncEvent::LineClicked { index, pane, now } => {
                self.on_line_clicked(index, pane, now, store, clock, surface)
            }
            SyncEvent::TabSwitched { pane, now } => self.on_tab_switched(pane, now, surface),
            SyncEvent::JumpToActive { now } => {
                self.is_auto_follow = true;
                if let Some(index) = self.active_index {
                    self.scroll(index, true, now, surface);
                }
                Vec::new()
            }
        }
    }

    /// Stop polling before the engine goes away.
    pub fn shutdown(&mut self) -> Vec<SyncAction> {
        self.scheduler.stop().map(to_action).into_iter().collect()
    }

    fn on_transcript_loaded<S: RenderSurface + ?Sized>(
        &mut self,
        store: &TranscriptStore,
        surface: &mut S,
    ) -> Vec<SyncAction> {
        surface.render_all(store.events());
        surface.set_active(None);
        self.active_index = None;
        self.is_animating = surface.is_animating();
        info!(lines = store.len(), "Transcript rendered");
        Vec::new()
    }

    fn on_player_state<C, S>(
        &mut self,
        state: PlayerState,
        store: &TranscriptStore,
        clock: &mut C,
        surface: &mut S,
    ) -> Vec<SyncAction>
    where
        C: Clock + ?Sized,
        S: RenderSurface + ?Sized,
    {
        let command = self.scheduler.on_player_state(state);
        match command {
            Some(SchedulerCommand::Start(handle)) => {
                info!(%handle, "Playback started; polling clock")
            }
            Some(SchedulerCommand::Stop(handle)) => {
                info!(%handle, %state, "Playback halted; polling stopped")
            }
            None => debug!(%state, "Player state change needs no scheduler update"),
        }

        if self.active_index.is_some() {
            if let (Ok(t), Some(first)) = (clock.current_time(), store.first_start()) {
                if t < first {
                    info!(time = t, first, "Rewound before first line; clearing highlight");
                    self.active_index = None;
                    surface.set_active(None);
                }
            }
        }

        command.map(to_action).into_iter().collect()
    }

    fn on_tick<C, S>(
        &mut self,
        now: Instant,
        store: &TranscriptStore,
        clock: &mut C,
        surface: &mut S,
    ) -> Vec<SyncAction>
    where
        C: Clock + ?Sized,
        S: RenderSurface + ?Sized,
    {
        if !self.scheduler.is_polling() {
            trace!("Ignoring tick while idle");
            return Vec::new();
        }
        let t = match clock.current_time() {
            Ok(t) => t,
            Err(SyncError::PlayerNotReady) => {
                trace!("Tick before player is ready");
                return Vec::new();
            }
            Err(err) => {
                debug!(error = %err, "Clock read failed; skipping tick");
                return Vec::new();
            }
        };

        let next = store.active_index_at(t);
        if next == self.active_index {
            return Vec::new();
        }

        match next {
            None => info!(time = t, "Playback before first line; clearing highlight"),
            Some(index) => debug!(time = t, index, "Active line changed"),
        }
        self.active_index = next;
        surface.set_active(next);
        if let Some(index) = next {
            if self.is_auto_follow {
                self.scroll(index, true, now, surface);
            }
        }
        Vec::new()
    }

    fn on_user_scroll<S: RenderSurface + ?Sized>(
        &mut self,
        pane: Pane,
        surface: &mut S,
    ) -> Vec<SyncAction> {
        if self.is_auto_follow {
            info!(%pane, "Manual scroll; auto-follow suspended");
        }
        self.is_auto_follow = false;
        surface.cancel_animation();
        self.is_animating = false;
        Vec::new()
    }

    fn on_line_clicked<C, S>(
        &mut self,
        index: usize,
        pane: Pane,
        now: Instant,
        store: &TranscriptStore,
        clock: &mut C,
        surface: &mut S,
    ) -> Vec<SyncAction>
    where
        C: Clock + ?Sized,
        S: RenderSurface + ?Sized,
    {
        let Some(event) = store.get(index) else {
            debug!(index, lines = store.len(), "Ignoring click outside transcript");
            return Vec::new();
        };

        self.active_index = Some(index);
        surface.set_active(Some(index));
        match clock.seek_to(event.start) {
            Ok(()) => info!(index, start = event.start, "Seeked to clicked line"),
            Err(err) => debug!(index, error = %err, "Seek skipped"),
        }
        self.is_auto_follow = true;
        self.scroll(index, true, now, surface);

        if !self.settings.forward_clicks_to_wordbook {
            return Vec::new();
        }
        let word = match pane {
            Pane::Source => event.text.as_str(),
            Pane::Target => event.translated.as_deref().unwrap_or(&event.text),
        };
        if word.trim().is_empty() {
            return Vec::new();
        }
        vec![SyncAction::AddWord(word.to_string())]
    }

    fn on_tab_switched<S: RenderSurface + ?Sized>(
        &mut self,
        pane: Pane,
        now: Instant,
        surface: &mut S,
    ) -> Vec<SyncAction> {
        surface.show_pane(pane);
        self.is_auto_follow = true;
        if let Some(index) = self.active_index {
            // The pane being revealed has no in-flight animation to continue.
            surface.scroll_to_active(index, false, now);
            self.is_animating = surface.is_animating();
        }
        debug!(%pane, active = ?self.active_index, "Switched visible pane");
        Vec::new()
    }

    fn scroll<S: RenderSurface + ?Sized>(
        &mut self,
        index: usize,
        animated: bool,
        now: Instant,
        surface: &mut S,
    ) {
        surface.scroll_to_active(index, animated, now);
        self.is_animating = surface.is_animating();
    }
}

fn to_action(command: SchedulerCommand) -> SyncAction {
    match command {
        SchedulerCommand::Start(handle) => SyncAction::StartPolling(handle),
        SchedulerCommand::Stop(handle) => SyncAction::StopPolling(handle),
    }
}
