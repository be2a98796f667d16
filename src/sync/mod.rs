//! Playback-to-transcript synchronization.
//!
//! The engine owns the sync state (active line, auto-follow, poll lifecycle)
//! and talks to the outside world only through the [`Clock`] and
//! [`RenderSurface`] seams, so every transition can be driven from tests.

mod animation;
mod engine;
mod scheduler;
mod surface;

pub use animation::PaneOffsets;
pub use engine::{SyncEngine, SyncSettings, SyncState};
pub use scheduler::{PollHandle, SchedulerState};
pub use surface::{
    LayoutMetrics, MISSING_TRANSLATION, Pane, PaneLine, PaneViewport, ScrollAnchor,
    TranscriptPanes,
};

use crate::error::SyncResult;
use crate::player::{PlaybackClock, PlayerState};
use crate::transcript::{SubtitleEvent, TranscriptStore};
use std::time::Instant;

/// Read/seek access to the media clock.
pub trait Clock {
    fn current_time(&self) -> SyncResult<f64>;
    fn state(&self) -> SyncResult<PlayerState>;
    fn seek_to(&mut self, seconds: f64) -> SyncResult<()>;
}

impl Clock for PlaybackClock {
    fn current_time(&self) -> SyncResult<f64> {
        self.get_current_time()
    }

    fn state(&self) -> SyncResult<PlayerState> {
        self.get_state()
    }

    fn seek_to(&mut self, seconds: f64) -> SyncResult<()> {
        PlaybackClock::seek_to(self, seconds)
    }
}

/// Where lines are drawn, highlighted, and scrolled.
pub trait RenderSurface {
    /// Replace the contents of both panes. Calling twice never duplicates.
    fn render_all(&mut self, events: &[SubtitleEvent]);
    /// Highlight exactly one line per pane, or none.
    fn set_active(&mut self, index: Option<usize>);
    /// Bring `index` to the anchor in both panes together.
    fn scroll_to_active(&mut self, index: usize, animated: bool, now: Instant);
    fn show_pane(&mut self, pane: Pane);
    fn advance_animation(&mut self, now: Instant);
    fn cancel_animation(&mut self);
    fn is_animating(&self) -> bool;
}

/// Inputs the engine reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncEvent {
    TranscriptLoaded,
    PlayerStateChanged(PlayerState),
    Tick { now: Instant },
    /// Wheel or touch input on a pane.
    UserScroll(Pane),
    /// A pane reported a new offset, from any cause.
    ScrollObserved(Pane),
    AnimationFrame { now: Instant },
    LineClicked {
        index: usize,
        pane: Pane,
        now: Instant,
    },
    TabSwitched { pane: Pane, now: Instant },
    JumpToActive { now: Instant },
}

/// Side effects the caller must carry out.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncAction {
    StartPolling(PollHandle),
    StopPolling(PollHandle),
    AddWord(String),
}

/// Everything a transition may touch outside the engine.
pub struct SyncDeps<'a, C: Clock + ?Sized, S: RenderSurface + ?Sized> {
    pub store: &'a TranscriptStore,
    pub clock: &'a mut C,
    pub surface: &'a mut S,
}
