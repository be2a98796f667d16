use crate::config::ScrollAnchorMode;
use crate::error::SyncResult;
use crate::lookup::LookupResult;
use crate::sync::{Pane, PaneViewport};
use crate::transcript::SubtitleEvent;
use iced::keyboard::{Key, Modifiers};
use std::time::Instant;

/// Messages emitted by the UI.
#[derive(Debug, Clone)]
pub enum Message {
    TranscriptFetched(SyncResult<Vec<SubtitleEvent>>),
    PollTick {
        generation: u64,
        now: Instant,
    },
    AnimationFrame(Instant),
    PollSystemSignals,
    TogglePlayPause,
    Play,
    Pause,
    LineClicked {
        pane: Pane,
        index: usize,
    },
    SelectPane(Pane),
    SwitchPane,
    JumpToActive,
    PaneHovered(Option<Pane>),
    PaneScrolled {
        pane: Pane,
        viewport: PaneViewport,
    },
    /// Wheel or touch input anywhere in the window.
    UserScrollGesture,
    ToggleTheme,
    FontSizeChanged(u32),
    LineSpacingChanged(f32),
    AnchorModeChanged(ScrollAnchorMode),
    SideBySideChanged(bool),
    ForwardClicksChanged(bool),
    ToggleWordbookPanel,
    ToggleLookupPanel,
    WordbookSourceChanged(String),
    WordbookTranslationChanged(String),
    WordbookAddSubmitted,
    WordbookToggleLearned(usize),
    WordbookDelete(usize),
    LookupQueryChanged(String),
    LookupSubmitted,
    LookupFinished {
        request_id: u64,
        result: SyncResult<Option<LookupResult>>,
    },
    KeyPressed {
        key: Key,
        modifiers: Modifiers,
    },
    WindowResized {
        width: f32,
        height: f32,
    },
    SafeQuit,
}
