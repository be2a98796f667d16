mod constants;
mod ui;

use crate::cache::save_video_config;
use crate::config::{AppConfig, ThemeMode};
use crate::error::SyncError;
use crate::player::{AudioPlayer, MediaPlayer, PlaybackClock, WallClockPlayer};
use crate::storage::KeyValueStore;
use crate::sync::{LayoutMetrics, Pane, SyncEngine, SyncSettings, TranscriptPanes};
use crate::transcript::{Session, TranscriptStore, fetch_transcript};
use crate::wordbook::Wordbook;
use iced::{Color, Task};
use tracing::{info, warn};

use super::messages::Message;

pub(crate) use constants::*;
pub(in crate::app) use ui::{LookupPanel, WordbookForm};

/// Seconds a wall-clock session keeps running past the last line's start
/// when that line has no end time.
const TRAILING_LINE_SECS: f64 = 5.0;

#[derive(Debug, Clone, PartialEq)]
pub(in crate::app) enum TranscriptStatus {
    Loading,
    Ready(usize),
    Failed(String),
}

/// Core application state composed of sub-models.
pub struct App {
    pub(super) config: AppConfig,
    pub(super) session: Session,
    pub(super) transcript: TranscriptStore,
    pub(super) transcript_status: TranscriptStatus,
    pub(super) clock: PlaybackClock,
    pub(super) sync: SyncEngine,
    pub(super) panes: TranscriptPanes,
    pub(super) hovered_pane: Option<Pane>,
    pub(super) store: Box<dyn KeyValueStore>,
    pub(super) wordbook: Wordbook,
    pub(super) wordbook_form: WordbookForm,
    pub(super) lookup: LookupPanel,
}

impl App {
    pub(super) fn bootstrap(
        config: AppConfig,
        session: Session,
        store: Box<dyn KeyValueStore>,
    ) -> (App, Task<Message>) {
        let wordbook = Wordbook::load(store.as_ref());
        let panes = TranscriptPanes::new(
            config.anchor(),
            layout_metrics(&config),
            config.scroll_animation(),
        );
        let sync = SyncEngine::new(SyncSettings {
            forward_clicks_to_wordbook: config.forward_clicks_to_wordbook,
        });
        let app = App {
            config,
            session,
            transcript: TranscriptStore::new(),
            transcript_status: TranscriptStatus::Loading,
            clock: PlaybackClock::new(),
            sync,
            panes,
            hovered_pane: None,
            store,
            wordbook,
            wordbook_form: WordbookForm::default(),
            lookup: LookupPanel::default(),
        };

        let init_task = match (&app.session.transcript_source, &app.session.load_error) {
            (Some(source), _) => {
                info!(%source, video = %app.session.video_key, "Loading transcript");
                Task::perform(fetch_transcript(source.clone()), Message::TranscriptFetched)
            }
            (None, error) => {
                let reason = error
                    .clone()
                    .unwrap_or_else(|| "no transcript configured".to_string());
                Task::done(Message::TranscriptFetched(Err(SyncError::DataUnavailable(
                    reason,
                ))))
            }
        };
        (app, init_task)
    }

    /// Player for the session: the media track when one opens, otherwise a
    /// wall clock spanning the transcript.
    pub(super) fn build_player(&self) -> Box<dyn MediaPlayer> {
        if let Some(path) = &self.session.media_path {
            match AudioPlayer::open(path) {
                Ok(player) => return Box::new(player),
                Err(err) => {
                    warn!(path = %path.display(), "Falling back to wall clock: {err:#}");
                }
            }
        }
        let duration = self.transcript.events().last().map(|last| {
            last.end
                .unwrap_or(last.start + TRAILING_LINE_SECS)
                .max(last.start)
        });
        Box::new(WallClockPlayer::new(duration))
    }

    pub(super) fn apply_display_config(&mut self) {
        self.panes.set_anchor(self.config.anchor());
        self.panes.set_metrics(layout_metrics(&self.config));
        self.panes
            .set_animation_duration(self.config.scroll_animation());
        self.sync.set_settings(SyncSettings {
            forward_clicks_to_wordbook: self.config.forward_clicks_to_wordbook,
        });
    }

    pub(super) fn highlight_color(&self) -> Color {
        let color = self.config.highlight();
        Color::from_rgba(color.r, color.g, color.b, color.a)
    }

    pub(super) fn is_night(&self) -> bool {
        matches!(self.config.theme, ThemeMode::Night)
    }

    pub(super) fn save_video_config(&self) {
        save_video_config(&self.session.video_key, &self.config);
    }

    pub(super) fn persist_wordbook(&mut self) {
        if let Err(err) = self.wordbook.save(self.store.as_mut()) {
            warn!("Failed to save wordbook: {err}");
        }
    }
}

/// App with an in-memory store and no transcript source.
#[cfg(test)]
pub(in crate::app) fn test_app() -> App {
    let session = Session {
        video_key: "demo".to_string(),
        video_id: None,
        transcript_source: None,
        media_path: None,
        load_error: Some("missing".to_string()),
    };
    let (app, _task) = App::bootstrap(
        AppConfig::default(),
        session,
        Box::new(crate::storage::MemoryStore::default()),
    );
    app
}

fn layout_metrics(config: &AppConfig) -> LayoutMetrics {
    LayoutMetrics {
        line_gap_px: LINE_PADDING_PX as f32 * 2.0 + LINE_SPACING_PX,
        padding_px: PANE_PADDING_PX as f32,
        ..config.layout_metrics()
    }
}
