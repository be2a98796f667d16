//! Media players and the playback clock adapter.
//!
//! `MediaPlayer` is the external player collaborator. `PlaybackClock` wraps at
//! most one player, registers exactly one state listener on it and exposes the
//! three signals the sync engine needs: current time, state, and seek.

use crate::error::{SyncError, SyncResult};
use anyhow::{Context, Result};
use rodio::{Decoder, OutputStream, Sink, Source};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerState {
    #[default]
    Unstarted,
    Playing,
    Paused,
    Ended,
}

impl std::fmt::Display for PlayerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PlayerState::Unstarted => "unstarted",
            PlayerState::Playing => "playing",
            PlayerState::Paused => "paused",
            PlayerState::Ended => "ended",
        };
        write!(f, "{}", label)
    }
}

pub type ListenerId = u64;

/// State-change listeners registered on a player.
#[derive(Debug, Default)]
pub struct StateListeners {
    next_id: ListenerId,
    senders: Vec<(ListenerId, Sender<PlayerState>)>,
}

impl StateListeners {
    pub fn add(&mut self, sender: Sender<PlayerState>) -> ListenerId {
        self.next_id += 1;
        self.senders.push((self.next_id, sender));
        self.next_id
    }

    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.senders.len();
        self.senders.retain(|(existing, _)| *existing != id);
        self.senders.len() != before
    }

    pub fn len(&self) -> usize {
        self.senders.len()
    }

    pub fn notify(&mut self, state: PlayerState) {
        self.senders.retain(|(_, tx)| tx.send(state).is_ok());
    }
}

/// The external player the transcript is synchronized against.
pub trait MediaPlayer {
    /// Playback position in seconds.
    fn current_time(&self) -> f64;
    fn state(&self) -> PlayerState;
    /// Fire-and-forget; no completion signal is reported.
    fn seek_to(&mut self, seconds: f64, allow_seek_ahead: bool);
    fn play(&mut self);
    fn pause(&mut self);
    /// Detect transitions the player cannot push on its own (end of media).
    fn refresh(&mut self) {}
    fn add_listener(&mut self, listener: Sender<PlayerState>) -> ListenerId;
    fn remove_listener(&mut self, id: ListenerId) -> bool;
    fn listener_count(&self) -> usize;
}

/// Adapter between one `MediaPlayer` and the sync engine.
pub struct PlaybackClock {
    player: Option<Box<dyn MediaPlayer>>,
    listener: Option<ListenerId>,
    events_tx: Sender<PlayerState>,
    events_rx: Receiver<PlayerState>,
}

impl Default for PlaybackClock {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackClock {
    pub fn new() -> Self {
        let (events_tx, events_rx) = mpsc::channel();
        Self {
            player: None,
            listener: None,
            events_tx,
            events_rx,
        }
    }

    /// Install `player`, detaching and returning the previous one.
    pub fn attach(&mut self, mut player: Box<dyn MediaPlayer>) -> Option<Box<dyn MediaPlayer>> {
        let previous = self.detach();
        let id = player.add_listener(self.events_tx.clone());
        info!(listener = id, state = %player.state(), "Attached media player");
        self.listener = Some(id);
        self.player = Some(player);
        previous
    }

    /// Remove the current player and its listener. Queued events are dropped.
    pub fn detach(&mut self) -> Option<Box<dyn MediaPlayer>> {
        let mut player = self.player.take()?;
        if let Some(id) = self.listener.take() {
            player.remove_listener(id);
            debug!(listener = id, "Detached player state listener");
        }
        self.events_rx.try_iter().for_each(drop);
        Some(player)
    }

    pub fn is_ready(&self) -> bool {
        self.player.is_some()
    }

    pub fn get_current_time(&self) -> SyncResult<f64> {
        self.player
            .as_ref()
            .map(|player| player.current_time())
            .ok_or(SyncError::PlayerNotReady)
    }

    pub fn get_state(&self) -> SyncResult<PlayerState> {
        self.player
            .as_ref()
            .map(|player| player.state())
            .ok_or(SyncError::PlayerNotReady)
    }

    pub fn seek_to(&mut self, seconds: f64) -> SyncResult<()> {
        let player = self.player.as_mut().ok_or(SyncError::PlayerNotReady)?;
        player.seek_to(seconds, true);
        Ok(())
    }

    pub fn play(&mut self) -> SyncResult<()> {
        self.player
            .as_mut()
            .ok_or(SyncError::PlayerNotReady)?
            .play();
        Ok(())
    }

    pub fn pause(&mut self) -> SyncResult<()> {
        self.player
            .as_mut()
            .ok_or(SyncError::PlayerNotReady)?
            .pause();
        Ok(())
    }

    /// State transitions reported since the last drain, oldest first.
    pub fn drain_state_changes(&mut self) -> Vec<PlayerState> {
        if let Some(player) = self.player.as_mut() {
            player.refresh();
        }
        self.events_rx.try_iter().collect()
    }
}

impl Drop for PlaybackClock {
    fn drop(&mut self) {
        self.detach();
    }
}

/// A player without media: position advances with wall-clock time.
pub struct WallClockPlayer {
    state: PlayerState,
    position: f64,
    resumed_at: Option<Instant>,
    duration: Option<f64>,
    listeners: StateListeners,
}

impl WallClockPlayer {
    pub fn new(duration: Option<f64>) -> Self {
        Self {
            state: PlayerState::Unstarted,
            position: 0.0,
            resumed_at: None,
            duration: duration.filter(|d| d.is_finite() && *d > 0.0),
            listeners: StateListeners::default(),
        }
    }

    fn clamp(&self, seconds: f64) -> f64 {
        let floor = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
        match self.duration {
            Some(duration) => floor.min(duration),
            None => floor,
        }
    }

    fn set_state(&mut self, state: PlayerState) {
        if self.state != state {
            debug!(from = %self.state, to = %state, "Wall-clock player state change");
            self.state = state;
            self.listeners.notify(state);
        }
    }
}

impl MediaPlayer for WallClockPlayer {
    fn current_time(&self) -> f64 {
        let elapsed = self
            .resumed_at
            .map(|at| at.elapsed().as_secs_f64())
            .unwrap_or(0.0);
        self.clamp(self.position + elapsed)
    }

    fn state(&self) -> PlayerState {
        self.state
    }

    fn seek_to(&mut self, seconds: f64, _allow_seek_ahead: bool) {
        self.position = self.clamp(seconds);
        if self.resumed_at.is_some() {
            self.resumed_at = Some(Instant::now());
        }
        // A seek after the end parks the player so the next play resumes here.
        if self.state == PlayerState::Ended {
            self.set_state(PlayerState::Paused);
        }
    }

    fn play(&mut self) {
        if self.state == PlayerState::Ended {
            self.position = 0.0;
        }
        if self.resumed_at.is_none() {
            self.resumed_at = Some(Instant::now());
        }
        self.set_state(PlayerState::Playing);
    }

    fn pause(&mut self) {
        self.position = self.current_time();
        self.resumed_at = None;
        self.set_state(PlayerState::Paused);
    }

    fn refresh(&mut self) {
        if self.state != PlayerState::Playing {
            return;
        }
        if let Some(duration) = self.duration {
            if self.current_time() >= duration {
                self.position = duration;
                self.resumed_at = None;
                self.set_state(PlayerState::Ended);
            }
        }
    }

    fn add_listener(&mut self, listener: Sender<PlayerState>) -> ListenerId {
        self.listeners.add(listener)
    }

    fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

/// Plays the audio track of a recording through rodio.
pub struct AudioPlayer {
    _stream: OutputStream,
    sink: Sink,
    path: PathBuf,
    state: PlayerState,
    listeners: StateListeners,
}

impl AudioPlayer {
    pub fn open(path: &Path) -> Result<Self> {
        let (_stream, handle) = OutputStream::try_default().context("Opening audio output")?;
        let sink = Sink::try_new(&handle).context("Creating sink")?;
        sink.pause();
        let duration = append_source(&sink, path)?;
        info!(
            path = %path.display(),
            duration_secs = duration.map(|d| d.as_secs_f64()),
            "Opened media for playback"
        );
        Ok(Self {
            _stream,
            sink,
            path: path.to_path_buf(),
            state: PlayerState::Unstarted,
            listeners: StateListeners::default(),
        })
    }

    fn set_state(&mut self, state: PlayerState) {
        if self.state != state {
            debug!(from = %self.state, to = %state, "Audio player state change");
            self.state = state;
            self.listeners.notify(state);
        }
    }

    fn reload_if_drained(&mut self) {
        if !self.sink.empty() {
            return;
        }
        if let Err(err) = append_source(&self.sink, &self.path) {
            warn!(path = %self.path.display(), "Failed to reopen media: {err}");
        }
    }
}

fn append_source(sink: &Sink, path: &Path) -> Result<Option<Duration>> {
    let reader = BufReader::new(
        File::open(path).with_context(|| format!("Opening media {}", path.display()))?,
    );
    let source = Decoder::new(reader).context("Decoding media")?;
    let duration = source.total_duration();
    sink.append(source);
    Ok(duration)
}

impl MediaPlayer for AudioPlayer {
    fn current_time(&self) -> f64 {
        self.sink.get_pos().as_secs_f64()
    }

    fn state(&self) -> PlayerState {
        self.state
    }

    fn seek_to(&mut self, seconds: f64, _allow_seek_ahead: bool) {
        self.reload_if_drained();
        let target = Duration::from_secs_f64(if seconds.is_finite() { seconds.max(0.0) } else { 0.0 });
        if let Err(err) = self.sink.try_seek(target) {
            warn!(seconds, "Seek rejected by audio sink: {err}");
        }
        if self.state == PlayerState::Ended {
            self.sink.pause();
            self.set_state(PlayerState::Paused);
        }
    }

    fn play(&mut self) {
        self.reload_if_drained();
        self.sink.play();
        self.set_state(PlayerState::Playing);
    }

    fn pause(&mut self) {
        self.sink.pause();
        self.set_state(PlayerState::Paused);
    }

    fn refresh(&mut self) {
        if self.state == PlayerState::Playing && self.sink.empty() {
            self.set_state(PlayerState::Ended);
        }
    }

    fn add_listener(&mut self, listener: Sender<PlayerState>) -> ListenerId {
        self.listeners.add(listener)
    }

    fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_without_player_reports_not_ready() {
        let mut clock = PlaybackClock::new();
        assert_eq!(clock.get_current_time(), Err(SyncError::PlayerNotReady));
        assert_eq!(clock.get_state(), Err(SyncError::PlayerNotReady));
        assert_eq!(clock.seek_to(3.0), Err(SyncError::PlayerNotReady));
        assert!(clock.drain_state_changes().is_empty());
    }

    #[test]
    fn attach_registers_exactly_one_listener() {
        let mut clock = PlaybackClock::new();
        clock.attach(Box::new(WallClockPlayer::new(None)));
        clock.play().expect("player attached");
        clock.pause().expect("player attached");
        assert_eq!(
            clock.drain_state_changes(),
            vec![PlayerState::Playing, PlayerState::Paused]
        );
    }

    #[test]
    fn replacing_player_detaches_previous_listener() {
        let mut clock = PlaybackClock::new();
        clock.attach(Box::new(WallClockPlayer::new(None)));
        let mut previous = clock
            .attach(Box::new(WallClockPlayer::new(None)))
            .expect("first player returned");
        assert_eq!(previous.listener_count(), 0);

        previous.play();
        clock.play().expect("player attached");
        assert_eq!(clock.drain_state_changes(), vec![PlayerState::Playing]);
    }

    #[test]
    fn detach_drops_queued_events() {
        let mut clock = PlaybackClock::new();
        clock.attach(Box::new(WallClockPlayer::new(None)));
        clock.play().expect("player attached");
        let player = clock.detach().expect("player present");
        assert_eq!(player.listener_count(), 0);
        assert!(clock.drain_state_changes().is_empty());
        assert!(!clock.is_ready());
    }

    #[test]
    fn wall_clock_seek_is_clamped_to_duration() {
        let mut player = WallClockPlayer::new(Some(30.0));
        player.seek_to(45.0, true);
        assert_eq!(player.current_time(), 30.0);
        player.seek_to(-4.0, true);
        assert_eq!(player.current_time(), 0.0);
    }

    #[test]
    fn wall_clock_reports_end_of_media() {
        let (tx, rx) = mpsc::channel();
        let mut player = WallClockPlayer::new(Some(1.0));
        player.add_listener(tx);
        player.seek_to(1.0, true);
        player.play();
        player.refresh();
        let seen: Vec<_> = rx.try_iter().collect();
        assert_eq!(seen, vec![PlayerState::Playing, PlayerState::Ended]);
    }

    #[test]
    fn seek_after_end_survives_next_play() {
        let (tx, rx) = mpsc::channel();
        let mut player = WallClockPlayer::new(Some(10.0));
        player.add_listener(tx);
        player.seek_to(10.0, true);
        player.play();
        player.refresh();
        assert_eq!(player.state(), PlayerState::Ended);

        player.seek_to(4.0, true);
        assert_eq!(player.state(), PlayerState::Paused);
        player.play();
        assert!(player.current_time() >= 4.0);
        assert!(player.current_time() < 5.0);
        let seen: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            seen,
            vec![
                PlayerState::Playing,
                PlayerState::Ended,
                PlayerState::Paused,
                PlayerState::Playing
            ]
        );
    }

    #[test]
    fn play_after_end_without_seek_restarts() {
        let mut player = WallClockPlayer::new(Some(2.0));
        player.seek_to(2.0, true);
        player.play();
        player.refresh();
        player.play();
        assert!(player.current_time() < 1.0);
    }

    #[test]
    fn repeated_state_does_not_notify_twice() {
        let (tx, rx) = mpsc::channel();
        let mut player = WallClockPlayer::new(None);
        player.add_listener(tx);
        player.play();
        player.play();
        assert_eq!(rx.try_iter().count(), 1);
    }
}
