//! Transcript store and the video map used to locate transcripts.
//!
//! A transcript is a JSON array of `{speaker?, text, translated?, start, end?}`
//! objects ordered by `start`. Times are seconds, or `HH:MM:SS,mmm` stamps as
//! produced by subtitle exports. The order is trusted, never re-sorted.

use crate::error::{SyncError, SyncResult};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const DEFAULT_VIDEO_KEY: &str = "default";

static TIMESTAMP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d+):(\d{1,2}):(\d{1,2})(?:[,.](\d{1,3}))?\s*$").expect("valid timestamp regex")
});

/// One timed transcript line.
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleEvent {
    pub index: usize,
    pub speaker: Option<String>,
    pub text: String,
    pub translated: Option<String>,
    pub start: f64,
    pub end: Option<f64>,
}

impl SubtitleEvent {
    pub fn source_label(&self) -> String {
        with_speaker(self.speaker.as_deref(), &self.text)
    }

    pub fn target_label(&self, placeholder: &str) -> String {
        with_speaker(
            self.speaker.as_deref(),
            self.translated.as_deref().unwrap_or(placeholder),
        )
    }
}

fn with_speaker(speaker: Option<&str>, body: &str) -> String {
    match speaker {
        Some(name) => format!("{name}: {body}"),
        None => body.to_string(),
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TimeValue {
    Seconds(f64),
    Stamp(String),
}

impl TimeValue {
    fn to_seconds(&self) -> Option<f64> {
        match self {
            TimeValue::Seconds(secs) => Some(*secs),
            TimeValue::Stamp(raw) => parse_timestamp(raw),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    #[serde(default)]
    speaker: Option<String>,
    text: String,
    #[serde(default)]
    translated: Option<String>,
    start: TimeValue,
    #[serde(default)]
    end: Option<TimeValue>,
}

/// Parse `HH:MM:SS,mmm` (or `.mmm`) into seconds.
pub fn parse_timestamp(raw: &str) -> Option<f64> {
    if let Ok(secs) = raw.trim().parse::<f64>() {
        return Some(secs);
    }
    let caps = TIMESTAMP_RE.captures(raw)?;
    let hours: f64 = caps[1].parse().ok()?;
    let minutes: f64 = caps[2].parse().ok()?;
    let seconds: f64 = caps[3].parse().ok()?;
    let millis = caps
        .get(4)
        .map(|m| format!("{:0<3}", m.as_str()))
        .and_then(|padded| padded.parse::<f64>().ok())
        .unwrap_or(0.0);
    Some(hours * 3600.0 + minutes * 60.0 + seconds + millis / 1000.0)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn sanitize_time(secs: f64) -> f64 {
    if secs.is_finite() { secs.max(0.0) } else { 0.0 }
}

/// Parse a transcript document into indexed events.
pub fn parse_transcript(json: &str) -> SyncResult<Vec<SubtitleEvent>> {
    let raw: Vec<RawEvent> = serde_json::from_str(json)
        .map_err(|err| SyncError::DataUnavailable(format!("invalid transcript JSON: {err}")))?;

    raw.into_iter()
        .enumerate()
        .map(|(index, event)| {
            let start = event.start.to_seconds().ok_or_else(|| {
                SyncError::DataUnavailable(format!("line {index} has an unreadable start time"))
            })?;
            let end = match &event.end {
                Some(value) => Some(value.to_seconds().ok_or_else(|| {
                    SyncError::DataUnavailable(format!("line {index} has an unreadable end time"))
                })?),
                None => None,
            };
            Ok(SubtitleEvent {
                index,
                speaker: non_empty(event.speaker),
                text: event.text,
                translated: non_empty(event.translated),
                start: sanitize_time(start),
                end: end.map(sanitize_time),
            })
        })
        .collect()
}

fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Fetch a transcript from a local path or an `http(s)://` URL.
pub async fn fetch_transcript(source: String) -> SyncResult<Vec<SubtitleEvent>> {
    let body = if is_remote(&source) {
        debug!(url = %source, "Fetching remote transcript");
        let response = reqwest::get(&source)
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(|err| SyncError::DataUnavailable(format!("{source}: {err}")))?;
        response
            .text()
            .await
            .map_err(|err| SyncError::DataUnavailable(format!("{source}: {err}")))?
    } else {
        fs::read_to_string(&source)
            .map_err(|err| SyncError::DataUnavailable(format!("{source}: {err}")))?
    };
    parse_transcript(&body)
}

/// Ordered transcript events for the current run.
#[derive(Debug, Default)]
pub struct TranscriptStore {
    events: Vec<SubtitleEvent>,
}

impl TranscriptStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the outcome of a fetch. A failed fetch empties the store.
    pub fn load(&mut self, fetched: SyncResult<Vec<SubtitleEvent>>) -> SyncResult<usize> {
        match fetched {
            Ok(events) => {
                self.events = events;
                info!(lines = self.events.len(), "Transcript loaded");
                Ok(self.events.len())
            }
            Err(err) => {
                self.events.clear();
                warn!("Transcript unavailable; showing an empty transcript: {err}");
                Err(err)
            }
        }
    }

    pub fn load_str(&mut self, json: &str) -> SyncResult<usize> {
        self.load(parse_transcript(json))
    }

    pub fn events(&self) -> &[SubtitleEvent] {
        &self.events
    }

    pub fn get(&self, index: usize) -> Option<&SubtitleEvent> {
        self.events.get(index)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn first_start(&self) -> Option<f64> {
        self.events.first().map(|event| event.start)
    }

    /// Highest index whose start is at or before `t`.
    pub fn active_index_at(&self, t: f64) -> Option<usize> {
        let mut active = None;
        for (idx, event) in self.events.iter().enumerate() {
            if event.start > t {
                break;
            }
            active = Some(idx);
        }
        active
    }

    /// Explicit end, else the next line's start; `None` means unbounded.
    pub fn effective_end(&self, index: usize) -> Option<f64> {
        let event = self.events.get(index)?;
        event
            .end
            .or_else(|| self.events.get(index + 1).map(|next| next.start))
    }
}

/// Where a video's transcript and media live.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VideoEntry {
    pub video_id: String,
    pub subtitle_path: String,
    #[serde(default)]
    pub media_path: Option<String>,
}

pub type VideoMap = BTreeMap<String, VideoEntry>;

pub fn load_video_map(path: &Path) -> SyncResult<VideoMap> {
    let data = fs::read_to_string(path)
        .map_err(|err| SyncError::DataUnavailable(format!("{}: {err}", path.display())))?;
    serde_json::from_str(&data)
        .map_err(|err| SyncError::DataUnavailable(format!("{}: {err}", path.display())))
}

/// Pick the entry for `key`, falling back to the `default` entry.
pub fn resolve_video<'a>(map: &'a VideoMap, key: &str) -> SyncResult<(&'a str, &'a VideoEntry)> {
    if let Some((name, entry)) = map.get_key_value(key) {
        return Ok((name.as_str(), entry));
    }
    debug!(key, "Video key not in map; using default entry");
    map.get_key_value(DEFAULT_VIDEO_KEY)
        .map(|(name, entry)| (name.as_str(), entry))
        .ok_or_else(|| {
            SyncError::DataUnavailable(format!("no entry for '{key}' and no default entry"))
        })
}

/// Resolve a map-relative path; URLs and absolute paths pass through.
pub fn resolve_source(base_dir: &Path, source: &str) -> String {
    if is_remote(source) || Path::new(source).is_absolute() {
        return source.to_string();
    }
    let joined: PathBuf = base_dir.join(source);
    joined.to_string_lossy().into_owned()
}

/// Where this run's transcript and media come from.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub video_key: String,
    pub video_id: Option<String>,
    pub transcript_source: Option<String>,
    pub media_path: Option<PathBuf>,
    pub load_error: Option<String>,
}

impl Session {
    /// Resolve `key` through the video map at `map_path`. Failures are kept
    /// on the session so the window can still open and report them.
    pub fn resolve(map_path: &Path, key: &str) -> Self {
        let mut session = Session {
            video_key: key.to_string(),
            video_id: None,
            transcript_source: None,
            media_path: None,
            load_error: None,
        };
        let map = match load_video_map(map_path) {
            Ok(map) => map,
            Err(err) => {
                warn!(path = %map_path.display(), "Video map unavailable: {err}");
                session.load_error = Some(err.to_string());
                return session;
            }
        };
        let base_dir = map_path.parent().unwrap_or_else(|| Path::new("."));
        match resolve_video(&map, key) {
            Ok((resolved_key, entry)) => {
                info!(
                    requested = key,
                    resolved = resolved_key,
                    video_id = %entry.video_id,
                    "Resolved video entry"
                );
                session.video_key = resolved_key.to_string();
                session.video_id = Some(entry.video_id.clone());
                session.transcript_source = Some(resolve_source(base_dir, &entry.subtitle_path));
                session.media_path = entry
                    .media_path
                    .as_deref()
                    .map(|media| PathBuf::from(resolve_source(base_dir, media)));
            }
            Err(err) => {
                warn!(key, "No usable video entry: {err}");
                session.load_error = Some(err.to_string());
            }
        }
        session
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_starts(starts: &[f64]) -> TranscriptStore {
        let json = serde_json::to_string(
            &starts
                .iter()
                .map(|s| serde_json::json!({ "text": format!("line at {s}"), "start": s }))
                .collect::<Vec<_>>(),
        )
        .expect("serialize fixture");
        let mut store = TranscriptStore::new();
        store.load_str(&json).expect("fixture parses");
        store
    }

    #[test]
    fn active_index_follows_start_times() {
        let store = store_with_starts(&[0.0, 5.0, 10.0]);
        assert_eq!(store.active_index_at(3.0), Some(0));
        assert_eq!(store.active_index_at(5.0), Some(1));
        assert_eq!(store.active_index_at(12.0), Some(2));
        assert_eq!(store.active_index_at(-1.0), None);
    }

    #[test]
    fn before_first_start_is_none() {
        let store = store_with_starts(&[2.5, 4.0]);
        for t in [0.0, 1.0, 2.49] {
            assert_eq!(store.active_index_at(t), None);
        }
    }

    #[test]
    fn interval_maps_to_lower_line() {
        let starts = [1.0, 3.0, 3.5, 8.0];
        let store = store_with_starts(&starts);
        for i in 0..starts.len() - 1 {
            let mid = (starts[i] + starts[i + 1]) / 2.0;
            assert_eq!(store.active_index_at(starts[i]), Some(i));
            assert_eq!(store.active_index_at(mid), Some(i));
        }
        assert_eq!(store.active_index_at(1_000.0), Some(starts.len() - 1));
    }

    #[test]
    fn duplicate_starts_pick_the_later_line() {
        let store = store_with_starts(&[0.0, 4.0, 4.0, 9.0]);
        assert_eq!(store.active_index_at(4.0), Some(2));
        assert_eq!(store.active_index_at(6.0), Some(2));
    }

    #[test]
    fn empty_store_has_no_active_line() {
        let store = TranscriptStore::new();
        assert_eq!(store.active_index_at(10.0), None);
    }

    #[test]
    fn failed_load_clears_previous_events() {
        let mut store = store_with_starts(&[0.0, 1.0]);
        let err = store.load_str("{ not json").unwrap_err();
        assert!(matches!(err, SyncError::DataUnavailable(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn parses_timestamps_and_optional_fields() {
        let json = r#"[
            {"speaker": "Alice", "text": "Hello", "translated": "こんにちは", "start": "00:00:15,267"},
            {"speaker": "", "text": "Bye", "translated": "", "start": 20, "end": "00:00:21.5"}
        ]"#;
        let events = parse_transcript(json).expect("parses");
        assert!((events[0].start - 15.267).abs() < 1e-9);
        assert_eq!(events[0].source_label(), "Alice: Hello");
        assert_eq!(events[1].speaker, None);
        assert_eq!(events[1].translated, None);
        assert_eq!(events[1].target_label("(none)"), "(none)");
        assert_eq!(events[1].end, Some(21.5));
        assert_eq!(events[1].index, 1);
    }

    #[test]
    fn effective_end_falls_back_to_next_start() {
        let json = r#"[
            {"text": "a", "start": 0, "end": 2},
            {"text": "b", "start": 3},
            {"text": "c", "start": 7}
        ]"#;
        let mut store = TranscriptStore::new();
        store.load_str(json).expect("parses");
        assert_eq!(store.effective_end(0), Some(2.0));
        assert_eq!(store.effective_end(1), Some(7.0));
        assert_eq!(store.effective_end(2), None);
    }

    #[test]
    fn video_map_falls_back_to_default_entry() {
        let map: VideoMap = serde_json::from_str(
            r#"{
                "default": {"videoId": "demo", "subtitlePath": "json/demo.json"},
                "alice": {"videoId": "alice", "subtitlePath": "json/alice.json", "mediaPath": "media/alice.ogg"}
            }"#,
        )
        .expect("map parses");

        let (key, entry) = resolve_video(&map, "alice").expect("alice present");
        assert_eq!(key, "alice");
        assert_eq!(entry.media_path.as_deref(), Some("media/alice.ogg"));

        let (key, entry) = resolve_video(&map, "missing").expect("default present");
        assert_eq!(key, DEFAULT_VIDEO_KEY);
        assert_eq!(entry.subtitle_path, "json/demo.json");
    }

    #[test]
    fn relative_sources_resolve_against_map_dir() {
        let base = Path::new("/data/site");
        assert_eq!(resolve_source(base, "json/a.json"), "/data/site/json/a.json");
        assert_eq!(
            resolve_source(base, "https://example.com/a.json"),
            "https://example.com/a.json"
        );
    }

    #[test]
    fn session_resolves_paths_relative_to_map() {
        let dir = std::env::temp_dir().join(format!("cinelingua-session-{}", std::process::id()));
        fs::create_dir_all(&dir).expect("mkdir");
        let map_path = dir.join("videos.json");
        fs::write(
            &map_path,
            r#"{"default": {"videoId": "demo", "subtitlePath": "demo.json", "mediaPath": "demo.ogg"}}"#,
        )
        .expect("write map");

        let session = Session::resolve(&map_path, "unknown");
        assert_eq!(session.video_key, DEFAULT_VIDEO_KEY);
        assert_eq!(session.video_id.as_deref(), Some("demo"));
        assert_eq!(
            session.transcript_source,
            Some(dir.join("demo.json").to_string_lossy().into_owned())
        );
        assert_eq!(session.media_path, Some(dir.join("demo.ogg")));
        assert!(session.load_error.is_none());

        let missing = Session::resolve(&dir.join("absent.json"), "x");
        assert!(missing.transcript_source.is_none());
        assert!(missing.load_error.is_some());
    }
}
