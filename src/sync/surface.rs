//! Render/scroll surface: two parallel transcript panes and their scroll
//! controller.
//!
//! Pixel positions of lines are estimated from wrapped-line weights and then
//! scaled to the content height the scrollable last reported, so targets stay
//! close to the real layout without measuring each widget.

use super::RenderSurface;
use super::animation::{PaneOffsets, ScrollAnimation};
use crate::transcript::SubtitleEvent;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

pub const MISSING_TRANSLATION: &str = "(no translation)";

const FALLBACK_VIEWPORT_WIDTH: f32 = 640.0;
const FALLBACK_VIEWPORT_HEIGHT: f32 = 480.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Source,
    Target,
}

impl Pane {
    pub const ALL: [Pane; 2] = [Pane::Source, Pane::Target];

    fn slot(self) -> usize {
        match self {
            Pane::Source => 0,
            Pane::Target => 1,
        }
    }
}

impl std::fmt::Display for Pane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Pane::Source => "source",
            Pane::Target => "target",
        };
        write!(f, "{}", label)
    }
}

/// Where the active line is placed inside the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollAnchor {
    Centered,
    /// Line top sits this many pixels below the top of the viewport.
    TopOffset(f32),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaneLine {
    pub index: usize,
    pub label: String,
    pub active: bool,
}

/// Last geometry a pane's scrollable reported.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PaneViewport {
    pub offset_y: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub content_height: f32,
}

/// Typography inputs for geometry estimates.
#[derive(Debug, Clone, Copy)]
pub struct LayoutMetrics {
    pub font_size: f32,
    pub line_spacing: f32,
    pub line_gap_px: f32,
    pub padding_px: f32,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            font_size: 18.0,
            line_spacing: 1.3,
            line_gap_px: 8.0,
            padding_px: 12.0,
        }
    }
}

pub struct TranscriptPanes {
    source: Vec<PaneLine>,
    target: Vec<PaneLine>,
    visible: Pane,
    viewports: [PaneViewport; 2],
    anchor: ScrollAnchor,
    metrics: LayoutMetrics,
    animation_duration: Duration,
    animation: Option<ScrollAnimation>,
    pending: Option<PaneOffsets>,
}

impl TranscriptPanes {
    pub fn new(anchor: ScrollAnchor, metrics: LayoutMetrics, animation_duration: Duration) -> Self {
        Self {
            source: Vec::new(),
            target: Vec::new(),
            visible: Pane::Source,
            viewports: [PaneViewport::default(); 2],
            anchor,
            metrics,
            animation_duration,
            animation: None,
            pending: None,
        }
    }

    pub fn lines(&self, pane: Pane) -> &[PaneLine] {
        match pane {
            Pane::Source => &self.source,
            Pane::Target => &self.target,
        }
    }

    pub fn visible(&self) -> Pane {
        self.visible
    }

    pub fn set_anchor(&mut self, anchor: ScrollAnchor) {
        self.anchor = anchor;
    }

    pub fn set_metrics(&mut self, metrics: LayoutMetrics) {
        self.metrics = metrics;
    }

    pub fn set_animation_duration(&mut self, duration: Duration) {
        self.animation_duration = duration;
    }

    /// Geometry reported by a pane's scrollable, whatever moved it.
    pub fn record_viewport(&mut self, pane: Pane, viewport: PaneViewport) {
        let clean = |v: f32| if v.is_finite() { v.max(0.0) } else { 0.0 };
        self.viewports[pane.slot()] = PaneViewport {
            offset_y: clean(viewport.offset_y),
            viewport_width: clean(viewport.viewport_width),
            viewport_height: clean(viewport.viewport_height),
            content_height: clean(viewport.content_height),
        };
    }

    /// Offsets to push to both scrollables, if any changed since last call.
    pub fn take_scroll_command(&mut self) -> Option<PaneOffsets> {
        self.pending.take()
    }

    fn current_offsets(&self) -> PaneOffsets {
        PaneOffsets {
            source: self.viewports[0].offset_y,
            target: self.viewports[1].offset_y,
        }
    }

    fn store_offsets(&mut self, offsets: PaneOffsets) {
        self.viewports[0].offset_y = offsets.source;
        self.viewports[1].offset_y = offsets.target;
        self.pending = Some(offsets);
    }

    /// Absolute scroll offset that puts `index` at the anchor in `pane`.
    pub fn target_offset(&self, pane: Pane, index: usize) -> Option<f32> {
        let lines = self.lines(pane);
        if index >= lines.len() {
            return None;
        }
        let viewport = self.viewports[pane.slot()];
        let viewport_width = if viewport.viewport_width > 0.0 {
            viewport.viewport_width
        } else {
            FALLBACK_VIEWPORT_WIDTH
        };
        let viewport_height = if viewport.viewport_height > 0.0 {
            viewport.viewport_height
        } else {
            FALLBACK_VIEWPORT_HEIGHT
        };

        let heights = self.estimate_line_heights(lines, viewport_width);
        let padding = self.metrics.padding_px.max(0.0);
        let estimated_content: f32 = padding * 2.0 + heights.iter().sum::<f32>();
        let scale = if viewport.content_height > 0.0 && estimated_content > f32::EPSILON {
            viewport.content_height / estimated_content
        } else {
            1.0
        };
        let content_height = estimated_content * scale;

        let line_top = (padding + heights.iter().take(index).sum::<f32>()) * scale;
        let line_height = heights[index] * scale;

        let desired = match self.anchor {
            ScrollAnchor::Centered => line_top + line_height * 0.5 - viewport_height * 0.5,
            ScrollAnchor::TopOffset(px) => line_top - px,
        };
        let max_offset = (content_height - viewport_height).max(0.0);
        Some(desired.clamp(0.0, max_offset))
    }

    fn target_offsets(&self, index: usize) -> Option<PaneOffsets> {
        let current = self.current_offsets();
        let source = self.target_offset(Pane::Source, index);
        let target = self.target_offset(Pane::Target, index);
        if source.is_none() && target.is_none() {
            return None;
        }
        Some(PaneOffsets {
            source: source.unwrap_or(current.source),
            target: target.unwrap_or(current.target),
        })
    }

    fn estimate_line_heights(&self, lines: &[PaneLine], viewport_width: f32) -> Vec<f32> {
        let font_size = self.metrics.font_size.max(1.0);
        let line_height = font_size * self.metrics.line_spacing.max(0.8);
        let available = (viewport_width - self.metrics.padding_px.max(0.0) * 2.0).max(1.0);
        let glyph_width = (font_size * 0.55).max(1.0);
        let max_units = (available / glyph_width).max(8.0);

        lines
            .iter()
            .map(|line| {
                let mut rows = 1.0f32;
                let mut units_on_row = 0.0f32;
                for ch in line.label.chars() {
                    if ch == '\n' {
                        rows += 1.0;
                        units_on_row = 0.0;
                        continue;
                    }
                    let units = if ch.is_whitespace() {
                        0.45
                    } else if ch.is_ascii_punctuation() {
                        0.55
                    } else if ch.is_ascii() {
                        1.0
                    } else {
                        1.8
                    };
                    if units_on_row + units > max_units {
                        rows += 1.0;
                        units_on_row = units;
                    } else {
                        units_on_row += units;
                    }
                }
                rows * line_height + self.metrics.line_gap_px.max(0.0)
            })
            .collect()
    }
}

impl RenderSurface for TranscriptPanes {
    fn render_all(&mut self, events: &[SubtitleEvent]) {
        self.source = events
            .iter()
            .map(|event| PaneLine {
                index: event.index,
                label: event.source_label(),
                active: false,
            })
            .collect();
        self.target = events
            .iter()
            .map(|event| PaneLine {
                index: event.index,
                label: event.target_label(MISSING_TRANSLATION),
                active: false,
            })
            .collect();
        self.animation = None;
        self.pending = None;
        debug!(lines = events.len(), "Rendered transcript panes");
    }

    fn set_active(&mut self, index: Option<usize>) {
        for line in self.source.iter_mut().chain(self.target.iter_mut()) {
            line.active = Some(line.index) == index;
        }
    }

    fn scroll_to_active(&mut self, index: usize, animated: bool, now: Instant) {
        let Some(to) = self.target_offsets(index) else {
            return;
        };
        if animated && !self.animation_duration.is_zero() {
            if self.animation.is_some() {
                trace!(index, "Replacing in-flight scroll animation");
            }
            self.animation = Some(ScrollAnimation::new(
                now,
                self.animation_duration,
                self.current_offsets(),
                to,
            ));
        } else {
            self.animation = None;
            self.store_offsets(to);
        }
    }

    fn show_pane(&mut self, pane: Pane) {
        self.visible = pane;
    }

    fn advance_animation(&mut self, now: Instant) {
        let Some(animation) = self.animation.as_ref() else {
            return;
        };
        let (offsets, finished) = animation.sample(now);
        if finished {
            self.animation = None;
        }
        self.store_offsets(offsets);
    }

    fn cancel_animation(&mut self) {
        self.animation = None;
    }

    fn is_animating(&self) -> bool {
        self.animation.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::parse_transcript;

    fn sample_events(count: usize) -> Vec<SubtitleEvent> {
        let rows: Vec<serde_json::Value> = (0..count)
            .map(|i| {
                let translated = if i % 3 == 0 {
                    serde_json::Value::Null
                } else {
                    serde_json::Value::String(format!("訳 {i}"))
                };
                let start = i as f64 * 2.0;
                serde_json::json!({
                    "speaker": "Alice",
                    "text": format!("Line {i} has enough words to wrap at least once in a narrow pane."),
                    "translated": translated,
                    "start": start,
                })
            })
            .collect();
        let json = serde_json::to_string(&rows).expect("serialize fixture");
        parse_transcript(&json).expect("fixture parses")
    }

    fn panes_with(count: usize, anchor: ScrollAnchor) -> TranscriptPanes {
        let mut panes = TranscriptPanes::new(
            anchor,
            LayoutMetrics::default(),
            Duration::from_millis(100),
        );
        panes.render_all(&sample_events(count));
        for pane in Pane::ALL {
            panes.record_viewport(
                pane,
                PaneViewport {
                    offset_y: 0.0,
                    viewport_width: 480.0,
                    viewport_height: 300.0,
                    content_height: 4000.0,
                },
            );
        }
        panes
    }

    #[test]
    fn render_all_replaces_previous_lines() {
        let events = sample_events(5);
        let mut panes = panes_with(0, ScrollAnchor::Centered);
        panes.render_all(&events);
        panes.render_all(&events);
        assert_eq!(panes.lines(Pane::Source).len(), 5);
        assert_eq!(panes.lines(Pane::Target).len(), 5);
        let indices: Vec<_> = panes.lines(Pane::Target).iter().map(|l| l.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn labels_carry_speaker_and_placeholder() {
        let panes = panes_with(2, ScrollAnchor::Centered);
        assert!(panes.lines(Pane::Source)[0].label.starts_with("Alice: Line 0"));
        assert_eq!(
            panes.lines(Pane::Target)[0].label,
            format!("Alice: {MISSING_TRANSLATION}")
        );
        assert_eq!(panes.lines(Pane::Target)[1].label, "Alice: 訳 1");
    }

    #[test]
    fn set_active_marks_one_line_in_both_panes() {
        let mut panes = panes_with(6, ScrollAnchor::Centered);
        panes.set_active(Some(2));
        panes.set_active(Some(4));
        for pane in Pane::ALL {
            let active: Vec<_> = panes
                .lines(pane)
                .iter()
                .filter(|line| line.active)
                .map(|line| line.index)
                .collect();
            assert_eq!(active, vec![4]);
        }
        panes.set_active(None);
        assert!(Pane::ALL
            .iter()
            .all(|pane| panes.lines(*pane).iter().all(|line| !line.active)));
    }

    #[test]
    fn targets_are_monotonic_and_clamped() {
        let panes = panes_with(60, ScrollAnchor::Centered);
        let mut previous = -1.0f32;
        for idx in 0..60 {
            let y = panes.target_offset(Pane::Source, idx).expect("line exists");
            assert!(y + 1e-3 >= previous, "offset should grow with the index");
            assert!(y >= 0.0 && y <= 4000.0 - 300.0);
            previous = y;
        }
        assert_eq!(panes.target_offset(Pane::Source, 0), Some(0.0));
        assert_eq!(panes.target_offset(Pane::Source, 60), None);
    }

    #[test]
    fn top_offset_anchor_sits_above_centered() {
        let centered = panes_with(60, ScrollAnchor::Centered);
        let top = panes_with(60, ScrollAnchor::TopOffset(40.0));
        let idx = 30;
        let y_center = centered.target_offset(Pane::Source, idx).expect("line exists");
        let y_top = top.target_offset(Pane::Source, idx).expect("line exists");
        assert!(y_top > y_center, "a small top offset scrolls further than centering");
    }

    #[test]
    fn snap_scroll_emits_both_panes_at_once() {
        let mut panes = panes_with(40, ScrollAnchor::Centered);
        panes.scroll_to_active(20, false, Instant::now());
        let command = panes.take_scroll_command().expect("snap emits offsets");
        assert_eq!(Some(command.source), panes.target_offset(Pane::Source, 20));
        assert_eq!(Some(command.target), panes.target_offset(Pane::Target, 20));
        assert!(panes.take_scroll_command().is_none());
        assert!(!panes.is_animating());
    }

    #[test]
    fn animated_scroll_reaches_target_and_stops() {
        let mut panes = panes_with(40, ScrollAnchor::Centered);
        let start = Instant::now();
        panes.scroll_to_active(25, true, start);
        assert!(panes.is_animating());

        panes.advance_animation(start + Duration::from_millis(40));
        let mid = panes.take_scroll_command().expect("frame emits offsets");
        let goal = panes.target_offset(Pane::Source, 25).expect("line exists");
        assert!(mid.source > 0.0 && mid.source < goal);

        panes.advance_animation(start + Duration::from_millis(120));
        let end = panes.take_scroll_command().expect("final frame emits offsets");
        assert!((end.source - goal).abs() < 1e-3);
        assert!(!panes.is_animating());
    }

    #[test]
    fn new_animation_replaces_in_flight_one() {
        let mut panes = panes_with(40, ScrollAnchor::Centered);
        let start = Instant::now();
        panes.scroll_to_active(30, true, start);
        panes.scroll_to_active(10, true, start + Duration::from_millis(10));
        panes.advance_animation(start + Duration::from_millis(500));
        let end = panes.take_scroll_command().expect("offsets emitted");
        assert_eq!(Some(end.source), panes.target_offset(Pane::Source, 10));
    }
}
