use crate::config::ScrollAnchorMode;
use crate::sync::Pane;
use iced::widget::scrollable::Id as ScrollId;
use once_cell::sync::Lazy;

/// Limits for display controls.
pub(crate) const MIN_FONT_SIZE: u32 = 12;
pub(crate) const MAX_FONT_SIZE: u32 = 40;
pub(crate) const MIN_LINE_SPACING: f32 = 1.0;
pub(crate) const MAX_LINE_SPACING: f32 = 2.2;
pub(crate) const LINE_PADDING_PX: u16 = 4;
pub(crate) const PANE_PADDING_PX: u16 = 12;
pub(crate) const LINE_SPACING_PX: f32 = 4.0;
pub(crate) const SIDE_PANEL_WIDTH_PX: f32 = 320.0;

pub(crate) static SOURCE_SCROLL_ID: Lazy<ScrollId> =
    Lazy::new(|| ScrollId::new("transcript-source-scroll"));
pub(crate) static TARGET_SCROLL_ID: Lazy<ScrollId> =
    Lazy::new(|| ScrollId::new("transcript-target-scroll"));

pub(crate) const ANCHOR_MODES: [ScrollAnchorMode; 2] =
    [ScrollAnchorMode::Centered, ScrollAnchorMode::TopOffset];

pub(crate) fn scroll_id(pane: Pane) -> ScrollId {
    match pane {
        Pane::Source => SOURCE_SCROLL_ID.clone(),
        Pane::Target => TARGET_SCROLL_ID.clone(),
    }
}
