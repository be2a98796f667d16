use crate::sync::PaneOffsets;

mod appearance;
mod core;
mod playback;
mod scroll;
mod study;

/// Describes work that must be performed outside the pure reducer.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Effect {
    SaveConfig,
    SaveWordbook,
    ScrollPanes(PaneOffsets),
    Lookup { request_id: u64, word: String },
    QuitSafely,
}
