//! Short eased scroll animations applied to both panes at once.

use std::time::{Duration, Instant};

/// Scroll offsets (absolute, in pixels) for the two transcript panes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PaneOffsets {
    pub source: f32,
    pub target: f32,
}

impl PaneOffsets {
    fn lerp(self, to: PaneOffsets, t: f32) -> PaneOffsets {
        PaneOffsets {
            source: self.source + (to.source - self.source) * t,
            target: self.target + (to.target - self.target) * t,
        }
    }
}

/// Ease-out quadratic.
pub fn ease_out_quad(p: f32) -> f32 {
    let p = p.clamp(0.0, 1.0);
    p * (2.0 - p)
}

#[derive(Debug, Clone)]
pub struct ScrollAnimation {
    started_at: Instant,
    duration: Duration,
    from: PaneOffsets,
    to: PaneOffsets,
}

impl ScrollAnimation {
    pub fn new(started_at: Instant, duration: Duration, from: PaneOffsets, to: PaneOffsets) -> Self {
        Self {
            started_at,
            duration,
            from,
            to,
        }
    }

    pub fn target(&self) -> PaneOffsets {
        self.to
    }

    /// Offsets at `now`, and whether the animation has finished.
    pub fn sample(&self, now: Instant) -> (PaneOffsets, bool) {
        if self.duration.is_zero() {
            return (self.to, true);
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        let progress = (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0);
        if progress >= 1.0 {
            return (self.to, true);
        }
        (self.from.lerp(self.to, ease_out_quad(progress)), false)
    }
}
