use crate::types::time_math::MarkerLayout;

/// Minimum length of a selected interval, in seconds.
pub const MIN_SPAN_SECS: f64 = 30.0;

/// Media duration as reported by the playback engine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MediaDuration {
    /// Metadata has not loaded yet.
    #[default]
    Unknown,
    Known(f64),
}

impl MediaDuration {
    pub fn known(&self) -> Option<f64> {
        match self {
            MediaDuration::Known(d) => Some(*d),
            MediaDuration::Unknown => None,
        }
    }
}

/// The selected `[start, end]` interval of the loaded audio.
///
/// While the duration is known, every mutation keeps `0 <= start <= end <= duration`
/// and `end - start >= min_span`, except that a duration shorter than the minimum
/// span pins `end` to the duration.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalModel {
    start: f64,
    end: f64,
    duration: MediaDuration,
    min_span: f64,
}

impl IntervalModel {
    pub fn new(min_span: f64) -> Self {
        Self {
            start: 0.0,
            end: min_span,
            duration: MediaDuration::Unknown,
            min_span,
        }
    }

    #[cfg(test)]
    pub(crate) fn from_parts(start: f64, end: f64, duration: f64, min_span: f64) -> Self {
        Self {
            start,
            end,
            duration: MediaDuration::Known(duration),
            min_span,
        }
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn duration(&self) -> MediaDuration {
        self.duration
    }

    #[cfg(test)]
    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    /// Back to the load-time default; used when a new file replaces the current one.
    pub fn reset(&mut self) {
        self.start = 0.0;
        self.end = self.min_span;
        self.duration = MediaDuration::Unknown;
    }

    /// Records the media duration and resets the interval to `(0, min(min_span, d))`.
    /// Only the first valid report is applied.
    pub fn resolve_duration(&mut self, d: f64) -> bool {
        if !d.is_finite() || d < 0.0 {
            tracing::warn!(duration = d, "Ignoring invalid media duration");
            return false;
        }
        if self.duration.known().is_some() {
            return false;
        }
        self.duration = MediaDuration::Known(d);
        self.start = 0.0;
        self.end = self.min_span.min(d);
        tracing::debug!(duration = d, end = self.end, "Duration resolved");
        true
    }

    /// Moves the start marker, clamped to `[0, end - min_span]`. Returns whether it moved.
    pub fn set_start(&mut self, t: f64) -> bool {
        if self.duration.known().is_none() || t.is_nan() {
            return false;
        }
        let upper = (self.end - self.min_span).max(0.0);
        let next = t.clamp(0.0, upper);
        let changed = next != self.start;
        self.start = next;
        changed
    }

    /// Moves the end marker, clamped to `[start + min_span, duration]`. Returns whether it moved.
    pub fn set_end(&mut self, t: f64) -> bool {
        let Some(duration) = self.duration.known() else {
            return false;
        };
        if t.is_nan() {
            return false;
        }
        let lower = (self.start + self.min_span).min(duration);
        let next = t.clamp(lower, duration);
        let changed = next != self.end;
        self.end = next;
        changed
    }

    /// Repairs a zero-length interval before playback by resetting `end` to `min(min_span, duration)`.
    pub fn correct_degenerate(&mut self) -> bool {
        let Some(duration) = self.duration.known() else {
            return false;
        };
        if self.start != self.end {
            return false;
        }
        self.end = self.min_span.min(duration);
        if self.start > self.end {
            self.start = 0.0;
        }
        tracing::debug!(start = self.start, end = self.end, "Degenerate interval corrected");
        true
    }

    /// Marker positions, available only once the duration is known and positive.
    pub fn layout(&self) -> Option<MarkerLayout> {
        match self.duration {
            MediaDuration::Known(d) if d > 0.0 => Some(MarkerLayout::new(self.start, self.end, d)),
            _ => None,
        }
    }
}

impl Default for IntervalModel {
    fn default() -> Self {
        Self::new(MIN_SPAN_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_invariants(model: &IntervalModel, d: f64) {
        assert!(model.start() >= 0.0, "start below zero: {:?}", model);
        assert!(model.start() <= model.end(), "start past end: {:?}", model);
        assert!(model.end() <= d, "end past duration: {:?}", model);
        if d >= MIN_SPAN_SECS {
            assert!(model.span() >= MIN_SPAN_SECS - 1e-9, "span too short: {:?}", model);
        } else {
            assert_eq!(model.end(), d);
        }
    }

    #[test]
    fn test_default_before_duration() {
        let model = IntervalModel::default();
        assert_eq!(model.start(), 0.0);
        assert_eq!(model.end(), 30.0);
        assert_eq!(model.duration(), MediaDuration::Unknown);
        assert!(model.layout().is_none());
    }

    #[test]
    fn test_edits_ignored_until_duration_known() {
        let mut model = IntervalModel::default();
        assert!(!model.set_start(10.0));
        assert!(!model.set_end(50.0));
        assert_eq!((model.start(), model.end()), (0.0, 30.0));
    }

    #[test]
    fn test_resolve_duration_long_media() {
        let mut model = IntervalModel::default();
        assert!(model.resolve_duration(180.0));
        assert_eq!((model.start(), model.end()), (0.0, 30.0));
        assert_eq!(model.duration(), MediaDuration::Known(180.0));
    }

    #[test]
    fn test_resolve_duration_short_media_collapses_end() {
        let mut model = IntervalModel::default();
        model.resolve_duration(20.0);
        assert_eq!((model.start(), model.end()), (0.0, 20.0));
    }

    #[test]
    fn test_resolve_duration_idempotent() {
        let mut once = IntervalModel::default();
        once.resolve_duration(95.0);
        let mut twice = IntervalModel::default();
        twice.resolve_duration(95.0);
        assert!(!twice.resolve_duration(95.0));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_resolve_duration_rejects_nan() {
        let mut model = IntervalModel::default();
        assert!(!model.resolve_duration(f64::NAN));
        assert_eq!(model.duration(), MediaDuration::Unknown);
    }

    #[test]
    fn test_set_start_clamps_to_span() {
        let mut model = IntervalModel::default();
        model.resolve_duration(120.0);
        model.set_end(100.0);
        model.set_start(90.0);
        assert_eq!(model.start(), 70.0);
        model.set_start(-5.0);
        assert_eq!(model.start(), 0.0);
    }

    #[test]
    fn test_set_end_clamps_to_span_and_duration() {
        let mut model = IntervalModel::default();
        model.resolve_duration(120.0);
        model.set_end(500.0);
        assert_eq!(model.end(), 120.0);
        model.set_start(50.0);
        model.set_end(60.0);
        assert_eq!(model.end(), 80.0);
    }

    #[test]
    fn test_short_media_drag_keeps_end_at_duration() {
        let mut model = IntervalModel::default();
        model.resolve_duration(20.0);
        model.set_start(5.0);
        model.set_end(10.0);
        assert_eq!((model.start(), model.end()), (0.0, 20.0));
    }

    #[test]
    fn test_invariants_hold_over_drag_sequences() {
        let durations = [30.0, 31.5, 45.0, 60.0, 240.0, 3661.0, 12.0, 0.0];
        for &d in &durations {
            let mut model = IntervalModel::default();
            model.resolve_duration(d);
            let mut seed: u64 = 0x9e37_79b9_7f4a_7c15 ^ d.to_bits();
            for step in 0..400 {
                seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                let fraction = (seed >> 11) as f64 / (1u64 << 53) as f64;
                let t = fraction * (d * 1.4) - d * 0.2;
                if step % 2 == 0 {
                    model.set_start(t);
                } else {
                    model.set_end(t);
                }
                assert_invariants(&model, d);
            }
        }
    }

    #[test]
    fn test_correct_degenerate_resets_end() {
        let mut model = IntervalModel::from_parts(12.0, 12.0, 45.0, MIN_SPAN_SECS);
        assert!(model.correct_degenerate());
        assert_eq!((model.start(), model.end()), (12.0, 30.0));
    }

    #[test]
    fn test_correct_degenerate_start_beyond_new_end() {
        let mut model = IntervalModel::from_parts(40.0, 40.0, 45.0, MIN_SPAN_SECS);
        assert!(model.correct_degenerate());
        assert_eq!((model.start(), model.end()), (0.0, 30.0));
    }

    #[test]
    fn test_correct_degenerate_noop_for_valid_interval() {
        let mut model = IntervalModel::from_parts(0.0, 30.0, 45.0, MIN_SPAN_SECS);
        assert!(!model.correct_degenerate());
        assert_eq!(model.end(), 30.0);
    }

    #[test]
    fn test_reset_returns_to_unknown() {
        let mut model = IntervalModel::default();
        model.resolve_duration(200.0);
        model.set_end(150.0);
        model.reset();
        assert_eq!(model, IntervalModel::default());
    }
}
