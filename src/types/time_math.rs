/// Formats seconds as `MM:SS`. The minute field grows past two digits for long media.
pub fn format_time(seconds: f64) -> String {
    let seconds = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
    let minutes = (seconds / 60.0).floor() as u64;
    let secs = (seconds % 60.0).floor() as u64;
    format!("{:02}:{:02}", minutes, secs)
}

/// Fractional position of a pointer along a track, clamped to `[0, 1]`.
pub fn pointer_fraction(pointer_x: f32, track_left: f32, track_width: f32) -> f64 {
    if track_width <= 0.0 {
        return 0.0;
    }
    (((pointer_x - track_left) / track_width) as f64).clamp(0.0, 1.0)
}

pub fn fraction_to_seconds(fraction: f64, duration: f64) -> f64 {
    fraction * duration
}

/// Percentage of `duration` covered by `seconds`. Callers must hold a known, positive duration.
pub fn percent_of(seconds: f64, duration: f64) -> f64 {
    if duration <= 0.0 {
        return 0.0;
    }
    seconds / duration * 100.0
}

/// Horizontal placement of the two markers and the progress region, in percent of the track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerLayout {
    pub start_percent: f64,
    pub end_percent: f64,
}

impl MarkerLayout {
    pub fn new(start: f64, end: f64, duration: f64) -> Self {
        Self {
            start_percent: percent_of(start, duration),
            end_percent: percent_of(end, duration),
        }
    }

    pub fn progress_left(&self) -> f64 {
        self.start_percent
    }

    pub fn progress_width(&self) -> f64 {
        self.end_percent - self.start_percent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time_boundaries() {
        assert_eq!(format_time(0.0), "00:00");
        assert_eq!(format_time(59.0), "00:59");
        assert_eq!(format_time(60.0), "01:00");
        assert_eq!(format_time(3661.0), "61:01");
    }

    #[test]
    fn test_format_time_truncates_fractions() {
        assert_eq!(format_time(59.999), "00:59");
        assert_eq!(format_time(125.4), "02:05");
    }

    #[test]
    fn test_format_time_non_finite() {
        assert_eq!(format_time(f64::NAN), "00:00");
        assert_eq!(format_time(-3.0), "00:00");
    }

    #[test]
    fn test_pointer_fraction_clamps() {
        assert_eq!(pointer_fraction(50.0, 100.0, 200.0), 0.0);
        assert_eq!(pointer_fraction(400.0, 100.0, 200.0), 1.0);
        assert_eq!(pointer_fraction(200.0, 100.0, 200.0), 0.5);
        assert_eq!(pointer_fraction(200.0, 100.0, 0.0), 0.0);
    }

    #[test]
    fn test_marker_layout() {
        let layout = MarkerLayout::new(30.0, 90.0, 120.0);
        assert_eq!(layout.start_percent, 25.0);
        assert_eq!(layout.end_percent, 75.0);
        assert_eq!(layout.progress_left(), 25.0);
        assert_eq!(layout.progress_width(), 50.0);
    }
}
