/// Play/pause flag plus a mirror of the engine's last reported time.
/// The engine stays the source of truth for the current time.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub is_playing: bool,
    pub last_time: f64,
}

impl PlaybackState {
    pub fn new() -> Self {
        Self {
            is_playing: false,
            last_time: 0.0,
        }
    }

    /// Label for the play/pause button.
    pub fn button_label(&self) -> &'static str {
        if self.is_playing { "Pause" } else { "Play" }
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new()
    }
}
