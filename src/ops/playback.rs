use std::path::Path;

use crate::error::EngineError;
use crate::renderer::media_engine::{EngineEvent, MediaEngine};
use crate::types::interval::IntervalModel;
use crate::types::playback_state::PlaybackState;
use crate::types::time_math::format_time;

/// Bridges the selected interval and the media engine: playback always starts at
/// the interval start and stops once it reaches the interval end.
pub struct PlaybackController<E: MediaEngine> {
    engine: E,
    state: PlaybackState,
}

impl<E: MediaEngine> PlaybackController<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            state: PlaybackState::new(),
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing
    }

    #[cfg(test)]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Opens a new file and clears the play state.
    pub fn open(&mut self, path: &Path) -> Result<(), EngineError> {
        if self.state.is_playing {
            self.engine.pause().ok();
        }
        self.state.clear();
        self.engine.open(path)
    }

    /// Pauses if playing. Otherwise repairs a zero-length interval, seeks to its start and plays.
    pub fn toggle_play_pause(&mut self, interval: &mut IntervalModel) -> Result<(), EngineError> {
        if self.state.is_playing {
            self.engine.pause()?;
            self.state.is_playing = false;
            tracing::debug!(time = self.state.last_time, "Playback paused");
            return Ok(());
        }

        interval.correct_degenerate();
        self.engine.seek(interval.start())?;
        self.engine.play()?;
        self.state.is_playing = true;
        self.state.last_time = interval.start();
        tracing::debug!(
            start = interval.start(),
            end = interval.end(),
            "Playback started"
        );
        Ok(())
    }

    /// Engine progress tick. Returns `true` on the tick that stopped playback at the interval end.
    pub fn on_time_update(
        &mut self,
        current_time: f64,
        interval: &IntervalModel,
    ) -> Result<bool, EngineError> {
        self.state.last_time = current_time;
        if !self.state.is_playing || current_time < interval.end() {
            return Ok(false);
        }
        self.engine.pause()?;
        self.state.is_playing = false;
        tracing::info!(
            time = current_time,
            end = interval.end(),
            "Reached interval end, playback stopped"
        );
        Ok(true)
    }

    /// Drains pending engine notifications into the interval and play state.
    /// Every event is applied; the first failure is returned.
    pub fn poll(&mut self, interval: &mut IntervalModel) -> Result<(), EngineError> {
        let mut first_error = None;
        for event in self.engine.poll_events() {
            if let Err(e) = self.handle_event(event, interval) {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Applies one engine notification to the interval and play state.
    pub fn handle_event(
        &mut self,
        event: EngineEvent,
        interval: &mut IntervalModel,
    ) -> Result<(), EngineError> {
        match event {
            EngineEvent::DurationKnown(duration) => {
                interval.resolve_duration(duration);
            }
            EngineEvent::TimeUpdate(time) => {
                self.on_time_update(time, interval)?;
            }
            EngineEvent::EndOfStream => {
                self.state.is_playing = false;
                tracing::debug!("End of stream");
            }
            EngineEvent::Error(reason) => {
                self.state.is_playing = false;
                return Err(EngineError::Stream(reason));
            }
        }
        Ok(())
    }

    /// `MM:SS / MM:SS` for the current time and the media duration.
    pub fn time_display(&self, interval: &IntervalModel) -> String {
        let duration = interval
            .duration()
            .known()
            .map(format_time)
            .unwrap_or_else(|| "--:--".to_string());
        format!("{} / {}", format_time(self.state.last_time), duration)
    }

    pub fn interval_display(&self, interval: &IntervalModel) -> String {
        format!(
            "Interval: {} - {}",
            format_time(interval.start()),
            format_time(interval.end())
        )
    }
}
