use std::path::Path;

use crate::error::EngineError;

/// Notifications produced by a media engine between polls.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// Metadata loaded; reported once per opened file.
    DurationKnown(f64),
    /// Playback progressed to the given time, in seconds.
    TimeUpdate(f64),
    EndOfStream,
    Error(String),
}

/// The playback engine behind the player: load, seek, play, pause and time queries.
pub trait MediaEngine {
    fn open(&mut self, path: &Path) -> Result<(), EngineError>;
    fn duration(&self) -> Option<f64>;
    fn current_time(&self) -> f64;
    fn seek(&mut self, time: f64) -> Result<(), EngineError>;
    fn play(&mut self) -> Result<(), EngineError>;
    fn pause(&mut self) -> Result<(), EngineError>;
    /// Drains pending notifications. While playing, emits a `TimeUpdate` each call.
    fn poll_events(&mut self) -> Vec<EngineEvent>;
}
