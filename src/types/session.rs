use std::path::Path;

use crate::error::ClipError;
use crate::types::file_list::FileList;
use crate::types::interval::IntervalModel;
use crate::types::media_file::LoadedFile;

/// Status line shown under the player.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusMessage {
    Info(String),
    Error(String),
}

/// Everything the user is working on: the active file, its selection and the list of
/// files opened so far. Play state lives with the playback controller.
#[derive(Debug, Clone)]
pub struct Session {
    pub file: Option<LoadedFile>,
    pub files: FileList,
    pub interval: IntervalModel,
    pub status: Option<StatusMessage>,
}

impl Session {
    pub fn new(min_span: f64) -> Self {
        Session {
            file: None,
            files: FileList::new(),
            interval: IntervalModel::new(min_span),
            status: None,
        }
    }

    /// Makes `path` the active file. On failure nothing changes except the status line.
    pub fn load(&mut self, path: Option<&Path>) -> Result<LoadedFile, ClipError> {
        let file = match LoadedFile::from_path(path) {
            Ok(file) => file,
            Err(e) => {
                self.set_error(&e);
                return Err(e);
            }
        };
        self.status = None;
        self.interval.reset();
        if !self.files.add(&file) {
            tracing::debug!(file = %file.name, "File already listed");
        }
        tracing::info!(file = %file.name, mime = %file.mime_type, "File loaded");
        self.file = Some(file.clone());
        Ok(file)
    }

    /// Drops the active file when the engine cannot open it. Its list entry stays.
    pub fn close_file(&mut self) {
        if let Some(file) = self.file.take() {
            tracing::debug!(file = %file.name, "Active file closed");
        }
        self.interval.reset();
    }

    /// An open file whose duration has not been reported yet.
    pub fn awaiting_duration(&self) -> bool {
        self.file.is_some() && self.interval.duration().known().is_none()
    }

    pub fn set_info(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage::Info(text.into()));
    }

    pub fn set_error(&mut self, error: &ClipError) {
        self.status = Some(StatusMessage::Error(error.user_message()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::interval::{MIN_SPAN_SECS, MediaDuration};

    #[test]
    fn test_load_resets_selection() {
        let mut session = Session::new(MIN_SPAN_SECS);
        session.load(Some(Path::new("/music/a.mp3"))).unwrap();
        session.interval.resolve_duration(200.0);
        session.interval.set_end(120.0);

        session.load(Some(Path::new("/music/b.wav"))).unwrap();
        assert_eq!(session.interval.duration(), MediaDuration::Unknown);
        assert_eq!((session.interval.start(), session.interval.end()), (0.0, 30.0));
        assert_eq!(session.file.as_ref().unwrap().name, "b.wav");
        assert_eq!(session.files.all_items().len(), 2);
    }

    #[test]
    fn test_reload_does_not_duplicate_list_entry() {
        let mut session = Session::new(MIN_SPAN_SECS);
        session.load(Some(Path::new("/music/a.mp3"))).unwrap();
        session.load(Some(Path::new("/music/a.mp3"))).unwrap();
        assert_eq!(session.files.all_items().len(), 1);
    }

    #[test]
    fn test_invalid_input_keeps_state() {
        let mut session = Session::new(MIN_SPAN_SECS);
        session.load(Some(Path::new("/music/a.mp3"))).unwrap();
        session.interval.resolve_duration(200.0);

        assert!(session.load(Some(Path::new("/video/b.mp4"))).is_err());
        assert_eq!(session.file.as_ref().unwrap().name, "a.mp3");
        assert_eq!(session.interval.duration(), MediaDuration::Known(200.0));
        assert_eq!(
            session.status,
            Some(StatusMessage::Error(
                "Invalid file type. Please upload an audio file.".to_string()
            ))
        );

        assert!(session.load(None).is_err());
        assert_eq!(
            session.status,
            Some(StatusMessage::Error("Please select a music file.".to_string()))
        );
    }

    #[test]
    fn test_close_file_stops_waiting_for_duration() {
        let mut session = Session::new(MIN_SPAN_SECS);
        assert!(!session.awaiting_duration());
        session.load(Some(Path::new("/music/broken.flac"))).unwrap();
        assert!(session.awaiting_duration());

        session.close_file();
        assert!(session.file.is_none());
        assert!(!session.awaiting_duration());
        assert_eq!(session.files.all_items().len(), 1);
    }

    #[test]
    fn test_awaiting_duration_ends_once_known() {
        let mut session = Session::new(MIN_SPAN_SECS);
        session.load(Some(Path::new("/music/a.mp3"))).unwrap();
        session.interval.resolve_duration(200.0);
        assert!(!session.awaiting_duration());
    }

    #[test]
    fn test_short_file_end_to_end() {
        let mut session = Session::new(MIN_SPAN_SECS);
        session.load(Some(Path::new("/music/short.ogg"))).unwrap();
        session.interval.resolve_duration(20.0);
        assert_eq!((session.interval.start(), session.interval.end()), (0.0, 20.0));
        session.interval.set_start(5.0);
        session.interval.set_end(20.0);
        assert_eq!((session.interval.start(), session.interval.end()), (0.0, 20.0));
    }
}
