use std::path::{Path, PathBuf};

use crate::error::ClipError;

/// The audio file currently open for selection and submission.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedFile {
    pub name: String,
    pub mime_type: String,
    pub path: PathBuf,
}

impl LoadedFile {
    /// Validates a picked path and infers its MIME type from the extension.
    pub fn from_path(path: Option<&Path>) -> Result<Self, ClipError> {
        let path = path.ok_or(ClipError::NoFileSelected)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or(ClipError::NoFileSelected)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        let mime_type = mime_for_extension(&ext);
        if !mime_type.starts_with("audio/") {
            return Err(ClipError::NotAudio { mime_type });
        }
        Ok(Self {
            name,
            mime_type,
            path: path.to_path_buf(),
        })
    }

    /// Reads the raw audio bytes.
    pub fn read_bytes(&self) -> Result<Vec<u8>, ClipError> {
        std::fs::read(&self.path).map_err(|source| ClipError::Read {
            file: self.name.clone(),
            source,
        })
    }
}

pub fn mime_for_extension(ext: &str) -> String {
    match ext {
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" | "oga" => "audio/ogg",
        "opus" => "audio/opus",
        "flac" => "audio/flac",
        "m4a" => "audio/mp4",
        "aac" => "audio/aac",
        "weba" | "webm" => "audio/webm",
        "mp4" | "m4v" => "video/mp4",
        "mov" => "video/quicktime",
        "mkv" => "video/x-matroska",
        _ => "application/octet-stream",
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_path_infers_audio_mime() {
        let file = LoadedFile::from_path(Some(Path::new("/music/song.MP3"))).unwrap();
        assert_eq!(file.name, "song.MP3");
        assert_eq!(file.mime_type, "audio/mpeg");
    }

    #[test]
    fn test_from_path_without_file() {
        let err = LoadedFile::from_path(None).unwrap_err();
        assert!(matches!(err, ClipError::NoFileSelected));
    }

    #[test]
    fn test_from_path_accepts_webm() {
        let file = LoadedFile::from_path(Some(Path::new("/music/track.webm"))).unwrap();
        assert_eq!(file.mime_type, "audio/webm");
    }

    #[test]
    fn test_from_path_rejects_video() {
        let err = LoadedFile::from_path(Some(Path::new("clip.mp4"))).unwrap_err();
        assert!(matches!(err, ClipError::NotAudio { ref mime_type } if mime_type == "video/mp4"));
    }

    #[test]
    fn test_from_path_rejects_unknown_extension() {
        let err = LoadedFile::from_path(Some(Path::new("notes.txt"))).unwrap_err();
        assert!(matches!(err, ClipError::NotAudio { .. }));
    }

    #[test]
    fn test_read_bytes() {
        let mut tmp = tempfile::Builder::new().suffix(".wav").tempfile().unwrap();
        tmp.write_all(b"RIFF0000WAVE").unwrap();
        let file = LoadedFile::from_path(Some(tmp.path())).unwrap();
        assert_eq!(file.read_bytes().unwrap(), b"RIFF0000WAVE");
    }

    #[test]
    fn test_read_bytes_missing_file() {
        let file = LoadedFile::from_path(Some(Path::new("/definitely/missing/track.flac"))).unwrap();
        let err = file.read_bytes().unwrap_err();
        assert!(matches!(err, ClipError::Read { .. }));
    }
}
