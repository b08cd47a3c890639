use std::path::Path;

use gst::prelude::*;
use gstreamer as gst;

use crate::error::EngineError;
use crate::renderer::media_engine::{EngineEvent, MediaEngine};

// Helper function to convert a path to a file URI for GStreamer
#[cfg(windows)]
fn path_to_file_uri(path: &str) -> String {
    let mut path = path.replace('\\', "/");
    if let Some(stripped) = path.strip_prefix("//?/") {
        path = stripped.to_string();
    }
    format!("file:///{}", path)
}

#[cfg(not(windows))]
fn path_to_file_uri(path: &str) -> String {
    format!("file://{}", path)
}

fn clock_to_secs(time: gst::ClockTime) -> f64 {
    time.nseconds() as f64 / 1_000_000_000.0
}

/// Audio playback through a `playbin` pipeline. Video output is discarded.
pub struct GstPlayer {
    playbin: Option<gst::Element>,
    duration_reported: bool,
    playing: bool,
}

impl GstPlayer {
    pub fn new() -> Result<Self, EngineError> {
        gst::init().map_err(|e| EngineError::Init(e.to_string()))?;
        Ok(Self {
            playbin: None,
            duration_reported: false,
            playing: false,
        })
    }

    fn playbin(&self) -> Result<&gst::Element, EngineError> {
        self.playbin
            .as_ref()
            .ok_or_else(|| EngineError::Stream("no media loaded".to_string()))
    }

    fn set_state(&self, state: gst::State) -> Result<(), EngineError> {
        self.playbin()?
            .set_state(state)
            .map(|_| ())
            .map_err(|e| EngineError::StateChange(format!("{:?}: {}", state, e)))
    }

    fn shutdown(&mut self) {
        if let Some(playbin) = self.playbin.take() {
            playbin.set_state(gst::State::Null).ok();
        }
        self.duration_reported = false;
        self.playing = false;
    }
}

impl MediaEngine for GstPlayer {
    fn open(&mut self, path: &Path) -> Result<(), EngineError> {
        self.shutdown();

        let abs_path =
            std::fs::canonicalize(path).map_err(|e| EngineError::Pipeline(e.to_string()))?;
        let uri = path_to_file_uri(&abs_path.to_string_lossy());

        let playbin = gst::ElementFactory::make("playbin")
            .name("genreclip-player")
            .build()
            .map_err(|e| EngineError::Pipeline(e.to_string()))?;
        playbin.set_property("uri", uri.as_str());
        match gst::ElementFactory::make("fakesink").build() {
            Ok(sink) => playbin.set_property("video-sink", &sink),
            Err(e) => tracing::warn!(error = %e, "No fakesink available, video output kept"),
        }

        tracing::info!(uri = %uri, "Opening media");
        self.playbin = Some(playbin);
        self.set_state(gst::State::Paused)
    }

    fn duration(&self) -> Option<f64> {
        self.playbin
            .as_ref()?
            .query_duration::<gst::ClockTime>()
            .map(clock_to_secs)
    }

    fn current_time(&self) -> f64 {
        self.playbin
            .as_ref()
            .and_then(|p| p.query_position::<gst::ClockTime>())
            .map(clock_to_secs)
            .unwrap_or(0.0)
    }

    fn seek(&mut self, time: f64) -> Result<(), EngineError> {
        let target = gst::ClockTime::from_nseconds((time.max(0.0) * 1_000_000_000.0) as u64);
        self.playbin()?
            .seek_simple(gst::SeekFlags::FLUSH | gst::SeekFlags::ACCURATE, target)
            .map_err(|e| EngineError::Seek {
                time,
                reason: e.to_string(),
            })
    }

    fn play(&mut self) -> Result<(), EngineError> {
        self.set_state(gst::State::Playing)?;
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) -> Result<(), EngineError> {
        self.set_state(gst::State::Paused)?;
        self.playing = false;
        Ok(())
    }

    fn poll_events(&mut self) -> Vec<EngineEvent> {
        let mut events = Vec::new();
        let Some(bus) = self.playbin.as_ref().and_then(|p| p.bus()) else {
            return events;
        };

        while let Some(msg) = bus.pop() {
            use gst::MessageView;
            match msg.view() {
                MessageView::Eos(..) => {
                    self.playing = false;
                    events.push(EngineEvent::EndOfStream);
                }
                MessageView::Error(err) => {
                    self.playing = false;
                    events.push(EngineEvent::Error(format!(
                        "{} ({:?})",
                        err.error(),
                        err.debug()
                    )));
                }
                _ => (),
            }
        }

        if !self.duration_reported {
            if let Some(duration) = self.duration().filter(|d| *d > 0.0) {
                self.duration_reported = true;
                events.push(EngineEvent::DurationKnown(duration));
            }
        }

        if self.playing {
            events.push(EngineEvent::TimeUpdate(self.current_time()));
        }
        events
    }
}

impl Drop for GstPlayer {
    fn drop(&mut self) {
        self.shutdown();
    }
}
