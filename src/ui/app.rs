use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use eframe::egui;

use crate::config::Config;
use crate::ops::clip_submit::{ClipSubmitter, SubmitState, Transport, success_message};
use crate::ops::marker_drag::MarkerDragController;
use crate::ops::playback::PlaybackController;
use crate::renderer::gst_player::GstPlayer;
use crate::types::session::{Session, StatusMessage};
use crate::ui::file_list::{FileListAction, file_list_panel};
use crate::ui::seek_bar::SeekBar;

const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg", "oga", "opus", "flac", "m4a", "aac", "weba", "webm"];

pub struct AppState {
    pub session: Session,
    pub playback: PlaybackController<GstPlayer>,
    pub drag: MarkerDragController,
    pub submitter: ClipSubmitter,
    pub tick: Duration,
}

impl AppState {
    pub fn new(config: &Config, player: GstPlayer, transport: Arc<dyn Transport>) -> Self {
        Self {
            session: Session::new(config.min_span_secs),
            playback: PlaybackController::new(player),
            drag: MarkerDragController::new(),
            submitter: ClipSubmitter::new(config.endpoint.clone(), transport),
            tick: Duration::from_millis(config.tick_interval_ms),
        }
    }
}

pub struct GenreClipApp {
    pub state: AppState,
}

impl GenreClipApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Validates and opens `path`, replacing the current file on success.
    pub fn open_file(&mut self, path: Option<PathBuf>) {
        let state = &mut self.state;
        let file = match state.session.load(path.as_deref()) {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!(error = %e, "File rejected");
                return;
            }
        };
        state.drag.pointer_up();
        if let Err(e) = state.playback.open(&file.path) {
            tracing::error!(error = %e, file = %file.name, "Failed to open media");
            state.session.close_file();
            state.session.status = Some(StatusMessage::Error(format!(
                "Could not play {}.",
                file.name
            )));
        }
    }

    fn pick_file(&mut self) {
        let picked = rfd::FileDialog::new()
            .add_filter("Audio", AUDIO_EXTENSIONS)
            .pick_file();
        // A cancelled dialog leaves the current file in place.
        if picked.is_some() {
            self.open_file(picked);
        }
    }

    fn toggle_playback(&mut self) {
        let state = &mut self.state;
        if state.session.file.is_none() {
            state.session.status = Some(StatusMessage::Error("Please select a music file.".to_string()));
            return;
        }
        if let Err(e) = state.playback.toggle_play_pause(&mut state.session.interval) {
            tracing::error!(error = %e, "Playback toggle failed");
            state.session.status = Some(StatusMessage::Error("Playback failed.".to_string()));
        }
    }

    fn submit_clip(&mut self) {
        let state = &mut self.state;
        match state
            .submitter
            .submit(state.session.file.as_ref(), &state.session.interval)
        {
            Ok(()) => state.session.set_info("Classifying…"),
            Err(e) => {
                tracing::warn!(error = %e, "Submission not started");
                state.session.set_error(&e);
            }
        }
    }

    fn poll_background(&mut self) {
        let state = &mut self.state;
        if let Err(e) = state.playback.poll(&mut state.session.interval) {
            tracing::error!(error = %e, "Media engine error");
            state.session.status = Some(StatusMessage::Error("Playback failed.".to_string()));
        }

        for update in state.submitter.poll() {
            match update {
                SubmitState::Success { label, .. } => {
                    state.session.set_info(success_message(&label));
                }
                SubmitState::Failed { message, .. } => {
                    state.session.status = Some(StatusMessage::Error(message));
                }
                SubmitState::Reading { .. } | SubmitState::Requesting { .. } | SubmitState::Idle => {}
            }
        }
    }
}

impl eframe::App for GenreClipApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_background();

        // Keep ticking while the engine or a submission can produce updates.
        if self.state.playback.is_playing()
            || self.state.submitter.is_busy()
            || self.state.session.awaiting_duration()
        {
            ctx.request_repaint_after(self.state.tick);
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Add File").clicked() {
                    self.pick_file();
                }
            });
        });

        egui::SidePanel::left("file_list_panel").show(ctx, |ui| {
            let active = self.state.session.file.as_ref().map(|f| f.name.clone());
            match file_list_panel(ui, &self.state.session.files, active.as_deref()) {
                Some(FileListAction::Reopen(path)) => self.open_file(Some(path)),
                Some(FileListAction::Classify) => self.submit_clip(),
                None => {}
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(name) = self.state.session.file.as_ref().map(|f| f.name.clone()) else {
                ui.vertical_centered(|ui| {
                    ui.add_space(40.0);
                    ui.label("Add an audio file to select a clip.");
                });
                show_status(ui, &self.state.session.status);
                return;
            };

            ui.heading(name.as_str());
            ui.add_space(8.0);

            let current_time = self.state.playback.state().last_time;
            let state = &mut self.state;
            SeekBar::new(&mut state.session.interval, &mut state.drag, current_time).show(ui);

            ui.horizontal(|ui| {
                if ui.button(self.state.playback.state().button_label()).clicked() {
                    self.toggle_playback();
                }
                ui.label(self.state.playback.time_display(&self.state.session.interval));
                ui.separator();
                ui.label(self.state.playback.interval_display(&self.state.session.interval));
            });

            ui.add_space(8.0);
            let busy = self.state.submitter.state_of(&name) != SubmitState::Idle;
            if ui
                .add_enabled(!busy, egui::Button::new("Classify clip"))
                .clicked()
            {
                self.submit_clip();
            }
            if busy {
                ui.spinner();
            }

            show_status(ui, &self.state.session.status);
        });
    }
}

fn show_status(ui: &mut egui::Ui, status: &Option<StatusMessage>) {
    match status {
        Some(StatusMessage::Info(text)) => {
            ui.label(text.as_str());
        }
        Some(StatusMessage::Error(text)) => {
            ui.colored_label(egui::Color32::from_rgb(230, 90, 90), text.as_str());
        }
        None => {}
    }
}
