use eframe::egui;
use std::path::PathBuf;

use crate::types::file_list::FileList;

pub enum FileListAction {
    Reopen(PathBuf),
    Classify,
}

/// Files opened this run. The active entry carries the classify button.
pub fn file_list_panel(
    ui: &mut egui::Ui,
    files: &FileList,
    active: Option<&str>,
) -> Option<FileListAction> {
    let mut action = None;
    ui.vertical(|ui| {
        ui.heading("Loaded Files");
        ui.separator();

        if files.all_items().is_empty() {
            ui.label("No files loaded");
            return;
        }

        for file in files.all_items() {
            let is_active = active == Some(file.name.as_str());
            ui.horizontal(|ui| {
                ui.label("🎵");
                let name = egui::RichText::new(&file.name).size(12.0);
                let name = if is_active { name.strong() } else { name.color(egui::Color32::GRAY) };
                if ui.selectable_label(is_active, name).clicked() && !is_active {
                    action = Some(FileListAction::Reopen(file.path.clone()));
                }
                if is_active && ui.button("Next").clicked() {
                    action = Some(FileListAction::Classify);
                }
            });
        }
    });
    action
}
