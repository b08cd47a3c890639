use eframe::egui;

use crate::ops::marker_drag::{MarkerDragController, TrackBounds, handle_at};
use crate::types::interval::IntervalModel;
use crate::types::time_math::percent_of;

const BAR_HEIGHT: f32 = 36.0;
const TRACK_HEIGHT: f32 = 8.0;
const TRACK_MARGIN: f32 = 8.0;
const HANDLE_SIZE: egui::Vec2 = egui::vec2(8.0, 24.0);
const GRAB_SLACK: f32 = 4.0;

/// Seek bar with start/end markers and the selected region. Drawing is a projection of
/// the interval; pointer input is routed through the drag controller.
pub struct SeekBar<'a> {
    interval: &'a mut IntervalModel,
    drag: &'a mut MarkerDragController,
    current_time: f64,
}

impl<'a> SeekBar<'a> {
    pub fn new(
        interval: &'a mut IntervalModel,
        drag: &'a mut MarkerDragController,
        current_time: f64,
    ) -> Self {
        Self {
            interval,
            drag,
            current_time,
        }
    }

    /// Draws the bar and applies this frame's pointer input. Returns whether the interval changed.
    pub fn show(self, ui: &mut egui::Ui) -> bool {
        let (rect, _) = ui.allocate_exact_size(
            egui::vec2(ui.available_width(), BAR_HEIGHT),
            egui::Sense::hover(),
        );
        let track = egui::Rect::from_min_max(
            egui::pos2(rect.left() + TRACK_MARGIN, rect.center().y - TRACK_HEIGHT / 2.0),
            egui::pos2(rect.right() - TRACK_MARGIN, rect.center().y + TRACK_HEIGHT / 2.0),
        );
        let painter = ui.painter_at(rect);
        painter.rect_filled(track, 3.0, ui.visuals().extreme_bg_color);

        // Markers need a known duration; until then only the empty track is drawn.
        let (Some(layout), Some(duration)) =
            (self.interval.layout(), self.interval.duration().known())
        else {
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "Loading audio…",
                egui::FontId::proportional(11.0),
                egui::Color32::GRAY,
            );
            self.drag.pointer_up();
            return false;
        };

        let x_at = |percent: f64| track.left() + track.width() * (percent / 100.0) as f32;

        let region = egui::Rect::from_min_max(
            egui::pos2(x_at(layout.progress_left()), track.top()),
            egui::pos2(
                x_at(layout.progress_left() + layout.progress_width()),
                track.bottom(),
            ),
        );
        painter.rect_filled(region, 3.0, egui::Color32::from_rgb(100, 180, 255));

        let playhead_x = x_at(percent_of(self.current_time, duration).clamp(0.0, 100.0));
        painter.line_segment(
            [
                egui::pos2(playhead_x, rect.top() + 4.0),
                egui::pos2(playhead_x, rect.bottom() - 4.0),
            ],
            egui::Stroke::new(2.0, egui::Color32::RED),
        );

        let start_handle =
            egui::Rect::from_center_size(egui::pos2(x_at(layout.start_percent), track.center().y), HANDLE_SIZE);
        let end_handle =
            egui::Rect::from_center_size(egui::pos2(x_at(layout.end_percent), track.center().y), HANDLE_SIZE);
        painter.rect_filled(start_handle, 2.0, egui::Color32::from_rgb(80, 200, 120));
        painter.rect_filled(end_handle, 2.0, egui::Color32::from_rgb(240, 160, 60));

        let (pressed, released, pointer) = ui.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.any_released(),
                i.pointer.latest_pos(),
            )
        });

        if pressed {
            if let Some(pos) = pointer {
                let on_bar = (pos.y - track.center().y).abs() <= HANDLE_SIZE.y / 2.0 + GRAB_SLACK;
                let reach = HANDLE_SIZE.x / 2.0 + GRAB_SLACK;
                if let Some(handle) = on_bar
                    .then(|| handle_at(pos.x, start_handle.center().x, end_handle.center().x, reach))
                    .flatten()
                {
                    self.drag.pointer_down(handle);
                }
            }
        }

        let mut changed = false;
        if self.drag.is_dragging() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeHorizontal);
            if let Some(pos) = pointer {
                let bounds = TrackBounds {
                    left: track.left(),
                    width: track.width(),
                };
                changed = self.drag.pointer_move(pos.x, bounds, self.interval);
            }
        }

        // Released anywhere, including outside the bar.
        if released {
            self.drag.pointer_up();
        }
        changed
    }
}
