use crate::types::interval::IntervalModel;
use crate::types::time_math::{fraction_to_seconds, pointer_fraction};

/// One of the two interval markers on the seek bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    Start,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    DraggingStart,
    DraggingEnd,
}

/// Horizontal extent of the seek-bar track, in pointer coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackBounds {
    pub left: f32,
    pub width: f32,
}

/// Marker under `pointer_x`, given marker centers and the grab reach on either side.
/// When both markers are in reach the nearer one wins, and `End` wins a tie.
pub fn handle_at(pointer_x: f32, start_x: f32, end_x: f32, reach: f32) -> Option<Handle> {
    let to_start = (pointer_x - start_x).abs();
    let to_end = (pointer_x - end_x).abs();
    match (to_start <= reach, to_end <= reach) {
        (true, true) if to_start < to_end => Some(Handle::Start),
        (_, true) => Some(Handle::End),
        (true, false) => Some(Handle::Start),
        (false, false) => None,
    }
}

/// Turns pointer down/move/up into interval edits. While a drag is active it is the only
/// writer of the interval.
#[derive(Debug, Default)]
pub struct MarkerDragController {
    state: DragState,
}

impl MarkerDragController {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state != DragState::Idle
    }

    pub fn active_handle(&self) -> Option<Handle> {
        match self.state {
            DragState::Idle => None,
            DragState::DraggingStart => Some(Handle::Start),
            DragState::DraggingEnd => Some(Handle::End),
        }
    }

    /// Starts dragging `handle`. Ignored while another drag is active.
    pub fn pointer_down(&mut self, handle: Handle) -> bool {
        if self.is_dragging() {
            tracing::debug!(?handle, active = ?self.state, "Ignoring pointer-down during drag");
            return false;
        }
        self.state = match handle {
            Handle::Start => DragState::DraggingStart,
            Handle::End => DragState::DraggingEnd,
        };
        true
    }

    /// Moves the active marker to the pointer. Returns whether the interval changed.
    pub fn pointer_move(
        &mut self,
        pointer_x: f32,
        track: TrackBounds,
        interval: &mut IntervalModel,
    ) -> bool {
        let Some(handle) = self.active_handle() else {
            return false;
        };
        let Some(duration) = interval.duration().known() else {
            return false;
        };
        let position = pointer_fraction(pointer_x, track.left, track.width);
        let time = fraction_to_seconds(position, duration);
        let changed = match handle {
            Handle::Start => interval.set_start(time),
            Handle::End => interval.set_end(time),
        };
        if changed {
            tracing::trace!(
                start = interval.start(),
                end = interval.end(),
                "Interval dragged"
            );
        }
        changed
    }

    /// Ends any drag, wherever the pointer was released.
    pub fn pointer_up(&mut self) {
        if self.is_dragging() {
            tracing::debug!(state = ?self.state, "Drag released");
        }
        self.state = DragState::Idle;
    }
}
