pub mod clip_submit;
pub mod marker_drag;
pub mod playback;
