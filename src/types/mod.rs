pub mod file_list;
pub mod interval;
pub mod media_file;
pub mod playback_state;
pub mod session;
pub mod time_math;
