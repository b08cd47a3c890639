pub mod gst_player;
pub mod media_engine;
