pub mod app;
pub mod file_list;
pub mod seek_bar;
