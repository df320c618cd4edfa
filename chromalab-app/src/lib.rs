pub mod app_dir;
pub mod canvas;
pub mod converter;
pub mod file_picker;
pub mod logging;
pub mod settings;
pub mod viewer;

mod ui;
