//! egui widgets shared by the two front ends.

pub(crate) mod error_dialog;
pub(crate) mod fields;
pub(crate) mod palette_grid;
mod viewer_canvas;
mod viewer_controls;
