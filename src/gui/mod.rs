//! GUI module - native window presenting the rendered dashboard

mod app;

pub use app::{show, to_color_image, DashboardApp, ViewerError};
