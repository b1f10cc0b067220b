//! Charts module - Dashboard layout, palette and rendering

pub mod layout;
mod palette;
mod renderer;

pub use palette::{Palette, EXTROVERT_COLOR, INTROVERT_COLOR};
pub use renderer::{DashboardRenderer, RenderError};
