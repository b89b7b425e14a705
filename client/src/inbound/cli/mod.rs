//! Console front end: configuration and text rendering.

mod render;
mod settings;

pub use render::{field_label, render_field_reports, render_page, render_product};
pub use settings::{ConsoleSettings, SettingsError};
