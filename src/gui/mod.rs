pub mod app;
pub mod generation_panel;
pub mod media_panel;
pub mod prompt_modal;
pub mod record_panel;
pub mod settings;
pub mod status_bar;
pub mod top_bar;

pub use app::ReflinksApp;
