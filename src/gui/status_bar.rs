use eframe::egui;

use crate::core::ReflinksError;

/// Single status line at the bottom of the window. Every action outcome,
/// success or recoverable failure, lands here as a short message.
#[derive(Default)]
pub struct StatusBar {
    message: String,
}

impl StatusBar {
    pub fn set(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    /// Shows the action's status string or its error. Returns whether the
    /// action succeeded so callers can follow up (e.g. refresh previews).
    pub fn report(&mut self, result: Result<String, ReflinksError>) -> bool {
        match result {
            Ok(message) => {
                self.message = message;
                true
            }
            Err(e) => {
                self.message = e.to_string();
                false
            }
        }
    }

    pub fn report_with(&mut self, prefix: &str, result: Result<String, ReflinksError>) -> bool {
        match result {
            Ok(message) => {
                self.message = message;
                true
            }
            Err(e) => {
                self.message = format!("{prefix}: {e}");
                false
            }
        }
    }

    pub fn show(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.message);
            });
        });
    }
}
