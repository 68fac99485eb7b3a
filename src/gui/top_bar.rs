use eframe::egui::{
    self,
    containers,
};

use crate::gui::app::ReflinksApp;

pub fn show(ctx: &egui::Context, app: &mut ReflinksApp) {
    egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
        containers::menu::Bar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Open Workspace…").clicked() {
                    if let Some(root) = rfd::FileDialog::new().pick_folder() {
                        app.change_workspace(root);
                    }
                }
                if ui.button("Quit").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.weak(app.editor.workspace().csv_path.display().to_string());
            });
        });
    });
}
