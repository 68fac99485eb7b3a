use std::path::Path;

use eframe::egui;

use crate::{
    core::VerifyField,
    gui::app::ReflinksApp,
};

const LOGO_PREVIEW: f32 = 100.0;
const FAVICON_PREVIEW: f32 = 32.0;

/// Logo and favicon previews with their acquisition actions.
pub fn show(ui: &mut egui::Ui, app: &mut ReflinksApp) {
    if app.editor.current().is_none() {
        return;
    }
    let checks = app.editor.checks();
    let ctx = ui.ctx().clone();

    ui.strong("Logo");
    match app.editor.logo_path() {
        Some(path) => preview(ui, &path, LOGO_PREVIEW),
        None => {
            ui.label("No logo");
        }
    }
    ui.horizontal(|ui| {
        if ui.button("Search Online").clicked() {
            let result = app.editor.search_logo_online();
            app.status.report(result);
        }
        if ui.button("Paste from Clipboard").clicked() {
            let result = app.editor.paste_logo_clipboard();
            app.report_media(&ctx, result);
        }
        if ui.button("Download from URL…").clicked() {
            app.url_modal.open();
        }
        if ui.button("Upload…").clicked() {
            if let Some(path) = pick_image(&["png", "jpg", "jpeg", "bmp"]) {
                let result = app.editor.upload_logo(&path);
                app.report_media(&ctx, result);
            }
        }
        if ui.button("Verify").clicked() {
            let result = app.editor.mark_verified(VerifyField::Logo);
            app.status.report(result);
        }
        if checks.logo {
            ui.label("✔");
        }
    });
    ui.add_space(8.0);

    ui.strong("Favicon");
    if let Some(path) = app.editor.favicon_path() {
        preview(ui, &path, FAVICON_PREVIEW);
    }
    ui.horizontal(|ui| {
        if ui.button("Get Favicon").clicked() {
            let result = app.editor.get_favicon_from_website();
            app.report_media(&ctx, result);
        }
        if ui.button("Paste from Clipboard").clicked() {
            let result = app.editor.paste_favicon_clipboard();
            app.report_media(&ctx, result);
        }
        if ui.button("Upload…").clicked() {
            if let Some(path) = pick_image(&["ico", "png", "jpg", "jpeg", "bmp"]) {
                let result = app.editor.upload_favicon(&path);
                app.report_media(&ctx, result);
            }
        }
        if ui.button("Verify").clicked() {
            let result = app.editor.mark_verified(VerifyField::Favicon);
            app.status.report(result);
        }
        if checks.favicon {
            ui.label("✔");
        }
    });
}

fn preview(ui: &mut egui::Ui, path: &Path, max: f32) {
    let uri = format!("file://{}", path.display());
    ui.add(egui::Image::new(uri).max_size(egui::vec2(max, max)));
}

fn pick_image(extensions: &[&str]) -> Option<std::path::PathBuf> {
    rfd::FileDialog::new().add_filter("Image Files", extensions).pick_file()
}
