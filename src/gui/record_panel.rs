use eframe::egui;

use crate::{
    core::VerifyField,
    gui::app::ReflinksApp,
};

/// Header, navigation, the read-only record fields, and the two editable
/// URLs with their visit/verify actions.
pub fn show(ui: &mut egui::Ui, app: &mut ReflinksApp) {
    let Some(record) = app.editor.current().cloned() else {
        ui.label("No records loaded.");
        return;
    };

    ui.horizontal(|ui| {
        ui.strong(format!("Row {} of {}", app.editor.cursor() + 1, app.editor.record_count()));
        ui.separator();
        if ui.button("Save to CSV").clicked() {
            let result = app.editor.save_current();
            app.status.report_with("Failed to save", result);
        }
        if ui.button("Previous").clicked() {
            app.editor.previous();
        }
        if ui.button("Next").clicked() {
            app.editor.next();
        }
    });
    ui.add_space(6.0);

    egui::Grid::new("record_info").num_columns(2).spacing([12.0, 4.0]).show(ui, |ui| {
        ui.label("Category:");
        ui.label(&record.category);
        ui.end_row();
        ui.label("Platform Name:");
        ui.strong(&record.platform_name);
        ui.end_row();
        ui.label("Notes:");
        ui.label(&record.notes);
        ui.end_row();
        ui.label("Status:");
        ui.label(&record.status);
        ui.end_row();
    });
    ui.add_space(6.0);

    let checks = app.editor.checks();

    ui.horizontal(|ui| {
        ui.label("Official Website:");
        ui.add(
            egui::TextEdit::singleline(&mut app.editor.draft.website)
                .desired_width(300.0)
                .hint_text("Official Website"),
        );
        if ui.button("Visit").clicked() {
            let result = app.editor.open_website();
            app.status.report(result);
        }
        if ui.button("Verify").clicked() {
            let result = app.editor.mark_verified(VerifyField::Website);
            app.status.report(result);
        }
        if checks.website {
            ui.label("✔");
        }
    });

    ui.horizontal(|ui| {
        ui.label("Referral Link:");
        ui.add(
            egui::TextEdit::singleline(&mut app.editor.draft.referral)
                .desired_width(300.0)
                .hint_text("Referral Link"),
        );
        if ui.button("Visit").clicked() {
            let result = app.editor.open_referral();
            app.status.report(result);
        }
        if ui.button("Verify").clicked() {
            let result = app.editor.mark_verified(VerifyField::Referral);
            app.status.report(result);
        }
        if checks.referral {
            ui.label("✔");
        }
    });
}
