use eframe::egui;

use crate::{
    core::{
        generation,
        GenerationKind,
        VerifyField,
    },
    gui::app::ReflinksApp,
};

/// The three generated text fields, the shared custom prompt, and the
/// credential/model row.
pub fn show(ui: &mut egui::Ui, app: &mut ReflinksApp) {
    if app.editor.current().is_none() {
        return;
    }
    let checks = app.editor.checks();

    ui.horizontal(|ui| {
        ui.label("Description:");
        ui.add(
            egui::TextEdit::multiline(&mut app.editor.draft.description)
                .desired_rows(2)
                .desired_width(420.0)
                .hint_text("Short 1-2 sentence description"),
        );
        if ui.button("Generate").clicked() {
            let result = app.editor.generate(GenerationKind::Description);
            app.status.report_with("Generation error", result);
        }
        if ui.button("Verify").clicked() {
            let result = app.editor.mark_verified(VerifyField::Description);
            app.status.report(result);
        }
        if checks.description {
            ui.label("✔");
        }
    });

    ui.horizontal(|ui| {
        ui.label("Features:");
        ui.add(
            egui::TextEdit::singleline(&mut app.editor.draft.features)
                .desired_width(420.0)
                .hint_text("Key features (comma separated)"),
        );
        if ui.button("Generate").clicked() {
            let result = app.editor.generate(GenerationKind::Features);
            app.status.report_with("Generation error", result);
        }
        if ui.button("Verify").clicked() {
            let result = app.editor.mark_verified(VerifyField::Features);
            app.status.report(result);
        }
        if checks.features {
            ui.label("✔");
        }
    });

    ui.horizontal(|ui| {
        ui.label("Capsules:");
        ui.add(
            egui::TextEdit::singleline(&mut app.editor.draft.capsules)
                .desired_width(420.0)
                .hint_text("Capsules (comma separated, up to 3)"),
        );
        if ui.button("Generate").clicked() {
            let result = app.editor.generate(GenerationKind::Capsules);
            app.status.report_with("Generation error", result);
        }
        if ui.button("Verify").clicked() {
            let result = app.editor.mark_verified(VerifyField::Capsules);
            app.status.report(result);
        }
        if checks.capsules {
            ui.label("✔");
        }
    });

    ui.horizontal(|ui| {
        ui.label("Custom prompt:");
        ui.add(
            egui::TextEdit::singleline(&mut app.editor.custom_prompt)
                .desired_width(420.0)
                .hint_text("Custom prompt (optional)"),
        );
    });
    ui.add_space(6.0);

    ui.horizontal(|ui| {
        if ui.button("Set API Key…").clicked() {
            app.api_key_modal.open();
        }
        if app.editor.has_api_key() {
            ui.weak("key set");
        }
        ui.label("Model:");
        egui::ComboBox::from_id_salt("model_select")
            .selected_text(app.editor.model.clone())
            .show_ui(ui, |ui| {
                for model in generation::MODELS {
                    if ui
                        .selectable_value(&mut app.editor.model, model.to_string(), model)
                        .clicked()
                    {
                        app.settings.model = Some(app.editor.model.clone());
                        app.settings.save();
                    }
                }
            });
    });
}
