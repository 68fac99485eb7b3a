use std::path::PathBuf;

use eframe::egui;

use crate::{
    core::{
        generation,
        Editor,
        ReflinksError,
        Workspace,
    },
    gui::{
        generation_panel,
        media_panel,
        prompt_modal::PromptModal,
        record_panel,
        settings::SettingsData,
        status_bar::StatusBar,
        top_bar,
    },
};

pub struct ReflinksApp {
    pub editor: Editor,
    pub settings: SettingsData,
    pub status: StatusBar,
    pub url_modal: PromptModal,
    pub api_key_modal: PromptModal,
}

impl ReflinksApp {
    pub fn new(cc: &eframe::CreationContext<'_>, mut editor: Editor, settings: SettingsData) -> Self {
        egui_extras::install_image_loaders(&cc.egui_ctx);

        if let Some(model) = &settings.model {
            if generation::MODELS.contains(&model.as_str()) {
                editor.model = model.clone();
            }
        }

        Self {
            editor,
            settings,
            status: StatusBar::default(),
            url_modal: PromptModal::new("Download Logo", "Paste image URL:", false),
            api_key_modal: PromptModal::new("API Key", "Enter your API key:", true),
        }
    }

    /// Media actions invalidate the preview cache on success so the freshly
    /// written file replaces the old texture under the same URI.
    pub fn report_media(&mut self, ctx: &egui::Context, result: Result<String, ReflinksError>) {
        if self.status.report(result) {
            ctx.forget_all_images();
        }
    }

    pub fn change_workspace(&mut self, root: PathBuf) {
        match Workspace::new(&root).and_then(Editor::load) {
            Ok(mut editor) => {
                editor.model = self.editor.model.clone();
                self.editor = editor;
                self.settings.workspace_root = Some(root);
                self.settings.save();
                self.status.set(format!(
                    "Loaded {} records from {}",
                    self.editor.record_count(),
                    self.editor.workspace().csv_path.display()
                ));
            }
            Err(e) => self.status.set(format!("Failed to load catalog: {e}")),
        }
    }
}

impl eframe::App for ReflinksApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        top_bar::show(ctx, self);
        self.status.show(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                record_panel::show(ui, self);
                ui.separator();
                media_panel::show(ui, self);
                ui.separator();
                generation_panel::show(ui, self);
            });
        });

        if let Some(url) = self.url_modal.show(ctx) {
            let result = self.editor.download_logo_from_url(&url);
            self.report_media(ctx, result);
        }
        if let Some(key) = self.api_key_modal.show(ctx) {
            let result = self.editor.set_api_key(key);
            self.status.report(result);
        }
    }
}
