use eframe::egui;

/// Centered single-line input window, the modal equivalent of a blocking
/// "enter a value" prompt. Returns the entered text once, on confirm.
pub struct PromptModal {
    open: bool,
    title: String,
    label: String,
    password: bool,
    value: String,
}

impl PromptModal {
    pub fn new(title: impl Into<String>, label: impl Into<String>, password: bool) -> Self {
        Self {
            open: false,
            title: title.into(),
            label: label.into(),
            password,
            value: String::new(),
        }
    }

    pub fn open(&mut self) {
        self.open = true;
        self.value.clear();
    }

    pub fn show(&mut self, ctx: &egui::Context) -> Option<String> {
        if !self.open {
            return None;
        }

        let mut submitted = None;
        let mut stay_open = true;

        egui::Window::new(&self.title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(&self.label);
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.value)
                        .desired_width(320.0)
                        .password(self.password),
                );
                let entered =
                    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("OK").clicked() || entered {
                        submitted = Some(self.value.trim().to_string());
                        stay_open = false;
                    }
                    if ui.button("Cancel").clicked() {
                        stay_open = false;
                    }
                });
            });

        self.open = stay_open;
        submitted.filter(|value| !value.is_empty())
    }
}
