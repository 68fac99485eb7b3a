use std::path::PathBuf;

use eframe::egui;
use reflinks::{
    core::{
        Editor,
        Workspace,
    },
    gui::{
        settings::SettingsData,
        ReflinksApp,
    },
};

fn main() -> eframe::Result {
    let settings = SettingsData::load();

    // Workspace root: CLI argument, then the remembered root, then cwd.
    let root = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| settings.workspace_root.clone())
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    // An unreadable store is fatal; nothing is shown past this dialog.
    let editor = match Workspace::new(&root).and_then(Editor::load) {
        Ok(editor) => editor,
        Err(e) => {
            let message = format!(
                "Could not read input CSV at {}: {e}",
                root.join("public").join("ref_links.csv").display()
            );
            eprintln!("{message}");
            rfd::MessageDialog::new()
                .set_level(rfd::MessageLevel::Error)
                .set_title("Ref Links Curator")
                .set_description(message)
                .show();
            std::process::exit(1);
        }
    };
    println!(
        "Loaded {} records from {}",
        editor.record_count(),
        editor.workspace().csv_path.display()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 650.0])
            .with_min_inner_size([760.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Ref Links Curator",
        options,
        Box::new(move |cc| Ok(Box::new(ReflinksApp::new(cc, editor, settings)))),
    )
}
