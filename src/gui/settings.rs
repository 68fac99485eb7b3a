use std::{
    fs,
    path::PathBuf,
};

/// Persisted preferences, one JSON file in the platform data dir.
/// Deliberately small: the API key and all verification flags are
/// session-only and never written to disk.
#[derive(Default, Clone, serde::Serialize, serde::Deserialize)]
pub struct SettingsData {
    pub model: Option<String>,
    pub workspace_root: Option<PathBuf>,
}

impl SettingsData {
    fn file_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|dir| dir.join("reflinks").join("settings.json"))
    }

    /// Missing or unparseable settings fall back to defaults; a stale file
    /// is never worth blocking startup over.
    pub fn load() -> Self {
        let Some(path) = Self::file_path() else {
            return Self::default();
        };
        let Ok(json) = fs::read_to_string(&path) else {
            return Self::default();
        };
        match serde_json::from_str(&json) {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("Ignoring malformed settings at {}: {e}", path.display());
                Self::default()
            }
        }
    }

    pub fn save(&self) {
        if let Err(e) = self.try_save() {
            eprintln!("Failed to save settings: {e}");
        }
    }

    fn try_save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let path = Self::file_path().ok_or("no platform data directory")?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
