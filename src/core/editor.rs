use std::{
    fs,
    path::{
        Path,
        PathBuf,
    },
};

use crate::core::{
    catalog::{
        self,
        RecordEdits,
    },
    favicon,
    generation::{
        self,
        GenerationKind,
    },
    media,
    textclean,
    Record,
    ReflinksError,
    Workspace,
};

/// In-session verification state for one record. Flipping a flag performs no
/// content validation; it only records that a human looked.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldChecks {
    pub website: bool,
    pub referral: bool,
    pub logo: bool,
    pub description: bool,
    pub features: bool,
    pub capsules: bool,
    pub favicon: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyField {
    Website,
    Referral,
    Logo,
    Description,
    Features,
    Capsules,
    Favicon,
}

impl VerifyField {
    pub fn label(&self) -> &'static str {
        match self {
            VerifyField::Website => "website",
            VerifyField::Referral => "referral link",
            VerifyField::Logo => "logo",
            VerifyField::Description => "description",
            VerifyField::Features => "features",
            VerifyField::Capsules => "capsules",
            VerifyField::Favicon => "favicon",
        }
    }
}

/// Working copies of the editable fields for the record under the cursor,
/// reseeded on every navigation. List fields are edited as comma-joined text.
#[derive(Debug, Clone, Default)]
pub struct Draft {
    pub website: String,
    pub referral: String,
    pub description: String,
    pub features: String,
    pub capsules: String,
}

/// The record editor: in-memory catalog, cursor, session flags, and every
/// user-triggerable operation. Owns no UI; each operation returns a short
/// status string or an error the UI surfaces verbatim. All operations run
/// synchronously on the caller's thread.
pub struct Editor {
    workspace: Workspace,
    records: Vec<Record>,
    cursor: usize,
    api_key: String,
    pub model: String,
    pub custom_prompt: String,
    pub draft: Draft,
    verified: Vec<FieldChecks>,
    website_verified: Vec<bool>,
    // Logo file chosen this session, re-resolved from the store on every
    // navigation (an unsaved choice does not survive leaving the record).
    logo_paths: Vec<Option<PathBuf>>,
}

impl Editor {
    /// Parses the store once. An unreadable store is the caller's fatal case;
    /// nothing here is recoverable.
    pub fn load(workspace: Workspace) -> Result<Self, ReflinksError> {
        let records = catalog::load_records(&workspace.csv_path)?;
        let count = records.len();
        let mut editor = Editor {
            workspace,
            records,
            cursor: 0,
            api_key: String::new(),
            model: generation::DEFAULT_MODEL.to_string(),
            custom_prompt: String::new(),
            draft: Draft::default(),
            verified: vec![FieldChecks::default(); count],
            website_verified: vec![false; count],
            logo_paths: vec![None; count],
        };
        editor.enter_record();
        Ok(editor)
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> Option<&Record> {
        self.records.get(self.cursor)
    }

    pub fn checks(&self) -> FieldChecks {
        self.verified.get(self.cursor).copied().unwrap_or_default()
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Logo to display for the current record, if any exists on disk.
    pub fn logo_path(&self) -> Option<PathBuf> {
        self.logo_paths.get(self.cursor)?.clone().filter(|path| path.exists())
    }

    /// Favicon to display, resolved from the stored filename.
    pub fn favicon_path(&self) -> Option<PathBuf> {
        self.current().and_then(|record| self.workspace.resolve_favicon(&record.favicon_filename))
    }

    // Reseeds draft and logo resolution for the record under the cursor.
    fn enter_record(&mut self) {
        if let Some(record) = self.records.get(self.cursor) {
            self.draft = Draft {
                website: record.official_website.clone(),
                referral: record.referral_link.clone(),
                description: record.description.clone(),
                features: record.features_text(),
                capsules: record.capsules_text(),
            };
            self.logo_paths[self.cursor] = self.workspace.resolve_logo(&record.logo_filename);
        }
    }

    pub fn next(&mut self) {
        if self.cursor + 1 < self.records.len() {
            self.cursor += 1;
            self.enter_record();
        }
    }

    pub fn previous(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.enter_record();
        }
    }

    fn current_or_err(&self) -> Result<&Record, ReflinksError> {
        self.current().ok_or_else(|| ReflinksError::Custom("No records loaded.".to_string()))
    }

    pub fn search_logo_online(&self) -> Result<String, ReflinksError> {
        let record = self.current_or_err()?;
        let query = format!("{} logo", record.platform_name);
        let url = format!("https://www.google.com/search?tbm=isch&q={}", query.replace(' ', "+"));
        open_in_browser(&url)?;
        Ok(format!("Opened image search for {}", record.platform_name))
    }

    pub fn open_website(&self) -> Result<String, ReflinksError> {
        let url = self.draft.website.trim();
        if url.is_empty() {
            return Err(ReflinksError::Custom("No official website URL found.".to_string()));
        }
        open_in_browser(url)?;
        Ok(format!("Opened {url}"))
    }

    pub fn open_referral(&self) -> Result<String, ReflinksError> {
        let url = self.draft.referral.trim();
        if url.is_empty() {
            return Err(ReflinksError::Custom("No referral link found.".to_string()));
        }
        open_in_browser(url)?;
        Ok(format!("Opened {url}"))
    }

    pub fn paste_logo_clipboard(&mut self) -> Result<String, ReflinksError> {
        let platform_name = self.current_or_err()?.platform_name.clone();
        match media::clipboard_image()? {
            Some(image) => {
                let filename = media::logo_filename(&platform_name, ".png");
                let path = self.workspace.logo_path(&filename);
                media::save_rgba_png(&image, &path)?;
                self.logo_paths[self.cursor] = Some(path);
                Ok(format!("Logo pasted and saved as {filename}"))
            }
            None => Err(ReflinksError::Custom("No image found in clipboard.".to_string())),
        }
    }

    pub fn download_logo_from_url(&mut self, url: &str) -> Result<String, ReflinksError> {
        let platform_name = self.current_or_err()?.platform_name.clone();
        let image = media::download_image(url.trim())?;
        let filename = media::logo_filename(&platform_name, ".png");
        let path = self.workspace.logo_path(&filename);
        media::save_png(&image, &path)?;
        self.logo_paths[self.cursor] = Some(path);
        Ok(format!("Logo downloaded and saved as {filename}"))
    }

    /// Byte-copy preserving the source extension; logos are the one media
    /// kind not normalized to PNG.
    pub fn upload_logo(&mut self, source: &Path) -> Result<String, ReflinksError> {
        let platform_name = self.current_or_err()?.platform_name.clone();
        let ext = source
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();
        let filename = media::logo_filename(&platform_name, &ext);
        let path = self.workspace.logo_path(&filename);
        fs::copy(source, &path)?;
        self.logo_paths[self.cursor] = Some(path);
        Ok(format!("Logo saved as {filename}"))
    }

    pub fn mark_verified(&mut self, field: VerifyField) -> Result<String, ReflinksError> {
        self.current_or_err()?;
        let checks = &mut self.verified[self.cursor];
        match field {
            VerifyField::Website => {
                checks.website = true;
                // Only this action unlocks the favicon auto-fetch.
                self.website_verified[self.cursor] = true;
                return Ok("Website verified!".to_string());
            }
            VerifyField::Referral => checks.referral = true,
            VerifyField::Logo => checks.logo = true,
            VerifyField::Description => checks.description = true,
            VerifyField::Features => checks.features = true,
            VerifyField::Capsules => checks.capsules = true,
            VerifyField::Favicon => checks.favicon = true,
        }
        Ok(format!("Marked {} verified", field.label()))
    }

    pub fn website_is_verified(&self) -> bool {
        self.website_verified.get(self.cursor).copied().unwrap_or(false)
    }

    /// Gated favicon pipeline: probe `/favicon.ico`, fall back to the HTML
    /// link tag, re-encode PNG, persist just the favicon cell immediately.
    pub fn get_favicon_from_website(&mut self) -> Result<String, ReflinksError> {
        self.current_or_err()?;
        if !self.website_is_verified() {
            return Err(ReflinksError::WebsiteNotVerified);
        }
        let url = self.draft.website.trim().to_string();
        if url.is_empty() {
            return Err(ReflinksError::Custom("No official website URL found.".to_string()));
        }
        let bytes = favicon::fetch_favicon(&url)?;
        let platform_name = self.records[self.cursor].platform_name.clone();
        let filename = media::favicon_filename(&platform_name);
        media::reencode_png(&bytes, &self.workspace.favicon_path(&filename))?;
        self.store_favicon(filename)
    }

    pub fn paste_favicon_clipboard(&mut self) -> Result<String, ReflinksError> {
        let platform_name = self.current_or_err()?.platform_name.clone();
        match media::clipboard_image()? {
            Some(image) => {
                let filename = media::favicon_filename(&platform_name);
                media::save_rgba_png(&image, &self.workspace.favicon_path(&filename))?;
                self.store_favicon(filename.clone())?;
                Ok(format!("Favicon pasted and saved as {filename}"))
            }
            None => Err(ReflinksError::Custom("No image found in clipboard.".to_string())),
        }
    }

    /// Favicon uploads always normalize to PNG.
    pub fn upload_favicon(&mut self, source: &Path) -> Result<String, ReflinksError> {
        let platform_name = self.current_or_err()?.platform_name.clone();
        let bytes = fs::read(source)?;
        let filename = media::favicon_filename(&platform_name);
        media::reencode_png(&bytes, &self.workspace.favicon_path(&filename))?;
        self.store_favicon(filename)
    }

    // Persists the favicon cell by natural key and mirrors it in memory.
    fn store_favicon(&mut self, filename: String) -> Result<String, ReflinksError> {
        let key = self.records[self.cursor].natural_key();
        catalog::save_favicon(&self.workspace.csv_path, &key, &filename)?;
        self.records[self.cursor].favicon_filename = filename.clone();
        Ok(format!("Favicon saved as {filename}"))
    }

    pub fn set_api_key(&mut self, key: String) -> Result<String, ReflinksError> {
        let key = key.trim().to_string();
        if key.is_empty() {
            return Err(ReflinksError::Custom("API key was empty; nothing changed.".to_string()));
        }
        self.api_key = key;
        match generation::validate_key(&self.api_key) {
            Ok(()) => Ok("API key set and validated.".to_string()),
            Err(e) => Ok(format!("Key set, but validation failed: {e}")),
        }
    }

    /// Fills one text field from the generation service. The custom prompt,
    /// when non-empty, replaces the default prompt wholesale.
    pub fn generate(&mut self, kind: GenerationKind) -> Result<String, ReflinksError> {
        if !self.has_api_key() {
            return Err(ReflinksError::MissingApiKey);
        }
        let record = self.current_or_err()?;
        let prompt = if self.custom_prompt.trim().is_empty() {
            kind.build_prompt(&record.platform_name, self.draft.website.trim())
        } else {
            self.custom_prompt.trim().to_string()
        };
        let text = generation::generate(&self.api_key, &self.model, kind, &prompt)?;
        match kind {
            GenerationKind::Description => self.draft.description = text,
            GenerationKind::Features => self.draft.features = text,
            GenerationKind::Capsules => self.draft.capsules = text,
        }
        Ok(format!("Generated {}", kind.label()))
    }

    /// Commits the draft for the current record: fresh re-read, row located
    /// by the loaded natural key, full rewrite. On success the in-memory
    /// record mirrors what was written, so the next save keys on the value
    /// now in the store.
    pub fn save_current(&mut self) -> Result<String, ReflinksError> {
        let record = self.current_or_err()?.clone();
        let key = record.natural_key();

        let logo_filename = match &self.logo_paths[self.cursor] {
            Some(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_default(),
            None => record.logo_filename.clone(),
        };

        let edits = RecordEdits {
            official_website: self.draft.website.trim().to_string(),
            referral_link: self.draft.referral.trim().to_string(),
            description: self.draft.description.clone(),
            features: textclean::clean_comma_list(&self.draft.features),
            capsules: textclean::clean_comma_list(&self.draft.capsules),
            logo_filename,
        };
        catalog::save_record(&self.workspace.csv_path, &key, &edits)?;

        let current = &mut self.records[self.cursor];
        current.official_website = textclean::clean_cell(&edits.official_website);
        current.referral_link = textclean::clean_cell(&edits.referral_link);
        current.description = textclean::clean_cell(&edits.description);
        current.features = Record::split_list(&edits.features);
        current.capsules = Record::split_list(&edits.capsules);
        current.logo_filename = textclean::clean_cell(&edits.logo_filename);
        Ok("Saved to CSV!".to_string())
    }
}

fn open_in_browser(url: &str) -> Result<(), ReflinksError> {
    webbrowser::open(url)
        .map_err(|e| ReflinksError::Custom(format!("Failed to open browser: {e}")))
}
