use std::{
    fs,
    path::{
        Path,
        PathBuf,
    },
};

use crate::core::ReflinksError;

/// Filesystem layout of one catalog workspace: the CSV itself plus the two
/// asset directories. The directories are created up front so media actions
/// never have to care.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub csv_path: PathBuf,
    pub logo_dir: PathBuf,
    pub favicon_dir: PathBuf,
}

impl Workspace {
    pub fn new(root: &Path) -> Result<Self, ReflinksError> {
        let public = root.join("public");
        let workspace = Workspace {
            csv_path: public.join("ref_links.csv"),
            logo_dir: public.join("logos"),
            favicon_dir: public.join("favicons"),
        };
        fs::create_dir_all(&public)?;
        fs::create_dir_all(&workspace.logo_dir)?;
        fs::create_dir_all(&workspace.favicon_dir)?;
        Ok(workspace)
    }

    pub fn logo_path(&self, filename: &str) -> PathBuf {
        self.logo_dir.join(filename)
    }

    pub fn favicon_path(&self, filename: &str) -> PathBuf {
        self.favicon_dir.join(filename)
    }

    /// Resolves a stored logo filename to an existing file. Empty or stale
    /// references come back as None and are treated as "no logo".
    pub fn resolve_logo(&self, filename: &str) -> Option<PathBuf> {
        resolve(&self.logo_dir, filename)
    }

    pub fn resolve_favicon(&self, filename: &str) -> Option<PathBuf> {
        resolve(&self.favicon_dir, filename)
    }
}

fn resolve(dir: &Path, filename: &str) -> Option<PathBuf> {
    let filename = filename.trim();
    if filename.is_empty() {
        return None;
    }
    let path = dir.join(filename);
    path.exists().then_some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_creates_asset_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let workspace = Workspace::new(tmp.path()).unwrap();
        assert!(workspace.logo_dir.is_dir());
        assert!(workspace.favicon_dir.is_dir());
        assert_eq!(workspace.csv_path, tmp.path().join("public").join("ref_links.csv"));
    }

    #[test]
    fn resolve_tolerates_stale_and_empty_references() {
        let tmp = tempfile::tempdir().unwrap();
        let workspace = Workspace::new(tmp.path()).unwrap();
        assert!(workspace.resolve_logo("").is_none());
        assert!(workspace.resolve_logo("missing.png").is_none());

        let path = workspace.logo_path("logo_Test.png");
        fs::write(&path, b"png").unwrap();
        assert_eq!(workspace.resolve_logo("logo_Test.png"), Some(path));
    }
}
