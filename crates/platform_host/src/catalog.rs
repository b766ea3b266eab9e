//! Catalog source contracts and adapters.
//!
//! A catalog source hands the raw catalog document to the runtime loader and answers whether a
//! project-relative file referenced by a `file://` URL exists. Parsing stays in the runtime.

use std::{
    cell::Cell,
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

/// File name of the application catalog.
pub const CATALOG_FILE_NAME: &str = "apps.yaml";

/// Host service that provides the raw application catalog.
pub trait CatalogSource {
    /// Human-readable location used in log lines.
    fn describe(&self) -> String;

    /// Reads the catalog text.
    ///
    /// Returns `Ok(None)` when no catalog exists at the source location.
    ///
    /// # Errors
    ///
    /// Returns an error when the catalog exists but cannot be read.
    fn read_catalog(&self) -> Result<Option<String>, String>;

    /// Resolves a project-relative path to an absolute path, or `None` when the file is missing.
    fn resolve_project_file(&self, relative: &str) -> Option<PathBuf>;

    /// URL under which an existing project file can be embedded. Defaults to a `file://` URL of
    /// [`Self::resolve_project_file`].
    fn project_file_url(&self, relative: &str) -> Option<String> {
        self.resolve_project_file(relative)
            .map(|path| file_url_for_path(&path))
    }
}

/// `file://` URL of an absolute path, with forward slashes.
pub fn file_url_for_path(path: &Path) -> String {
    let display = path.display().to_string().replace('\\', "/");
    format!("file:///{}", display.trim_start_matches('/'))
}

#[derive(Debug, Clone)]
/// Filesystem catalog source rooted at a project directory.
pub struct FsCatalogSource {
    catalog_path: Option<PathBuf>,
    project_root: PathBuf,
    searched: Vec<PathBuf>,
}

impl FsCatalogSource {
    /// Looks for the catalog in `base` first and then in its parent directory.
    ///
    /// The project root is the parent of `base`, so `file://` URLs in a catalog stored next to the
    /// runtime sources resolve against the repository root.
    pub fn discover(base: impl AsRef<Path>) -> Self {
        let base = base.as_ref();
        let project_root = base
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| base.to_path_buf());
        let searched = vec![
            base.join(CATALOG_FILE_NAME),
            project_root.join(CATALOG_FILE_NAME),
        ];
        let catalog_path = searched.iter().find(|path| path.is_file()).cloned();
        Self {
            catalog_path,
            project_root,
            searched,
        }
    }

    /// Uses an explicit catalog file and project root.
    pub fn at(catalog_path: impl Into<PathBuf>, project_root: impl Into<PathBuf>) -> Self {
        let catalog_path = catalog_path.into();
        Self {
            searched: vec![catalog_path.clone()],
            catalog_path: Some(catalog_path),
            project_root: project_root.into(),
        }
    }

    /// Project root used for `file://` resolution.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }
}

impl CatalogSource for FsCatalogSource {
    fn describe(&self) -> String {
        match &self.catalog_path {
            Some(path) => path.display().to_string(),
            None => self
                .searched
                .iter()
                .map(|path| path.display().to_string())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    fn read_catalog(&self) -> Result<Option<String>, String> {
        let Some(path) = &self.catalog_path else {
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(path)
            .map(Some)
            .map_err(|err| format!("failed to read {}: {err}", path.display()))
    }

    fn resolve_project_file(&self, relative: &str) -> Option<PathBuf> {
        self.project_root.join(relative).canonicalize().ok()
    }
}

#[derive(Debug, Default)]
/// In-memory catalog source with a fixed set of existing project files.
pub struct MemoryCatalogSource {
    text: Option<String>,
    project_root: PathBuf,
    existing_files: BTreeSet<String>,
    served_from: Option<String>,
    reads: Cell<usize>,
}

impl MemoryCatalogSource {
    /// Creates a source serving `text` as the catalog document.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            project_root: PathBuf::from("/"),
            ..Self::default()
        }
    }

    /// Creates a source that reports the catalog as missing.
    pub fn missing() -> Self {
        Self::default()
    }

    /// Sets the project root joined onto existing relative files.
    pub fn with_project_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.project_root = root.into();
        self
    }

    /// Marks project-relative files as existing.
    pub fn with_existing_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.existing_files
            .extend(files.into_iter().map(|file| normalize_relative(&file.into())));
        self
    }

    /// Serves existing project files over HTTP below `prefix` instead of as `file://` URLs.
    pub fn serve_files_from(mut self, prefix: impl Into<String>) -> Self {
        self.served_from = Some(prefix.into());
        self
    }

    /// Number of times the catalog text has been read.
    pub fn read_count(&self) -> usize {
        self.reads.get()
    }
}

impl CatalogSource for MemoryCatalogSource {
    fn describe(&self) -> String {
        "embedded catalog".to_string()
    }

    fn read_catalog(&self) -> Result<Option<String>, String> {
        self.reads.set(self.reads.get() + 1);
        Ok(self.text.clone())
    }

    fn resolve_project_file(&self, relative: &str) -> Option<PathBuf> {
        let relative = normalize_relative(relative);
        self.existing_files
            .contains(&relative)
            .then(|| self.project_root.join(relative))
    }

    fn project_file_url(&self, relative: &str) -> Option<String> {
        let path = self.resolve_project_file(relative)?;
        match &self.served_from {
            Some(prefix) => Some(format!(
                "{}/{}",
                prefix.trim_end_matches('/'),
                normalize_relative(relative)
            )),
            None => Some(file_url_for_path(&path)),
        }
    }
}

fn normalize_relative(path: &str) -> String {
    path.trim_start_matches('/').replace('\\', "/")
}
