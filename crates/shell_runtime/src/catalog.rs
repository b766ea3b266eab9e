//! Application catalog loading.
//!
//! The catalog is a YAML (or JSON) document with an `apps` list and an optional `shell` section.
//! Loading never fails: a missing or unparseable document yields an empty registry, a bad entry
//! is skipped on its own, and every problem is recorded as a [`CatalogIssue`] and logged.

use std::{cell::OnceCell, rc::Rc};

use leptos::logging;
use ordo_platform_host::CatalogSource;
use serde::Deserialize;
use serde_yaml::Value;

use crate::{
    error::CatalogIssue,
    model::{
        AppEntry, AppKind, ShellSettings, WindowRect, DEFAULT_APP_ICON, DEFAULT_WINDOW_HEIGHT,
        DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_X, DEFAULT_WINDOW_Y,
    },
};

const FILE_URL_SCHEME: &str = "file://";

#[derive(Debug, Default, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    apps: Vec<Value>,
    #[serde(default)]
    shell: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RawAppEntry {
    id: String,
    title: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    icon: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default, rename = "class")]
    component: Option<String>,
    #[serde(default)]
    width: Option<i32>,
    #[serde(default)]
    height: Option<i32>,
    #[serde(default)]
    x: Option<i32>,
    #[serde(default)]
    y: Option<i32>,
}

/// Loaded catalog: entries in document order, shell settings, and load diagnostics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppRegistry {
    entries: Vec<AppEntry>,
    settings: ShellSettings,
    issues: Vec<CatalogIssue>,
}

impl AppRegistry {
    /// Builds a registry directly from entries (later duplicates replace earlier ones).
    pub fn from_entries(entries: impl IntoIterator<Item = AppEntry>) -> Self {
        let mut registry = Self::default();
        for entry in entries {
            registry.insert(entry);
        }
        registry
    }

    fn insert(&mut self, entry: AppEntry) {
        match self.entries.iter_mut().find(|existing| existing.id == entry.id) {
            Some(existing) => {
                self.issues.push(CatalogIssue::DuplicateId {
                    id: entry.id.clone(),
                });
                *existing = entry;
            }
            None => self.entries.push(entry),
        }
    }

    pub fn get(&self, app_id: &str) -> Option<&AppEntry> {
        self.entries.iter().find(|entry| entry.id == app_id)
    }

    pub fn contains(&self, app_id: &str) -> bool {
        self.get(app_id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AppEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn settings(&self) -> &ShellSettings {
        &self.settings
    }

    pub fn with_settings(mut self, settings: ShellSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Problems recorded while loading, in the order they were found.
    pub fn issues(&self) -> &[CatalogIssue] {
        &self.issues
    }
}

/// Owns a catalog source and loads it at most once.
pub struct CatalogLoader {
    source: Rc<dyn CatalogSource>,
    cached: OnceCell<Rc<AppRegistry>>,
}

impl CatalogLoader {
    pub fn new(source: Rc<dyn CatalogSource>) -> Self {
        Self {
            source,
            cached: OnceCell::new(),
        }
    }

    /// Returns the registry, reading the source only on the first call.
    pub fn load_registry(&self) -> Rc<AppRegistry> {
        self.cached
            .get_or_init(|| Rc::new(load_from_source(self.source.as_ref())))
            .clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.cached.get().is_some()
    }
}

impl std::fmt::Debug for CatalogLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogLoader")
            .field("source", &self.source.describe())
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

/// Reads and parses the catalog without caching, logging every issue found.
pub fn load_from_source(source: &dyn CatalogSource) -> AppRegistry {
    let registry = match source.read_catalog() {
        Ok(Some(text)) => parse_catalog(&text, source),
        Ok(None) => AppRegistry {
            issues: vec![CatalogIssue::ConfigNotFound {
                location: source.describe(),
            }],
            ..AppRegistry::default()
        },
        Err(reason) => AppRegistry {
            issues: vec![CatalogIssue::ConfigParseError { reason }],
            ..AppRegistry::default()
        },
    };

    for issue in registry.issues() {
        logging::warn!("{issue}");
    }
    logging::log!(
        "loaded {} catalog entries from {}",
        registry.len(),
        source.describe()
    );
    registry
}

/// Parses catalog text, resolving `file://` URLs through `source`.
pub fn parse_catalog(text: &str, source: &dyn CatalogSource) -> AppRegistry {
    let mut registry = AppRegistry::default();
    if text.trim().is_empty() {
        registry.issues.push(CatalogIssue::ConfigParseError {
            reason: "catalog document is empty".to_string(),
        });
        return registry;
    }

    let document = match serde_yaml::from_str::<CatalogDocument>(text) {
        Ok(document) => document,
        Err(err) => {
            registry.issues.push(CatalogIssue::ConfigParseError {
                reason: err.to_string(),
            });
            return registry;
        }
    };

    if let Some(shell) = document.shell {
        match serde_yaml::from_value::<ShellSettings>(shell) {
            Ok(settings) => registry.settings = settings,
            Err(err) => registry.issues.push(CatalogIssue::InvalidShellSettings {
                reason: err.to_string(),
            }),
        }
    }

    for item in document.apps {
        match entry_from_value(item, source) {
            Ok(entry) => registry.insert(entry),
            Err(issue) => registry.issues.push(issue),
        }
    }
    registry
}

fn entry_from_value(item: Value, source: &dyn CatalogSource) -> Result<AppEntry, CatalogIssue> {
    let id_hint = item
        .get("id")
        .and_then(Value::as_str)
        .unwrap_or("unknown")
        .to_string();
    let raw = serde_yaml::from_value::<RawAppEntry>(item).map_err(|err| {
        CatalogIssue::EntryInvalid {
            id: id_hint,
            reason: err.to_string(),
        }
    })?;

    let url = match non_blank(raw.url) {
        Some(url) => Some(resolve_file_url(&raw.id, url, source)?),
        None => None,
    };

    Ok(AppEntry {
        icon: non_blank(raw.icon).unwrap_or_else(|| DEFAULT_APP_ICON.to_string()),
        kind: AppKind::parse(&raw.kind),
        url,
        component: non_blank(raw.component),
        geometry: WindowRect {
            x: raw.x.unwrap_or(DEFAULT_WINDOW_X),
            y: raw.y.unwrap_or(DEFAULT_WINDOW_Y),
            w: raw.width.unwrap_or(DEFAULT_WINDOW_WIDTH),
            h: raw.height.unwrap_or(DEFAULT_WINDOW_HEIGHT),
        },
        id: raw.id,
        title: raw.title,
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Rewrites a `file://` URL to the location the source serves the project file from; other URLs
/// pass through unchanged.
fn resolve_file_url(
    app_id: &str,
    url: String,
    source: &dyn CatalogSource,
) -> Result<String, CatalogIssue> {
    let Some(rest) = url.strip_prefix(FILE_URL_SCHEME) else {
        return Ok(url);
    };
    let relative = rest.trim_start_matches('/');
    source
        .project_file_url(relative)
        .ok_or_else(|| CatalogIssue::MissingLocalFile {
            id: app_id.to_string(),
            path: relative.to_string(),
        })
}
