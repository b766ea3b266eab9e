use serde::{Deserialize, Serialize};

pub const DEFAULT_WINDOW_WIDTH: i32 = 600;
pub const DEFAULT_WINDOW_HEIGHT: i32 = 400;
pub const DEFAULT_WINDOW_X: i32 = 100;
pub const DEFAULT_WINDOW_Y: i32 = 100;
pub const DEFAULT_APP_ICON: &str = "📄";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowId(pub u64);

/// Launch strategy declared by a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AppKind {
    /// Remote web content shown in an embedded view (`remote`, or `web` in older catalogs).
    Remote,
    /// In-process widget registered under a component reference.
    Local,
    /// Any other declared value; loads, but cannot be opened.
    Unsupported(String),
}

impl AppKind {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "remote" | "web" => Self::Remote,
            "local" => Self::Local,
            other => Self::Unsupported(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Remote => "remote",
            Self::Local => "local",
            Self::Unsupported(raw) => raw,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Default for WindowRect {
    fn default() -> Self {
        Self {
            x: DEFAULT_WINDOW_X,
            y: DEFAULT_WINDOW_Y,
            w: DEFAULT_WINDOW_WIDTH,
            h: DEFAULT_WINDOW_HEIGHT,
        }
    }
}

/// One launchable application loaded from the catalog. Never mutated after load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppEntry {
    pub id: String,
    pub title: String,
    pub icon: String,
    pub kind: AppKind,
    /// Target URL; only meaningful for [`AppKind::Remote`].
    pub url: Option<String>,
    /// `unit.path.ComponentName` reference; only meaningful for [`AppKind::Local`].
    pub component: Option<String>,
    pub geometry: WindowRect,
}

/// Key used to decide whether an open request matches an already open window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DedupPolicy {
    /// Windows are the same when their titles are equal, even across different app ids.
    #[default]
    ByTitle,
    /// Windows are the same when they were opened for the same app id.
    ByAppId,
}

/// Shell settings read from the optional `shell` section of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellSettings {
    pub dedup: DedupPolicy,
    pub start_label: String,
    pub shutdown_label: String,
    pub fullscreen: bool,
}

impl Default for ShellSettings {
    fn default() -> Self {
        Self {
            dedup: DedupPolicy::ByTitle,
            start_label: "Start".to_string(),
            shutdown_label: "Shut down...".to_string(),
            fullscreen: true,
        }
    }
}

/// Content-free view of an open window used by the UI layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowFrame {
    pub id: WindowId,
    pub app_id: String,
    pub title: String,
    pub icon: String,
    pub rect: WindowRect,
    pub z_index: u32,
    pub is_focused: bool,
    pub minimized: bool,
}
