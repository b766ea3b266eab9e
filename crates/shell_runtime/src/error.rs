//! Error taxonomy for catalog loading, app resolution, and window management.
//!
//! None of these escape [`crate::shell::ShellController::dispatch`]; each is logged where it is
//! handled and degrades to a no-op.

use thiserror::Error;

use crate::model::WindowId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Non-fatal problem found while loading the catalog.
pub enum CatalogIssue {
    /// No catalog document exists at the source location.
    #[error("catalog not found at {location}")]
    ConfigNotFound {
        /// Searched location.
        location: String,
    },
    /// The catalog could not be read or parsed; the registry is empty.
    #[error("catalog parse error: {reason}")]
    ConfigParseError {
        /// Reader or parser message.
        reason: String,
    },
    /// One entry was skipped; its siblings are unaffected.
    #[error("invalid catalog entry `{id}`: {reason}")]
    EntryInvalid {
        /// Entry id, or `unknown` when the id itself is missing.
        id: String,
        /// Deserialization message naming the missing or mistyped field.
        reason: String,
    },
    /// A `file://` URL pointed at a project file that does not exist; the entry was dropped.
    #[error("entry `{id}` dropped: local file not found: {path}")]
    MissingLocalFile {
        /// Entry id.
        id: String,
        /// Project-relative path that was looked up.
        path: String,
    },
    /// A later entry replaced an earlier one with the same id.
    #[error("duplicate catalog id `{id}`; the later entry wins")]
    DuplicateId {
        /// Duplicated id.
        id: String,
    },
    /// The `shell` section was malformed; defaults were used.
    #[error("invalid shell settings, using defaults: {reason}")]
    InvalidShellSettings {
        /// Deserialization message.
        reason: String,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reason an entry could not be turned into window content.
pub enum ResolutionError {
    /// Declared kind is neither remote nor local.
    #[error("unsupported application type `{kind}` for `{app_id}`")]
    UnsupportedKind {
        /// Entry id.
        app_id: String,
        /// Declared kind.
        kind: String,
    },
    /// Remote entry without a target URL.
    #[error("missing url for remote app `{app_id}`")]
    MissingUrl {
        /// Entry id.
        app_id: String,
    },
    /// Local entry without a component reference.
    #[error("missing component reference for local app `{app_id}`")]
    MissingComponentRef {
        /// Entry id.
        app_id: String,
    },
    /// Component reference without a unit/name separator.
    #[error("malformed component reference for `{app_id}`: {reason}")]
    MalformedComponentRef {
        /// Entry id.
        app_id: String,
        /// Parser message.
        reason: String,
    },
    /// No widget unit is registered under the reference prefix.
    #[error("component unit `{unit}` is not registered (app `{app_id}`)")]
    UnitNotFound {
        /// Entry id.
        app_id: String,
        /// Requested unit path.
        unit: String,
    },
    /// The unit exists but has no component with the requested name.
    #[error("component `{name}` not found in unit `{unit}` (app `{app_id}`)")]
    ComponentNotFound {
        /// Entry id.
        app_id: String,
        /// Requested unit path.
        unit: String,
        /// Requested component name.
        name: String,
    },
    /// The widget factory failed.
    #[error("failed to construct `{reference}` for `{app_id}`: {reason}")]
    ConstructionFailed {
        /// Entry id.
        app_id: String,
        /// Component reference.
        reference: String,
        /// Factory message.
        reason: String,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reason an open request produced no window.
pub enum OpenIgnored {
    /// The id is not in the registry.
    #[error("application `{0}` not found")]
    UnknownAppId(String),
    /// The entry exists but its content could not be resolved.
    #[error(transparent)]
    ResolutionFailed(#[from] ResolutionError),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Window-level action errors.
pub enum WindowError {
    /// The target window id was not found among open windows.
    #[error("window {0:?} not found")]
    WindowNotFound(WindowId),
}
