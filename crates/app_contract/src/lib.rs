//! Shared contract types between the kiosk shell runtime and its in-process local widgets.
//!
//! Local widgets are registered under a component reference of the form
//! `unit.path.ComponentName`. The runtime looks the reference up in its registry, calls the
//! module factory with the injected [`AppServices`], and mounts the resulting [`LocalWidget`]
//! inside a shell window.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use std::{fmt, rc::Rc};

use leptos::View;
use ordo_platform_host::TextStore;

/// Stable identifier for a runtime-managed window.
pub type WindowRuntimeId = u64;

/// Parsed `unit.path.ComponentName` reference naming a registered local widget.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentRef {
    unit: String,
    name: String,
}

impl ComponentRef {
    /// Splits `raw` at its last `.` into a unit path and a component name.
    ///
    /// # Errors
    ///
    /// Returns an error when the separator is missing or either side is empty.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let raw = raw.trim();
        let Some((unit, name)) = raw.rsplit_once('.') else {
            return Err(format!(
                "component reference `{raw}` has no `.` between unit and component name"
            ));
        };
        if unit.is_empty() || name.is_empty() || unit.split('.').any(str::is_empty) {
            return Err(format!(
                "component reference `{raw}` has an empty unit or component segment"
            ));
        }
        Ok(Self {
            unit: unit.to_string(),
            name: name.to_string(),
        })
    }

    /// Unit path (everything before the last `.`).
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Component name (the last segment).
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for ComponentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.unit, self.name)
    }
}

#[derive(Clone)]
/// Injected service bundle handed to widget factories and mounted views.
pub struct AppServices {
    /// Per-user text storage for widget documents.
    pub text_store: Rc<dyn TextStore>,
}

impl AppServices {
    /// Creates a service bundle around a text store.
    pub fn new(text_store: Rc<dyn TextStore>) -> Self {
        Self { text_store }
    }
}

impl fmt::Debug for AppServices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppServices").finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
/// Mount context injected by the shell runtime per window instance.
pub struct AppMountContext {
    /// Catalog id of the app that opened the window.
    pub app_id: String,
    /// Stable runtime window id.
    pub window_id: WindowRuntimeId,
    /// Runtime service bundle.
    pub services: AppServices,
}

/// An instantiated local widget owned by a shell window.
pub trait LocalWidget {
    /// Component name the widget was registered under.
    fn component_name(&self) -> &'static str;

    /// Builds the widget view. Called once, when the hosting window is first rendered.
    fn mount(&self, context: AppMountContext) -> View;
}

impl fmt::Debug for dyn LocalWidget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LocalWidget({})", self.component_name())
    }
}

/// Factory building a widget, reading any persisted document it needs on construction.
pub type LocalWidgetFactory = fn(&AppServices) -> Result<Box<dyn LocalWidget>, String>;

#[derive(Clone, Copy)]
/// Registration record binding a component reference to its factory.
pub struct LocalAppModule {
    reference: &'static str,
    factory: LocalWidgetFactory,
}

impl LocalAppModule {
    /// Creates a module registered under `reference` (`unit.path.ComponentName`).
    pub const fn new(reference: &'static str, factory: LocalWidgetFactory) -> Self {
        Self { reference, factory }
    }

    /// Raw registration reference.
    pub fn reference(&self) -> &'static str {
        self.reference
    }

    /// Parsed registration reference.
    ///
    /// # Errors
    ///
    /// Returns an error when the registration reference is malformed.
    pub fn component_ref(&self) -> Result<ComponentRef, String> {
        ComponentRef::parse(self.reference)
    }

    /// Instantiates the widget.
    ///
    /// # Errors
    ///
    /// Returns the factory error unchanged.
    pub fn instantiate(&self, services: &AppServices) -> Result<Box<dyn LocalWidget>, String> {
        (self.factory)(services)
    }
}

impl fmt::Debug for LocalAppModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalAppModule")
            .field("reference", &self.reference)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leptos::IntoView;
    use ordo_platform_host::MemoryTextStore;

    struct Probe;

    impl LocalWidget for Probe {
        fn component_name(&self) -> &'static str {
            "Probe"
        }

        fn mount(&self, _context: AppMountContext) -> View {
            ().into_view()
        }
    }

    fn build_probe(services: &AppServices) -> Result<Box<dyn LocalWidget>, String> {
        services.text_store.save_text(".probe", "built")?;
        Ok(Box::new(Probe))
    }

    fn build_broken(_services: &AppServices) -> Result<Box<dyn LocalWidget>, String> {
        Err("probe store offline".to_string())
    }

    #[test]
    fn component_ref_splits_at_last_separator() {
        let parsed = ComponentRef::parse("pkg.editor.EditorWidget").expect("valid reference");
        assert_eq!(parsed.unit(), "pkg.editor");
        assert_eq!(parsed.name(), "EditorWidget");
        assert_eq!(parsed.to_string(), "pkg.editor.EditorWidget");
    }

    #[test]
    fn component_ref_rejects_malformed_references() {
        assert!(ComponentRef::parse("EditorWidget").is_err());
        assert!(ComponentRef::parse("pkg.").is_err());
        assert!(ComponentRef::parse(".EditorWidget").is_err());
        assert!(ComponentRef::parse("pkg..EditorWidget").is_err());
        assert!(ComponentRef::parse("").is_err());
    }

    #[test]
    fn module_instantiation_passes_services_and_errors_through() {
        let store = MemoryTextStore::default();
        let services = AppServices::new(Rc::new(store.clone()));

        let module = LocalAppModule::new("test.probe.Probe", build_probe);
        let widget = module.instantiate(&services).expect("probe builds");
        assert_eq!(widget.component_name(), "Probe");
        assert_eq!(store.document(".probe").as_deref(), Some("built"));
        assert_eq!(
            module.component_ref().expect("valid").name(),
            "Probe"
        );

        let broken = LocalAppModule::new("test.probe.Broken", build_broken);
        assert_eq!(
            broken.instantiate(&services).err().as_deref(),
            Some("probe store offline")
        );
    }
}
