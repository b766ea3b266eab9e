//! Launch-strategy resolution: turns a catalog entry into window content.

use std::{collections::BTreeMap, rc::Rc};

use leptos::*;
use ordo_app_contract::{AppMountContext, AppServices, ComponentRef, LocalAppModule, LocalWidget};

use crate::{error::ResolutionError, model::AppEntry, model::AppKind, AppRegistry};

/// Content owned by an open window.
#[derive(Debug, Clone)]
pub enum WindowContent {
    /// Embedded view of a remote (or `file://`) URL.
    Remote { url: String },
    /// Instantiated local widget.
    Local(Rc<dyn LocalWidget>),
}

impl WindowContent {
    pub fn describe(&self) -> String {
        match self {
            Self::Remote { url } => format!("remote view of {url}"),
            Self::Local(widget) => format!("local widget {}", widget.component_name()),
        }
    }

    pub fn mount(&self, context: AppMountContext) -> View {
        match self {
            Self::Remote { url } => {
                let url = url.clone();
                view! {
                    <iframe
                        class="remote-view"
                        src=url
                        title=context.app_id
                        referrerpolicy="no-referrer"
                    ></iframe>
                }
                .into_view()
            }
            Self::Local(widget) => widget.mount(context),
        }
    }
}

/// Registered local widgets, indexed by unit path and then component name.
#[derive(Debug, Clone, Default)]
pub struct LocalAppRegistry {
    units: BTreeMap<String, BTreeMap<String, LocalAppModule>>,
}

impl LocalAppRegistry {
    /// Registers a module under its reference.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed or already registered references.
    pub fn register(&mut self, module: LocalAppModule) -> Result<(), String> {
        let reference = module.component_ref()?;
        let unit = self.units.entry(reference.unit().to_string()).or_default();
        if unit.contains_key(reference.name()) {
            return Err(format!("component `{reference}` is already registered"));
        }
        unit.insert(reference.name().to_string(), module);
        Ok(())
    }

    /// Builder-style [`Self::register`] that logs rejected modules.
    pub fn with_module(mut self, module: LocalAppModule) -> Self {
        if let Err(err) = self.register(module) {
            logging::warn!("local app registration rejected: {err}");
        }
        self
    }

    /// All registered references, sorted.
    pub fn references(&self) -> Vec<String> {
        self.units
            .iter()
            .flat_map(|(unit, names)| names.keys().map(move |name| format!("{unit}.{name}")))
            .collect()
    }

    fn lookup(
        &self,
        app_id: &str,
        reference: &ComponentRef,
    ) -> Result<&LocalAppModule, ResolutionError> {
        let unit = self
            .units
            .get(reference.unit())
            .ok_or_else(|| ResolutionError::UnitNotFound {
                app_id: app_id.to_string(),
                unit: reference.unit().to_string(),
            })?;
        unit.get(reference.name())
            .ok_or_else(|| ResolutionError::ComponentNotFound {
                app_id: app_id.to_string(),
                unit: reference.unit().to_string(),
                name: reference.name().to_string(),
            })
    }
}

/// Decides the launch strategy of an entry and instantiates its content.
#[derive(Debug, Clone, Default)]
pub struct AppResolver {
    local_apps: LocalAppRegistry,
}

impl AppResolver {
    pub fn new(local_apps: LocalAppRegistry) -> Self {
        Self { local_apps }
    }

    pub fn local_apps(&self) -> &LocalAppRegistry {
        &self.local_apps
    }

    /// Instantiates window content for `entry`.
    ///
    /// # Errors
    ///
    /// Returns a [`ResolutionError`] for unsupported kinds, missing targets, unresolvable
    /// component references, and failing widget factories.
    pub fn create_widget(
        &self,
        entry: &AppEntry,
        services: &AppServices,
    ) -> Result<WindowContent, ResolutionError> {
        match &entry.kind {
            AppKind::Remote => {
                let url = remote_url(entry)?;
                Ok(WindowContent::Remote {
                    url: url.to_string(),
                })
            }
            AppKind::Local => {
                let (reference, module) = self.local_module(entry)?;
                module
                    .instantiate(services)
                    .map(|widget| WindowContent::Local(Rc::from(widget)))
                    .map_err(|reason| ResolutionError::ConstructionFailed {
                        app_id: entry.id.clone(),
                        reference: reference.to_string(),
                        reason,
                    })
            }
            AppKind::Unsupported(kind) => Err(ResolutionError::UnsupportedKind {
                app_id: entry.id.clone(),
                kind: kind.clone(),
            }),
        }
    }

    /// Checks every entry that can be checked without instantiating anything.
    pub fn validate(&self, registry: &AppRegistry) -> Vec<ResolutionError> {
        registry
            .iter()
            .filter_map(|entry| match &entry.kind {
                AppKind::Remote => remote_url(entry).err(),
                AppKind::Local => self.local_module(entry).err(),
                AppKind::Unsupported(kind) => Some(ResolutionError::UnsupportedKind {
                    app_id: entry.id.clone(),
                    kind: kind.clone(),
                }),
            })
            .collect()
    }

    fn local_module(
        &self,
        entry: &AppEntry,
    ) -> Result<(ComponentRef, &LocalAppModule), ResolutionError> {
        let raw = entry
            .component
            .as_deref()
            .filter(|raw| !raw.trim().is_empty())
            .ok_or_else(|| ResolutionError::MissingComponentRef {
                app_id: entry.id.clone(),
            })?;
        let reference =
            ComponentRef::parse(raw).map_err(|reason| ResolutionError::MalformedComponentRef {
                app_id: entry.id.clone(),
                reason,
            })?;
        let module = self.local_apps.lookup(&entry.id, &reference)?;
        Ok((reference, module))
    }
}

fn remote_url(entry: &AppEntry) -> Result<&str, ResolutionError> {
    entry
        .url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .ok_or_else(|| ResolutionError::MissingUrl {
            app_id: entry.id.clone(),
        })
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use ordo_platform_host::MemoryTextStore;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::WindowRect;

    struct Stub(&'static str);

    impl LocalWidget for Stub {
        fn component_name(&self) -> &'static str {
            self.0
        }

        fn mount(&self, _context: AppMountContext) -> View {
            ().into_view()
        }
    }

    fn build_editor(_: &AppServices) -> Result<Box<dyn LocalWidget>, String> {
        Ok(Box::new(Stub("EditorWidget")))
    }

    fn build_failing(_: &AppServices) -> Result<Box<dyn LocalWidget>, String> {
        Err("disk unavailable".to_string())
    }

    fn resolver() -> AppResolver {
        AppResolver::new(
            LocalAppRegistry::default()
                .with_module(LocalAppModule::new("pkg.editor.EditorWidget", build_editor))
                .with_module(LocalAppModule::new("pkg.broken.Failing", build_failing)),
        )
    }

    fn services() -> AppServices {
        AppServices::new(Rc::new(MemoryTextStore::default()))
    }

    fn entry(kind: AppKind, url: Option<&str>, component: Option<&str>) -> AppEntry {
        AppEntry {
            id: "app".to_string(),
            title: "App".to_string(),
            icon: "📄".to_string(),
            kind,
            url: url.map(str::to_string),
            component: component.map(str::to_string),
            geometry: WindowRect::default(),
        }
    }

    #[test]
    fn remote_entry_resolves_to_remote_view() {
        let content = resolver()
            .create_widget(
                &entry(AppKind::Remote, Some("https://example.org"), None),
                &services(),
            )
            .expect("remote resolves");
        assert!(matches!(
            content,
            WindowContent::Remote { ref url } if url == "https://example.org"
        ));
    }

    #[test]
    fn remote_entry_without_url_fails() {
        for url in [None, Some(""), Some("   ")] {
            let err = resolver()
                .create_widget(&entry(AppKind::Remote, url, None), &services())
                .expect_err("missing url");
            assert_eq!(
                err,
                ResolutionError::MissingUrl {
                    app_id: "app".to_string()
                }
            );
        }
    }

    #[test]
    fn local_entry_resolves_registered_component() {
        let content = resolver()
            .create_widget(
                &entry(AppKind::Local, None, Some("pkg.editor.EditorWidget")),
                &services(),
            )
            .expect("local resolves");
        assert_eq!(content.describe(), "local widget EditorWidget");
    }

    #[test]
    fn local_resolution_failures_are_classified() {
        let resolver = resolver();
        let services = services();
        let fail = |component: Option<&str>| {
            resolver
                .create_widget(&entry(AppKind::Local, None, component), &services)
                .expect_err("local resolution should fail")
        };

        assert!(matches!(
            fail(None),
            ResolutionError::MissingComponentRef { .. }
        ));
        assert!(matches!(
            fail(Some("EditorWidget")),
            ResolutionError::MalformedComponentRef { .. }
        ));
        assert_eq!(
            fail(Some("pkg.viewer.EditorWidget")),
            ResolutionError::UnitNotFound {
                app_id: "app".to_string(),
                unit: "pkg.viewer".to_string(),
            }
        );
        assert_eq!(
            fail(Some("pkg.editor.Missing")),
            ResolutionError::ComponentNotFound {
                app_id: "app".to_string(),
                unit: "pkg.editor".to_string(),
                name: "Missing".to_string(),
            }
        );
        assert_eq!(
            fail(Some("pkg.broken.Failing")),
            ResolutionError::ConstructionFailed {
                app_id: "app".to_string(),
                reference: "pkg.broken.Failing".to_string(),
                reason: "disk unavailable".to_string(),
            }
        );
    }

    #[test]
    fn unsupported_kind_fails() {
        let err = resolver()
            .create_widget(
                &entry(AppKind::Unsupported("plugin".to_string()), None, None),
                &services(),
            )
            .expect_err("unsupported kind");
        assert_eq!(
            err,
            ResolutionError::UnsupportedKind {
                app_id: "app".to_string(),
                kind: "plugin".to_string(),
            }
        );
    }

    #[test]
    fn registry_rejects_duplicate_and_malformed_references() {
        let mut registry = LocalAppRegistry::default();
        registry
            .register(LocalAppModule::new("pkg.editor.EditorWidget", build_editor))
            .expect("first registration");
        assert!(registry
            .register(LocalAppModule::new("pkg.editor.EditorWidget", build_editor))
            .is_err());
        assert!(registry
            .register(LocalAppModule::new("EditorWidget", build_editor))
            .is_err());
        assert_eq!(registry.references(), vec!["pkg.editor.EditorWidget"]);
    }

    #[test]
    fn validate_reports_unresolvable_entries_without_instantiating() {
        let registry = AppRegistry::from_entries([
            AppEntry {
                id: "ok".to_string(),
                ..entry(AppKind::Local, None, Some("pkg.editor.EditorWidget"))
            },
            AppEntry {
                id: "failing".to_string(),
                ..entry(AppKind::Local, None, Some("pkg.broken.Failing"))
            },
            AppEntry {
                id: "ghost".to_string(),
                ..entry(AppKind::Local, None, Some("pkg.ghost.Ghost"))
            },
            AppEntry {
                id: "blank".to_string(),
                ..entry(AppKind::Remote, None, None)
            },
        ]);

        let problems = resolver().validate(&registry);
        assert_eq!(
            problems,
            vec![
                ResolutionError::UnitNotFound {
                    app_id: "ghost".to_string(),
                    unit: "pkg.ghost".to_string(),
                },
                ResolutionError::MissingUrl {
                    app_id: "blank".to_string()
                },
            ]
        );
    }
}
