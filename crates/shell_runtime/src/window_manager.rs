//! Window host: owns open windows, their content, and the focus/stacking order.

use leptos::logging;
use ordo_app_contract::AppServices;

use crate::{
    error::{OpenIgnored, WindowError},
    model::{AppEntry, DedupPolicy, WindowFrame, WindowId},
    resolver::{AppResolver, WindowContent},
    AppRegistry,
};

/// Result of an open request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenOutcome {
    /// A new window was created, registered, and focused.
    Opened(WindowId),
    /// A matching window was already open and was brought to the front.
    Focused(WindowId),
    /// Nothing changed.
    Ignored(OpenIgnored),
}

impl OpenOutcome {
    pub fn window_id(&self) -> Option<WindowId> {
        match self {
            Self::Opened(id) | Self::Focused(id) => Some(*id),
            Self::Ignored(_) => None,
        }
    }
}

#[derive(Debug)]
struct OpenWindow {
    frame: WindowFrame,
    content: WindowContent,
}

/// Open windows in stacking order; the last element is the top of the stack.
#[derive(Debug)]
pub struct WindowHost {
    windows: Vec<OpenWindow>,
    next_window_id: u64,
    dedup: DedupPolicy,
}

impl Default for WindowHost {
    fn default() -> Self {
        Self::new(DedupPolicy::default())
    }
}

impl WindowHost {
    pub fn new(dedup: DedupPolicy) -> Self {
        Self {
            windows: Vec::new(),
            next_window_id: 1,
            dedup,
        }
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Opens `app_id`, or focuses the window that already shows it.
    pub fn open(
        &mut self,
        registry: &AppRegistry,
        resolver: &AppResolver,
        services: &AppServices,
        app_id: &str,
    ) -> OpenOutcome {
        let Some(entry) = registry.get(app_id) else {
            let ignored = OpenIgnored::UnknownAppId(app_id.to_string());
            logging::warn!("open ignored: {ignored}");
            return OpenOutcome::Ignored(ignored);
        };

        if let Some(existing) = self.find_matching(entry) {
            self.raise(existing);
            return OpenOutcome::Focused(existing);
        }

        let content = match resolver.create_widget(entry, services) {
            Ok(content) => content,
            Err(err) => {
                logging::warn!("open ignored: {err}");
                return OpenOutcome::Ignored(OpenIgnored::ResolutionFailed(err));
            }
        };

        let id = WindowId(self.next_window_id);
        self.next_window_id = self.next_window_id.saturating_add(1);
        for window in &mut self.windows {
            window.frame.is_focused = false;
        }
        self.windows.push(OpenWindow {
            frame: WindowFrame {
                id,
                app_id: entry.id.clone(),
                title: entry.title.clone(),
                icon: entry.icon.clone(),
                rect: entry.geometry,
                z_index: 0,
                is_focused: true,
                minimized: false,
            },
            content,
        });
        self.normalize_stack();
        logging::log!("opened `{}` in window {}", entry.id, id.0);
        OpenOutcome::Opened(id)
    }

    /// Open window that an open request for `entry` would land on under the dedup policy.
    pub fn find_matching(&self, entry: &AppEntry) -> Option<WindowId> {
        self.windows
            .iter()
            .find(|window| match self.dedup {
                DedupPolicy::ByTitle => window.frame.title == entry.title,
                DedupPolicy::ByAppId => window.frame.app_id == entry.id,
            })
            .map(|window| window.frame.id)
    }

    /// Brings a window to the front, restoring it when minimized.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::WindowNotFound`] for ids that are not open.
    pub fn focus(&mut self, window_id: WindowId) -> Result<(), WindowError> {
        if self.raise(window_id) {
            Ok(())
        } else {
            Err(WindowError::WindowNotFound(window_id))
        }
    }

    /// Hides a window and passes focus to the next visible window down the stack.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::WindowNotFound`] for ids that are not open.
    pub fn minimize(&mut self, window_id: WindowId) -> Result<(), WindowError> {
        let window = self
            .window_mut(window_id)
            .ok_or(WindowError::WindowNotFound(window_id))?;
        window.frame.minimized = true;
        window.frame.is_focused = false;
        self.normalize_stack();
        Ok(())
    }

    /// Shows a minimized window again on top of the stack.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::WindowNotFound`] for ids that are not open.
    pub fn restore(&mut self, window_id: WindowId) -> Result<(), WindowError> {
        self.focus(window_id)
    }

    /// Removes a window and drops its content. Ids are never handed out again.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::WindowNotFound`] for ids that are not open.
    pub fn close(&mut self, window_id: WindowId) -> Result<(), WindowError> {
        let index = self
            .index_of(window_id)
            .ok_or(WindowError::WindowNotFound(window_id))?;
        let closed = self.windows.remove(index);
        self.normalize_stack();
        logging::log!(
            "closed window {} (`{}`)",
            closed.frame.id.0,
            closed.frame.app_id
        );
        Ok(())
    }

    /// Taskbar button semantics: restore a minimized window, minimize the focused one, and
    /// focus any other.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::WindowNotFound`] for ids that are not open.
    pub fn toggle_taskbar_window(&mut self, window_id: WindowId) -> Result<(), WindowError> {
        let (minimized, focused) = self
            .frame(window_id)
            .map(|frame| (frame.minimized, frame.is_focused))
            .ok_or(WindowError::WindowNotFound(window_id))?;
        if minimized {
            self.restore(window_id)
        } else if focused {
            self.minimize(window_id)
        } else {
            self.focus(window_id)
        }
    }

    /// Focused window, if any.
    pub fn active_window(&self) -> Option<WindowId> {
        self.windows
            .iter()
            .find(|window| window.frame.is_focused)
            .map(|window| window.frame.id)
    }

    pub fn frame(&self, window_id: WindowId) -> Option<&WindowFrame> {
        self.windows
            .iter()
            .find(|window| window.frame.id == window_id)
            .map(|window| &window.frame)
    }

    /// Frames in stacking order, bottom first.
    pub fn frames(&self) -> Vec<WindowFrame> {
        self.windows.iter().map(|window| window.frame.clone()).collect()
    }

    pub fn content(&self, window_id: WindowId) -> Option<&WindowContent> {
        self.windows
            .iter()
            .find(|window| window.frame.id == window_id)
            .map(|window| &window.content)
    }

    fn index_of(&self, window_id: WindowId) -> Option<usize> {
        self.windows
            .iter()
            .position(|window| window.frame.id == window_id)
    }

    fn window_mut(&mut self, window_id: WindowId) -> Option<&mut OpenWindow> {
        self.windows
            .iter_mut()
            .find(|window| window.frame.id == window_id)
    }

    fn raise(&mut self, window_id: WindowId) -> bool {
        let Some(index) = self.index_of(window_id) else {
            return false;
        };

        let already_focused_top = index + 1 == self.windows.len()
            && self.windows[index].frame.is_focused
            && !self.windows[index].frame.minimized;
        if already_focused_top {
            return true;
        }

        for window in &mut self.windows {
            window.frame.is_focused = false;
        }
        let mut window = self.windows.remove(index);
        window.frame.is_focused = true;
        window.frame.minimized = false;
        self.windows.push(window);
        self.normalize_stack();
        true
    }

    /// z-index follows stack position; at most one window is focused and it is never minimized.
    fn normalize_stack(&mut self) {
        let mut has_focused = false;
        for (idx, window) in self.windows.iter_mut().enumerate() {
            let frame = &mut window.frame;
            frame.z_index = (idx + 1) as u32;
            if frame.minimized {
                frame.is_focused = false;
            }
            if frame.is_focused {
                if has_focused {
                    frame.is_focused = false;
                } else {
                    has_focused = true;
                }
            }
        }

        if !has_focused {
            if let Some(top_visible) = self
                .windows
                .iter_mut()
                .rev()
                .find(|window| !window.frame.minimized)
            {
                top_visible.frame.is_focused = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use leptos::{IntoView, View};
    use ordo_app_contract::{AppMountContext, LocalAppModule, LocalWidget};
    use ordo_platform_host::MemoryTextStore;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        error::ResolutionError,
        model::{AppKind, WindowRect},
        resolver::LocalAppRegistry,
    };

    struct Blank;

    impl LocalWidget for Blank {
        fn component_name(&self) -> &'static str {
            "Blank"
        }

        fn mount(&self, _context: AppMountContext) -> View {
            ().into_view()
        }
    }

    fn build_blank(_: &AppServices) -> Result<Box<dyn LocalWidget>, String> {
        Ok(Box::new(Blank))
    }

    fn entry(id: &str, title: &str, kind: AppKind, url: Option<&str>) -> AppEntry {
        AppEntry {
            id: id.to_string(),
            title: title.to_string(),
            icon: "📄".to_string(),
            kind,
            url: url.map(str::to_string),
            component: Some("test.blank.Blank".to_string()),
            geometry: WindowRect {
                x: 40,
                y: 60,
                w: 320,
                h: 240,
            },
        }
    }

    struct Fixture {
        registry: AppRegistry,
        resolver: AppResolver,
        services: AppServices,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                registry: AppRegistry::from_entries([
                    entry("notes", "Notes", AppKind::Local, None),
                    entry("docs", "Docs", AppKind::Remote, Some("https://docs.example")),
                    entry("tool-a", "Tool", AppKind::Local, None),
                    entry("tool-b", "Tool", AppKind::Remote, Some("https://tool.example")),
                    entry("broken", "Broken", AppKind::Remote, None),
                ]),
                resolver: AppResolver::new(
                    LocalAppRegistry::default()
                        .with_module(LocalAppModule::new("test.blank.Blank", build_blank)),
                ),
                services: AppServices::new(Rc::new(MemoryTextStore::default())),
            }
        }

        fn open(&self, host: &mut WindowHost, app_id: &str) -> OpenOutcome {
            host.open(&self.registry, &self.resolver, &self.services, app_id)
        }
    }

    fn opened(outcome: OpenOutcome) -> WindowId {
        match outcome {
            OpenOutcome::Opened(id) => id,
            other => panic!("expected a new window, got {other:?}"),
        }
    }

    #[test]
    fn open_mounts_entry_geometry_and_focuses() {
        let fixture = Fixture::new();
        let mut host = WindowHost::default();

        let id = opened(fixture.open(&mut host, "notes"));

        let frame = host.frame(id).expect("frame").clone();
        assert_eq!(frame.title, "Notes");
        assert_eq!(
            frame.rect,
            WindowRect {
                x: 40,
                y: 60,
                w: 320,
                h: 240
            }
        );
        assert!(frame.is_focused);
        assert_eq!(host.active_window(), Some(id));
        assert_eq!(
            host.content(id).map(WindowContent::describe).as_deref(),
            Some("local widget Blank")
        );
    }

    #[test]
    fn reopening_focuses_existing_window() {
        let fixture = Fixture::new();
        let mut host = WindowHost::default();
        let notes = opened(fixture.open(&mut host, "notes"));
        let docs = opened(fixture.open(&mut host, "docs"));
        assert_eq!(host.active_window(), Some(docs));

        assert_eq!(fixture.open(&mut host, "notes"), OpenOutcome::Focused(notes));
        assert_eq!(host.len(), 2);
        assert_eq!(host.active_window(), Some(notes));
        let order: Vec<_> = host.frames().into_iter().map(|f| (f.id, f.z_index)).collect();
        assert_eq!(order, vec![(docs, 1), (notes, 2)]);
    }

    #[test]
    fn title_dedup_matches_across_app_ids() {
        let fixture = Fixture::new();
        let mut host = WindowHost::default();
        let first = opened(fixture.open(&mut host, "tool-a"));

        assert_eq!(fixture.open(&mut host, "tool-b"), OpenOutcome::Focused(first));
        assert_eq!(host.len(), 1);
    }

    #[test]
    fn app_id_dedup_keeps_same_titled_apps_apart() {
        let fixture = Fixture::new();
        let mut host = WindowHost::new(DedupPolicy::ByAppId);
        let first = opened(fixture.open(&mut host, "tool-a"));
        let second = opened(fixture.open(&mut host, "tool-b"));

        assert_ne!(first, second);
        assert_eq!(fixture.open(&mut host, "tool-a"), OpenOutcome::Focused(first));
        assert_eq!(host.len(), 2);
    }

    #[test]
    fn unknown_or_unresolvable_apps_leave_windows_unchanged() {
        let fixture = Fixture::new();
        let mut host = WindowHost::default();
        opened(fixture.open(&mut host, "notes"));
        let before = host.frames();

        assert_eq!(
            fixture.open(&mut host, "ghost"),
            OpenOutcome::Ignored(OpenIgnored::UnknownAppId("ghost".to_string()))
        );
        assert_eq!(
            fixture.open(&mut host, "broken"),
            OpenOutcome::Ignored(OpenIgnored::ResolutionFailed(
                ResolutionError::MissingUrl {
                    app_id: "broken".to_string()
                }
            ))
        );
        assert_eq!(host.frames(), before);
    }

    #[test]
    fn minimize_passes_focus_and_reopen_restores() {
        let fixture = Fixture::new();
        let mut host = WindowHost::default();
        let notes = opened(fixture.open(&mut host, "notes"));
        let docs = opened(fixture.open(&mut host, "docs"));

        host.minimize(docs).expect("minimize");
        assert_eq!(host.active_window(), Some(notes));
        assert!(host.frame(docs).expect("docs").minimized);

        assert_eq!(fixture.open(&mut host, "docs"), OpenOutcome::Focused(docs));
        let frame = host.frame(docs).expect("docs");
        assert!(!frame.minimized);
        assert!(frame.is_focused);
    }

    #[test]
    fn taskbar_toggle_cycles_focus_minimize_restore() {
        let fixture = Fixture::new();
        let mut host = WindowHost::default();
        let notes = opened(fixture.open(&mut host, "notes"));
        let docs = opened(fixture.open(&mut host, "docs"));

        host.toggle_taskbar_window(notes).expect("focus");
        assert_eq!(host.active_window(), Some(notes));

        host.toggle_taskbar_window(notes).expect("minimize");
        assert!(host.frame(notes).expect("notes").minimized);
        assert_eq!(host.active_window(), Some(docs));

        host.toggle_taskbar_window(notes).expect("restore");
        assert!(!host.frame(notes).expect("notes").minimized);
        assert_eq!(host.active_window(), Some(notes));
    }

    #[test]
    fn closed_ids_are_not_reused() {
        let fixture = Fixture::new();
        let mut host = WindowHost::default();
        let notes = opened(fixture.open(&mut host, "notes"));
        host.close(notes).expect("close");
        assert!(host.is_empty());
        assert!(host.content(notes).is_none());

        let reopened = opened(fixture.open(&mut host, "notes"));
        assert_ne!(reopened, notes);
    }

    #[test]
    fn window_actions_on_missing_ids_fail() {
        let mut host = WindowHost::default();
        let ghost = WindowId(42);
        assert_eq!(host.focus(ghost), Err(WindowError::WindowNotFound(ghost)));
        assert_eq!(host.minimize(ghost), Err(WindowError::WindowNotFound(ghost)));
        assert_eq!(host.close(ghost), Err(WindowError::WindowNotFound(ghost)));
        assert_eq!(
            host.toggle_taskbar_window(ghost),
            Err(WindowError::WindowNotFound(ghost))
        );
    }

    #[test]
    fn all_minimized_leaves_nothing_focused() {
        let fixture = Fixture::new();
        let mut host = WindowHost::default();
        let notes = opened(fixture.open(&mut host, "notes"));
        host.minimize(notes).expect("minimize");
        assert_eq!(host.active_window(), None);
    }
}
