//! One command view driven end to end.
//!
//! [`ViewSession`] owns everything that lives across render cycles: the
//! current document, the previous layout generation, the applied query and
//! the search debounce timer, form state and the submenu cache. All work is
//! synchronous; the caller owns the clock and calls [`ViewSession::poll`]
//! when [`ViewSession::next_deadline`] passes.

mod form;

pub use form::FormSession;

use crate::actions::{
    ActionOutcome, ActionPanel, ActionPanelBuilder, Invocation, KeybindResolver, Shortcut,
    SubmenuCache, default_shortcuts, invoke,
};
use crate::config::Config;
use crate::notify::{Debouncer, NotificationBridge};
use crate::reconcile::{
    Layout, Reconciler, Reconciliation, SectionChange, Selection, SelectionEvent, SelectionPolicy,
};
use crate::search::{FilterOptions, FuzzyScorer, SectionData, filter_sections};
use crate::{Error, Result};
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, warn};
use vista_types::list::items;
use vista_types::{
    ActionPanelModel, DropdownItem, DropdownModel, GridLayout, Notifier, ViewDocument,
};

pub struct ViewSession<N: Notifier> {
    config: Config,
    grid_defaults: GridLayout,
    scorer: FuzzyScorer,
    keybinds: KeybindResolver,
    default_shortcuts: Vec<Shortcut>,
    submenus: SubmenuCache,
    bridge: NotificationBridge<N>,
    reconciler: Reconciler,
    debouncer: Debouncer,
    form: FormSession,
    document: ViewDocument,
    rendered: bool,
    query: String,
    pending_query: Option<String>,
    accessory_value: Option<String>,
}

impl<N: Notifier> ViewSession<N> {
    #[must_use]
    pub fn new(config: Config, notifier: N) -> Self {
        Self {
            grid_defaults: config.grid.layout(),
            scorer: FuzzyScorer::new(&config.search),
            keybinds: KeybindResolver::from_config(&config.shortcuts),
            default_shortcuts: default_shortcuts(&config.shortcuts),
            submenus: SubmenuCache::new(),
            bridge: NotificationBridge::new(notifier),
            reconciler: Reconciler::new(),
            debouncer: Debouncer::new(config.search.throttle()),
            form: FormSession::new(),
            document: ViewDocument::default(),
            rendered: false,
            query: String::new(),
            pending_query: None,
            accessory_value: None,
            config,
        }
    }

    /// Take a freshly parsed document and reconcile it against the last one.
    ///
    /// A change of view kind tears everything down and selects the first
    /// item. Otherwise the selection follows its item, unless the last
    /// search went to an extension that filters itself.
    pub fn render(&mut self, mut document: ViewDocument) -> Reconciliation {
        let first = !self.rendered;
        let swapped = self.rendered && self.document.kind() != document.kind();
        if swapped {
            debug!(from = %self.document.kind(), to = %document.kind(), "View swapped");
            self.teardown();
        }

        reuse_children(&mut document, &mut self.document);
        self.document = document;
        self.rendered = true;

        if let ViewDocument::Form(form) = &self.document {
            self.form.render(form);
            if (first || swapped)
                && let Some(target) = self.form.autofocus_target().map(str::to_string)
            {
                if let Err(e) = self.form.focus(&target, &mut self.bridge) {
                    warn!("Failed to focus field '{target}': {e}");
                }
            }
        }

        if !matches!(self.document, ViewDocument::List(_) | ViewDocument::Grid(_)) {
            self.reconciler.reset();
            let changes = if first || swapped {
                vec![SectionChange::Reset {
                    sections: Vec::new(),
                }]
            } else {
                Vec::new()
            };
            return Reconciliation {
                changes,
                ..Reconciliation::default()
            };
        }

        if let Some(text) = controlled_search_text(&self.document) {
            self.query = text.to_string();
            self.pending_query = None;
            self.debouncer.cancel();
        }
        self.sync_accessory();

        let policy = if self.bridge.take_reset_selection() || swapped {
            SelectionPolicy::SelectFirst
        } else {
            SelectionPolicy::PreserveSelection
        };
        self.reconcile(policy)
    }

    /// Local search input.
    ///
    /// Throttled documents defer the whole cycle until the debounce window
    /// closes; each call restarts the window. Otherwise the cycle runs now.
    pub fn set_search_text(&mut self, text: &str, now: Instant) -> Option<Reconciliation> {
        let throttle = match &self.document {
            ViewDocument::List(list) => list.throttle,
            ViewDocument::Grid(grid) => grid.throttle,
            _ => return None,
        };
        if self.pending_query.is_none() && text == self.query {
            return None;
        }

        if throttle {
            self.pending_query = Some(text.to_string());
            self.debouncer.schedule(now);
            debug!(text, "Search deferred");
            return None;
        }
        Some(self.apply_search(text.to_string()))
    }

    /// Run a deferred search cycle if its window has closed.
    pub fn poll(&mut self, now: Instant) -> Option<Reconciliation> {
        if !self.debouncer.poll(now) {
            return None;
        }
        let text = self.pending_query.take()?;
        Some(self.apply_search(text))
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    pub fn select_next(&mut self) -> Option<SelectionEvent> {
        let event = self.reconciler.select_next();
        self.dispatch(event.as_ref());
        event
    }

    pub fn select_prev(&mut self) -> Option<SelectionEvent> {
        let event = self.reconciler.select_prev();
        self.dispatch(event.as_ref());
        event
    }

    pub fn select_first(&mut self) -> Option<SelectionEvent> {
        let event = self.reconciler.select_first();
        self.dispatch(event.as_ref());
        event
    }

    pub fn select_last(&mut self) -> Option<SelectionEvent> {
        let event = self.reconciler.select_last();
        self.dispatch(event.as_ref());
        event
    }

    pub fn select_id(&mut self, id: &str) -> Option<SelectionEvent> {
        let event = self.reconciler.select_id(id);
        self.dispatch(event.as_ref());
        event
    }

    /// Selection reported by the rendering side.
    pub fn select_at(&mut self, section: usize, index: usize) -> Option<SelectionEvent> {
        let event = self.reconciler.select_at(section, index);
        self.dispatch(event.as_ref());
        event
    }

    /// Action panel for the current selection (or the document).
    pub fn actions(&mut self) -> Option<ActionPanel> {
        let selected = self.reconciler.selection().map(|s| s.id.as_str());
        let model = action_model(&self.document, selected)?;
        let builder = ActionPanelBuilder::new(&self.keybinds, &self.default_shortcuts);
        Some(builder.build(model, &mut self.submenus))
    }

    /// Activate the primary action of the current selection.
    ///
    /// # Errors
    ///
    /// See [`activate`](Self::activate).
    pub fn activate_primary(&mut self) -> Result<ActionOutcome> {
        self.activate(0)
    }

    /// Activate the action at a flat index of the current panel.
    ///
    /// Callback actions with an `onSubmit` handler on a form receive the
    /// form values.
    ///
    /// # Errors
    ///
    /// `Error::NoActiveView` before any valid render, `Error::NoSuchAction`
    /// when the panel has no such entry, `Error::Submit` when a form field
    /// carries an error.
    pub fn activate(&mut self, index: usize) -> Result<ActionOutcome> {
        if matches!(self.document, ViewDocument::Invalid { .. }) {
            return Err(Error::NoActiveView);
        }
        let panel = self.actions().ok_or(Error::NoSuchAction(index))?;
        let action = panel.get(index).ok_or(Error::NoSuchAction(index))?;

        let submission = match (&self.document, &action.invocation) {
            (
                ViewDocument::Form(_),
                Invocation::Callback {
                    on_submit: Some(_), ..
                },
            ) => Some(self.form.submit()?),
            _ => None,
        };
        invoke(action, &mut self.bridge, &self.submenus, submission.as_ref())
    }

    /// Text typed into an open submenu. The extension hears about it when it
    /// listens; the cached panel is narrowed locally unless filtering is off.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownSubmenu` if `submenu` is not a built submenu.
    pub fn search_submenu(&mut self, submenu: &Invocation, text: &str) -> Result<ActionPanel> {
        let Invocation::Submenu {
            key,
            on_search_text_change,
            filtering,
            ..
        } = submenu
        else {
            return Err(Error::UnknownSubmenu(String::new()));
        };
        let panel = self
            .submenus
            .get(key)
            .ok_or_else(|| Error::UnknownSubmenu(key.clone()))?;

        self.bridge
            .input_search_changed(on_search_text_change.as_deref(), text);
        Ok(panel.filter(text, &mut self.scorer, *filtering))
    }

    /// [`search_submenu`](Self::search_submenu) for a submenu named by its
    /// cache key, as found in the current panel or any open submenu.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownSubmenu` if no built panel offers that submenu.
    pub fn search_submenu_key(&mut self, key: &str, text: &str) -> Result<ActionPanel> {
        let current = self.actions();
        let invocation = current
            .iter()
            .chain(self.submenus.panels())
            .flat_map(|panel| panel.actions())
            .map(|action| &action.invocation)
            .find(|invocation| {
                matches!(invocation, Invocation::Submenu { key: candidate, .. } if candidate == key)
            })
            .cloned()
            .ok_or_else(|| Error::UnknownSubmenu(key.to_string()))?;
        self.search_submenu(&invocation, text)
    }

    /// Value picked in the search bar dropdown. Returns whether it changed.
    pub fn dropdown_changed(&mut self, value: &str) -> bool {
        let Some(dropdown) = search_accessory(&self.document) else {
            return false;
        };
        if self.accessory_value.as_deref() == Some(value) {
            return false;
        }
        self.accessory_value = Some(value.to_string());
        self.bridge
            .dropdown_changed(dropdown.on_change.as_deref(), value);
        true
    }

    /// Text typed into the search bar dropdown.
    pub fn dropdown_search_changed(&mut self, text: &str) {
        if let Some(dropdown) = search_accessory(&self.document) {
            self.bridge
                .input_search_changed(dropdown.on_search_text_change.as_deref(), text);
        }
    }

    /// Search bar dropdown entries matching `query`.
    pub fn dropdown_items(&mut self, query: &str) -> Vec<SectionData<'_, DropdownItem>> {
        let Some(dropdown) = search_accessory(&self.document) else {
            return Vec::new();
        };
        let options = FilterOptions {
            filtering: dropdown.filtering,
            sort_sections: self.config.search.sort_sections,
        };
        filter_sections(&dropdown.children, query, &mut self.scorer, options)
    }

    /// # Errors
    ///
    /// Returns `Error::UnknownField` if the form has no such field.
    pub fn set_field_value(&mut self, id: &str, value: Value) -> Result<()> {
        self.form.set_value(id, value, &mut self.bridge)
    }

    /// # Errors
    ///
    /// Returns `Error::UnknownField` if the form has no such field.
    pub fn set_field_search_text(&mut self, id: &str, text: &str) -> Result<()> {
        self.form.set_search_text(id, text, &mut self.bridge)
    }

    /// # Errors
    ///
    /// Returns `Error::UnknownField` if the form has no such field.
    pub fn focus_field(&mut self, id: &str) -> Result<()> {
        self.form.focus(id, &mut self.bridge)
    }

    /// # Errors
    ///
    /// Returns `Error::UnknownField` if the form has no such field.
    pub fn blur_field(&mut self, id: &str) -> Result<()> {
        self.form.blur(id, &mut self.bridge)
    }

    #[must_use]
    pub fn document(&self) -> &ViewDocument {
        &self.document
    }

    #[must_use]
    pub fn layout(&self) -> Option<&Layout> {
        self.reconciler.layout()
    }

    #[must_use]
    pub fn selection(&self) -> Option<&Selection> {
        self.reconciler.selection()
    }

    /// Query the current layout was filtered with.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn accessory_value(&self) -> Option<&str> {
        self.accessory_value.as_deref()
    }

    #[must_use]
    pub fn form(&self) -> &FormSession {
        &self.form
    }

    #[must_use]
    pub fn notifier(&self) -> &N {
        self.bridge.notifier()
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        self.bridge.notifier_mut()
    }

    fn apply_search(&mut self, text: String) -> Reconciliation {
        self.query = text;
        let filtering = match &self.document {
            ViewDocument::List(list) => list.filtering,
            ViewDocument::Grid(grid) => grid.filtering,
            _ => false,
        };
        self.bridge.search_text_changed(
            search_handler(&self.document),
            &self.query,
            filtering,
        );

        let policy = if filtering {
            SelectionPolicy::SelectFirst
        } else {
            SelectionPolicy::PreserveSelection
        };
        self.reconcile(policy)
    }

    fn reconcile(&mut self, policy: SelectionPolicy) -> Reconciliation {
        let layout = match &self.document {
            ViewDocument::List(list) => {
                let options = self.filter_options(list.filtering);
                let sections =
                    filter_sections(&list.children, &self.query, &mut self.scorer, options);
                Layout::from_sections(&sections)
            }
            ViewDocument::Grid(grid) => {
                let options = self.filter_options(grid.filtering);
                let sections =
                    filter_sections(&grid.children, &self.query, &mut self.scorer, options);
                Layout::from_grid_sections(&sections, grid.layout.inherit(self.grid_defaults))
            }
            _ => Layout::default(),
        };

        let result = self
            .reconciler
            .apply(layout, policy, forced_selection(&self.document));
        self.dispatch(result.event.as_ref());
        result
    }

    fn filter_options(&self, filtering: bool) -> FilterOptions {
        FilterOptions {
            filtering,
            sort_sections: self.config.search.sort_sections,
        }
    }

    fn dispatch(&mut self, event: Option<&SelectionEvent>) {
        match event {
            Some(SelectionEvent::Changed { selection }) => self
                .bridge
                .selection_changed(selection_handler(&self.document), &selection.id),
            Some(SelectionEvent::Cleared) => self.bridge.selection_cleared(),
            None => {}
        }
    }

    /// Initial search bar dropdown value: controlled `value`, else
    /// `defaultValue`, else the first item. `onChange` fires once when it is
    /// first set.
    fn sync_accessory(&mut self) {
        let Some(dropdown) = search_accessory(&self.document) else {
            self.accessory_value = None;
            return;
        };

        if self.accessory_value.is_none() {
            let initial = dropdown
                .value
                .clone()
                .or_else(|| dropdown.default_value.clone())
                .or_else(|| dropdown.first_item().map(|item| item.value.clone()));
            if let Some(initial) = initial {
                self.bridge
                    .dropdown_changed(dropdown.on_change.as_deref(), &initial);
                self.accessory_value = Some(initial);
            }
        } else if let Some(controlled) = &dropdown.value {
            self.accessory_value = Some(controlled.clone());
        }
    }

    fn teardown(&mut self) {
        self.reconciler.reset();
        self.submenus.clear();
        self.form.clear();
        self.bridge.reset();
        self.debouncer.cancel();
        self.query.clear();
        self.pending_query = None;
        self.accessory_value = None;
    }
}

/// A render marked not dirty keeps the previous render's items.
fn reuse_children(next: &mut ViewDocument, previous: &mut ViewDocument) {
    match (next, previous) {
        (ViewDocument::List(next), ViewDocument::List(previous)) if !next.dirty => {
            next.children = std::mem::take(&mut previous.children);
        }
        (ViewDocument::Grid(next), ViewDocument::Grid(previous)) if !next.dirty => {
            next.children = std::mem::take(&mut previous.children);
        }
        _ => {}
    }
}

fn controlled_search_text(document: &ViewDocument) -> Option<&str> {
    match document {
        ViewDocument::List(list) => list.search_text.as_deref(),
        ViewDocument::Grid(grid) => grid.search_text.as_deref(),
        _ => None,
    }
}

fn forced_selection(document: &ViewDocument) -> Option<&str> {
    match document {
        ViewDocument::List(list) => list.selected_item_id.as_deref(),
        ViewDocument::Grid(grid) => grid.selected_item_id.as_deref(),
        _ => None,
    }
}

fn selection_handler(document: &ViewDocument) -> Option<&str> {
    match document {
        ViewDocument::List(list) => list.on_selection_changed.as_deref(),
        ViewDocument::Grid(grid) => grid.on_selection_changed.as_deref(),
        _ => None,
    }
}

fn search_handler(document: &ViewDocument) -> Option<&str> {
    match document {
        ViewDocument::List(list) => list.on_search_text_change.as_deref(),
        ViewDocument::Grid(grid) => grid.on_search_text_change.as_deref(),
        _ => None,
    }
}

fn search_accessory(document: &ViewDocument) -> Option<&DropdownModel> {
    match document {
        ViewDocument::List(list) => list.search_bar_accessory.as_ref(),
        ViewDocument::Grid(grid) => grid.search_bar_accessory.as_ref(),
        _ => None,
    }
}

/// Panel of the selected item, falling back to the document's own panel.
/// With nothing selected an empty view's panel takes precedence.
fn action_model<'a>(
    document: &'a ViewDocument,
    selected: Option<&str>,
) -> Option<&'a ActionPanelModel> {
    match document {
        ViewDocument::List(list) => match selected {
            Some(id) => items(&list.children)
                .filter(|item| item.id == id)
                .last()
                .and_then(|item| item.action_panel.as_ref())
                .or(list.actions.as_ref()),
            None => list
                .empty_view
                .as_ref()
                .and_then(|empty| empty.action_panel.as_ref())
                .or(list.actions.as_ref()),
        },
        ViewDocument::Grid(grid) => match selected {
            Some(id) => items(&grid.children)
                .filter(|item| item.id == id)
                .last()
                .and_then(|item| item.action_panel.as_ref())
                .or(grid.actions.as_ref()),
            None => grid
                .empty_view
                .as_ref()
                .and_then(|empty| empty.action_panel.as_ref())
                .or(grid.actions.as_ref()),
        },
        ViewDocument::Form(form) => form.actions.as_ref(),
        ViewDocument::Detail(detail) => detail.actions.as_ref(),
        ViewDocument::Invalid { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;
    use serde_json::json;
    use std::time::Duration;
    use vista_types::Notification;

    fn session() -> ViewSession<Vec<Notification>> {
        ViewSession::new(Config::default(), Vec::new())
    }

    fn list(props: serde_json::Value, ids: &[&str]) -> ViewDocument {
        let children: Vec<_> = ids
            .iter()
            .map(|id| json!({"type": "list-item", "props": {"id": id, "title": id}}))
            .collect();
        parse(&json!({"type": "list", "props": props, "children": children}))
    }

    fn handlers(session: &ViewSession<Vec<Notification>>) -> Vec<&str> {
        session
            .notifier()
            .iter()
            .map(|n| n.handler.as_str())
            .collect()
    }

    #[test]
    fn test_first_render_resets_and_selects_first() {
        let mut session = session();
        let result = session.render(list(json!({"onSelectionChange": "sel"}), &["a", "b"]));

        assert!(matches!(result.changes[..], [SectionChange::Reset { .. }]));
        assert_eq!(result.selection.unwrap().id, "a");
        assert_eq!(
            session.notifier(),
            &vec![Notification::new("sel", vec![json!("a")])]
        );
    }

    #[test]
    fn test_rerender_preserves_selection() {
        let mut session = session();
        session.render(list(json!({}), &["a", "b", "c"]));
        session.select_id("b");

        let result = session.render(list(json!({}), &["c", "b"]));
        assert_eq!(result.selection.unwrap().id, "b");
        assert!(result.event.is_none());
    }

    #[test]
    fn test_not_dirty_reuses_previous_items() {
        let mut session = session();
        session.render(list(json!({}), &["a", "b"]));
        let stale = parse(&json!({"type": "list", "dirty": false}));
        session.render(stale);
        assert_eq!(session.layout().unwrap().item_count(), 2);
    }

    #[test]
    fn test_view_swap_tears_down() {
        let mut session = session();
        session.render(list(json!({}), &["a"]));
        session.set_search_text("a", Instant::now());

        let form = parse(&json!({"type": "form", "children": [
            {"type": "text-field", "props": {"id": "name", "onFocus": "focused"}}
        ]}));
        let result = session.render(form);
        assert!(matches!(result.changes[..], [SectionChange::Reset { .. }]));
        assert_eq!(session.query(), "");
        assert!(session.selection().is_none());
        assert_eq!(session.form().focused(), Some("name"));
        assert_eq!(handlers(&session).last(), Some(&"focused"));
    }

    #[test]
    fn test_local_search_filters_and_selects_first() {
        let mut session = session();
        session.render(list(json!({}), &["apple", "banana", "cherry"]));
        session.select_id("cherry");

        let result = session.set_search_text("ban", Instant::now()).unwrap();
        assert_eq!(result.selection.unwrap().id, "banana");
        assert_eq!(session.layout().unwrap().item_count(), 1);
    }

    #[test]
    fn test_throttled_search_waits_for_quiet_period() {
        let mut session = session();
        session.render(list(json!({"throttle": true}), &["apple", "banana"]));
        let start = Instant::now();

        assert!(session.set_search_text("b", start).is_none());
        assert!(
            session
                .set_search_text("ba", start + Duration::from_millis(200))
                .is_none()
        );
        assert!(session.poll(start + Duration::from_millis(400)).is_none());

        let result = session.poll(start + Duration::from_millis(500)).unwrap();
        assert_eq!(session.query(), "ba");
        assert_eq!(result.selection.unwrap().id, "banana");
        assert!(session.next_deadline().is_none());
    }

    #[test]
    fn test_extension_filtering_resets_selection_on_next_render() {
        let mut session = session();
        let props = json!({"onSearchTextChange": "search"});
        session.render(list(props.clone(), &["a", "b"]));
        session.select_id("b");

        let result = session.set_search_text("x", Instant::now()).unwrap();
        assert_eq!(result.selection.unwrap().id, "b");
        assert_eq!(
            session.notifier().last(),
            Some(&Notification::new("search", vec![json!("x")]))
        );

        let result = session.render(list(props, &["b", "c"]));
        let selection = result.selection.unwrap();
        assert_eq!((selection.id.as_str(), selection.index), ("b", 0));
    }

    #[test]
    fn test_controlled_search_text_is_silent() {
        let mut session = session();
        let result = session.render(list(
            json!({"searchText": "ch", "onSearchTextChange": "search"}),
            &["apple", "cherry"],
        ));
        assert_eq!(session.query(), "ch");
        assert_eq!(result.selection.unwrap().id, "apple");
        assert!(session.notifier().is_empty());
    }

    #[test]
    fn test_selected_item_id_forces_selection() {
        let mut session = session();
        let result = session.render(list(json!({"selectedItemId": "c"}), &["a", "b", "c"]));
        assert_eq!(result.selection.unwrap().id, "c");

        let result = session.render(list(json!({"selectedItemId": "zz"}), &["a", "b", "c"]));
        assert_eq!(result.selection.unwrap().id, "c");
    }

    #[test]
    fn test_emptying_clears_once() {
        let mut session = session();
        session.render(list(json!({}), &["a"]));
        let first = session.render(list(json!({}), &[]));
        let second = session.render(list(json!({}), &[]));
        assert_eq!(first.event, Some(SelectionEvent::Cleared));
        assert!(second.event.is_none());
    }

    #[test]
    fn test_navigation_notifies() {
        let mut session = session();
        session.render(list(json!({"onSelectionChange": "sel"}), &["a", "b"]));
        session.select_next();
        session.select_next();
        session.select_prev();

        let args: Vec<_> = session.notifier().iter().map(|n| n.args[0].clone()).collect();
        assert_eq!(args, vec![json!("a"), json!("b"), json!("a")]);
    }

    #[test]
    fn test_accessory_initial_value_fires_once() {
        let doc = || {
            parse(&json!({"type": "list", "children": [
                {"type": "dropdown", "props": {"onChange": "filter"}, "children": [
                    {"type": "dropdown-item", "props": {"title": "All", "value": "all"}},
                    {"type": "dropdown-item", "props": {"title": "Mine", "value": "mine"}}
                ]}
            ]}))
        };
        let mut session = session();
        session.render(doc());
        session.render(doc());
        assert_eq!(session.accessory_value(), Some("all"));
        assert_eq!(
            session.notifier(),
            &vec![Notification::new("filter", vec![json!("all")])]
        );

        assert!(session.dropdown_changed("mine"));
        assert!(!session.dropdown_changed("mine"));
        assert_eq!(session.notifier().len(), 2);
        assert_eq!(session.dropdown_items("mi")[0].items.len(), 1);
    }

    #[test]
    fn test_actions_follow_selection() {
        let doc = parse(&json!({"type": "list", "children": [
            {"type": "list-item", "props": {"id": "a", "title": "A"}, "children": [
                {"type": "action-panel", "children": [
                    {"type": "action", "props": {"title": "Open A", "onAction": "openA"}}
                ]}
            ]},
            {"type": "list-item", "props": {"id": "b", "title": "B"}},
            {"type": "action-panel", "children": [
                {"type": "action", "props": {"title": "Refresh", "onAction": "refresh"}}
            ]}
        ]}));
        let mut session = session();
        session.render(doc);

        assert_eq!(session.actions().unwrap().primary().unwrap().title, "Open A");
        session.activate_primary().unwrap();
        session.select_next();
        assert_eq!(session.actions().unwrap().primary().unwrap().title, "Refresh");
        assert!(matches!(session.activate(5), Err(Error::NoSuchAction(5))));
        assert_eq!(handlers(&session), vec!["openA"]);
    }

    #[test]
    fn test_submenu_opens_and_filters() {
        let doc = parse(&json!({"type": "detail", "children": [
            {"type": "action-panel", "children": [
                {"type": "action-panel-submenu", "props": {"title": "Theme", "onOpen": "opened"}, "children": [
                    {"type": "action", "props": {"title": "Dark", "onAction": "dark"}},
                    {"type": "action", "props": {"title": "Light", "onAction": "light"}}
                ]}
            ]}
        ]}));
        let mut session = session();
        session.render(doc);

        let ActionOutcome::OpenSubmenu(panel) = session.activate_primary().unwrap() else {
            panic!("expected submenu");
        };
        assert_eq!(panel.len(), 2);

        let actions = session.actions().unwrap();
        let invocation = &actions.primary().unwrap().invocation;
        let narrowed = session.search_submenu(invocation, "lig").unwrap();
        assert_eq!(narrowed.len(), 1);
        assert_eq!(narrowed.primary().unwrap().title, "Light");

        let Invocation::Submenu { key, .. } = invocation else {
            panic!("expected submenu invocation");
        };
        let by_key = session.search_submenu_key(key, "dar").unwrap();
        assert_eq!(by_key.primary().unwrap().title, "Dark");
        assert!(matches!(
            session.search_submenu_key("missing", "x"),
            Err(Error::UnknownSubmenu(_))
        ));
        assert_eq!(handlers(&session), vec!["opened"]);
    }

    #[test]
    fn test_activate_before_render() {
        let mut session = session();
        assert!(matches!(session.activate_primary(), Err(Error::NoActiveView)));
    }

    #[test]
    fn test_form_submit_passes_values() {
        let doc = parse(&json!({"type": "form", "children": [
            {"type": "action-panel", "children": [
                {"type": "action", "props": {"title": "Save", "onAction": "clicked", "onSubmit": "submit"}}
            ]},
            {"type": "text-field", "props": {"id": "name"}}
        ]}));
        let mut session = session();
        session.render(doc);
        session.set_field_value("name", json!("Ada")).unwrap();
        session.activate_primary().unwrap();

        assert_eq!(
            session.notifier().last(),
            Some(&Notification::new("submit", vec![json!({"name": "Ada"})]))
        );
    }
}
