use super::{Layout, SectionChange, Selection, SelectionPolicy, reconcile};
use serde::Serialize;
use tracing::debug;

/// Selection transition produced by a cycle or a navigation step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SelectionEvent {
    /// A different item is now selected
    Changed { selection: Selection },
    /// The collection became empty; fired once per emptying
    Cleared,
}

/// Result of one reconcile cycle, handed to the rendering side.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Reconciliation {
    pub changes: Vec<SectionChange>,
    pub selection: Option<Selection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<SelectionEvent>,
}

/// Holds the previous layout generation and the current selection.
///
/// Each [`apply`](Self::apply) replaces the previous generation with the new
/// one; nothing else keeps a reference to it across cycles.
#[derive(Debug, Default)]
pub struct Reconciler {
    previous: Option<Layout>,
    selection: Option<Selection>,
    cleared: bool,
}

impl Reconciler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconcile `next` against the previous generation.
    ///
    /// `forced` is an extension-controlled selection; when it exists in
    /// `next` it wins over `policy`.
    pub fn apply(
        &mut self,
        next: Layout,
        policy: SelectionPolicy,
        forced: Option<&str>,
    ) -> Reconciliation {
        let (policy, anchor) = match forced {
            Some(id) if next.position(id).is_some() => {
                (SelectionPolicy::PreserveSelection, Some(id))
            }
            _ => (policy, self.selection.as_ref().map(|s| s.id.as_str())),
        };

        let (changes, selection) = reconcile(self.previous.as_ref(), &next, policy, anchor);
        debug!(
            ?policy,
            sections = next.sections.len(),
            items = next.item_count(),
            changes = changes.len(),
            selected = selection.as_ref().map(|s| s.id.as_str()),
            "Reconciled layout"
        );

        self.previous = Some(next);
        let event = self.settle(selection.clone());
        Reconciliation {
            changes,
            selection,
            event,
        }
    }

    /// Drop the previous generation. The next [`apply`](Self::apply) resets
    /// the rendered collection.
    pub fn reset(&mut self) {
        self.previous = None;
        self.selection = None;
        self.cleared = false;
    }

    #[must_use]
    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    #[must_use]
    pub fn layout(&self) -> Option<&Layout> {
        self.previous.as_ref()
    }

    pub fn select_first(&mut self) -> Option<SelectionEvent> {
        let position = self.previous.as_ref()?.first()?;
        self.select_position(position)
    }

    pub fn select_last(&mut self) -> Option<SelectionEvent> {
        let position = self.previous.as_ref()?.last()?;
        self.select_position(position)
    }

    /// Move down one item; stays put at the end.
    pub fn select_next(&mut self) -> Option<SelectionEvent> {
        let layout = self.previous.as_ref()?;
        let position = match &self.selection {
            Some(current) => layout.next(current.section, current.index)?,
            None => layout.first()?,
        };
        self.select_position(position)
    }

    /// Move up one item; stays put at the start.
    pub fn select_prev(&mut self) -> Option<SelectionEvent> {
        let layout = self.previous.as_ref()?;
        let position = match &self.selection {
            Some(current) => layout.prev(current.section, current.index)?,
            None => layout.first()?,
        };
        self.select_position(position)
    }

    pub fn select_id(&mut self, id: &str) -> Option<SelectionEvent> {
        let position = self.previous.as_ref()?.position(id)?;
        self.select_position(position)
    }

    /// Select a position reported by the rendering side.
    pub fn select_at(&mut self, section: usize, index: usize) -> Option<SelectionEvent> {
        self.select_position((section, index))
    }

    fn select_position(&mut self, position: (usize, usize)) -> Option<SelectionEvent> {
        let selection = Selection::at(self.previous.as_ref()?, position)?;
        self.settle(Some(selection))
    }

    fn settle(&mut self, selection: Option<Selection>) -> Option<SelectionEvent> {
        let previous_id = self.selection.as_ref().map(|s| s.id.clone());
        self.selection = selection;

        match &self.selection {
            Some(selection) => {
                self.cleared = false;
                (previous_id.as_deref() != Some(selection.id.as_str())).then(|| {
                    SelectionEvent::Changed {
                        selection: selection.clone(),
                    }
                })
            }
            None if self.cleared => None,
            None => {
                self.cleared = true;
                Some(SelectionEvent::Cleared)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconcile::SectionSummary;

    fn layout(sections: &[&[&str]]) -> Layout {
        Layout {
            sections: sections
                .iter()
                .map(|ids| SectionSummary {
                    name: String::new(),
                    item_count: ids.len(),
                    columns: None,
                    aspect_ratio: None,
                })
                .collect(),
            ids: sections
                .iter()
                .map(|ids| ids.iter().map(ToString::to_string).collect())
                .collect(),
        }
    }

    fn changed_id(event: Option<SelectionEvent>) -> Option<String> {
        match event {
            Some(SelectionEvent::Changed { selection }) => Some(selection.id),
            _ => None,
        }
    }

    #[test]
    fn test_first_apply_selects_first_and_resets() {
        let mut reconciler = Reconciler::new();
        let result = reconciler.apply(layout(&[&["a", "b"]]), SelectionPolicy::PreserveSelection, None);
        assert!(matches!(result.changes[0], SectionChange::Reset { .. }));
        assert_eq!(changed_id(result.event), Some("a".to_string()));
    }

    #[test]
    fn test_same_selection_emits_no_event() {
        let mut reconciler = Reconciler::new();
        reconciler.apply(layout(&[&["a", "b"]]), SelectionPolicy::SelectFirst, None);
        let result = reconciler.apply(layout(&[&["c"], &["a"]]), SelectionPolicy::PreserveSelection, None);
        assert_eq!(result.event, None);
        let selection = result.selection.unwrap();
        assert_eq!((selection.section, selection.index), (1, 0));
    }

    #[test]
    fn test_cleared_fires_once() {
        let mut reconciler = Reconciler::new();
        reconciler.apply(layout(&[&["a"]]), SelectionPolicy::SelectFirst, None);

        let first = reconciler.apply(layout(&[&[]]), SelectionPolicy::PreserveSelection, None);
        assert_eq!(first.event, Some(SelectionEvent::Cleared));
        let second = reconciler.apply(layout(&[]), SelectionPolicy::SelectFirst, None);
        assert_eq!(second.event, None);

        let refilled = reconciler.apply(layout(&[&["b"]]), SelectionPolicy::PreserveSelection, None);
        assert_eq!(changed_id(refilled.event), Some("b".to_string()));
        let again = reconciler.apply(layout(&[]), SelectionPolicy::PreserveSelection, None);
        assert_eq!(again.event, Some(SelectionEvent::Cleared));
    }

    #[test]
    fn test_initial_empty_render_clears_once() {
        let mut reconciler = Reconciler::new();
        let result = reconciler.apply(layout(&[]), SelectionPolicy::SelectFirst, None);
        assert_eq!(result.event, Some(SelectionEvent::Cleared));
        assert!(result.selection.is_none());
    }

    #[test]
    fn test_forced_selection_wins_when_present() {
        let mut reconciler = Reconciler::new();
        reconciler.apply(layout(&[&["a", "b", "c"]]), SelectionPolicy::SelectFirst, None);

        let forced = reconciler.apply(layout(&[&["a", "b", "c"]]), SelectionPolicy::SelectFirst, Some("c"));
        assert_eq!(changed_id(forced.event), Some("c".to_string()));

        let missing = reconciler.apply(layout(&[&["a", "b"]]), SelectionPolicy::PreserveSelection, Some("zzz"));
        assert_eq!(changed_id(missing.event), Some("a".to_string()));
    }

    #[test]
    fn test_navigation() {
        let mut reconciler = Reconciler::new();
        reconciler.apply(layout(&[&["a"], &[], &["b", "c"]]), SelectionPolicy::SelectFirst, None);

        assert_eq!(changed_id(reconciler.select_next()), Some("b".to_string()));
        assert_eq!(changed_id(reconciler.select_next()), Some("c".to_string()));
        assert_eq!(reconciler.select_next(), None);
        assert_eq!(reconciler.selection().unwrap().id, "c");

        assert_eq!(changed_id(reconciler.select_first()), Some("a".to_string()));
        assert_eq!(reconciler.select_prev(), None);
        assert_eq!(changed_id(reconciler.select_last()), Some("c".to_string()));
        assert_eq!(changed_id(reconciler.select_id("b")), Some("b".to_string()));
        assert_eq!(reconciler.select_id("nope"), None);
        assert_eq!(changed_id(reconciler.select_at(0, 0)), Some("a".to_string()));
        assert_eq!(reconciler.select_at(1, 0), None);
    }

    #[test]
    fn test_reset_discards_previous_generation() {
        let mut reconciler = Reconciler::new();
        reconciler.apply(layout(&[&["a"]]), SelectionPolicy::SelectFirst, None);
        reconciler.reset();
        assert!(reconciler.layout().is_none());
        let result = reconciler.apply(layout(&[&["a"]]), SelectionPolicy::SelectFirst, None);
        assert!(matches!(result.changes[0], SectionChange::Reset { .. }));
        assert_eq!(changed_id(result.event), Some("a".to_string()));
    }
}
