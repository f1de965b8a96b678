//! Diffing one filtered layout against the previous one.
//!
//! [`reconcile`] is the pure step: given two generations of a layout and a
//! selection policy it returns the section changes and where the selection
//! lands. [`Reconciler`] owns the previous generation between cycles and
//! turns selection moves into [`SelectionEvent`]s.

mod layout;
mod reconciler;

pub use layout::{Layout, SectionSummary};
pub use reconciler::{Reconciler, Reconciliation, SelectionEvent};

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Select the first item of the first non-empty section
    SelectFirst,
    /// Follow the selected item by id, falling back to the first item
    PreserveSelection,
    SelectNone,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub section: usize,
    pub index: usize,
    pub id: String,
}

impl Selection {
    fn at(layout: &Layout, (section, index): (usize, usize)) -> Option<Self> {
        layout.id_at(section, index).map(|id| Self {
            section,
            index,
            id: id.to_string(),
        })
    }
}

/// Structural update of the rendered section list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SectionChange {
    /// Replace everything; first render or a view swap
    Reset { sections: Vec<SectionSummary> },
    Insert {
        index: usize,
        section: SectionSummary,
    },
    Remove { index: usize },
    Update {
        index: usize,
        section: SectionSummary,
    },
}

/// Compute the section changes from `previous` to `next` and resolve the
/// selection under `policy`.
///
/// `selected` is the id to preserve. Without a previous generation the
/// changes are a single [`SectionChange::Reset`]. An empty `next` never has
/// a selection, whatever the policy.
#[must_use]
pub fn reconcile(
    previous: Option<&Layout>,
    next: &Layout,
    policy: SelectionPolicy,
    selected: Option<&str>,
) -> (Vec<SectionChange>, Option<Selection>) {
    let changes = match previous {
        Some(previous) => diff_sections(&previous.sections, &next.sections),
        None => vec![SectionChange::Reset {
            sections: next.sections.clone(),
        }],
    };
    (changes, resolve_selection(next, policy, selected))
}

/// Resolve where the selection lands in `next`.
#[must_use]
pub fn resolve_selection(
    next: &Layout,
    policy: SelectionPolicy,
    selected: Option<&str>,
) -> Option<Selection> {
    let position = match policy {
        SelectionPolicy::SelectNone => None,
        SelectionPolicy::SelectFirst => next.first(),
        SelectionPolicy::PreserveSelection => selected
            .and_then(|id| next.position(id))
            .or_else(|| next.first()),
    };
    position.and_then(|position| Selection::at(next, position))
}

/// Positional diff of two section lists. Removals are emitted from the end
/// so they can be applied in order.
#[must_use]
pub fn diff_sections(previous: &[SectionSummary], next: &[SectionSummary]) -> Vec<SectionChange> {
    let mut changes = Vec::new();

    for (index, (old, new)) in previous.iter().zip(next).enumerate() {
        if old != new {
            changes.push(SectionChange::Update {
                index,
                section: new.clone(),
            });
        }
    }

    for (index, section) in next.iter().enumerate().skip(previous.len()) {
        changes.push(SectionChange::Insert {
            index,
            section: section.clone(),
        });
    }

    for index in (next.len()..previous.len()).rev() {
        changes.push(SectionChange::Remove { index });
    }

    changes
}
