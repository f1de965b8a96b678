use super::keybind::{KeybindResolver, Shortcut};
use crate::notify::NotificationBridge;
use crate::search::{FuzzyScorer, Searchable};
use crate::{Error, Result};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, warn};
use vista_types::{
    ActionKind, ActionModel, ActionPanelChild, ActionPanelModel, ActionSectionItem, Handler,
    ImageLike, Notifier, SubmenuFiltering, SubmenuModel,
};

/// A built panel: titled sections of invocable actions.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ActionPanel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub sections: Vec<ActionSection>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ActionSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub actions: Vec<Action>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Action {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<ImageLike>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shortcut: Option<Shortcut>,
    /// Triggered by activating the selected item
    pub primary: bool,
    pub invocation: Invocation,
}

impl Searchable for Action {
    fn id(&self) -> &str {
        &self.title
    }

    fn title(&self) -> &str {
        &self.title
    }
}

/// What activating an action does.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Invocation {
    /// Notify the extension, and pass the form values to `on_submit`
    Callback {
        #[serde(skip_serializing_if = "Option::is_none")]
        on_action: Option<Handler>,
        #[serde(skip_serializing_if = "Option::is_none")]
        on_submit: Option<Handler>,
    },
    /// Host-side: open the quicklink editor
    CreateQuicklink {
        #[serde(skip_serializing_if = "Option::is_none")]
        quicklink: Option<Value>,
    },
    /// Open a nested panel, kept in the [`SubmenuCache`] under `key`
    Submenu {
        key: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        on_open: Option<Handler>,
        #[serde(skip_serializing_if = "Option::is_none")]
        on_search_text_change: Option<Handler>,
        filtering: SubmenuFiltering,
    },
}

/// Host-side request to open the quicklink editor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuicklinkRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quicklink: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "payload", rename_all = "snake_case")]
pub enum ActionOutcome {
    Notified,
    Push(QuicklinkRequest),
    OpenSubmenu(ActionPanel),
}

impl ActionPanel {
    /// Every action in display order.
    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.sections.iter().flat_map(|section| section.actions.iter())
    }

    /// Action at a flat index across sections.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Action> {
        self.actions().nth(index)
    }

    #[must_use]
    pub fn primary(&self) -> Option<&Action> {
        self.actions().find(|action| action.primary)
    }

    /// Flat index of the action bound to `shortcut`.
    #[must_use]
    pub fn find_shortcut(&self, shortcut: &Shortcut) -> Option<usize> {
        self.actions()
            .position(|action| action.shortcut.as_ref() == Some(shortcut))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.actions().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(|section| section.actions.is_empty())
    }

    /// Narrow a submenu to actions whose title matches `query`.
    ///
    /// Sections are reordered by best match unless the submenu asks to keep
    /// its section order. The first remaining action becomes primary.
    #[must_use]
    pub fn filter(
        &self,
        query: &str,
        scorer: &mut FuzzyScorer,
        filtering: SubmenuFiltering,
    ) -> Self {
        let Some(pattern) = FuzzyScorer::pattern(query).filter(|_| filtering.enabled) else {
            return self.clone();
        };

        let mut scored: Vec<(i64, ActionSection)> = self
            .sections
            .iter()
            .filter_map(|section| {
                let mut actions: Vec<(i64, &Action)> = section
                    .actions
                    .iter()
                    .map(|action| (scorer.score_pattern(&pattern, action), action))
                    .filter(|(score, _)| *score > 0)
                    .collect();
                actions.sort_by(|a, b| b.0.cmp(&a.0));
                let best = actions.first()?.0;
                Some((
                    best,
                    ActionSection {
                        title: section.title.clone(),
                        actions: actions.into_iter().map(|(_, a)| a.clone()).collect(),
                    },
                ))
            })
            .collect();

        if !filtering.keep_section_order {
            scored.sort_by(|a, b| b.0.cmp(&a.0));
        }

        let mut panel = Self {
            title: self.title.clone(),
            sections: scored.into_iter().map(|(_, section)| section).collect(),
        };
        panel.mark_primary();
        panel
    }

    fn mark_primary(&mut self) {
        for (index, action) in self
            .sections
            .iter_mut()
            .flat_map(|section| section.actions.iter_mut())
            .enumerate()
        {
            action.primary = index == 0;
        }
    }
}

/// Built submenu panels, keyed by `stableId` (or title path when absent).
///
/// Owned by the session; refreshed by every build and cleared when the view
/// is swapped.
#[derive(Debug, Default)]
pub struct SubmenuCache {
    panels: HashMap<String, ActionPanel>,
}

impl SubmenuCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ActionPanel> {
        self.panels.get(key)
    }

    /// Every cached panel, in no particular order.
    pub fn panels(&self) -> impl Iterator<Item = &ActionPanel> {
        self.panels.values()
    }

    pub fn clear(&mut self) {
        self.panels.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.panels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }
}

/// Builds [`ActionPanel`]s from declared panel models.
///
/// The first action overall is primary. At the top level the first actions
/// also take the reserved default chords (`enter`, `shift+enter`) in order,
/// unless they declare a shortcut of their own.
pub struct ActionPanelBuilder<'a> {
    keybinds: &'a KeybindResolver,
    default_shortcuts: &'a [Shortcut],
}

impl<'a> ActionPanelBuilder<'a> {
    #[must_use]
    pub fn new(keybinds: &'a KeybindResolver, default_shortcuts: &'a [Shortcut]) -> Self {
        Self {
            keybinds,
            default_shortcuts,
        }
    }

    pub fn build(&self, model: &ActionPanelModel, cache: &mut SubmenuCache) -> ActionPanel {
        let scope = model
            .stable_id
            .as_deref()
            .or(model.title.as_deref())
            .unwrap_or_default();
        let mut panel = ActionPanel {
            title: model.title.clone(),
            sections: self.build_sections(&model.children, cache, scope),
        };
        Self::assign_slots(&mut panel, self.default_shortcuts);
        debug!(
            actions = panel.len(),
            sections = panel.sections.len(),
            submenus = cache.len(),
            "Built action panel"
        );
        panel
    }

    fn build_submenu(
        &self,
        submenu: &SubmenuModel,
        cache: &mut SubmenuCache,
        scope: &str,
    ) -> Option<Action> {
        let key = submenu
            .stable_id
            .clone()
            .unwrap_or_else(|| format!("{scope}/{}", submenu.title));

        let mut panel = ActionPanel {
            title: Some(submenu.title.clone()),
            sections: self.build_sections(&submenu.children, cache, &key),
        };
        if panel.is_empty() {
            warn!(submenu = %submenu.title, "Dropping submenu without actions");
            return None;
        }
        Self::assign_slots(&mut panel, &[]);
        cache.panels.insert(key.clone(), panel);

        Some(Action {
            title: submenu.title.clone(),
            icon: submenu.icon.clone(),
            shortcut: submenu.shortcut.as_ref().and_then(|s| self.keybinds.resolve(s)),
            primary: false,
            invocation: Invocation::Submenu {
                key,
                on_open: submenu.on_open.clone(),
                on_search_text_change: submenu.on_search_text_change.clone(),
                // Filtered locally unless the extension listens to the text
                filtering: submenu.filtering.unwrap_or(SubmenuFiltering {
                    enabled: submenu.on_search_text_change.is_none(),
                    keep_section_order: false,
                }),
            },
        })
    }

    /// Loose entries next to each other share one untitled section.
    fn build_sections(
        &self,
        children: &[ActionPanelChild],
        cache: &mut SubmenuCache,
        scope: &str,
    ) -> Vec<ActionSection> {
        let mut sections: Vec<ActionSection> = Vec::new();
        let mut loose: Option<ActionSection> = None;

        for child in children {
            let action = match child {
                ActionPanelChild::Action(action) => Some(self.build_action(action)),
                ActionPanelChild::Submenu(submenu) => self.build_submenu(submenu, cache, scope),
                ActionPanelChild::Section(section) => {
                    sections.extend(loose.take());
                    let actions = section
                        .items
                        .iter()
                        .filter_map(|item| match item {
                            ActionSectionItem::Action(action) => Some(self.build_action(action)),
                            ActionSectionItem::Submenu(submenu) => {
                                self.build_submenu(submenu, cache, scope)
                            }
                        })
                        .collect();
                    sections.push(ActionSection {
                        title: section.title.clone(),
                        actions,
                    });
                    continue;
                }
            };
            if let Some(action) = action {
                loose.get_or_insert_with(ActionSection::default).actions.push(action);
            }
        }
        sections.extend(loose);
        sections.retain(|section| !section.actions.is_empty());
        sections
    }

    fn build_action(&self, model: &ActionModel) -> Action {
        let invocation = match &model.kind {
            ActionKind::CreateQuicklink => Invocation::CreateQuicklink {
                quicklink: model.quicklink.clone(),
            },
            kind => {
                if let ActionKind::Other(other) = kind {
                    debug!(
                        title = %model.title,
                        "Unknown action type '{other}', treating as callback"
                    );
                }
                Invocation::Callback {
                    on_action: Some(model.on_action.clone()).filter(|h| !h.is_empty()),
                    on_submit: model.on_submit.clone(),
                }
            }
        };

        Action {
            title: model.title.clone(),
            icon: model.icon.clone(),
            shortcut: model.shortcut.as_ref().and_then(|s| self.keybinds.resolve(s)),
            primary: false,
            invocation,
        }
    }

    fn assign_slots(panel: &mut ActionPanel, reserved: &[Shortcut]) {
        let actions = panel
            .sections
            .iter_mut()
            .flat_map(|section| section.actions.iter_mut());
        for (index, action) in actions.enumerate() {
            action.primary = index == 0;
            if action.shortcut.is_none() {
                action.shortcut = reserved.get(index).cloned();
            }
        }
    }
}

/// Run `action`.
///
/// `submission` is the form payload handed to `on_submit` handlers, sent
/// after `on_action`.
///
/// # Errors
///
/// Returns `Error::UnknownSubmenu` when a submenu's panel is not in `cache`.
pub fn invoke<N: Notifier>(
    action: &Action,
    bridge: &mut NotificationBridge<N>,
    cache: &SubmenuCache,
    submission: Option<&Value>,
) -> Result<ActionOutcome> {
    debug!(title = %action.title, "Invoking action");
    match &action.invocation {
        Invocation::Callback {
            on_action,
            on_submit,
        } => {
            bridge.send(on_action.as_deref(), Vec::new());
            if let Some(values) = submission {
                bridge.send(on_submit.as_deref(), vec![values.clone()]);
            }
            Ok(ActionOutcome::Notified)
        }
        Invocation::CreateQuicklink { quicklink } => Ok(ActionOutcome::Push(QuicklinkRequest {
            quicklink: quicklink.clone(),
        })),
        Invocation::Submenu { key, on_open, .. } => {
            let panel = cache
                .get(key)
                .ok_or_else(|| Error::UnknownSubmenu(key.clone()))?;
            bridge.send(on_open.as_deref(), Vec::new());
            Ok(ActionOutcome::OpenSubmenu(panel.clone()))
        }
    }
}
