//! Action panels: declared models to invocable actions with shortcuts.

mod builder;
mod keybind;

pub use builder::{
    Action, ActionOutcome, ActionPanel, ActionPanelBuilder, ActionSection, Invocation,
    QuicklinkRequest, SubmenuCache, invoke,
};
pub use keybind::{KeybindResolver, Modifiers, Shortcut, default_shortcuts};
