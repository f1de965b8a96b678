use serde_json::{Value, json};
use tracing::trace;
use vista_types::Notifier;

/// Turns user interaction into handler calls on the extension.
///
/// Every method takes the handler declared by the current document; an
/// absent handler means the extension is not listening and nothing is sent.
/// Calls are fire-and-forget.
#[derive(Debug, Default)]
pub struct NotificationBridge<N> {
    notifier: N,
    last_selected: Option<String>,
    reset_selection: bool,
}

impl<N: Notifier> NotificationBridge<N> {
    #[must_use]
    pub fn new(notifier: N) -> Self {
        Self {
            notifier,
            last_selected: None,
            reset_selection: false,
        }
    }

    /// Send `args` to `handler` if there is one.
    pub fn send(&mut self, handler: Option<&str>, args: Vec<Value>) {
        if let Some(handler) = handler {
            trace!(handler, ?args, "Notify");
            self.notifier.notify(handler, args);
        }
    }

    /// Settled selection. Only a change of id is reported.
    pub fn selection_changed(&mut self, handler: Option<&str>, id: &str) {
        if self.last_selected.as_deref() == Some(id) {
            return;
        }
        self.last_selected = Some(id.to_string());
        self.send(handler, vec![json!(id)]);
    }

    /// The collection emptied. The handler takes an id, so nothing is sent;
    /// the next selection is reported even if it has the old id.
    pub fn selection_cleared(&mut self) {
        self.last_selected = None;
    }

    /// Search text reached the extension.
    ///
    /// When the extension listens and filters itself, its next render
    /// reshapes the collection, so that render should reset the selection.
    pub fn search_text_changed(&mut self, handler: Option<&str>, text: &str, filtering: bool) {
        if handler.is_some() {
            self.reset_selection = !filtering;
        }
        self.send(handler, vec![json!(text)]);
    }

    /// Search text of a secondary input: a dropdown or an open submenu.
    ///
    /// Only the main search bar reshapes the collection, so this leaves the
    /// selection reset flag alone.
    pub fn input_search_changed(&mut self, handler: Option<&str>, text: &str) {
        self.send(handler, vec![json!(text)]);
    }

    /// Whether the next render should select the first item. Clears the flag.
    pub fn take_reset_selection(&mut self) -> bool {
        std::mem::take(&mut self.reset_selection)
    }

    pub fn field_changed(&mut self, handler: Option<&str>, value: Value) {
        self.send(handler, vec![value]);
    }

    pub fn field_focused(&mut self, handler: Option<&str>) {
        self.send(handler, Vec::new());
    }

    pub fn field_blurred(&mut self, handler: Option<&str>) {
        self.send(handler, Vec::new());
    }

    pub fn dropdown_changed(&mut self, handler: Option<&str>, value: &str) {
        self.send(handler, vec![json!(value)]);
    }

    /// Forget per-view state; used when the view is swapped.
    pub fn reset(&mut self) {
        self.last_selected = None;
        self.reset_selection = false;
    }

    #[must_use]
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    #[must_use]
    pub fn into_inner(self) -> N {
        self.notifier
    }
}
