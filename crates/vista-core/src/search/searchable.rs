use vista_types::{DropdownItem, GridItem, ListItem};

/// Text fields the fuzzy scorer looks at, plus the identity used for selection.
pub trait Searchable {
    /// Stable identity: the item id, or the value for dropdown items
    fn id(&self) -> &str;

    fn title(&self) -> &str;

    fn subtitle(&self) -> &str {
        ""
    }

    fn keywords(&self) -> &[String] {
        &[]
    }
}

impl Searchable for ListItem {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn subtitle(&self) -> &str {
        &self.subtitle
    }

    fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

impl Searchable for GridItem {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn subtitle(&self) -> &str {
        &self.subtitle
    }

    fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

impl Searchable for DropdownItem {
    fn id(&self) -> &str {
        &self.value
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn keywords(&self) -> &[String] {
        &self.keywords
    }
}
