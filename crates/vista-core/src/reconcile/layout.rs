use crate::search::{Searchable, SectionData};
use serde::Serialize;
use vista_types::GridLayout;

/// What the rendering side needs to know about one section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionSummary {
    pub name: String,
    pub item_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<f64>,
}

/// One generation of the rendered collection: section summaries plus the
/// item ids of every section, in display order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Layout {
    pub sections: Vec<SectionSummary>,
    pub ids: Vec<Vec<String>>,
}

impl Layout {
    /// Layout of a list filter pass. Lists carry no grid attributes.
    #[must_use]
    pub fn from_sections<I: Searchable>(sections: &[SectionData<'_, I>]) -> Self {
        Self::build(sections, None)
    }

    /// Layout of a grid filter pass, each section's overrides resolved
    /// against `defaults`.
    #[must_use]
    pub fn from_grid_sections<I: Searchable>(
        sections: &[SectionData<'_, I>],
        defaults: GridLayout,
    ) -> Self {
        Self::build(sections, Some(defaults))
    }

    fn build<I: Searchable>(sections: &[SectionData<'_, I>], grid: Option<GridLayout>) -> Self {
        let mut layout = Self::default();
        for section in sections {
            let resolved = grid.map(|defaults| section.layout.inherit(defaults));
            layout.sections.push(SectionSummary {
                name: section.title.to_string(),
                item_count: section.items.len(),
                columns: resolved.and_then(|l| l.columns),
                aspect_ratio: resolved.and_then(|l| l.aspect_ratio),
            });
            layout.ids.push(
                section
                    .items
                    .iter()
                    .map(|scored| scored.item.id().to_string())
                    .collect(),
            );
        }
        layout
    }

    /// No items in any section.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.iter().all(Vec::is_empty)
    }

    #[must_use]
    pub fn item_count(&self) -> usize {
        self.ids.iter().map(Vec::len).sum()
    }

    /// First item of the first non-empty section.
    #[must_use]
    pub fn first(&self) -> Option<(usize, usize)> {
        self.ids.iter().position(|ids| !ids.is_empty()).map(|s| (s, 0))
    }

    /// Last item of the last non-empty section.
    #[must_use]
    pub fn last(&self) -> Option<(usize, usize)> {
        self.ids
            .iter()
            .rposition(|ids| !ids.is_empty())
            .map(|s| (s, self.ids[s].len() - 1))
    }

    /// Position of `id`, scanning sections in order. Duplicates resolve to
    /// the last occurrence.
    #[must_use]
    pub fn position(&self, id: &str) -> Option<(usize, usize)> {
        self.ids.iter().enumerate().rev().find_map(|(s, ids)| {
            ids.iter()
                .rposition(|item| item == id)
                .map(|i| (s, i))
        })
    }

    #[must_use]
    pub fn id_at(&self, section: usize, index: usize) -> Option<&str> {
        self.ids.get(section)?.get(index).map(String::as_str)
    }

    /// Position after `(section, index)`, crossing into later sections.
    #[must_use]
    pub fn next(&self, section: usize, index: usize) -> Option<(usize, usize)> {
        if index + 1 < self.ids.get(section)?.len() {
            return Some((section, index + 1));
        }
        (section + 1..self.ids.len())
            .find(|&s| !self.ids[s].is_empty())
            .map(|s| (s, 0))
    }

    /// Position before `(section, index)`, crossing into earlier sections.
    #[must_use]
    pub fn prev(&self, section: usize, index: usize) -> Option<(usize, usize)> {
        if index > 0 {
            return Some((section, index - 1));
        }
        (0..section)
            .rev()
            .find(|&s| !self.ids[s].is_empty())
            .map(|s| (s, self.ids[s].len() - 1))
    }
}
