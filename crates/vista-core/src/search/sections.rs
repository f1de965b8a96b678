use super::{FuzzyScorer, Searchable};
use tracing::debug;
use vista_types::{Child, GridLayout};

/// An item together with its score for the current query.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredItem<'a, I> {
    pub item: &'a I,
    /// 0 when no query is active
    pub score: i64,
}

/// One section of a filter pass. Rebuilt from scratch on every pass.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionData<'a, I> {
    pub title: &'a str,
    pub subtitle: &'a str,
    /// The section's own overrides; inheritance is resolved by the caller
    pub layout: GridLayout,
    pub items: Vec<ScoredItem<'a, I>>,
    pub best_score: i64,
    /// Implicit section holding the items declared outside any section
    pub free: bool,
}

impl<I> SectionData<'_, I> {
    fn free() -> Self {
        Self {
            title: "",
            subtitle: "",
            layout: GridLayout::default(),
            items: Vec::new(),
            best_score: 0,
            free: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOptions {
    /// Apply the local fuzzy filter. Off when the extension filters itself.
    pub filtering: bool,
    /// Order sections by their best score while a query is active
    pub sort_sections: bool,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            filtering: true,
            sort_sections: true,
        }
    }
}

/// Group, score, filter and sort the children of a list-like document.
///
/// Loose items are gathered into a single free section placed where the
/// first loose item appears. With an active query, items scoring 0 are
/// dropped, each section is stably sorted by descending score, empty
/// sections disappear and sections are stably sorted by their best score.
/// Without a query, or with filtering off, document order is kept as is.
pub fn filter_sections<'a, I: Searchable>(
    children: &'a [Child<I>],
    query: &str,
    scorer: &mut FuzzyScorer,
    options: FilterOptions,
) -> Vec<SectionData<'a, I>> {
    let mut sections = group(children);

    let pattern = if options.filtering {
        FuzzyScorer::pattern(query)
    } else {
        None
    };
    let Some(pattern) = pattern else {
        return sections;
    };

    let total: usize = sections.iter().map(|s| s.items.len()).sum();
    for section in &mut sections {
        for scored in &mut section.items {
            scored.score = scorer.score_pattern(&pattern, scored.item);
        }
        section.items.retain(|scored| scored.score > 0);
        section.items.sort_by(|a, b| b.score.cmp(&a.score));
        section.best_score = section.items.first().map_or(0, |scored| scored.score);
    }
    sections.retain(|section| !section.items.is_empty());

    if options.sort_sections {
        sections.sort_by(|a, b| b.best_score.cmp(&a.best_score));
    }

    debug!(
        query = query.trim(),
        total,
        matched = sections.iter().map(|s| s.items.len()).sum::<usize>(),
        sections = sections.len(),
        "Filter pass"
    );

    sections
}

fn group<I>(children: &[Child<I>]) -> Vec<SectionData<'_, I>> {
    let mut sections = Vec::new();
    let mut free_index = None;

    for child in children {
        match child {
            Child::Item(item) => {
                let index = *free_index.get_or_insert_with(|| {
                    sections.push(SectionData::free());
                    sections.len() - 1
                });
                sections[index].items.push(ScoredItem { item, score: 0 });
            }
            Child::Section(section) => sections.push(SectionData {
                title: &section.title,
                subtitle: &section.subtitle,
                layout: section.layout,
                items: section
                    .children
                    .iter()
                    .map(|item| ScoredItem { item, score: 0 })
                    .collect(),
                best_score: 0,
                free: false,
            }),
        }
    }

    sections
}
