mod scorer;
mod searchable;
mod sections;

pub use scorer::FuzzyScorer;
pub use searchable::Searchable;
pub use sections::{FilterOptions, ScoredItem, SectionData, filter_sections};
