use super::Searchable;
use crate::config::SearchConfig;
use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};

/// Weighted fuzzy scorer over an item's title, subtitle and keywords.
///
/// Each field is matched on its own with nucleo (fzf-style scoring, smart
/// case and normalization). The item score is the weighted sum of the field
/// scores, rounded; fields that do not match contribute nothing.
pub struct FuzzyScorer {
    matcher: Matcher,
    title_weight: f64,
    subtitle_weight: f64,
    keyword_weight: f64,
    buf: Vec<char>,
}

impl FuzzyScorer {
    #[must_use]
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            matcher: Matcher::new(Config::DEFAULT),
            title_weight: config.title_weight,
            subtitle_weight: config.subtitle_weight,
            keyword_weight: config.keyword_weight,
            buf: Vec::new(),
        }
    }

    /// Compile a query. Whitespace-only queries count as empty and give `None`.
    #[must_use]
    pub fn pattern(query: &str) -> Option<Pattern> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        Some(Pattern::new(
            query,
            CaseMatching::Smart,
            Normalization::Smart,
            AtomKind::Fuzzy,
        ))
    }

    /// Score `item` against `query`. An empty query scores 0.
    pub fn score<S: Searchable + ?Sized>(&mut self, item: &S, query: &str) -> i64 {
        match Self::pattern(query) {
            Some(pattern) => self.score_pattern(&pattern, item),
            None => 0,
        }
    }

    /// Score with a precompiled pattern; used by the filter pass.
    // Scores are bounded by field length times nucleo's per-char bonus
    #[allow(clippy::cast_possible_truncation)]
    pub fn score_pattern<S: Searchable + ?Sized>(&mut self, pattern: &Pattern, item: &S) -> i64 {
        let mut total = self.field_score(pattern, item.title()) * self.title_weight;

        let subtitle = item.subtitle();
        if !subtitle.is_empty() {
            total += self.field_score(pattern, subtitle) * self.subtitle_weight;
        }

        for keyword in item.keywords() {
            total += self.field_score(pattern, keyword) * self.keyword_weight;
        }

        total.round() as i64
    }

    fn field_score(&mut self, pattern: &Pattern, text: &str) -> f64 {
        let haystack = Utf32Str::new(text, &mut self.buf);
        pattern
            .score(haystack, &mut self.matcher)
            .map_or(0.0, f64::from)
    }
}

impl Default for FuzzyScorer {
    fn default() -> Self {
        Self::new(&SearchConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vista_types::ListItem;

    fn item(title: &str, subtitle: &str, keywords: &[&str]) -> ListItem {
        ListItem {
            id: title.to_lowercase(),
            title: title.to_string(),
            subtitle: subtitle.to_string(),
            keywords: keywords.iter().map(ToString::to_string).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_query_scores_zero() {
        let mut scorer = FuzzyScorer::default();
        assert_eq!(scorer.score(&item("Firefox", "", &[]), ""), 0);
        assert_eq!(scorer.score(&item("Firefox", "", &[]), "   "), 0);
    }

    #[test]
    fn test_no_match_scores_zero() {
        let mut scorer = FuzzyScorer::default();
        assert_eq!(scorer.score(&item("Firefox", "Browser", &["web"]), "xyz"), 0);
    }

    #[test]
    fn test_title_outweighs_subtitle() {
        let mut scorer = FuzzyScorer::default();
        let in_title = scorer.score(&item("Terminal", "", &[]), "term");
        let in_subtitle = scorer.score(&item("Console", "Terminal", &[]), "term");
        assert!(in_title > 0);
        assert!(in_subtitle > 0);
        assert!(in_title > in_subtitle);
    }

    #[test]
    fn test_keywords_add_up() {
        let mut scorer = FuzzyScorer::default();
        let one = scorer.score(&item("Alpha", "", &["browser"]), "browser");
        let two = scorer.score(&item("Alpha", "", &["browser", "browser"]), "browser");
        assert!(one > 0);
        assert!(two > one);
    }

    #[test]
    fn test_contiguous_beats_scattered() {
        let mut scorer = FuzzyScorer::default();
        let contiguous = scorer.score(&item("Calculator", "", &[]), "calc");
        let scattered = scorer.score(&item("Cloud Archive Log Console", "", &[]), "calc");
        assert!(contiguous > scattered);
    }

    #[test]
    fn test_custom_weights() {
        let config = SearchConfig {
            subtitle_weight: 0.0,
            ..SearchConfig::default()
        };
        let mut scorer = FuzzyScorer::new(&config);
        assert_eq!(scorer.score(&item("Console", "Terminal", &[]), "term"), 0);
    }
}
