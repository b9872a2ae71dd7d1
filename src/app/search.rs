use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::engine::Layout;

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_lowercase(), &query.to_lowercase()))
}

/// Node ids whose label or id matches `query`, best first.
pub(super) fn search_nodes<'a>(layout: &'a Layout, query: &str, limit: usize) -> Vec<&'a str> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }

    let matcher = SkimMatcherV2::default();
    let mut scored = layout
        .nodes
        .iter()
        .enumerate()
        .filter_map(|(index, node)| {
            let score = fuzzy_match_score(&matcher, &node.entity.label, query)
                .into_iter()
                .chain(fuzzy_match_score(&matcher, node.id(), query))
                .max()?;
            Some((score, index, node.id()))
        })
        .collect::<Vec<_>>();

    scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
    scored.truncate(limit);
    scored.into_iter().map(|(_, _, id)| id).collect()
}
