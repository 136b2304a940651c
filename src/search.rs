//! Fuzzy catalog matching.
//!
//! The match engine keeps a flattened index over the compiled catalog and
//! ranks items against a query segment with weighted fields:
//!
//! - `name` (weight 2.0): dominates ranking
//! - `priority-keywords` (weight 1.0)
//! - `keywords` (weight 0.5)
//! - `value` (weight 0.1): tiebreak only
//!
//! The index is a pure function of the catalog snapshot: it is rebuilt
//! when (and only when) the snapshot fingerprint changes, never per
//! keystroke, and can be discarded at any time without correctness
//! impact.

use crate::catalog::{Catalog, ItemRecord};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

const WEIGHT_NAME: f64 = 2.0;
const WEIGHT_PRIORITY_KEYWORDS: f64 = 1.0;
const WEIGHT_KEYWORDS: f64 = 0.5;
const WEIGHT_VALUE: f64 = 0.1;

struct IndexEntry {
    name: String,
    priority_keywords: Vec<String>,
    keywords: Vec<String>,
    value: String,
}

impl IndexEntry {
    fn from_item(item: &ItemRecord) -> IndexEntry {
        IndexEntry {
            name: item.name.clone().unwrap_or_default(),
            priority_keywords: item.priority_keywords.clone(),
            keywords: item.keywords.clone(),
            value: item.value_string(),
        }
    }
}

/// Rebuildable weighted fuzzy index over a catalog snapshot.
pub struct MatchEngine {
    matcher: SkimMatcherV2,
    entries: Vec<IndexEntry>,
    fingerprint: Option<String>,
}

impl Default for MatchEngine {
    fn default() -> Self {
        MatchEngine::new()
    }
}

impl MatchEngine {
    pub fn new() -> MatchEngine {
        MatchEngine {
            matcher: SkimMatcherV2::default().ignore_case(),
            entries: Vec::new(),
            fingerprint: None,
        }
    }

    /// Rebuild the index if the catalog snapshot changed identity.
    pub fn ensure_catalog(&mut self, catalog: &Catalog) {
        if self.fingerprint.as_deref() == Some(catalog.fingerprint()) {
            return;
        }
        self.entries = catalog.items().iter().map(IndexEntry::from_item).collect();
        self.fingerprint = Some(catalog.fingerprint().to_string());
    }

    /// Fuzzy-search the indexed catalog, best match first. Item indices
    /// refer into `catalog.items()` as of the last `ensure_catalog` call.
    pub fn search(&self, query: &str) -> Vec<usize> {
        if query.is_empty() {
            return Vec::new();
        }
        let mut scored: Vec<(usize, f64)> = self
            .entries
            .iter()
            .enumerate()
            .filter_map(|(i, entry)| self.score(entry, query).map(|score| (i, score)))
            .collect();
        // Highest score first; catalog order breaks ties for determinism.
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.into_iter().map(|(i, _)| i).collect()
    }

    fn score(&self, entry: &IndexEntry, query: &str) -> Option<f64> {
        let mut best: Option<f64> = None;
        let mut consider = |text: &str, weight: f64| {
            if let Some(score) = self.matcher.fuzzy_match(text, query) {
                let weighted = score as f64 * weight;
                if best.map_or(true, |b| weighted > b) {
                    best = Some(weighted);
                }
            }
        };
        consider(&entry.name, WEIGHT_NAME);
        for kw in &entry.priority_keywords {
            consider(kw, WEIGHT_PRIORITY_KEYWORDS);
        }
        for kw in &entry.keywords {
            consider(kw, WEIGHT_KEYWORDS);
        }
        consider(&entry.value, WEIGHT_VALUE);
        best
    }
}

/// If the segment carries a tag directive (`prefix` immediately followed
/// by a non-whitespace tag token), return the token.
pub fn tag_token<'a>(segment: &'a str, tag_prefix: &str) -> Option<&'a str> {
    if tag_prefix.is_empty() {
        return None;
    }
    let start = segment.find(tag_prefix)? + tag_prefix.len();
    let rest = &segment[start..];
    // The token is the non-whitespace run directly after the prefix; a
    // prefix followed by whitespace carries no tag.
    let token: &str = rest.split(char::is_whitespace).next().unwrap_or("");
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// Tag-filter mode: the exact catalog subset whose tag set contains the
/// token, in natural catalog order, without fuzzy ranking.
pub fn filter_by_tag(catalog: &Catalog, tag: &str) -> Vec<usize> {
    catalog
        .items()
        .iter()
        .enumerate()
        .filter(|(_, item)| item.has_tag(tag))
        .map(|(i, _)| i)
        .collect()
}

/// Strip every occurrence of the organic modifier from the query text
/// before matching; the modifier only affects augmentation.
pub fn strip_organic_modifier(query: &str, organic_modifier: &str) -> String {
    if organic_modifier.is_empty() {
        return query.to_string();
    }
    query.replace(organic_modifier, "")
}
