//! The full query resolution pipeline.
//!
//! One raw input string goes in; a deterministic result per segment comes
//! out. Per segment, in order:
//!
//! 1. command recognition (short-circuits the rest),
//! 2. tag filter or fuzzy catalog search,
//! 3. per-item augmentation (organic transform, no-cheat flag) and code
//!    derivation,
//! 4. embedded typed-code extraction,
//! 5. arithmetic evaluation and round-up.
//!
//! Calling the pipeline twice with identical `(raw, prefs, catalog)`
//! yields identical results; the only cached structure is the fuzzy
//! index, which is a pure function of the catalog snapshot.

use crate::augment::{
    barcode_disabled, extract_embedded_code, present_item, try_round_up,
};
use crate::catalog::{resolve_organization, Catalog};
use crate::code::derive_code;
use crate::eval::try_math;
use crate::output::{item_match_id, QueryResult, ResolvedItem, SegmentResult};
use crate::query::command::{recognize, Command, SearchEngines};
use crate::query::prefs::SearchPreferences;
use crate::query::split::split_query;
use crate::search::{filter_by_tag, strip_organic_modifier, tag_token, MatchEngine};
use regex::Regex;

/// Stateful front of the pipeline. The only state is the rebuildable
/// fuzzy index and a compiled regex; both are caches, not inputs.
pub struct Engine {
    match_engine: MatchEngine,
    embedded_code: Regex,
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}

impl Engine {
    pub fn new() -> Engine {
        Engine {
            match_engine: MatchEngine::new(),
            embedded_code: crate::augment::embedded_code_regex(),
        }
    }

    /// Evaluate a full raw input string against a catalog snapshot.
    pub fn evaluate(
        &mut self,
        raw: &str,
        prefs: &SearchPreferences,
        catalog: &Catalog,
        engines: &SearchEngines,
    ) -> QueryResult {
        self.match_engine.ensure_catalog(catalog);
        let segments = split_query(raw, &prefs.query_separator)
            .into_iter()
            .map(|text| self.evaluate_segment(&text, prefs, catalog, engines))
            .collect();
        QueryResult {
            raw: raw.to_string(),
            segments,
        }
    }

    /// Evaluate one segment. Exposed for callers that manage splitting
    /// themselves.
    pub fn evaluate_segment(
        &mut self,
        text: &str,
        prefs: &SearchPreferences,
        catalog: &Catalog,
        engines: &SearchEngines,
    ) -> SegmentResult {
        self.match_engine.ensure_catalog(catalog);

        let command = recognize(text, &prefs.search_prefix, engines);
        if command != Command::None {
            return SegmentResult {
                text: text.to_string(),
                command,
                ..SegmentResult::empty(text)
            };
        }

        let organization = resolve_organization(&prefs.organization_id, catalog);

        let (indices, tag_filtered) = match tag_token(text, &prefs.item_tag_prefix) {
            Some(tag) => (filter_by_tag(catalog, tag), true),
            None => {
                let stripped = strip_organic_modifier(text, &prefs.organic_modifier);
                (self.match_engine.search(&stripped), false)
            }
        };

        let matches: Vec<ResolvedItem> = indices
            .iter()
            .map(|&i| {
                let item = &catalog.items()[i];
                let presented = present_item(item, text, &prefs.organic_modifier);
                let derived = derive_code(&presented.code);
                ResolvedItem {
                    match_id: item_match_id(&presented.name, &presented.code),
                    name: presented.name,
                    code: presented.code,
                    classification: derived.classification,
                    upc: derived.upc,
                    pretty: derived.pretty,
                    disabled: barcode_disabled(organization, prefs.no_cheat, item),
                    ui_color: item.ui_color.clone(),
                }
            })
            .collect();

        let typed_code = extract_embedded_code(&self.embedded_code, text)
            .map(|raw| derive_code(&raw));

        SegmentResult {
            text: text.to_string(),
            command: Command::None,
            tag_filtered,
            total_count: matches.len() as u64,
            matches,
            typed_code,
            math: try_math(text),
            round_up: try_round_up(text),
        }
    }
}
