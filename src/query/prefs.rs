//! User preferences consumed by the engine.
//!
//! The engine takes preferences as an immutable value per evaluation and
//! never mutates them; whatever settings layer owns persistence hands a
//! fresh struct to each call.

use serde::{Deserialize, Serialize};

/// Preferences that shape query evaluation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchPreferences {
    /// Page size for rendered results. At least 1.
    pub items_per_page: usize,
    /// Prefix character(s) introducing a tag-filter directive.
    pub item_tag_prefix: String,
    /// Suffix marking a segment as an organic-code request.
    pub organic_modifier: String,
    /// Separator between sub-queries in the raw input.
    pub query_separator: String,
    /// Query the input reverts to on reset.
    pub default_query: String,
    /// Prefix introducing a search-engine directive. Empty disables it.
    pub search_prefix: String,
    /// Disable scannable produce barcodes for the no-cheat organization.
    pub no_cheat: bool,
    /// Overrides the catalog's own organization when non-empty.
    pub organization_id: String,
}

impl Default for SearchPreferences {
    fn default() -> Self {
        SearchPreferences {
            items_per_page: 4,
            item_tag_prefix: "#".to_string(),
            organic_modifier: "!".to_string(),
            query_separator: ";".to_string(),
            default_query: String::new(),
            search_prefix: String::new(),
            no_cheat: false,
            organization_id: String::new(),
        }
    }
}

impl SearchPreferences {
    /// Clamp out-of-range values instead of erroring: a zero page size
    /// becomes 1.
    pub fn sanitized(mut self) -> SearchPreferences {
        if self.items_per_page == 0 {
            self.items_per_page = 1;
        }
        self
    }
}
