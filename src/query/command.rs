//! Command recognition inside a query segment.
//!
//! Before a segment is treated as a catalog search, two textual commands
//! are checked:
//!
//! - the fixed literal `wc`, which navigates to the weight-calculator
//!   tool view;
//! - a search-engine directive: the configured search prefix, an engine
//!   key, a space, and the payload (`"?g ripe bananas"` with prefix `?`).
//!
//! Recognition is purely textual. The recognizer never navigates or opens
//! anything; it returns a discriminated result and the caller acts on it.

use serde::Serialize;
use std::collections::HashMap;

/// Literal segment text that opens the weight-calculator tool.
pub const WEIGHT_CALC_COMMAND: &str = "wc";

/// Navigation target for the weight-calculator tool view.
pub const WEIGHT_CALC_TARGET: &str = "wcalc";

/// Result of command recognition on one segment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Command {
    /// Switch the application to another tool view.
    Navigate { target: String },
    /// Open an external URL (search-engine directive).
    OpenUrl { url: String },
    /// No command; the segment proceeds to catalog search.
    None,
}

/// Mapping of engine key to URL template containing a `%s` placeholder.
#[derive(Clone, Debug)]
pub struct SearchEngines {
    engines: HashMap<String, String>,
}

impl Default for SearchEngines {
    fn default() -> Self {
        let mut engines = HashMap::new();
        engines.insert(
            "g".to_string(),
            "https://www.google.com/search?q=%s".to_string(),
        );
        engines.insert(
            "ddg".to_string(),
            "https://duckduckgo.com/?q=%s".to_string(),
        );
        engines.insert(
            "w".to_string(),
            "https://en.wikipedia.org/wiki/Special:Search?search=%s".to_string(),
        );
        SearchEngines { engines }
    }
}

impl SearchEngines {
    pub fn empty() -> SearchEngines {
        SearchEngines {
            engines: HashMap::new(),
        }
    }

    /// Register or replace an engine. Keys are stored lowercased; lookup
    /// is case-insensitive.
    pub fn insert(&mut self, key: &str, template: &str) {
        self.engines
            .insert(key.to_lowercase(), template.to_string());
    }

    pub fn template(&self, key: &str) -> Option<&str> {
        self.engines.get(&key.to_lowercase()).map(|s| s.as_str())
    }
}

/// Recognize a command in one segment.
pub fn recognize(segment: &str, search_prefix: &str, engines: &SearchEngines) -> Command {
    if segment == WEIGHT_CALC_COMMAND {
        return Command::Navigate {
            target: WEIGHT_CALC_TARGET.to_string(),
        };
    }

    if search_prefix.is_empty() {
        return Command::None;
    }
    let Some(rest) = segment.strip_prefix(search_prefix) else {
        return Command::None;
    };
    // One non-whitespace engine key, one space, then the payload.
    let Some((key, payload)) = rest.split_once(' ') else {
        return Command::None;
    };
    if key.is_empty() || key.contains(char::is_whitespace) || payload.is_empty() {
        return Command::None;
    }
    let Some(template) = engines.template(key) else {
        return Command::None;
    };
    Command::OpenUrl {
        url: template.replace("%s", &percent_encode(payload)),
    }
}

/// Minimal query-string percent encoding: unreserved ASCII passes
/// through, spaces become `+`, everything else is `%XX`-escaped.
fn percent_encode(payload: &str) -> String {
    let mut out = String::with_capacity(payload.len());
    for b in payload.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}
