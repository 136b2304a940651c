//! Response types and formatting.
//!
//! JSON output is wrapped in a versioned envelope so downstream tooling
//! can detect schema drift; human output is a compact per-segment
//! rendering for terminal use.

use crate::code::{Classification, DerivedCode};
use crate::query::Command;
use chrono::Utc;
use clap::ValueEnum;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fmt;

const SCHEMA_VERSION: &str = "1.0.0";

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            OutputFormat::Human => "human",
            OutputFormat::Json => "json",
        };
        write!(f, "{}", value)
    }
}

#[derive(Serialize)]
pub struct JsonResponse<T> {
    pub schema_version: &'static str,
    pub execution_id: String,
    pub tool: &'static str,
    pub timestamp: String,
    pub data: T,
}

pub fn json_response<T>(data: T) -> JsonResponse<T> {
    JsonResponse {
        schema_version: SCHEMA_VERSION,
        execution_id: execution_id(),
        tool: "barq",
        timestamp: Utc::now().to_rfc3339(),
        data,
    }
}

pub fn execution_id() -> String {
    let timestamp = Utc::now().timestamp();
    let pid = std::process::id();
    format!("{:x}-{:x}", timestamp, pid)
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub error: String,
    pub message: String,
    pub remediation: Option<String>,
}

/// One catalog item resolved for display: augmented name and code,
/// derived scannable UPC, and the disabled flag for no-cheat mode.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResolvedItem {
    pub match_id: String,
    pub name: String,
    pub code: String,
    pub classification: Classification,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pretty: Option<String>,
    /// Code is computed but must not be rendered scannable.
    pub disabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ui_color: Option<String>,
}

/// Everything one query segment resolved to.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SegmentResult {
    pub text: String,
    pub command: Command,
    /// Tag-filter mode was used; paging is disabled for these results.
    pub tag_filtered: bool,
    pub matches: Vec<ResolvedItem>,
    pub total_count: u64,
    /// Code typed directly into the segment, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typed_code: Option<DerivedCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub math: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round_up: Option<u32>,
}

impl SegmentResult {
    /// A result carrying nothing but the segment text. Used as the base
    /// for command short-circuits.
    pub fn empty(text: &str) -> SegmentResult {
        SegmentResult {
            text: text.to_string(),
            command: Command::None,
            tag_filtered: false,
            matches: Vec::new(),
            total_count: 0,
            typed_code: None,
            math: None,
            round_up: None,
        }
    }
}

/// Full pipeline output for one raw input string.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QueryResult {
    pub raw: String,
    pub segments: Vec<SegmentResult>,
}

/// Stable identity for a resolved item, for render-side keying and
/// deduplication.
pub fn item_match_id(name: &str, code: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(name.as_bytes());
    hasher.update(b":");
    hasher.update(code.as_bytes());
    let digest = hasher.finalize();
    hex::encode(&digest[..8])
}

/// Render a query result for terminal use, truncating each segment's
/// match list to `limit` (tag-filtered segments are never truncated).
pub fn format_human(result: &QueryResult, limit: usize) -> String {
    let mut out = String::new();
    for (i, segment) in result.segments.iter().enumerate() {
        if result.segments.len() > 1 {
            out.push_str(&format!("── segment {} ── {}\n", i + 1, segment.text));
        }
        match &segment.command {
            Command::Navigate { target } => {
                out.push_str(&format!("command: navigate -> {}\n", target));
                continue;
            }
            Command::OpenUrl { url } => {
                out.push_str(&format!("command: open -> {}\n", url));
                continue;
            }
            Command::None => {}
        }
        if let Some(math) = &segment.math {
            out.push_str(&format!("= {}\n", math));
        }
        if let Some(round_up) = segment.round_up {
            out.push_str(&format!("round up: {}¢\n", round_up));
        }
        if let Some(typed) = &segment.typed_code {
            let shown = typed.pretty.as_deref().unwrap_or(&typed.raw);
            out.push_str(&format!(
                "typed code: {} [{}]\n",
                shown, typed.classification
            ));
        }
        if segment.matches.is_empty() {
            out.push_str("No items found.\n");
            continue;
        }
        let shown: &[ResolvedItem] = if segment.tag_filtered || limit == 0 {
            &segment.matches
        } else {
            &segment.matches[..segment.matches.len().min(limit)]
        };
        for item in shown {
            let code = item.pretty.as_deref().unwrap_or(&item.code);
            let flag = if item.disabled { " (not scannable)" } else { "" };
            out.push_str(&format!("{:<30} {}{}\n", item.name, code, flag));
        }
        if shown.len() < segment.matches.len() {
            out.push_str(&format!(
                "… {} more (of {})\n",
                segment.matches.len() - shown.len(),
                segment.total_count
            ));
        }
    }
    out
}
