//! Catalog data model and snapshot compilation.
//!
//! The catalog is an immutable snapshot: remote records (fetched and
//! cached by some outer layer; acquisition is not this crate's concern)
//! concatenated with user-entered records, minus anything flagged
//! `duplicate` or `ignore`. That exclusion is structural: excluded
//! records never enter the compiled item list, so no query-time filter is
//! needed.
//!
//! Each compiled snapshot carries a fingerprint so the search index can
//! detect "catalog changed" by identity instead of deep comparison.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// A catalog value: the scannable code for an item. The wire format
/// allows both JSON numbers and strings; strings preserve leading zeros.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemValue {
    Number(f64),
    Text(String),
}

impl fmt::Display for ItemValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemValue::Number(n) => write!(f, "{}", n),
            ItemValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// One catalog entry.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<ItemValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(
        default,
        rename = "priority-keywords",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub priority_keywords: Vec<String>,
    #[serde(default, rename = "uiColor", skip_serializing_if = "Option::is_none")]
    pub ui_color: Option<String>,
    /// Record is a duplicate of another entry; excluded at compile time.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub duplicate: bool,
    /// Record is retired; excluded at compile time.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub ignore: bool,
}

impl ItemRecord {
    /// Stringified code value, or empty if the record has none.
    pub fn value_string(&self) -> String {
        self.value
            .as_ref()
            .map(|v| v.to_string())
            .unwrap_or_default()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// The remote catalog document shape.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CatalogDb {
    pub name: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    pub items: Vec<ItemRecord>,
}

/// An immutable compiled snapshot: the deduplicated item list plus an
/// identity fingerprint.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    items: Vec<ItemRecord>,
    organization: Option<String>,
    fingerprint: String,
}

impl Catalog {
    /// Compile a snapshot from an optional remote catalog and user items.
    /// Records flagged `duplicate` or `ignore` are dropped here and never
    /// reappear downstream.
    pub fn compile(db: Option<&CatalogDb>, user_items: &[ItemRecord]) -> Catalog {
        let remote = db.map(|d| d.items.as_slice()).unwrap_or_default();
        let items: Vec<ItemRecord> = remote
            .iter()
            .chain(user_items.iter())
            .filter(|item| !item.duplicate && !item.ignore)
            .cloned()
            .collect();
        let fingerprint = fingerprint(db, user_items);
        Catalog {
            items,
            organization: db.and_then(|d| d.organization.clone()),
            fingerprint,
        }
    }

    pub fn items(&self) -> &[ItemRecord] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Identity of this snapshot. Two snapshots compiled from the same
    /// catalog version and user input share a fingerprint; the search
    /// index rebuilds only when it changes.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Organization declared by the remote catalog, if any.
    pub fn organization(&self) -> Option<&str> {
        self.organization.as_deref()
    }
}

fn fingerprint(db: Option<&CatalogDb>, user_items: &[ItemRecord]) -> String {
    let mut hasher = Sha256::new();
    if let Some(db) = db {
        hasher.update(db.name.as_bytes());
        hasher.update(b":");
        hasher.update(db.version.as_bytes());
        hasher.update(b":");
        hasher.update(db.organization.as_deref().unwrap_or("").as_bytes());
        hasher.update(b":");
        hasher.update(db.items.len().to_string().as_bytes());
    }
    for item in user_items {
        hasher.update(b";");
        hasher.update(item.name.as_deref().unwrap_or("").as_bytes());
        hasher.update(b"=");
        hasher.update(item.value_string().as_bytes());
    }
    let digest = hasher.finalize();
    hex::encode(&digest[..8])
}

/// Parse user-entered catalog lines.
///
/// Each non-empty line is `name: value`; the value is kept as a verbatim
/// string so codes with leading zeros survive. Parsed records are tagged
/// `user`. Lines without a colon or with an empty name are skipped.
pub fn parse_user_items(input: &str) -> Vec<ItemRecord> {
    input
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }
            let (name, value) = line.split_once(':')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            Some(ItemRecord {
                name: Some(name.to_string()),
                value: Some(ItemValue::Text(value.trim().to_string())),
                tags: vec!["user".to_string()],
                ..ItemRecord::default()
            })
        })
        .collect()
}

/// Resolve the active organization: an override preference wins, then the
/// catalog's own organization, then empty.
pub fn resolve_organization<'a>(override_id: &'a str, catalog: &'a Catalog) -> &'a str {
    if !override_id.is_empty() {
        override_id
    } else {
        catalog.organization().unwrap_or("")
    }
}
