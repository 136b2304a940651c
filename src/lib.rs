//! barq - Query resolution and barcode code engine for retail checkout.
//!
//! This library resolves a typed (or transcribed) query string into
//! ranked catalog matches and scannable codes. It combines several small
//! but exacting pieces:
//!
//! - **Code classification**: PLU / UPC / SKU shape detection
//! - **Code conversion**: PLU and SKU to full UPC with check digit
//! - **Fuzzy catalog search**: weighted-field ranked matching with a
//!   tag-filter mode
//! - **Query splitting**: multi-segment input with active-segment
//!   navigation
//! - **Command recognition**: tool navigation and search-engine
//!   directives
//! - **Augmentation**: organic PLU transform, arithmetic evaluation,
//!   round-up change, no-cheat barcode lockout
//! - **Key combos**: a small `^!+#` shorthand grammar for configurable
//!   shortcuts
//!
//! # Quick Start
//!
//! ```
//! use barq::catalog::Catalog;
//! use barq::query::{Engine, SearchEngines, SearchPreferences};
//!
//! let mut engine = Engine::new();
//! let prefs = SearchPreferences::default();
//! let catalog = Catalog::default();
//! let result = engine.evaluate("4011;2+2", &prefs, &catalog, &SearchEngines::default());
//! assert_eq!(result.segments.len(), 2);
//! ```
//!
//! All engine operations are synchronous pure-or-nearly-pure functions
//! over immutable inputs. The fuzzy index is the only derived structure;
//! it is rebuilt exactly when the catalog snapshot identity changes.
//!
//! # Modules
//!
//! - [`augment`] - Organic transform, round-up, no-cheat, transcript cleanup
//! - [`catalog`] - Catalog data model and snapshot compilation
//! - [`code`] - Code classification and UPC conversion
//! - [`error`] - Error types
//! - [`eval`] - Arithmetic expression evaluation
//! - [`keys`] - Key-combination matching
//! - [`output`] - Response types and formatting
//! - [`query`] - Splitting, commands, preferences, and the pipeline
//! - [`search`] - Fuzzy catalog matching

pub mod augment;
pub mod catalog;
pub mod code;
pub mod error;
pub mod eval;
pub mod keys;
pub mod output;
pub mod query;
pub mod search;

// Re-export the core surface for external use
pub use catalog::{parse_user_items, Catalog, CatalogDb, ItemRecord, ItemValue};
pub use code::{
    classify, derive_code, plu_to_upc, pretty_upc, sku_to_upc, upc_check_digit, Classification,
    DerivedCode,
};
pub use augment::{normalize_transcript, try_round_up};
pub use error::BarqError;
pub use eval::try_math;
pub use keys::{KeyCombo, KeyComboSet, KeyEvent};
pub use output::{OutputFormat, QueryResult, ResolvedItem, SegmentResult};
pub use query::{Command, Engine, SearchEngines, SearchPreferences, SegmentCursor};
pub use search::MatchEngine;
