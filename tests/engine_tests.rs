//! Full-pipeline integration tests.
//!
//! Exercises the documented end-to-end properties: code round trips,
//! splitting, tag filtering, the organic transform, round-up, and
//! pipeline idempotence.

use barq::catalog::{Catalog, CatalogDb, ItemRecord, ItemValue};
use barq::code::{classify, plu_to_upc, sku_to_upc, upc_check_digit, Classification};
use barq::query::{split_query, Command, Engine, SearchEngines, SearchPreferences};

fn item(name: &str, value: &str, tags: &[&str]) -> ItemRecord {
    ItemRecord {
        name: Some(name.to_string()),
        value: Some(ItemValue::Text(value.to_string())),
        tags: tags.iter().map(|s| s.to_string()).collect(),
        ..ItemRecord::default()
    }
}

fn store_catalog() -> Catalog {
    let db = CatalogDb {
        name: "store".to_string(),
        version: "7".to_string(),
        organization: Some("GIANT_EAGLE".to_string()),
        items: vec![
            item("Bananas", "4011", &["produce"]),
            item("Apples Gala", "4131", &["produce"]),
            item("Whole Milk", "070038", &["dairy"]),
            {
                let mut dup = item("Bananas Dup", "4011", &["produce"]);
                dup.duplicate = true;
                dup
            },
            {
                let mut retired = item("Old Thing", "999", &[]);
                retired.ignore = true;
                retired
            },
        ],
    };
    Catalog::compile(Some(&db), &[])
}

#[test]
fn check_digit_stability_and_reclassification() {
    for input in ["00000004011", "12345678901", "99999999999"] {
        let first = upc_check_digit(input).expect("check digit defined");
        let second = upc_check_digit(input).expect("check digit defined");
        assert_eq!(first, second);

        let full = format!("{}{}", input, first);
        assert_eq!(classify(&full), Classification::Upc);
        assert_eq!(full.len(), 12);
    }
}

#[test]
fn plu_round_trip_reference_value() {
    // PLU 4011 (bananas) must produce the hand-computed reference UPC.
    assert_eq!(plu_to_upc("4011").as_deref(), Some("000000040112"));

    let upc = plu_to_upc("1234").unwrap();
    let cd = upc.as_bytes()[11] - b'0';
    assert_eq!(upc_check_digit(&upc[..11]), Some(cd));
}

#[test]
fn sku_strip_reference_value() {
    assert_eq!(sku_to_upc("21234500001234").as_deref(), Some("234500001234"));
}

#[test]
fn split_reference_cases() {
    assert_eq!(split_query("a;b;;c", ";"), vec!["a", "b", "c"]);
    assert_eq!(split_query("abc", ""), vec!["abc"]);
}

#[test]
fn round_up_reference_cases() {
    assert_eq!(barq::try_round_up("1"), Some(99));
    assert_eq!(barq::try_round_up("0"), None);
    assert_eq!(barq::try_round_up("100"), None);
}

#[test]
fn tag_filter_returns_exact_unranked_subset() {
    let mut engine = Engine::new();
    let prefs = SearchPreferences::default();
    let catalog = store_catalog();

    let result =
        engine.evaluate_segment("#produce", &prefs, &catalog, &SearchEngines::default());
    assert!(result.tag_filtered);
    let names: Vec<&str> = result.matches.iter().map(|m| m.name.as_str()).collect();
    // Catalog order, excluded records absent.
    assert_eq!(names, vec!["Bananas", "Apples Gala"]);
}

#[test]
fn tag_prefix_followed_by_whitespace_falls_through_to_search() {
    let mut engine = Engine::new();
    let prefs = SearchPreferences::default();
    let catalog = store_catalog();

    let result =
        engine.evaluate_segment("# produce", &prefs, &catalog, &SearchEngines::default());
    assert!(!result.tag_filtered);
}

#[test]
fn organic_transform_end_to_end() {
    let mut engine = Engine::new();
    let prefs = SearchPreferences::default();
    let catalog = store_catalog();

    let result =
        engine.evaluate_segment("banana!", &prefs, &catalog, &SearchEngines::default());
    let banana = &result.matches[0];
    assert_eq!(banana.name, "[Organic] Bananas");
    assert_eq!(banana.code, "94011");

    // A 5-character code is unaffected.
    let db = CatalogDb {
        name: "store".to_string(),
        version: "8".to_string(),
        organization: None,
        items: vec![item("Squash", "40111", &[])],
    };
    let catalog = Catalog::compile(Some(&db), &[]);
    let result =
        engine.evaluate_segment("squash!", &prefs, &catalog, &SearchEngines::default());
    assert_eq!(result.matches[0].code, "40111");
}

#[test]
fn no_cheat_marks_code_disabled_but_present() {
    let mut engine = Engine::new();
    let prefs = SearchPreferences {
        no_cheat: true,
        ..SearchPreferences::default()
    };
    let catalog = store_catalog();

    let result =
        engine.evaluate_segment("banana", &prefs, &catalog, &SearchEngines::default());
    let banana = &result.matches[0];
    assert!(banana.disabled);
    assert_eq!(banana.code, "4011");
    assert!(banana.upc.is_some());
}

#[test]
fn full_pipeline_is_idempotent() {
    let mut engine = Engine::new();
    let prefs = SearchPreferences::default();
    let catalog = store_catalog();
    let engines = SearchEngines::default();
    let raw = "banana!;#produce;4011;2+2;37;wc";

    let a = engine.evaluate(raw, &prefs, &catalog, &engines);
    let b = engine.evaluate(raw, &prefs, &catalog, &engines);
    assert_eq!(a, b);

    // A second engine instance agrees too: no hidden state.
    let mut fresh = Engine::new();
    let c = fresh.evaluate(raw, &prefs, &catalog, &engines);
    assert_eq!(a, c);
}

#[test]
fn segments_evaluate_independently() {
    let mut engine = Engine::new();
    let prefs = SearchPreferences::default();
    let catalog = store_catalog();
    let engines = SearchEngines::default();

    let result = engine.evaluate("wc;2+2;banana", &prefs, &catalog, &engines);
    assert_eq!(result.segments.len(), 3);
    assert_eq!(
        result.segments[0].command,
        Command::Navigate {
            target: "wcalc".to_string()
        }
    );
    assert_eq!(result.segments[1].math.as_deref(), Some("4"));
    assert_eq!(result.segments[2].matches[0].name, "Bananas");
}

#[test]
fn search_engine_directive_end_to_end() {
    let mut engine = Engine::new();
    let prefs = SearchPreferences {
        search_prefix: "?".to_string(),
        ..SearchPreferences::default()
    };
    let catalog = store_catalog();

    let result =
        engine.evaluate_segment("?g ripe bananas", &prefs, &catalog, &SearchEngines::default());
    assert_eq!(
        result.command,
        Command::OpenUrl {
            url: "https://www.google.com/search?q=ripe+bananas".to_string()
        }
    );
    assert!(result.matches.is_empty());
}

#[test]
fn user_items_join_the_catalog() {
    let user = barq::parse_user_items("Reusable bag: 00042\nDeposit: 12345");
    let db = CatalogDb {
        name: "store".to_string(),
        version: "1".to_string(),
        organization: None,
        items: vec![item("Bananas", "4011", &["produce"])],
    };
    let catalog = Catalog::compile(Some(&db), &user);
    assert_eq!(catalog.items().len(), 3);

    let mut engine = Engine::new();
    let prefs = SearchPreferences::default();
    let result =
        engine.evaluate_segment("#user", &prefs, &catalog, &SearchEngines::default());
    assert_eq!(result.matches.len(), 2);
    assert_eq!(result.matches[0].code, "00042");
}

#[test]
fn transcript_normalization_feeds_the_pipeline() {
    assert_eq!(barq::normalize_transcript("4 0 1 1"), "4011");

    let mut engine = Engine::new();
    let prefs = SearchPreferences::default();
    let catalog = store_catalog();
    let raw = barq::normalize_transcript("4 0 1 1");
    let result = engine.evaluate(&raw, &prefs, &catalog, &SearchEngines::default());
    let typed = result.segments[0].typed_code.as_ref().unwrap();
    assert_eq!(typed.upc.as_deref(), Some("000000040112"));
}
