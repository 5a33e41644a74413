use super::*;
use pretty_assertions::assert_eq;

fn column(values: &[&str]) -> CifEntry {
    CifEntry::Column(values.iter().map(|v| (*v).to_owned()).collect())
}

#[test]
fn empty_document() {
    let doc = CifDocument::new();
    assert!(doc.is_empty());
    assert_eq!(doc.len(), 0);
    assert_eq!(doc.block_name(), None);
    assert!(doc.garbage().is_empty());
    assert_eq!(doc.keys().collect::<Vec<_>>(), vec![GARBAGE_KEY]);
}

#[test]
fn insert_and_get() {
    let mut doc = CifDocument::new();
    doc.insert("_a", CifEntry::Scalar("1".to_owned()));
    doc.insert("_b", column(&["x", "y"]));

    assert_eq!(doc.scalar("_a"), Some("1"));
    assert_eq!(doc.column("_a"), None);
    assert_eq!(doc.column("_b"), Some(&["x".to_owned(), "y".to_owned()][..]));
    assert_eq!(doc.scalar("_b"), None);
    assert_eq!(doc.get("_missing"), None);
    assert!(doc.contains_tag("_a"));
    assert!(!doc.contains_tag("a"));
}

#[test]
fn last_write_wins_keeps_position() {
    let mut doc = CifDocument::new();
    doc.insert("_a", CifEntry::Scalar("old".to_owned()));
    doc.insert("_b", CifEntry::Scalar("b".to_owned()));
    doc.insert("_a", column(&["new"]));

    assert_eq!(doc.len(), 2);
    assert_eq!(doc.tags().collect::<Vec<_>>(), vec!["_a", "_b"]);
    assert_eq!(doc.get("_a"), Some(&column(&["new"])));
}

#[test]
fn tags_are_case_sensitive() {
    let mut doc = CifDocument::new();
    doc.insert("_Cell.a", CifEntry::Scalar("1".to_owned()));
    assert_eq!(doc.scalar("_cell.a"), None);
    assert_eq!(doc.scalar("_Cell.a"), Some("1"));
}

#[test]
fn reserved_keys_via_lookup() {
    let mut doc = CifDocument::new();
    doc.set_block_name("1ABC");
    doc.push_garbage("stray");
    doc.insert("_a", CifEntry::Scalar("v".to_owned()));
    doc.insert("_b", column(&["1", "2"]));

    assert_eq!(doc.lookup(BLOCK_NAME_KEY), Some(Lookup::Value("1ABC")));
    assert_eq!(
        doc.lookup(GARBAGE_KEY),
        Some(Lookup::List(&["stray".to_owned()][..]))
    );
    assert_eq!(doc.lookup("_a"), Some(Lookup::Value("v")));
    assert_eq!(
        doc.lookup("_b"),
        Some(Lookup::List(&["1".to_owned(), "2".to_owned()][..]))
    );
    assert_eq!(doc.lookup("_c"), None);
    // Reserved keys are not tags.
    assert_eq!(doc.get(BLOCK_NAME_KEY), None);
}

#[test]
fn block_name_lookup_absent_without_header() {
    let doc = CifDocument::new();
    assert_eq!(doc.lookup(BLOCK_NAME_KEY), None);
    assert_eq!(doc.lookup(GARBAGE_KEY), Some(Lookup::List(&[])));
}

#[test]
fn keys_include_reserved_in_order() {
    let mut doc = CifDocument::new();
    doc.insert("_z", CifEntry::Scalar("1".to_owned()));
    doc.set_block_name("blk");
    doc.insert("_a", CifEntry::Scalar("2".to_owned()));

    assert_eq!(
        doc.keys().collect::<Vec<_>>(),
        vec![BLOCK_NAME_KEY, "_z", "_a", GARBAGE_KEY]
    );
}

#[test]
fn iter_yields_entries_in_order() {
    let mut doc = CifDocument::new();
    doc.insert("_a", CifEntry::Scalar("1".to_owned()));
    doc.insert("_b", column(&[]));
    let pairs: Vec<(&str, &CifEntry)> = doc.iter().collect();
    assert_eq!(
        pairs,
        vec![
            ("_a", &CifEntry::Scalar("1".to_owned())),
            ("_b", &column(&[])),
        ]
    );
}

#[test]
fn serializes_as_ordered_map() {
    let mut doc = CifDocument::new();
    doc.set_block_name("t");
    doc.insert("_b", CifEntry::Scalar("two words".to_owned()));
    doc.insert("_a", column(&["1", "3"]));
    doc.push_garbage("orphan");

    let json = serde_json::to_string(&doc).unwrap_or_default();
    assert_eq!(
        json,
        r#"{"data_":"t","_b":"two words","_a":["1","3"],"garbage_":["orphan"]}"#
    );
}

#[test]
fn serializes_without_block_name() {
    let doc = CifDocument::new();
    let json = serde_json::to_string(&doc).unwrap_or_default();
    assert_eq!(json, r#"{"garbage_":[]}"#);
}

#[test]
fn document_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CifDocument>();
    assert_send_sync::<CifEntry>();
}
