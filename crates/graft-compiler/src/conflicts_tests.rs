use crate::conflicts::ConflictSet;

#[test]
fn declare_keeps_order_and_collapses_duplicates() {
    let mut set = ConflictSet::new();
    assert!(set.declare(["type_specifier", "_declarator"]).unwrap());
    assert!(set.declare(["template_function", "template_type"]).unwrap());
    assert!(!set.declare(["type_specifier", "_declarator"]).unwrap());
    assert!(set.declare(["_declarator", "type_specifier"]).unwrap());

    let entries: Vec<&[String]> = set.iter().collect();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0], ["type_specifier", "_declarator"]);
    assert_eq!(entries[2], ["_declarator", "type_specifier"]);
}

#[test]
fn entries_need_two_distinct_names() {
    let mut set = ConflictSet::new();

    let err = set.declare(["call"]).unwrap_err();
    insta::assert_snapshot!(err, @"a conflict needs at least two rules, got `call`");

    assert!(set.declare(["call", "call"]).is_err());
    assert!(set.declare(Vec::<String>::new()).is_err());
    assert!(set.is_empty());
}

#[test]
fn union_is_a_superset_with_base_first() {
    let base = ConflictSet::from_entries([vec!["a".to_owned(), "b".to_owned()]]);
    let mut ext = ConflictSet::new();
    ext.declare(["c", "d"]).unwrap();
    ext.declare(["a", "b"]).unwrap();

    let mut merged = base.clone();
    merged.union(&ext);

    assert!(merged.is_superset(&base));
    assert!(merged.is_superset(&ext));
    assert_eq!(merged.len(), 2);
    assert!(merged.contains(&["c", "d"]));
    assert!(!merged.contains(&["d", "c"]));
    assert_eq!(
        merged.into_vec(),
        [vec!["a".to_owned(), "b".to_owned()], vec!["c".to_owned(), "d".to_owned()]]
    );
}
