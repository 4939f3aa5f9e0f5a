use super::*;

#[test]
#[cfg(feature = "lang-cpp")]
fn lang_from_name() {
    assert_eq!(from_name("cpp").unwrap().name(), "cpp");
    assert_eq!(from_name("C++").unwrap().name(), "cpp");
    assert_eq!(from_name("CXX").unwrap().name(), "cpp");
    assert!(from_name("unknown").is_none());
}

#[test]
fn all_returns_enabled_langs() {
    let langs = all();
    assert_eq!(langs.len(), usize::from(cfg!(feature = "lang-cpp")));
    for lang in &langs {
        assert!(!lang.name().is_empty());
        assert!(!lang.base_name().is_empty());
    }
}

#[test]
#[cfg(feature = "lang-cpp")]
fn cpp_extends_c() {
    let lang = cpp();
    assert_eq!(lang.base_name(), "c");
    assert_eq!(lang.extension().name(), "cpp");
    assert_eq!(lang.base_precedence().resolve("CALL"), Ok(14));
    assert!(Arc::ptr_eq(&lang, &cpp()));
}

#[test]
fn c_precedence_levels() {
    let table = c::precedence_table();
    assert_eq!(table.len(), c::PREC.len());
    assert_eq!(table.resolve("PAREN_DECLARATOR"), Ok(-10));
    assert_eq!(table.resolve("SUBSCRIPT"), Ok(16));

    assert_eq!(table.resolve("ASSIGNMENT"), Ok(-1));
    assert_eq!(table.resolve("CONDITIONAL"), Ok(-2));

    let values: Vec<i32> = c::PREC
        .iter()
        .skip_while(|(name, _)| *name != "DEFAULT")
        .map(|(_, v)| *v)
        .collect();
    assert_eq!(values.first(), Some(&0));
    assert!(values.windows(2).all(|w| w[0] < w[1]));
}
