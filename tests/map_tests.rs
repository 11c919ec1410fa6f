// tests/map_tests.rs

use parmap_lang::parse;

// ============================================================================
// Routing
// ============================================================================

#[test]
fn test_scalar_routing() {
    let map = parse("foo(a=1.5;b=hello)").unwrap();
    assert_eq!(map.name(), "foo");
    assert_eq!(map.number("a"), Some(1.5));
    assert_eq!(map.string("b"), Some("hello"));
}

#[test]
fn test_a_name_lives_in_exactly_one_category() {
    let map = parse("foo(a=1)").unwrap();
    assert_eq!(map.number("a"), Some(1.0));
    assert_eq!(map.string("a"), None);
    assert!(map.map("a").is_none());
    assert_eq!(map.numbers("a"), None);
    assert_eq!(map.strings("a"), None);
    assert_eq!(map.maps("a"), None);
}

#[test]
fn test_nested_map() {
    let map = parse("foo(a=bar(x=1))").unwrap();
    let nested = map.map("a").unwrap();
    assert_eq!(nested.name(), "bar");
    assert_eq!(nested.number("x"), Some(1.0));
}

#[test]
fn test_list_routing() {
    let map = parse("foo(ns=[1;2;3];ss=[x;y];ms=[p();q(v=1)])").unwrap();
    assert_eq!(map.numbers("ns"), Some(&[1.0, 2.0, 3.0][..]));
    let ss: Vec<&str> = map.strings("ss").unwrap().iter().map(String::as_str).collect();
    assert_eq!(ss, vec!["x", "y"]);
    let ms = map.maps("ms").unwrap();
    assert_eq!(ms.len(), 2);
    assert_eq!(ms[0].name(), "p");
    assert_eq!(ms[1].number("v"), Some(1.0));
}

#[test]
fn test_empty_list_routes_to_maps() {
    let map = parse("foo(a=[])").unwrap();
    assert_eq!(map.maps("a"), Some(&[][..]));
    assert_eq!(map.numbers("a"), None);
    assert_eq!(map.strings("a"), None);
}

#[test]
fn test_absent_name() {
    let map = parse("foo()").unwrap();
    assert_eq!(map.number("a"), None);
    assert_eq!(map.string("a"), None);
    assert!(map.map("a").is_none());
    assert_eq!(map.integer("a"), None);
    assert_eq!(map.boolean("a"), None);
    assert_eq!(map.numbers("a"), None);
    assert_eq!(map.strings("a"), None);
    assert_eq!(map.maps("a"), None);
    assert_eq!(map.integers("a"), None);
    assert_eq!(map.booleans("a"), None);
}

// ============================================================================
// Duplicates: last write wins
// ============================================================================

#[test]
fn test_duplicate_name_same_category() {
    let map = parse("foo(a=1;a=2)").unwrap();
    assert_eq!(map.number("a"), Some(2.0));
}

#[test]
fn test_duplicate_name_across_categories() {
    let map = parse("foo(a=1;a=hello)").unwrap();
    assert_eq!(map.number("a"), None);
    assert_eq!(map.string("a"), Some("hello"));

    let map = parse("foo(a=hello;a=[1;2])").unwrap();
    assert_eq!(map.string("a"), None);
    assert_eq!(map.numbers("a"), Some(&[1.0, 2.0][..]));
}

// ============================================================================
// Integer coercion boundary
// ============================================================================

#[test]
fn test_integer_exactness() {
    let map = parse("foo(a=3.0;b=3.5;c=-2.0;d=3)").unwrap();
    assert_eq!(map.integer("a"), Some(3));
    assert_eq!(map.integer("b"), None);
    assert_eq!(map.integer("c"), Some(-2));
    assert_eq!(map.integer("d"), Some(3));
    // The underlying number is still there either way
    assert_eq!(map.number("b"), Some(3.5));
}

#[test]
fn test_integer_of_non_number_is_missing() {
    let map = parse("foo(a=hello)").unwrap();
    assert_eq!(map.integer("a"), None);
}

#[test]
fn test_integers_all_or_nothing() {
    let map = parse("foo(a=[1.0;2.0];b=[1.0;2.5])").unwrap();
    assert_eq!(map.integers("a"), Some(vec![1, 2]));
    assert_eq!(map.integers("b"), None);
}

#[test]
fn test_integers_of_empty_or_absent() {
    let map = parse("foo(a=1)").unwrap();
    assert_eq!(map.integers("a"), None);
    assert_eq!(map.integers("zzz"), None);
}

// ============================================================================
// Booleans
// ============================================================================

#[test]
fn test_boolean_is_case_insensitive_true() {
    let map = parse("foo(a=true;b=TRUE;c=True)").unwrap();
    assert_eq!(map.boolean("a"), Some(true));
    assert_eq!(map.boolean("b"), Some(true));
    assert_eq!(map.boolean("c"), Some(true));
}

#[test]
fn test_boolean_distinguishes_false_from_absent() {
    let map = parse("foo(a=false;b=maybe)").unwrap();
    assert_eq!(map.boolean("a"), Some(false));
    assert_eq!(map.boolean("b"), Some(false));
    assert_eq!(map.boolean("zzz"), None);
}

#[test]
fn test_boolean_of_number_is_missing() {
    let map = parse("foo(a=1)").unwrap();
    assert_eq!(map.boolean("a"), None);
}

#[test]
fn test_booleans_list() {
    let map = parse("foo(a=[true;True;no])").unwrap();
    assert_eq!(map.booleans("a"), Some(vec![true, true, false]));
}
