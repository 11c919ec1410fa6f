// tests/roundtrip_tests.rs

use parmap_lang::{parse, parse_list, to_text};

// Semantic round trip: the rendered text must re-parse to an equal map.
// Text equality is out of bounds - parameter order on output is the
// renderer's choice, not the grammar's.
fn roundtrip(src: &str) {
    let original = parse(src).unwrap();
    let rendered = to_text(&original);
    let reparsed = parse(&rendered).unwrap_or_else(|e| {
        panic!("rendered `{}` does not re-parse: {}", rendered, e);
    });
    assert_eq!(original, reparsed, "round trip changed `{}`", src);
}

#[test]
fn test_roundtrip_scalars() {
    roundtrip("foo()");
    roundtrip("foo(a=1.5;b=hello)");
    roundtrip("foo(a=-0.25)");
    roundtrip("foo(a=0.0000001)");
    roundtrip("foo(a=123456789)");
}

#[test]
fn test_roundtrip_nested() {
    roundtrip("foo(a=bar(x=1))");
    roundtrip("sim(dT=0.01;terrain=hilly(h=1.5;w=10))");
    roundtrip("a(b=c(d=e(f=g(h=1))))");
}

#[test]
fn test_roundtrip_lists() {
    roundtrip("foo(a=[1;2;3])");
    roundtrip("foo(a=[x;y];b=[p();q(v=2)])");
    roundtrip("foo(a=[])");
}

#[test]
fn test_roundtrip_dotted_names() {
    roundtrip("s.a.rw(f=8)");
    roundtrip("foo(s=sim.agent(x=1))");
}

#[test]
fn test_roundtrip_all_six_categories() {
    roundtrip("foo(a=1;b=s;c=n(x=1);d=[1;2];e=[u;v];f=[m();n(y=2)])");
}

#[test]
fn test_roundtrip_duplicates_collapse_once() {
    // After last-write-wins there is a single binding; rendering and
    // re-parsing must keep exactly that one.
    let map = parse("foo(a=1;a=hello)").unwrap();
    let reparsed = parse(&to_text(&map)).unwrap();
    assert_eq!(map, reparsed);
    assert_eq!(reparsed.string("a"), Some("hello"));
    assert_eq!(reparsed.number("a"), None);
}

#[test]
fn test_roundtrip_join_variants() {
    for map in parse_list("(a=[1;2])*[foo(k=1);bar()]").unwrap() {
        let reparsed = parse(&to_text(&map)).unwrap();
        assert_eq!(map, reparsed);
    }
}

#[test]
fn test_rendered_output_is_sorted_and_whitespace_free() {
    let map = parse("foo(b=2;a=1)").unwrap();
    let rendered = to_text(&map);
    assert_eq!(rendered, "foo(a=1;b=2)");
    assert!(!rendered.contains(' '));
}
