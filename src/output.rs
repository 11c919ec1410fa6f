//! Rendering a [`NamedParamMap`] back to surface syntax, plus JSON
//! conversion.
//!
//! Rendering is the inverse of parsing up to ordering: re-parsing the output
//! yields a map equal to the original, but parameters are emitted in sorted
//! name order, which need not match the source. Ordering is a choice of this
//! renderer, not a guarantee of the grammar - compare round-tripped maps,
//! never round-tripped text.

use crate::lexer::TokenKind;
use crate::map::NamedParamMap;

/// Render a map to grammar-conformant text.
///
/// # Examples
///
/// ```
/// use parmap_lang::{parse, to_text};
///
/// let map = parse("foo(b=hello;a=1.5)").unwrap();
/// assert_eq!(to_text(&map), "foo(a=1.5;b=hello)");
/// ```
pub fn to_text(map: &NamedParamMap) -> String {
    let mut entries: Vec<(String, String)> = Vec::new();
    for (k, v) in &map.numbers {
        entries.push((k.clone(), fmt_number(*v)));
    }
    for (k, v) in &map.strings {
        entries.push((k.clone(), v.clone()));
    }
    for (k, v) in &map.maps {
        entries.push((k.clone(), to_text(v)));
    }
    for (k, vs) in &map.number_lists {
        entries.push((k.clone(), fmt_list(vs.iter().map(|v| fmt_number(*v)))));
    }
    for (k, vs) in &map.string_lists {
        entries.push((k.clone(), fmt_list(vs.iter().cloned())));
    }
    for (k, vs) in &map.map_lists {
        entries.push((k.clone(), fmt_list(vs.iter().map(to_text))));
    }
    entries.sort();

    let body = entries
        .into_iter()
        .map(|(k, v)| format!("{}{}{}", k, TokenKind::Assign.rendered(), v))
        .collect::<Vec<_>>()
        .join(TokenKind::ListSep.rendered());
    format!(
        "{}{}{}{}",
        map.name(),
        TokenKind::OpenContent.rendered(),
        body,
        TokenKind::ClosedContent.rendered()
    )
}

impl std::fmt::Display for NamedParamMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&to_text(self))
    }
}

fn fmt_list<I>(items: I) -> String
where
    I: IntoIterator<Item = String>,
{
    format!(
        "{}{}{}",
        TokenKind::OpenList.rendered(),
        items.into_iter().collect::<Vec<_>>().join(TokenKind::ListSep.rendered()),
        TokenKind::ClosedList.rendered()
    )
}

// `Display` for f64 is shortest-round-trip plain decimal, never scientific
// notation, so the output always re-lexes as a single number token.
fn fmt_number(v: f64) -> String {
    v.to_string()
}

/// Convert a map to a JSON value: `{"name": ..., "params": {...}}`, with
/// nested maps converted recursively and boolean-shaped strings left as
/// strings (the grammar has no boolean literal).
pub fn to_json(map: &NamedParamMap) -> serde_json::Value {
    let mut params = serde_json::Map::new();
    for (k, v) in &map.numbers {
        params.insert(k.clone(), json_number(*v));
    }
    for (k, v) in &map.strings {
        params.insert(k.clone(), serde_json::Value::String(v.clone()));
    }
    for (k, v) in &map.maps {
        params.insert(k.clone(), to_json(v));
    }
    for (k, vs) in &map.number_lists {
        params.insert(
            k.clone(),
            serde_json::Value::Array(vs.iter().map(|v| json_number(*v)).collect()),
        );
    }
    for (k, vs) in &map.string_lists {
        params.insert(
            k.clone(),
            serde_json::Value::Array(
                vs.iter()
                    .map(|s| serde_json::Value::String(s.clone()))
                    .collect(),
            ),
        );
    }
    for (k, vs) in &map.map_lists {
        params.insert(
            k.clone(),
            serde_json::Value::Array(vs.iter().map(to_json).collect()),
        );
    }

    let mut root = serde_json::Map::new();
    root.insert(
        "name".to_string(),
        serde_json::Value::String(map.name().to_string()),
    );
    root.insert("params".to_string(), serde_json::Value::Object(params));
    serde_json::Value::Object(root)
}

fn json_number(v: f64) -> serde_json::Value {
    serde_json::Number::from_f64(v)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}
