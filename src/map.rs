use std::collections::HashMap;

use crate::ast::{ExprNode, ValueNode};

/// The queryable result of parsing one configuration expression: a name plus
/// typed parameters.
///
/// Each parameter lives in exactly one of six categories - number, string,
/// nested map, or a homogeneous list of one of those - chosen by the shape
/// its value parsed as. A repeated parameter name silently replaces the
/// earlier binding (last write wins), even when the two occurrences have
/// different shapes.
///
/// The map is immutable once built and safe to read from multiple threads.
/// All accessors are total: absence and type mismatch both come back as
/// `None`, never as a panic, which makes probing for optional or
/// alternatively-typed parameters cheap.
///
/// # Examples
///
/// ```
/// use parmap_lang::parse;
///
/// let map = parse("ball(radius=0.5;color=red;pos=point(x=1;y=2))").unwrap();
/// assert_eq!(map.name(), "ball");
/// assert_eq!(map.number("radius"), Some(0.5));
/// assert_eq!(map.string("color"), Some("red"));
/// assert_eq!(map.map("pos").unwrap().number("x"), Some(1.0));
/// assert_eq!(map.number("mass"), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NamedParamMap {
    pub(crate) name: String,
    pub(crate) numbers: HashMap<String, f64>,
    pub(crate) strings: HashMap<String, String>,
    pub(crate) maps: HashMap<String, NamedParamMap>,
    pub(crate) number_lists: HashMap<String, Vec<f64>>,
    pub(crate) string_lists: HashMap<String, Vec<String>>,
    pub(crate) map_lists: HashMap<String, Vec<NamedParamMap>>,
}

impl From<&ExprNode> for NamedParamMap {
    /// Build a map from a parsed expression, depth first: nested expressions
    /// become fully-built child maps before insertion into the parent.
    fn from(node: &ExprNode) -> Self {
        let mut map = NamedParamMap {
            name: node.name.clone(),
            numbers: HashMap::new(),
            strings: HashMap::new(),
            maps: HashMap::new(),
            number_lists: HashMap::new(),
            string_lists: HashMap::new(),
            map_lists: HashMap::new(),
        };
        for param in &node.params {
            map.evict(&param.name);
            let key = param.name.clone();
            match &param.value {
                ValueNode::Number(n) => {
                    map.numbers.insert(key, n.value);
                }
                ValueNode::String(s) => {
                    map.strings.insert(key, s.value.clone());
                }
                ValueNode::Expr(e) => {
                    map.maps.insert(key, NamedParamMap::from(e));
                }
                ValueNode::NumberList { items, .. } => {
                    map.number_lists
                        .insert(key, items.iter().map(|n| n.value).collect());
                }
                ValueNode::StringList { items, .. } => {
                    map.string_lists
                        .insert(key, items.iter().map(|s| s.value.clone()).collect());
                }
                ValueNode::ExprList { items, .. } => {
                    map.map_lists
                        .insert(key, items.iter().map(NamedParamMap::from).collect());
                }
            }
        }
        map
    }
}

impl NamedParamMap {
    // A name lives in exactly one category; a rebinding first removes it
    // from whichever category held it.
    fn evict(&mut self, name: &str) {
        self.numbers.remove(name);
        self.strings.remove(name);
        self.maps.remove(name);
        self.number_lists.remove(name);
        self.string_lists.remove(name);
        self.map_lists.remove(name);
    }

    /// The expression's name, used by consumers to select what to build.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The number stored under `name`, if any.
    pub fn number(&self, name: &str) -> Option<f64> {
        self.numbers.get(name).copied()
    }

    /// The string stored under `name`, if any.
    pub fn string(&self, name: &str) -> Option<&str> {
        self.strings.get(name).map(String::as_str)
    }

    /// The nested map stored under `name`, if any.
    pub fn map(&self, name: &str) -> Option<&NamedParamMap> {
        self.maps.get(name)
    }

    /// The number stored under `name`, truncated to an integer - but only if
    /// it has no fractional part. A fractional value reports `None` rather
    /// than a rounded approximation, so absence and "present but fractional"
    /// look the same here; use [`number`](Self::number) to tell them apart.
    ///
    /// # Examples
    ///
    /// ```
    /// use parmap_lang::parse;
    ///
    /// let map = parse("grid(w=10.0;ratio=1.5)").unwrap();
    /// assert_eq!(map.integer("w"), Some(10));
    /// assert_eq!(map.integer("ratio"), None);
    /// ```
    pub fn integer(&self, name: &str) -> Option<i64> {
        self.number(name)
            .filter(|v| v.fract() == 0.0)
            .map(|v| v as i64)
    }

    /// The string stored under `name` read as a boolean: `Some(true)` iff it
    /// case-insensitively equals `"true"`, `Some(false)` for any other
    /// stored string, `None` when nothing is stored.
    pub fn boolean(&self, name: &str) -> Option<bool> {
        self.string(name).map(|s| s.eq_ignore_ascii_case("true"))
    }

    /// The list of numbers stored under `name`, if any.
    pub fn numbers(&self, name: &str) -> Option<&[f64]> {
        self.number_lists.get(name).map(Vec::as_slice)
    }

    /// The list of strings stored under `name`, if any.
    pub fn strings(&self, name: &str) -> Option<&[String]> {
        self.string_lists.get(name).map(Vec::as_slice)
    }

    /// The list of nested maps stored under `name`, if any.
    pub fn maps(&self, name: &str) -> Option<&[NamedParamMap]> {
        self.map_lists.get(name).map(Vec::as_slice)
    }

    /// The list of numbers stored under `name` as integers, all or nothing:
    /// if any element has a fractional part the whole list reports `None`,
    /// never a filtered subset.
    ///
    /// # Examples
    ///
    /// ```
    /// use parmap_lang::parse;
    ///
    /// let map = parse("foo(a=[1.0;2.0];b=[1.0;2.5])").unwrap();
    /// assert_eq!(map.integers("a"), Some(vec![1, 2]));
    /// assert_eq!(map.integers("b"), None);
    /// ```
    pub fn integers(&self, name: &str) -> Option<Vec<i64>> {
        let values = self.numbers(name)?;
        if values.iter().all(|v| v.fract() == 0.0) {
            Some(values.iter().map(|v| *v as i64).collect())
        } else {
            None
        }
    }

    /// The list of strings stored under `name` read as booleans, each
    /// `true` iff it case-insensitively equals `"true"`.
    pub fn booleans(&self, name: &str) -> Option<Vec<bool>> {
        self.strings(name)
            .map(|ss| ss.iter().map(|s| s.eq_ignore_ascii_case("true")).collect())
    }
}
