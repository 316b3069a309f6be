//! Parameter trees produced by the scene-description parser.
//!
//! Every block in a scene file becomes an [`Element`]: a tag such as
//! `sphere` plus an ordered list of key/value pairs. Nested blocks
//! (`texture { pigment { ... } }`) become nested lists.

use prism_math::{Color, Vector3};

/// A single value in a parameter tree.
#[derive(Clone, Debug, PartialEq)]
pub enum ParamValue {
    /// A scalar (`radius`, `angle`, `reflection`, ...)
    Number(f64),

    /// A point or direction (`location`, `look_at`, `v0`, ...)
    Vector(Vector3),

    /// An `rgb <...>` color
    Color(Color),

    /// A bare keyword with no value (`orthographic`, `parallel`)
    Marker,

    /// A nested block (`texture`, `pigment`, `finish`)
    List(ParamList),
}

impl ParamValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ParamValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_vector(&self) -> Option<Vector3> {
        match self {
            ParamValue::Vector(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match self {
            ParamValue::Color(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&ParamList> {
        match self {
            ParamValue::List(list) => Some(list),
            _ => None,
        }
    }

    /// Short type name for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            ParamValue::Number(_) => "number",
            ParamValue::Vector(_) => "vector",
            ParamValue::Color(_) => "color",
            ParamValue::Marker => "marker",
            ParamValue::List(_) => "block",
        }
    }
}

/// Ordered key/value pairs. Keys may repeat (several `texture` blocks).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParamList {
    entries: Vec<(String, ParamValue)>,
}

impl ParamList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, keeping insertion order.
    pub fn push(&mut self, key: impl Into<String>, value: ParamValue) {
        self.entries.push((key.into(), value));
    }

    /// Builder-style `push`.
    pub fn with(mut self, key: impl Into<String>, value: ParamValue) -> Self {
        self.push(key, value);
        self
    }

    /// Look up a value by a path of keys.
    ///
    /// The search is depth-first and returns the first match. At each level
    /// every entry whose key equals the head of the path is tried in order;
    /// the rest of the path is then resolved inside that entry's nested list.
    pub fn find(&self, path: &[&str]) -> Option<&ParamValue> {
        let (head, rest) = path.split_first()?;
        self.entries
            .iter()
            .filter(|(key, _)| key == head)
            .find_map(|(_, value)| {
                if rest.is_empty() {
                    Some(value)
                } else {
                    value.as_list().and_then(|list| list.find(rest))
                }
            })
    }

    /// True if a path resolves to anything (including a marker).
    pub fn contains(&self, path: &[&str]) -> bool {
        self.find(path).is_some()
    }

    pub fn number(&self, path: &[&str]) -> Option<f64> {
        self.find(path).and_then(ParamValue::as_number)
    }

    pub fn vector(&self, path: &[&str]) -> Option<Vector3> {
        self.find(path).and_then(ParamValue::as_vector)
    }

    pub fn color(&self, path: &[&str]) -> Option<Color> {
        self.find(path).and_then(ParamValue::as_color)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A top-level scene element: a tag plus its parameter tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    /// `camera`, `light_source`, `sphere`, `plane`, `triangle`, or a
    /// `#`-directive line
    pub tag: String,

    /// Parameters of the block
    pub params: ParamList,

    /// 1-based line where the element starts
    pub line: usize,

    /// 1-based column where the element starts
    pub column: usize,
}

impl Element {
    /// Create an element at line 1, column 1 (for hand-built trees).
    pub fn new(tag: impl Into<String>, params: ParamList) -> Self {
        Self {
            tag: tag.into(),
            params,
            line: 1,
            column: 1,
        }
    }

    /// True for `#include`-style directives.
    pub fn is_directive(&self) -> bool {
        self.tag.starts_with('#')
    }
}
