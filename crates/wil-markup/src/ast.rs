use std::collections::BTreeMap;
use std::collections::btree_map;

// ── AttrValue ─────────────────────────────────────────────────────────────

/// The value of one attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// `text: 'hello'`: quotes already stripped.
    Scalar(String),
    /// A key whose value is an indented block of attributes:
    ///
    /// ```wil
    /// style:
    ///     padding: 50
    ///     flex: 1
    /// ```
    Block(AttributeMap),
}

impl AttrValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(s) => Some(s),
            Self::Block(_) => None,
        }
    }

    pub fn as_block(&self) -> Option<&AttributeMap> {
        match self {
            Self::Block(map) => Some(map),
            Self::Scalar(_) => None,
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        Self::Scalar(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        Self::Scalar(s)
    }
}

impl From<AttributeMap> for AttrValue {
    fn from(map: AttributeMap) -> Self {
        Self::Block(map)
    }
}

// ── AttributeMap ──────────────────────────────────────────────────────────

/// Attributes of one widget, or the contents of one attribute block.
///
/// Keys are unique; inserting an existing key replaces its value. Iteration
/// is in key order so serialized output is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeMap(BTreeMap<String, AttrValue>);

impl AttributeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy in tests and hand-built trees.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Option<AttrValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Merge `other` in; its keys win.
    pub fn extend(&mut self, other: AttributeMap) {
        self.0.extend(other.0);
    }

    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.0.get(key)
    }

    /// Look up a scalar attribute.
    pub fn scalar(&self, key: &str) -> Option<&str> {
        self.get(key)?.as_str()
    }

    /// Look up a block attribute such as `style`.
    pub fn block(&self, key: &str) -> Option<&AttributeMap> {
        self.get(key)?.as_block()
    }

    pub fn remove(&mut self, key: &str) -> Option<AttrValue> {
        self.0.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, AttrValue> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a AttributeMap {
    type Item = (&'a String, &'a AttrValue);
    type IntoIter = btree_map::Iter<'a, String, AttrValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for AttributeMap {
    type Item = (String, AttrValue);
    type IntoIter = btree_map::IntoIter<String, AttrValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<K: Into<String>, V: Into<AttrValue>> FromIterator<(K, V)> for AttributeMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

// ── WidgetNode ────────────────────────────────────────────────────────────

/// A toolkit-independent widget: type name, closed attributes, children.
///
/// ```wil
/// Box:
///     id: box1
///     Button:
///         text: 'OK'
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetNode {
    /// Widget type name: `"Box"`, `"Label"`, `"PasswordInput"`.
    pub widget: String,
    pub attributes: AttributeMap,
    /// Child widgets in source order.
    pub children: Vec<WidgetNode>,
}

impl WidgetNode {
    pub fn new(widget: impl Into<String>) -> Self {
        Self { widget: widget.into(), attributes: AttributeMap::new(), children: Vec::new() }
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(key, value);
        self
    }

    pub fn child(mut self, child: WidgetNode) -> Self {
        self.children.push(child);
        self
    }

    /// The `id` attribute, used by breadcrumb lookups.
    pub fn id(&self) -> Option<&str> {
        self.attributes.scalar("id")
    }

    pub fn text(&self) -> Option<&str> {
        self.attributes.scalar("text")
    }

    pub fn style(&self) -> Option<&AttributeMap> {
        self.attributes.block("style")
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
