use std::collections::BTreeMap;
use std::fmt;

use crate::ast::{AttributeMap, WidgetNode};

// ── ToolkitError ──────────────────────────────────────────────────────────

/// A failure reported by the host toolkit, e.g. an unknown widget type or an
/// attribute it could not coerce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolkitError(pub String);

impl ToolkitError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

impl fmt::Display for ToolkitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ToolkitError {}

// ── WidgetSpec ────────────────────────────────────────────────────────────

/// Everything the toolkit needs to construct one widget.
///
/// Handed over only once the widget is closed: no further attribute can
/// arrive for it.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetSpec<H> {
    /// Widget type name as written: `"Button"`.
    pub widget: String,
    /// All attributes, `style` block and `on_*` names included, as strings.
    pub attributes: AttributeMap,
    /// `on_*` attribute key → resolved handler. Empty when the load has no
    /// handler registry.
    pub handlers: BTreeMap<String, H>,
    /// Line the widget was declared on.
    pub line: usize,
}

// ── Toolkit trait ─────────────────────────────────────────────────────────

/// The capability interface between the tree builder and a GUI toolkit.
///
/// The builder decides *when* widgets are created and *what* belongs to
/// them; the toolkit decides what a `"Button"` with `text: 'OK'` actually
/// is, including coercing attribute strings and turning the `style` block
/// into its native style object.
pub trait Toolkit {
    type Widget;
    type Handler: Clone;

    /// Construct a widget from its closed attribute map.
    fn instantiate(&mut self, spec: WidgetSpec<Self::Handler>) -> Result<Self::Widget, ToolkitError>;

    /// Append finalized children, in order, to a widget that supports them.
    fn attach_children(
        &mut self,
        parent: &mut Self::Widget,
        children: Vec<Self::Widget>,
    ) -> Result<(), ToolkitError>;
}

// ── NodeToolkit ───────────────────────────────────────────────────────────

/// Realizes documents as plain [`WidgetNode`] trees.
///
/// Accepts every widget type. Handlers are not attached anywhere: the node
/// keeps the handler name as an ordinary attribute.
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeToolkit;

impl Toolkit for NodeToolkit {
    type Widget = WidgetNode;
    type Handler = ();

    fn instantiate(&mut self, spec: WidgetSpec<()>) -> Result<WidgetNode, ToolkitError> {
        Ok(WidgetNode { widget: spec.widget, attributes: spec.attributes, children: Vec::new() })
    }

    fn attach_children(
        &mut self,
        parent: &mut WidgetNode,
        children: Vec<WidgetNode>,
    ) -> Result<(), ToolkitError> {
        parent.children.extend(children);
        Ok(())
    }
}
