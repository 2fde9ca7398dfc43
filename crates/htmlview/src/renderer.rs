//! Custom renderer hook.
//!
//! A custom renderer is consulted before the built-in tag rules for every
//! node. It either steps aside ([`Rendered::Skip`]) or replaces the node's
//! output ([`Rendered::Render`]), where `Render(None)` renders nothing.

use std::sync::Arc;

use htmlview_core::Element;

use crate::convert::Converter;
use crate::dom::{NodeId, NodeRef};
use crate::options::RenderConfig;

/// Type alias for custom renderer functions
pub type CustomRenderer = Arc<dyn Fn(&RenderContext<'_>) -> Rendered + Send + Sync>;

/// Wrap a closure as a [`CustomRenderer`]
pub fn custom_renderer<F>(f: F) -> CustomRenderer
where
    F: Fn(&RenderContext<'_>) -> Rendered + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Outcome of a custom renderer
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    /// Fall through to the built-in rules
    Skip,
    /// Use this output for the node; `None` renders nothing
    Render(Option<Element>),
}

impl Rendered {
    pub fn element(element: Element) -> Self {
        Rendered::Render(Some(element))
    }

    pub fn nothing() -> Self {
        Rendered::Render(None)
    }
}

/// What a custom renderer sees for one node
pub struct RenderContext<'a> {
    pub(crate) node: NodeRef<'a>,
    pub(crate) index: usize,
    pub(crate) siblings: &'a [NodeId],
    pub(crate) parent: Option<NodeRef<'a>>,
    pub(crate) converter: &'a Converter<'a>,
}

impl<'a> RenderContext<'a> {
    /// The node being rendered
    pub fn node(&self) -> NodeRef<'a> {
        self.node
    }

    /// Position of the node among its siblings
    pub fn index(&self) -> usize {
        self.index
    }

    /// The node and its siblings, in document order
    pub fn siblings(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let dom = self.node.dom();
        let siblings = self.siblings;
        siblings.iter().map(move |&id| dom.get(id))
    }

    /// Enclosing node, `None` at the top level
    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.parent
    }

    pub fn config(&self) -> &'a RenderConfig {
        self.converter.config()
    }

    /// Convert the children of `node` with the full rule set
    pub fn render_children(&self, node: NodeRef<'a>) -> Vec<Element> {
        self.converter.dom_to_element(node.child_ids(), Some(node))
    }
}
