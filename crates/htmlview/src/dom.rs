//! Arena-backed DOM tree.
//!
//! Nodes live in a flat arena owned by [`Dom`] and are addressed by
//! [`NodeId`]. Parent links are plain ids, so the tree is owned top-down and
//! can be walked upward without reference counting. Any parser can build this
//! structure; see [`crate::parse_html`] for the bundled one.

use indexmap::IndexMap;

/// Index of a node inside its [`Dom`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Node payload
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Text node. `data` is source text: entities are not decoded yet.
    Text { data: String },
    /// Element node with a lowercase tag name
    Tag {
        name: String,
        attribs: IndexMap<String, String>,
    },
}

/// A node stored in the arena
#[derive(Debug, Clone, PartialEq)]
pub struct DomNode {
    pub kind: NodeKind,
    pub children: Vec<NodeId>,
    pub parent: Option<NodeId>,
}

/// A parsed document: node arena plus ordered top-level nodes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dom {
    nodes: Vec<DomNode>,
    roots: Vec<NodeId>,
}

impl Dom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Top-level node ids in document order
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Borrow a node with navigation helpers
    pub fn get(&self, id: NodeId) -> NodeRef<'_> {
        NodeRef { dom: self, id }
    }

    /// Raw node access
    pub fn node(&self, id: NodeId) -> &DomNode {
        &self.nodes[id.0]
    }

    /// Append a text node under `parent` (or at the top level)
    pub fn push_text(&mut self, parent: Option<NodeId>, data: &str) -> NodeId {
        self.push(
            parent,
            NodeKind::Text {
                data: data.to_string(),
            },
        )
    }

    /// Append an element node under `parent` (or at the top level)
    pub fn push_tag(&mut self, parent: Option<NodeId>, name: &str, attrs: Vec<(&str, &str)>) -> NodeId {
        let attribs = attrs
            .into_iter()
            .map(|(k, v)| (k.to_lowercase(), v.to_string()))
            .collect();

        self.push(
            parent,
            NodeKind::Tag {
                name: name.to_lowercase(),
                attribs,
            },
        )
    }

    fn push(&mut self, parent: Option<NodeId>, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(DomNode {
            kind,
            children: Vec::new(),
            parent,
        });

        match parent {
            Some(parent) => self.nodes[parent.0].children.push(id),
            None => self.roots.push(id),
        }

        id
    }
}

/// A borrowed view of one node, able to navigate the tree
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    dom: &'a Dom,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn dom(&self) -> &'a Dom {
        self.dom
    }

    fn node(&self) -> &'a DomNode {
        self.dom.node(self.id)
    }

    pub fn is_text(&self) -> bool {
        matches!(self.node().kind, NodeKind::Text { .. })
    }

    pub fn is_tag(&self) -> bool {
        matches!(self.node().kind, NodeKind::Tag { .. })
    }

    /// Tag name, `None` for text nodes
    pub fn name(&self) -> Option<&'a str> {
        match &self.node().kind {
            NodeKind::Tag { name, .. } => Some(name.as_str()),
            NodeKind::Text { .. } => None,
        }
    }

    /// Check the tag name
    pub fn is(&self, tag: &str) -> bool {
        self.name() == Some(tag)
    }

    /// Raw text, `None` for element nodes
    pub fn data(&self) -> Option<&'a str> {
        match &self.node().kind {
            NodeKind::Text { data } => Some(data.as_str()),
            NodeKind::Tag { .. } => None,
        }
    }

    /// Get an attribute value by name
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        match &self.node().kind {
            NodeKind::Tag { attribs, .. } => attribs.get(&name.to_lowercase()).map(String::as_str),
            NodeKind::Text { .. } => None,
        }
    }

    /// Check if an attribute exists
    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.node().parent.map(|id| self.dom.get(id))
    }

    /// Whether this node is a direct child of the document
    pub fn is_root(&self) -> bool {
        self.node().parent.is_none()
    }

    pub fn child_ids(&self) -> &'a [NodeId] {
        &self.node().children
    }

    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let dom = self.dom;
        self.node().children.iter().map(move |&id| dom.get(id))
    }

    /// Ancestors from the parent up to the root
    pub fn ancestors(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        std::iter::successors(self.parent(), |node| node.parent())
    }

    /// Decoded text of this node and all descendants
    pub fn text_content(&self) -> String {
        match self.data() {
            Some(data) => html_escape::decode_html_entities(data).into_owned(),
            None => self
                .children()
                .map(|child| child.text_content())
                .collect::<Vec<_>>()
                .join(""),
        }
    }
}
