//! UI element descriptors
//!
//! An [`Element`] is an instruction to the host UI framework: instantiate the
//! named component with these props, this style and these children. Elements
//! are produced once and never mutated afterwards.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::style::{PropValue, Style};

/// Callback invoked with a decoded link URL
pub type LinkHandler = Arc<dyn Fn(&str) + Send + Sync>;

/// Identity of a host UI primitive (e.g. `Text`, `View`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComponentId(Cow<'static, str>);

impl ComponentId {
    pub const TEXT: ComponentId = ComponentId(Cow::Borrowed("Text"));
    pub const VIEW: ComponentId = ComponentId(Cow::Borrowed("View"));
    pub const AUTO_SIZED_IMAGE: ComponentId = ComponentId(Cow::Borrowed("AutoSizedImage"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Source of an image element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSource {
    pub uri: Option<String>,
    pub width: i32,
    pub height: i32,
}

/// What an element renders as
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    /// Leaf text primitive; string children are laid out inline
    Text,
    /// Generic container primitive
    Node,
    /// Horizontal layout container (list item prefix + content)
    Row,
    /// Image primitive, never has children
    Image(ImageSource),
}

/// A press binding: the decoded URL plus the handler it is forwarded to.
///
/// Equality and `Debug` only look at the URL, so element trees can be
/// compared structurally.
#[derive(Clone)]
pub struct LinkPress {
    url: String,
    handler: LinkHandler,
}

impl LinkPress {
    pub fn new(url: impl Into<String>, handler: LinkHandler) -> Self {
        Self {
            url: url.into(),
            handler,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Simulate the interaction: forward the URL to the handler
    pub fn fire(&self) {
        (self.handler)(&self.url);
    }
}

impl PartialEq for LinkPress {
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url
    }
}

impl fmt::Debug for LinkPress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkPress").field("url", &self.url).finish()
    }
}

/// A child of an element
#[derive(Debug, Clone, PartialEq)]
pub enum Child {
    /// Literal string child
    Text(String),
    /// Nested element
    Element(Element),
}

/// An opaque UI element descriptor
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub component: ComponentId,
    pub kind: ElementKind,
    /// Position among siblings, used by hosts that reconcile by key
    pub key: Option<usize>,
    /// Extra props copied from the configured component props
    pub props: IndexMap<String, PropValue>,
    pub style: Option<Style>,
    pub on_press: Option<LinkPress>,
    pub on_long_press: Option<LinkPress>,
    pub children: Vec<Child>,
}

impl Element {
    /// Create an element with no props, style or children
    pub fn new(component: ComponentId, kind: ElementKind) -> Self {
        Self {
            component,
            kind,
            key: None,
            props: IndexMap::new(),
            style: None,
            on_press: None,
            on_long_press: None,
            children: Vec::new(),
        }
    }

    pub fn with_key(mut self, key: usize) -> Self {
        self.key = Some(key);
        self
    }

    pub fn with_style(mut self, style: Option<Style>) -> Self {
        self.style = style;
        self
    }

    pub fn with_props(mut self, props: IndexMap<String, PropValue>) -> Self {
        self.props = props;
        self
    }

    /// Append a literal string child
    pub fn push_text(&mut self, text: impl Into<String>) {
        self.children.push(Child::Text(text.into()));
    }

    /// Append an element child
    pub fn push_element(&mut self, element: Element) {
        self.children.push(Child::Element(element));
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, ElementKind::Text)
    }

    pub fn is_image(&self) -> bool {
        matches!(self.kind, ElementKind::Image(_))
    }

    /// Image source, for image elements
    pub fn image_source(&self) -> Option<&ImageSource> {
        match &self.kind {
            ElementKind::Image(source) => Some(source),
            _ => None,
        }
    }

    /// Iterate element children, skipping string children
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|child| match child {
            Child::Element(element) => Some(element),
            Child::Text(_) => None,
        })
    }

    /// All string content of this element and its descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        crate::text::write_element(self, &mut out);
        out
    }

    /// Depth-first search, including this element
    pub fn find<P>(&self, predicate: P) -> Option<&Element>
    where
        P: Fn(&Element) -> bool + Copy,
    {
        if predicate(self) {
            return Some(self);
        }
        self.child_elements().find_map(|child| child.find(predicate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn text(s: &str) -> Element {
        let mut el = Element::new(ComponentId::TEXT, ElementKind::Text);
        el.push_text(s);
        el
    }

    #[test]
    fn test_text_content() {
        let mut view = Element::new(ComponentId::VIEW, ElementKind::Node);
        view.push_element(text("Hello "));
        view.push_element(text("World"));
        assert_eq!(view.text_content(), "Hello World");
    }

    #[test]
    fn test_find_depth_first() {
        let mut outer = Element::new(ComponentId::VIEW, ElementKind::Node);
        let mut inner = Element::new(ComponentId::VIEW, ElementKind::Row);
        inner.push_element(text("deep"));
        outer.push_element(inner);

        let found = outer.find(|el| el.is_text()).unwrap();
        assert_eq!(found.text_content(), "deep");
        assert!(outer.find(|el| el.is_image()).is_none());
    }

    #[test]
    fn test_link_press_fires_handler() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let handler: LinkHandler = Arc::new(move |url: &str| sink.lock().unwrap().push(url.to_string()));

        let press = LinkPress::new("http://x", handler);
        press.fire();

        assert_eq!(*seen.lock().unwrap(), vec!["http://x".to_string()]);
    }

    #[test]
    fn test_link_press_equality_ignores_handler() {
        let a = LinkPress::new("u", Arc::new(|_: &str| {}));
        let b = LinkPress::new("u", Arc::new(|_: &str| {}));
        assert_eq!(a, b);
        assert_ne!(a, LinkPress::new("v", Arc::new(|_: &str| {})));
    }

    #[test]
    fn test_component_id_display() {
        assert_eq!(ComponentId::TEXT.to_string(), "Text");
        assert_eq!(ComponentId::new("Paragraph").as_str(), "Paragraph");
    }
}
