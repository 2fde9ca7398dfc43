//! Convert a DOM tree to UI element descriptors
//!
//! One recursive pass maps every DOM node to an element, applying the tag
//! rules, the configured component props and inherited styles.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, trace};
use once_cell::sync::Lazy;
use regex::Regex;

use htmlview_core::{Element, ElementKind, ImageSource, LinkPress, Style};

use crate::dom::{Dom, NodeId, NodeRef};
use crate::options::RenderConfig;
use crate::renderer::{RenderContext, Rendered};

/// Leading integer of an attribute value, e.g. `"120px"` -> 120
static LEADING_INT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*([+-]?\d+)").unwrap());

/// Convert the top-level nodes of `dom` to elements, in document order
pub fn convert(dom: &Dom, config: &RenderConfig) -> Vec<Element> {
    let converter = Converter::new(dom, config);
    let elements = converter.dom_to_element(dom.roots(), None);

    debug!(
        "converted {} top-level node(s) of {} into {} element(s)",
        dom.roots().len(),
        dom.len(),
        elements.len()
    );

    elements
}

/// Per-conversion state shared by the recursive calls
pub(crate) struct Converter<'a> {
    dom: &'a Dom,
    config: &'a RenderConfig,
    inherited: RefCell<HashMap<NodeId, Style>>,
}

/// State scoped to one sibling list
struct SiblingState {
    next_ordinal: usize,
}

impl SiblingState {
    fn new() -> Self {
        Self { next_ordinal: 1 }
    }

    fn next_ordinal(&mut self) -> usize {
        let n = self.next_ordinal;
        self.next_ordinal += 1;
        n
    }
}

/// Press bindings attached to a tag's element
#[derive(Default)]
struct Presses {
    on_press: Option<LinkPress>,
    on_long_press: Option<LinkPress>,
}

impl<'a> Converter<'a> {
    fn new(dom: &'a Dom, config: &'a RenderConfig) -> Self {
        Self {
            dom,
            config,
            inherited: RefCell::new(HashMap::new()),
        }
    }

    pub(crate) fn config(&self) -> &'a RenderConfig {
        self.config
    }

    /// Convert a sibling list whose enclosing node is `parent`
    pub(crate) fn dom_to_element(&self, nodes: &[NodeId], parent: Option<NodeRef<'a>>) -> Vec<Element> {
        let mut state = SiblingState::new();
        let mut elements = Vec::with_capacity(nodes.len());

        for (index, &id) in nodes.iter().enumerate() {
            let node = self.dom.get(id);

            if let Some(renderer) = &self.config.custom_renderer {
                let ctx = RenderContext {
                    node,
                    index,
                    siblings: nodes,
                    parent,
                    converter: self,
                };
                if let Rendered::Render(element) = renderer(&ctx) {
                    trace!("custom renderer replaced node {} of {}", index, nodes.len());
                    elements.extend(element);
                    continue;
                }
            }

            elements.push(self.convert_node(node, index, nodes.len(), parent, &mut state));
        }

        elements
    }

    fn convert_node(
        &self,
        node: NodeRef<'a>,
        index: usize,
        sibling_count: usize,
        parent: Option<NodeRef<'a>>,
        state: &mut SiblingState,
    ) -> Element {
        let Some(name) = node.name() else {
            return self.text_element(node, index, parent);
        };

        if name == "img" {
            return self.image_element(node, index);
        }

        let presses = self.link_presses(node);

        if name == "li" {
            return self.list_item_element(node, index, parent, state, presses);
        }

        let kind = match name {
            "p" | "b" | "h3" => ElementKind::Text,
            _ => ElementKind::Node,
        };
        let (before, after) = self.line_breaks(name, index, sibling_count);

        let mut element = self.tag_element(node, index, kind, presses);
        if let Some(text) = before {
            self.push_break(&mut element, text);
        }
        for child in self.dom_to_element(node.child_ids(), Some(node)) {
            element.push_element(child);
        }
        if let Some(text) = after {
            self.push_break(&mut element, text);
        }

        element
    }

    fn text_element(&self, node: NodeRef<'a>, index: usize, parent: Option<NodeRef<'a>>) -> Element {
        let data = node.data().unwrap_or_default();
        let inherited = parent.map(|p| self.inherited_style(p));

        let mut element = self
            .text_base(Style::merged([self.config.text_style(), inherited.as_ref()]))
            .with_key(index);
        element.push_text(html_escape::decode_html_entities(data));

        if parent.is_some_and(|p| p.is("li")) {
            element.push_text(self.config.line_break.as_str());
        }

        element
    }

    fn image_element(&self, node: NodeRef<'a>, index: usize) -> Element {
        let width = dimension(node, "width", "data-width");
        let height = dimension(node, "height", "data-height");

        let source = ImageSource {
            uri: node
                .attr("src")
                .map(|src| html_escape::decode_html_entities(src).into_owned()),
            width,
            height,
        };
        let style = Style::new().with("width", width).with("height", height);

        Element::new(self.config.image_component.clone(), ElementKind::Image(source))
            .with_key(index)
            .with_style(Some(style))
    }

    fn list_item_element(
        &self,
        node: NodeRef<'a>,
        index: usize,
        parent: Option<NodeRef<'a>>,
        state: &mut SiblingState,
        presses: Presses,
    ) -> Element {
        let prefix = match parent.and_then(|p| p.name()) {
            Some("ol") => Some((format!("{}. ", state.next_ordinal()), None)),
            Some("ul") => Some((self.config.bullet.clone(), self.config.bullet_style.as_ref())),
            _ => None,
        };

        let mut row = Element::new(self.config.node_component.clone(), ElementKind::Row)
            .with_style(Some(self.config.list_row_style.clone()));

        if let Some((label, bullet_style)) = prefix {
            let inherited = parent.map(|p| self.inherited_style(p));
            let mut marker = self.text_base(Style::merged([
                self.config.text_style(),
                inherited.as_ref(),
                bullet_style,
            ]));
            marker.push_text(label);
            row.push_element(marker);
        }

        for child in self.dom_to_element(node.child_ids(), Some(node)) {
            row.push_element(child);
        }

        // Only a top-level item carries its configured style; nested items
        // are styled through their text.
        let mut item = self.tag_element(node, index, ElementKind::Node, presses);
        item.push_element(row);
        item
    }

    /// Element for a tag: node props, press bindings, root-level style
    fn tag_element(&self, node: NodeRef<'a>, index: usize, kind: ElementKind, presses: Presses) -> Element {
        let component = match kind {
            ElementKind::Text => self.config.text_component.clone(),
            _ => self.config.node_component.clone(),
        };
        let props = self
            .config
            .node_component_props
            .as_ref()
            .map(|p| p.extra.clone())
            .unwrap_or_default();
        let style = if node.is_root() {
            node.name().and_then(|name| self.config.styles.get(name)).cloned()
        } else {
            None
        };

        let mut element = Element::new(component, kind)
            .with_key(index)
            .with_props(props)
            .with_style(style);
        element.on_press = presses.on_press;
        element.on_long_press = presses.on_long_press;
        element
    }

    /// Unkeyed text element with text props and the given style
    fn text_base(&self, style: Style) -> Element {
        let props = self
            .config
            .text_component_props
            .as_ref()
            .map(|p| p.extra.clone())
            .unwrap_or_default();

        Element::new(self.config.text_component.clone(), ElementKind::Text)
            .with_props(props)
            .with_style(Some(style))
    }

    fn push_break(&self, element: &mut Element, text: &str) {
        if element.is_text() {
            element.push_text(text);
        } else {
            let mut line = self.text_base(Style::merged([self.config.text_style()]));
            line.push_text(text);
            element.push_element(line);
        }
    }

    fn link_presses(&self, node: NodeRef<'a>) -> Presses {
        if !node.is("a") {
            return Presses::default();
        }
        let Some(href) = node.attr("href").filter(|href| !href.is_empty()) else {
            return Presses::default();
        };

        let url = html_escape::decode_html_entities(href).into_owned();
        let on_press = match &self.config.link_handler {
            Some(handler) => Some(LinkPress::new(url.clone(), Arc::clone(handler))),
            None => {
                debug!("no link handler configured, {url} is not pressable");
                None
            }
        };
        let on_long_press = self
            .config
            .link_long_press_handler
            .as_ref()
            .map(|handler| LinkPress::new(url, Arc::clone(handler)));

        Presses {
            on_press,
            on_long_press,
        }
    }

    /// Break strings to emit (before, after) the content of a tag
    fn line_breaks(&self, name: &str, index: usize, sibling_count: usize) -> (Option<&'a str>, Option<&'a str>) {
        if !self.config.add_line_breaks {
            return (None, None);
        }

        let line_break = self.config.line_break.as_str();
        match name {
            "b" => (None, None),
            "pre" => (Some(line_break), None),
            "p" if index + 1 < sibling_count => (None, Some(self.config.paragraph_break.as_str())),
            "br" | "h1" | "h2" | "h3" | "h4" | "h5" => (None, Some(line_break)),
            _ => (None, None),
        }
    }

    /// Merged styles of `node` and its ancestors; nearer tags win per key
    fn inherited_style(&self, node: NodeRef<'a>) -> Style {
        if let Some(style) = self.inherited.borrow().get(&node.id()) {
            return style.clone();
        }

        let mut style = match node.parent() {
            Some(parent) => self.inherited_style(parent),
            None => Style::new(),
        };
        if let Some(own) = node.name().and_then(|name| self.config.styles.get(name)) {
            style.merge(own);
        }

        self.inherited.borrow_mut().insert(node.id(), style.clone());
        style
    }
}

/// Resolve an image dimension from `primary`, then `fallback`, then 0.
/// Values that do not start with a non-zero integer fall through.
fn dimension(node: NodeRef, primary: &str, fallback: &str) -> i32 {
    parse_leading_int(node.attr(primary))
        .or_else(|| parse_leading_int(node.attr(fallback)))
        .unwrap_or(0)
}

fn parse_leading_int(value: Option<&str>) -> Option<i32> {
    let captures = LEADING_INT.captures(value?)?;
    captures[1].parse::<i32>().ok().filter(|n| *n != 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use htmlview_core::{to_plain_text, Child, PropValue, Stylesheet};

    use crate::options::ComponentProps;
    use crate::renderer::custom_renderer;

    fn text_of(element: &Element) -> String {
        element.text_content()
    }

    #[test]
    fn test_text_node_decodes_entities() {
        let mut dom = Dom::new();
        dom.push_text(None, "Fish &amp; Chips");

        let elements = convert(&dom, &RenderConfig::default());
        assert_eq!(elements.len(), 1);
        assert!(elements[0].is_text());
        assert_eq!(elements[0].children, vec![Child::Text("Fish & Chips".to_string())]);
    }

    #[test]
    fn test_one_element_per_top_level_node() {
        let mut dom = Dom::new();
        let h1 = dom.push_tag(None, "h1", vec![]);
        dom.push_text(Some(h1), "Title");
        dom.push_text(None, "loose");
        let div = dom.push_tag(None, "div", vec![]);
        let p = dom.push_tag(Some(div), "p", vec![]);
        dom.push_text(Some(p), "Body");

        let elements = convert(&dom, &RenderConfig::default());
        assert_eq!(elements.len(), 3);
        assert_eq!(elements.iter().map(|e| e.key).collect::<Vec<_>>(), vec![Some(0), Some(1), Some(2)]);
        assert_eq!(to_plain_text(&elements), "TitlelooseBody");
    }

    #[test]
    fn test_text_tags_use_text_component() {
        let mut dom = Dom::new();
        for tag in ["p", "b", "h3", "div", "h1"] {
            let id = dom.push_tag(None, tag, vec![]);
            dom.push_text(Some(id), tag);
        }

        let elements = convert(&dom, &RenderConfig::default());
        let kinds: Vec<_> = elements.iter().map(|e| e.is_text()).collect();
        assert_eq!(kinds, vec![true, true, true, false, false]);
    }

    #[test]
    fn test_root_level_style_only() {
        let config = RenderConfig {
            styles: Stylesheet::new()
                .with("div", Style::new().with("padding", 4))
                .with("p", Style::new().with("color", "red")),
            ..Default::default()
        };
        let mut dom = Dom::new();
        let div = dom.push_tag(None, "div", vec![]);
        let p = dom.push_tag(Some(div), "p", vec![]);
        dom.push_text(Some(p), "x");

        let elements = convert(&dom, &config);
        let outer = &elements[0];
        assert_eq!(outer.style.as_ref().and_then(|s| s.get("padding")), Some(&PropValue::Number(4.0)));

        let inner = outer.child_elements().next().unwrap();
        assert_eq!(inner.style, None);
    }

    #[test]
    fn test_inherited_style_nearest_wins() {
        let config = RenderConfig {
            styles: Stylesheet::new()
                .with("div", Style::new().with("color", "black").with("fontSize", 10))
                .with("b", Style::new().with("color", "red")),
            text_component_props: Some(ComponentProps::with_style(
                Style::new().with("color", "gray").with("lineHeight", 14),
            )),
            ..Default::default()
        };
        let mut dom = Dom::new();
        let div = dom.push_tag(None, "div", vec![]);
        let b = dom.push_tag(Some(div), "b", vec![]);
        dom.push_text(Some(b), "bold");

        let elements = convert(&dom, &config);
        let text = elements[0].find(|e| e.is_text() && e.style.is_some() && e.children.len() == 1 && matches!(e.children[0], Child::Text(_))).unwrap();
        let style = text.style.as_ref().unwrap();

        assert_eq!(style.get("color"), Some(&PropValue::from("red")));
        assert_eq!(style.get("fontSize"), Some(&PropValue::Number(10.0)));
        assert_eq!(style.get("lineHeight"), Some(&PropValue::Number(14.0)));
    }

    #[test]
    fn test_image_dimensions() {
        let mut dom = Dom::new();
        dom.push_tag(None, "img", vec![("width", "10"), ("height", "20"), ("src", "x.png")]);
        dom.push_tag(None, "img", vec![("data-width", "5"), ("src", "y.png")]);
        dom.push_tag(None, "img", vec![("width", "120px"), ("height", "abc"), ("data-height", "0")]);

        let elements = convert(&dom, &RenderConfig::default());
        let sources: Vec<_> = elements.iter().map(|e| e.image_source().cloned().unwrap()).collect();

        assert_eq!(sources[0], ImageSource { uri: Some("x.png".to_string()), width: 10, height: 20 });
        assert_eq!(sources[1], ImageSource { uri: Some("y.png".to_string()), width: 5, height: 0 });
        assert_eq!(sources[2], ImageSource { uri: None, width: 120, height: 0 });

        let style = elements[0].style.as_ref().unwrap();
        assert_eq!(style.get("width"), Some(&PropValue::Number(10.0)));
        assert_eq!(style.get("height"), Some(&PropValue::Number(20.0)));
    }

    #[test]
    fn test_image_is_terminal() {
        let mut dom = Dom::new();
        let img = dom.push_tag(None, "img", vec![("src", "a.png")]);
        dom.push_text(Some(img), "ignored");

        let elements = convert(&dom, &RenderConfig::default());
        assert!(elements[0].children.is_empty());
    }

    #[test]
    fn test_ordered_list_numbering_resets_per_list() {
        let mut dom = Dom::new();
        for _ in 0..2 {
            let ol = dom.push_tag(None, "ol", vec![]);
            for item in ["a", "b"] {
                let li = dom.push_tag(Some(ol), "li", vec![]);
                dom.push_text(Some(li), item);
            }
        }

        let elements = convert(&dom, &RenderConfig::default());
        for list in &elements {
            let prefixes: Vec<String> = list
                .child_elements()
                .map(|li| {
                    let row = li.child_elements().next().unwrap();
                    assert_eq!(row.kind, ElementKind::Row);
                    text_of(row.child_elements().next().unwrap())
                })
                .collect();
            assert_eq!(prefixes, vec!["1. ", "2. "]);
        }
    }

    #[test]
    fn test_list_item_text_gets_line_break() {
        let mut dom = Dom::new();
        let ul = dom.push_tag(None, "ul", vec![]);
        let li = dom.push_tag(Some(ul), "li", vec![]);
        dom.push_text(Some(li), "x");

        let elements = convert(&dom, &RenderConfig::default());
        assert_eq!(to_plain_text(&elements), "\u{2022} x\n");
    }

    #[test]
    fn test_list_item_outside_list_has_no_prefix() {
        let mut dom = Dom::new();
        let li = dom.push_tag(None, "li", vec![]);
        dom.push_text(Some(li), "x");

        let config = RenderConfig {
            styles: Stylesheet::new().with("li", Style::new().with("marginLeft", 8)),
            ..Default::default()
        };
        let elements = convert(&dom, &config);
        let row = elements[0].child_elements().next().unwrap();

        assert_eq!(row.child_elements().count(), 1);
        assert!(elements[0].style.is_some());
    }

    #[test]
    fn test_bullet_style_layer() {
        let config = RenderConfig {
            bullet: "- ".to_string(),
            bullet_style: Some(Style::new().with("color", "white")),
            ..Default::default()
        };
        let mut dom = Dom::new();
        let ul = dom.push_tag(None, "ul", vec![]);
        let li = dom.push_tag(Some(ul), "li", vec![]);
        dom.push_text(Some(li), "x");

        let elements = convert(&dom, &config);
        let li = elements[0].child_elements().next().unwrap();
        let marker = li.child_elements().next().unwrap().child_elements().next().unwrap();

        assert_eq!(text_of(marker), "- ");
        assert_eq!(marker.style.as_ref().and_then(|s| s.get("color")), Some(&PropValue::from("white")));
        assert_eq!(li.style, None);
    }

    #[test]
    fn test_link_press_forwards_decoded_href() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let config = RenderConfig {
            link_handler: Some(Arc::new(move |url: &str| sink.lock().unwrap().push(url.to_string()))),
            ..Default::default()
        };
        let mut dom = Dom::new();
        let a = dom.push_tag(None, "a", vec![("href", "/q?a=1&amp;b=2")]);
        dom.push_text(Some(a), "l");

        let elements = convert(&dom, &config);
        let press = elements[0].on_press.as_ref().unwrap();
        assert_eq!(press.url(), "/q?a=1&b=2");
        assert!(elements[0].on_long_press.is_none());

        press.fire();
        assert_eq!(*seen.lock().unwrap(), vec!["/q?a=1&b=2".to_string()]);
    }

    #[test]
    fn test_link_without_href_is_not_pressable() {
        let config = RenderConfig {
            link_handler: Some(Arc::new(|_: &str| {})),
            link_long_press_handler: Some(Arc::new(|_: &str| {})),
            ..Default::default()
        };
        let mut dom = Dom::new();
        dom.push_tag(None, "a", vec![("name", "anchor")]);
        dom.push_tag(None, "span", vec![("href", "http://x")]);

        let elements = convert(&dom, &config);
        assert!(elements.iter().all(|e| e.on_press.is_none() && e.on_long_press.is_none()));
    }

    #[test]
    fn test_line_breaks_disabled_by_default() {
        let mut dom = Dom::new();
        let p = dom.push_tag(None, "p", vec![]);
        dom.push_text(Some(p), "one");
        let p = dom.push_tag(None, "p", vec![]);
        dom.push_text(Some(p), "two");

        let elements = convert(&dom, &RenderConfig::default());
        assert_eq!(to_plain_text(&elements), "onetwo");
    }

    #[test]
    fn test_line_break_policy() {
        let config = RenderConfig {
            add_line_breaks: true,
            ..Default::default()
        };
        let mut dom = Dom::new();
        let pre = dom.push_tag(None, "pre", vec![]);
        dom.push_text(Some(pre), "code");
        let h1 = dom.push_tag(None, "h1", vec![]);
        dom.push_text(Some(h1), "Title");
        let p = dom.push_tag(None, "p", vec![]);
        dom.push_text(Some(p), "one");
        dom.push_tag(Some(p), "br", vec![]);
        let b = dom.push_tag(Some(p), "b", vec![]);
        dom.push_text(Some(b), "bold");
        let p = dom.push_tag(None, "p", vec![]);
        dom.push_text(Some(p), "two");

        let elements = convert(&dom, &config);
        assert_eq!(to_plain_text(&elements), "\ncodeTitle\none\nbold\n\ntwo");

        // Breaks inside containers are wrapped in a text element
        let h1 = &elements[1];
        assert!(h1.child_elements().last().unwrap().is_text());
        // Breaks inside text elements are plain string children
        let p = &elements[2];
        assert_eq!(p.children.last(), Some(&Child::Text("\n\n".to_string())));
    }

    #[test]
    fn test_node_props_on_tags_text_props_on_text() {
        let config = RenderConfig {
            text_component_props: Some(ComponentProps::default().with("selectable", true)),
            node_component_props: Some(ComponentProps::default().with("testID", "node")),
            ..Default::default()
        };
        let mut dom = Dom::new();
        let p = dom.push_tag(None, "p", vec![]);
        dom.push_text(Some(p), "x");

        let elements = convert(&dom, &config);
        let p = &elements[0];
        assert_eq!(p.props.get("testID"), Some(&PropValue::from("node")));
        assert!(p.props.get("selectable").is_none());

        let text = p.child_elements().next().unwrap();
        assert_eq!(text.props.get("selectable"), Some(&PropValue::Bool(true)));
    }

    #[test]
    fn test_custom_renderer_override_and_skip() {
        let config = RenderConfig {
            custom_renderer: Some(custom_renderer(|ctx| match ctx.node().name() {
                Some("script-like") => Rendered::nothing(),
                Some("em") => {
                    let mut element = Element::new(ctx.config().text_component.clone(), ElementKind::Text);
                    element.push_text("*");
                    for child in ctx.render_children(ctx.node()) {
                        element.push_element(child);
                    }
                    element.push_text("*");
                    Rendered::element(element)
                }
                _ => Rendered::Skip,
            })),
            ..Default::default()
        };
        let mut dom = Dom::new();
        let div = dom.push_tag(None, "div", vec![]);
        dom.push_tag(Some(div), "script-like", vec![]);
        let em = dom.push_tag(Some(div), "em", vec![]);
        dom.push_text(Some(em), "hi");

        let elements = convert(&dom, &config);
        assert_eq!(elements[0].child_elements().count(), 1);
        assert_eq!(to_plain_text(&elements), "*hi*");
    }

    #[test]
    fn test_custom_renderer_sees_siblings_and_parent() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let config = RenderConfig {
            custom_renderer: Some(custom_renderer(move |ctx| {
                if ctx.node().is("li") {
                    sink.lock().unwrap().push((
                        ctx.index(),
                        ctx.siblings().count(),
                        ctx.parent().and_then(|p| p.name()).map(str::to_string),
                    ));
                }
                Rendered::Skip
            })),
            ..Default::default()
        };
        let mut dom = Dom::new();
        let ol = dom.push_tag(None, "ol", vec![]);
        dom.push_tag(Some(ol), "li", vec![]);
        dom.push_tag(Some(ol), "li", vec![]);

        convert(&dom, &config);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![(0, 2, Some("ol".to_string())), (1, 2, Some("ol".to_string()))]
        );
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int(Some("42")), Some(42));
        assert_eq!(parse_leading_int(Some(" 7px")), Some(7));
        assert_eq!(parse_leading_int(Some("-3")), Some(-3));
        assert_eq!(parse_leading_int(Some("0")), None);
        assert_eq!(parse_leading_int(Some("auto")), None);
        assert_eq!(parse_leading_int(None), None);
    }
}
