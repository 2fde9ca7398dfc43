//! Render configuration.
//!
//! [`RenderConfig`] is the resolved configuration used for one conversion.
//! [`RenderOptions`] is its partial form: every field is optional and the
//! supplied ones are merged over the defaults.

use std::fmt;

use indexmap::IndexMap;

use htmlview_core::{ComponentId, LinkHandler, PropValue, Style, Stylesheet};

use crate::renderer::CustomRenderer;

/// How recoverable parse errors are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Log and ignore errors html5ever recovers from
    #[default]
    Lenient,
    /// Reject input that produced any parse error
    Strict,
}

/// Extra props merged onto every produced text or container element
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentProps {
    /// Base style, the first layer of every text element's style
    pub style: Option<Style>,
    /// Any other props, passed through untouched
    pub extra: IndexMap<String, PropValue>,
}

impl ComponentProps {
    pub fn with_style(style: Style) -> Self {
        Self {
            style: Some(style),
            extra: IndexMap::new(),
        }
    }

    /// Builder-style prop setter
    pub fn with(mut self, name: &str, value: impl Into<PropValue>) -> Self {
        self.extra.insert(name.to_string(), value.into());
        self
    }
}

/// Resolved configuration for one conversion
#[derive(Clone)]
pub struct RenderConfig {
    /// Inserted at line-break points and after list item text
    pub line_break: String,

    /// Inserted after non-final paragraphs
    pub paragraph_break: String,

    /// Prefix of unordered list items
    pub bullet: String,

    /// Leaf text primitive
    pub text_component: ComponentId,

    /// Container primitive
    pub node_component: ComponentId,

    /// Auto-sizing image primitive
    pub image_component: ComponentId,

    pub text_component_props: Option<ComponentProps>,

    pub node_component_props: Option<ComponentProps>,

    /// Per-tag styles, used for root-level elements and style inheritance
    pub styles: Stylesheet,

    /// Style of the horizontal container wrapping a list item's prefix and content
    pub list_row_style: Style,

    /// Extra style layer for unordered list bullets
    pub bullet_style: Option<Style>,

    pub link_handler: Option<LinkHandler>,

    pub link_long_press_handler: Option<LinkHandler>,

    /// Consulted before default handling for every node
    pub custom_renderer: Option<CustomRenderer>,

    /// Enable the line-break insertion policy
    pub add_line_breaks: bool,

    pub parse_mode: ParseMode,
}

impl RenderConfig {
    /// Base style of text elements, if configured
    pub fn text_style(&self) -> Option<&Style> {
        self.text_component_props.as_ref().and_then(|p| p.style.as_ref())
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            line_break: "\n".to_string(),
            paragraph_break: "\n\n".to_string(),
            bullet: "\u{2022} ".to_string(),
            text_component: ComponentId::TEXT,
            node_component: ComponentId::VIEW,
            image_component: ComponentId::AUTO_SIZED_IMAGE,
            text_component_props: None,
            node_component_props: None,
            styles: Stylesheet::new(),
            list_row_style: Style::new()
                .with("flexDirection", "row")
                .with("alignItems", "flex-start"),
            bullet_style: None,
            link_handler: None,
            link_long_press_handler: None,
            custom_renderer: None,
            add_line_breaks: false,
            parse_mode: ParseMode::Lenient,
        }
    }
}

impl fmt::Debug for RenderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderConfig")
            .field("line_break", &self.line_break)
            .field("paragraph_break", &self.paragraph_break)
            .field("bullet", &self.bullet)
            .field("text_component", &self.text_component)
            .field("node_component", &self.node_component)
            .field("image_component", &self.image_component)
            .field("text_component_props", &self.text_component_props)
            .field("node_component_props", &self.node_component_props)
            .field("styles", &self.styles)
            .field("list_row_style", &self.list_row_style)
            .field("bullet_style", &self.bullet_style)
            .field("link_handler", &self.link_handler.is_some())
            .field("link_long_press_handler", &self.link_long_press_handler.is_some())
            .field("custom_renderer", &self.custom_renderer.is_some())
            .field("add_line_breaks", &self.add_line_breaks)
            .field("parse_mode", &self.parse_mode)
            .finish()
    }
}

/// Caller-supplied overrides; unset fields keep their defaults
#[derive(Clone, Default)]
pub struct RenderOptions {
    pub line_break: Option<String>,
    pub paragraph_break: Option<String>,
    pub bullet: Option<String>,
    pub text_component: Option<ComponentId>,
    pub node_component: Option<ComponentId>,
    pub image_component: Option<ComponentId>,
    pub text_component_props: Option<ComponentProps>,
    pub node_component_props: Option<ComponentProps>,
    pub styles: Option<Stylesheet>,
    pub list_row_style: Option<Style>,
    pub bullet_style: Option<Style>,
    pub link_handler: Option<LinkHandler>,
    pub link_long_press_handler: Option<LinkHandler>,
    pub custom_renderer: Option<CustomRenderer>,
    pub add_line_breaks: Option<bool>,
    pub parse_mode: Option<ParseMode>,
}

impl From<RenderOptions> for RenderConfig {
    fn from(opts: RenderOptions) -> Self {
        let mut result = RenderConfig::default();

        if let Some(line_break) = opts.line_break {
            result.line_break = line_break;
        }

        if let Some(paragraph_break) = opts.paragraph_break {
            result.paragraph_break = paragraph_break;
        }

        if let Some(bullet) = opts.bullet {
            result.bullet = bullet;
        }

        if let Some(component) = opts.text_component {
            result.text_component = component;
        }

        if let Some(component) = opts.node_component {
            result.node_component = component;
        }

        if let Some(component) = opts.image_component {
            result.image_component = component;
        }

        if opts.text_component_props.is_some() {
            result.text_component_props = opts.text_component_props;
        }

        if opts.node_component_props.is_some() {
            result.node_component_props = opts.node_component_props;
        }

        if let Some(styles) = opts.styles {
            result.styles = styles;
        }

        if let Some(style) = opts.list_row_style {
            result.list_row_style = style;
        }

        if opts.bullet_style.is_some() {
            result.bullet_style = opts.bullet_style;
        }

        if opts.link_handler.is_some() {
            result.link_handler = opts.link_handler;
        }

        if opts.link_long_press_handler.is_some() {
            result.link_long_press_handler = opts.link_long_press_handler;
        }

        if opts.custom_renderer.is_some() {
            result.custom_renderer = opts.custom_renderer;
        }

        if let Some(add) = opts.add_line_breaks {
            result.add_line_breaks = add;
        }

        if let Some(mode) = opts.parse_mode {
            result.parse_mode = mode;
        }

        result
    }
}
