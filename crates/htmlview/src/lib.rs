//! # htmlview
//!
//! Convert HTML into a tree of UI element descriptors.
//!
//! The converter parses HTML into a DOM and maps every node to a host UI
//! primitive (text, container, row, image) using a small set of tag rules:
//! paragraphs, headings, bold, lists, links, images and line breaks. Styles
//! configured per tag are inherited down the tree, nearest tag winning.
//!
//! ## Design
//!
//! The output is plain data from [`htmlview_core`]: a host binding walks the
//! [`Element`] tree and instantiates the named components. Links carry
//! [`LinkPress`] bindings the host fires on interaction.
//!
//! - **Parser agnostic**: any parser can fill a [`Dom`]; scraper/html5ever is
//!   bundled behind the default `html` feature
//! - **Hookable**: a [`CustomRenderer`] can replace the output for any node
//!
//! ## Example (HTML string)
//!
//! ```rust
//! use htmlview::{to_plain_text, HtmlView};
//!
//! let view = HtmlView::new();
//! let elements = view.render("<ul><li>one</li><li>two</li></ul>").unwrap();
//! assert_eq!(to_plain_text(&elements), "\u{2022} one\n\u{2022} two\n");
//! ```
//!
//! ## Example (DOM)
//!
//! ```rust
//! use htmlview::{Dom, HtmlView};
//!
//! let mut dom = Dom::new();
//! let p = dom.push_tag(None, "p", vec![]);
//! dom.push_text(Some(p), "Hello &amp; welcome");
//!
//! let elements = HtmlView::new().render_dom(&dom);
//! assert_eq!(elements[0].text_content(), "Hello & welcome");
//! ```

mod convert;
pub mod dom;
#[cfg(feature = "html")]
pub mod html;
mod options;
mod renderer;
mod service;

pub use convert::convert;
pub use dom::{Dom, DomNode, NodeId, NodeKind, NodeRef};
#[cfg(feature = "html")]
pub use html::parse_html;
pub use options::{ComponentProps, ParseMode, RenderConfig, RenderOptions};
pub use renderer::{custom_renderer, CustomRenderer, RenderContext, Rendered};
#[cfg(feature = "html")]
pub use service::html_to_element;
pub use service::HtmlView;

pub use htmlview_core::{
    to_plain_text, Child, ComponentId, Element, ElementKind, ImageSource, LinkHandler, LinkPress,
    PropValue, Style, Stylesheet,
};

/// Error type for htmlview operations
#[derive(Debug, thiserror::Error)]
pub enum HtmlViewError {
    #[error("Parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, HtmlViewError>;
