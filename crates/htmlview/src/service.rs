//! HtmlView - the main entry point for HTML to element conversion.

use htmlview_core::Element;

use crate::convert::convert;
use crate::dom::Dom;
#[cfg(feature = "html")]
use crate::html::parse_html;
use crate::options::{RenderConfig, RenderOptions};
use crate::Result;

/// The main service for converting HTML to UI element descriptors
#[derive(Debug, Clone, Default)]
pub struct HtmlView {
    config: RenderConfig,
}

impl HtmlView {
    /// Create an HtmlView with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an HtmlView with a custom configuration
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Convert an HTML string to elements
    #[cfg(feature = "html")]
    pub fn render(&self, html: &str) -> Result<Vec<Element>> {
        let dom = parse_html(html, self.config.parse_mode)?;
        Ok(self.render_dom(&dom))
    }

    /// Convert an already parsed DOM to elements
    pub fn render_dom(&self, dom: &Dom) -> Vec<Element> {
        convert(dom, &self.config)
    }

    /// Get the current configuration
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Get mutable access to the configuration
    pub fn config_mut(&mut self) -> &mut RenderConfig {
        &mut self.config
    }
}

impl From<RenderOptions> for HtmlView {
    fn from(options: RenderOptions) -> Self {
        Self::with_config(options.into())
    }
}

/// Convert `raw_html` and hand the outcome to `done`.
///
/// `options` are merged over the defaults. `done` runs exactly once, with
/// either the parse error or the element tree.
///
/// # Example
///
/// ```rust
/// use htmlview::{html_to_element, RenderOptions};
///
/// html_to_element("<p>Hello</p>", RenderOptions::default(), |result| {
///     let elements = result.unwrap();
///     assert_eq!(elements.len(), 1);
/// });
/// ```
#[cfg(feature = "html")]
pub fn html_to_element<F>(raw_html: &str, options: RenderOptions, done: F)
where
    F: FnOnce(Result<Vec<Element>>),
{
    let view = HtmlView::from(options);
    done(view.render(raw_html));
}
