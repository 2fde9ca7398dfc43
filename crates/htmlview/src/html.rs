//! HTML parsing support.
//!
//! This module parses HTML strings with scraper/html5ever and converts the
//! result to the arena [`Dom`] used by the converter.

use log::warn;
use scraper::{ElementRef, Html, Node as ScraperNode};

use crate::dom::{Dom, NodeId};
use crate::options::ParseMode;
use crate::{HtmlViewError, Result};

/// Raw-content elements that never render
const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "template"];

/// Parse an HTML fragment into a [`Dom`].
///
/// html5ever recovers from malformed markup; in [`ParseMode::Strict`] any
/// error it reports aborts the parse instead.
///
/// # Example
///
/// ```rust
/// use htmlview::{parse_html, ParseMode};
///
/// let dom = parse_html("<p>Hello <b>World</b></p>", ParseMode::Lenient).unwrap();
/// assert_eq!(dom.roots().len(), 1);
/// assert_eq!(dom.get(dom.roots()[0]).text_content(), "Hello World");
/// ```
pub fn parse_html(html: &str, mode: ParseMode) -> Result<Dom> {
    let document = Html::parse_fragment(html);

    if !document.errors.is_empty() {
        let messages: Vec<String> = document.errors.iter().map(|e| e.to_string()).collect();
        match mode {
            ParseMode::Strict => return Err(HtmlViewError::Parse(messages.join("; "))),
            ParseMode::Lenient => {
                warn!("ignoring {} recoverable HTML parse error(s): {}", messages.len(), messages.join("; "));
            }
        }
    }

    let mut dom = Dom::new();
    copy_children(document.root_element(), None, &mut dom);
    Ok(dom)
}

/// Copy the children of a scraper element below `parent`
fn copy_children(element: ElementRef, parent: Option<NodeId>, dom: &mut Dom) {
    for child in element.children() {
        match child.value() {
            ScraperNode::Text(text) => {
                // html5ever already decoded character references; store the
                // text in source form so it is decoded exactly once later.
                let raw: &str = text;
                dom.push_text(parent, &html_escape::encode_text(raw));
            }
            ScraperNode::Element(el) => {
                if SKIPPED_ELEMENTS.contains(&el.name()) {
                    continue;
                }
                let Some(child_element) = ElementRef::wrap(child) else {
                    continue;
                };

                let attrs: Vec<(String, String)> = el
                    .attrs()
                    .map(|(k, v)| (k.to_string(), html_escape::encode_text(v).into_owned()))
                    .collect();
                let id = dom.push_tag(
                    parent,
                    el.name(),
                    attrs.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect(),
                );

                copy_children(child_element, Some(id), dom);
            }
            _ => {}
        }
    }
}
