//! Plain-text projection of an element tree
//!
//! Concatenates string children depth first, which is what a reader of the
//! rendered tree sees. Images contribute nothing.

use crate::element::{Child, Element, ElementKind};

/// Project a sequence of top-level elements to plain text
pub fn to_plain_text(elements: &[Element]) -> String {
    let mut output = String::with_capacity(256);
    for element in elements {
        write_element(element, &mut output);
    }
    output
}

pub(crate) fn write_element(element: &Element, out: &mut String) {
    if let ElementKind::Image(_) = element.kind {
        return;
    }

    for child in &element.children {
        match child {
            Child::Text(text) => out.push_str(text),
            Child::Element(nested) => write_element(nested, out),
        }
    }
}
