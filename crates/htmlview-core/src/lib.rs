//! htmlview-core - UI element descriptors and style objects
//!
//! This crate provides the output model shared by the `htmlview` converter
//! and any host binding that instantiates the described components. It has
//! no HTML parser and no knowledge of the DOM.
//!
//! # Architecture
//!
//! ```text
//! HTML String ──parse──▶ DOM ──convert──▶ ┌──────────────────┐
//!                                         │ Element tree     │ ──▶ host UI
//!                                         │ (this crate)     │
//!                                         └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use htmlview_core::{to_plain_text, ComponentId, Element, ElementKind, Style};
//!
//! let mut text = Element::new(ComponentId::TEXT, ElementKind::Text)
//!     .with_style(Some(Style::new().with("fontWeight", "bold")));
//! text.push_text("Hello World");
//!
//! assert_eq!(to_plain_text(&[text]), "Hello World");
//! ```

mod element;
mod style;
mod text;

pub use element::{Child, ComponentId, Element, ElementKind, ImageSource, LinkHandler, LinkPress};
pub use style::{PropValue, Style, Stylesheet};
pub use text::to_plain_text;
