//! sitecsp HTML
//!
//! HTML5 parsing built on html5ever, exposing only what header generation
//! needs: look up elements by tag name and read their inner markup.

mod document;
mod parser;

pub use document::{Document, Element};
pub use parser::HtmlParser;

/// Parse an HTML string into a queryable document
pub fn parse(html: &str) -> Document {
    HtmlParser::new().parse(html)
}
