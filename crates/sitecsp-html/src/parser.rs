//! HTML5 Parser implementation
//!
//! Parses with html5ever into its reference RcDom and hands the tree to
//! [`Document`] untouched, so element content is exactly what the source held.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::RcDom;

use crate::Document;

/// HTML5 parser
pub struct HtmlParser;

impl HtmlParser {
    /// Create a new HTML parser
    pub fn new() -> Self {
        Self
    }

    /// Parse HTML string into a Document
    pub fn parse(&self, html: &str) -> Document {
        self.parse_with_url(html, "about:blank")
    }

    /// Parse HTML with the URL or path it was loaded from
    pub fn parse_with_url(&self, html: &str, url: &str) -> Document {
        tracing::debug!("Parsing HTML document: {}", url);

        // html5ever recovers from every syntax error, so this cannot fail
        let dom = parse_document(RcDom::default(), Default::default()).one(html);

        Document::from_dom(dom, url)
    }

    /// Parse raw file bytes, replacing invalid UTF-8 sequences with U+FFFD
    pub fn parse_bytes(&self, bytes: &[u8], url: &str) -> Document {
        let html = String::from_utf8_lossy(bytes);
        self.parse_with_url(&html, url)
    }
}

impl Default for HtmlParser {
    fn default() -> Self {
        Self::new()
    }
}
