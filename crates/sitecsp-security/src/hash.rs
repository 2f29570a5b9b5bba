//! Hash sources for inline elements

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use sha2::{Digest, Sha256};
use sitecsp_html::Document;

/// Format content as a CSP hash source: `'sha256-<base64 digest>'`
pub fn hash_source(content: &str) -> String {
    let digest = Sha256::digest(content.as_bytes());
    format!("'sha256-{}'", STANDARD.encode(digest))
}

/// Deduplicated hash-source tokens.
///
/// Iterates in first-insertion order, so the tokens for a document always
/// come out in the order their elements appear.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HashTokenSet {
    tokens: Vec<String>,
}

impl HashTokenSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// Tokens joined by single spaces
    pub fn join(&self) -> String {
        self.tokens.join(" ")
    }
}

impl FromIterator<String> for HashTokenSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut tokens: Vec<String> = Vec::new();
        for token in iter {
            if !tokens.contains(&token) {
                tokens.push(token);
            }
        }
        Self { tokens }
    }
}

/// Hash sources for every `tag` element in the document with non-empty
/// inner markup. Empty elements (including external `<script src>`) are
/// skipped rather than hashed as the empty string.
pub fn extract_hashes(document: &Document, tag: &str) -> HashTokenSet {
    document
        .elements_by_tag_name(tag)
        .iter()
        .map(|element| element.inner_html())
        .filter(|content| !content.is_empty())
        .map(|content| hash_source(&content))
        .collect()
}
