//! Document - read-only queries over a parsed HTML tree

use html5ever::serialize::{serialize, SerializeOpts, TraversalScope};
use markup5ever_rcdom::{Handle, NodeData, RcDom, SerializableHandle};

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// Parsed HTML document
pub struct Document {
    dom: RcDom,
    /// URL or file path the markup came from
    url: String,
}

impl Document {
    pub(crate) fn from_dom(dom: RcDom, url: &str) -> Self {
        Self {
            dom,
            url: url.to_string(),
        }
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// All elements with the given tag name, in document order.
    ///
    /// HTML elements match case-insensitively, foreign (SVG, MathML)
    /// elements match their local name exactly. Like the DOM's
    /// `getElementsByTagName`, the contents of `<template>` are not searched.
    pub fn elements_by_tag_name(&self, tag: &str) -> Vec<Element> {
        let mut found = Vec::new();
        let mut stack = vec![self.dom.document.clone()];

        while let Some(handle) = stack.pop() {
            if let NodeData::Element { name, .. } = &handle.data {
                let local: &str = &name.local;
                let matches = if &*name.ns == HTML_NAMESPACE {
                    local.eq_ignore_ascii_case(tag)
                } else {
                    local == tag
                };
                if matches {
                    found.push(Element {
                        handle: handle.clone(),
                    });
                }
            }

            // Reversed so the first child is visited next (pre-order)
            for child in handle.children.borrow().iter().rev() {
                stack.push(child.clone());
            }
        }

        found
    }
}

/// An element node within a [`Document`]
#[derive(Clone)]
pub struct Element {
    handle: Handle,
}

impl Element {
    /// Local tag name (lowercase for HTML elements)
    pub fn local_name(&self) -> String {
        match &self.handle.data {
            NodeData::Element { name, .. } => name.local.to_string(),
            _ => String::new(),
        }
    }

    /// Serialized markup of the element's children (`innerHTML`).
    ///
    /// Children of raw-text elements such as `<script>` and `<style>` are
    /// written verbatim, everything else is escaped per the HTML
    /// fragment serialization algorithm.
    pub fn inner_html(&self) -> String {
        let parent = match &self.handle.data {
            NodeData::Element { name, .. } => Some(name.clone()),
            _ => None,
        };
        let opts = SerializeOpts {
            traversal_scope: TraversalScope::ChildrenOnly(parent),
            ..Default::default()
        };

        let mut buf = Vec::new();
        let node = SerializableHandle::from(self.handle.clone());
        serialize(&mut buf, &node, opts).expect("writing into a Vec should not fail");

        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl std::fmt::Debug for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Element")
            .field("name", &self.local_name())
            .finish()
    }
}
