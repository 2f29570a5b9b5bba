//! Policy configuration
//!
//! User-supplied static sources per directive, overlaid onto an all-empty
//! default set.

use serde::{Deserialize, Serialize};

use crate::{Directive, SecurityError};

/// Partial policy configuration as supplied by the user.
///
/// Keys are the camelCase directive names (`scriptSrc`, `imgSrc`, ...).
/// Unknown keys are rejected when deserializing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PolicyOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img_src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest_src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefetch_src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script_src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script_src_elem: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script_src_attr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_src_elem: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_src_attr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker_src: Option<String>,
}

impl PolicyOverrides {
    fn slot(&self, directive: Directive) -> &Option<String> {
        match directive {
            Directive::DefaultSrc => &self.default_src,
            Directive::ChildSrc => &self.child_src,
            Directive::ConnectSrc => &self.connect_src,
            Directive::FontSrc => &self.font_src,
            Directive::FrameSrc => &self.frame_src,
            Directive::ImgSrc => &self.img_src,
            Directive::ManifestSrc => &self.manifest_src,
            Directive::MediaSrc => &self.media_src,
            Directive::ObjectSrc => &self.object_src,
            Directive::PrefetchSrc => &self.prefetch_src,
            Directive::ScriptSrc => &self.script_src,
            Directive::ScriptSrcElem => &self.script_src_elem,
            Directive::ScriptSrcAttr => &self.script_src_attr,
            Directive::StyleSrc => &self.style_src,
            Directive::StyleSrcElem => &self.style_src_elem,
            Directive::StyleSrcAttr => &self.style_src_attr,
            Directive::WorkerSrc => &self.worker_src,
        }
    }

    fn slot_mut(&mut self, directive: Directive) -> &mut Option<String> {
        match directive {
            Directive::DefaultSrc => &mut self.default_src,
            Directive::ChildSrc => &mut self.child_src,
            Directive::ConnectSrc => &mut self.connect_src,
            Directive::FontSrc => &mut self.font_src,
            Directive::FrameSrc => &mut self.frame_src,
            Directive::ImgSrc => &mut self.img_src,
            Directive::ManifestSrc => &mut self.manifest_src,
            Directive::MediaSrc => &mut self.media_src,
            Directive::ObjectSrc => &mut self.object_src,
            Directive::PrefetchSrc => &mut self.prefetch_src,
            Directive::ScriptSrc => &mut self.script_src,
            Directive::ScriptSrcElem => &mut self.script_src_elem,
            Directive::ScriptSrcAttr => &mut self.script_src_attr,
            Directive::StyleSrc => &mut self.style_src,
            Directive::StyleSrcElem => &mut self.style_src_elem,
            Directive::StyleSrcAttr => &mut self.style_src_attr,
            Directive::WorkerSrc => &mut self.worker_src,
        }
    }

    /// Configured value for a directive, if any
    pub fn get(&self, directive: Directive) -> Option<&str> {
        self.slot(directive).as_deref()
    }

    /// Set the value for a directive
    pub fn set(&mut self, directive: Directive, value: impl Into<String>) {
        *self.slot_mut(directive) = Some(value.into());
    }

    /// Overlay every value present in `other` onto `self`
    pub fn extend(&mut self, other: &PolicyOverrides) {
        for directive in Directive::ALL {
            if let Some(value) = other.get(directive) {
                self.set(directive, value);
            }
        }
    }

    /// Parse a `NAME=VALUE` assignment, NAME in wire or configuration form
    pub fn parse_assignment(input: &str) -> Result<(Directive, String), SecurityError> {
        let (name, value) = input
            .split_once('=')
            .ok_or_else(|| SecurityError::MalformedPolicy(input.to_string()))?;
        let directive = name.parse::<Directive>()?;
        Ok((directive, value.to_string()))
    }
}

/// Static sources for all 17 directives.
///
/// Always holds exactly one value per [`Directive`]; an empty string means
/// no static sources are configured.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicySet {
    values: [String; Directive::COUNT],
}

impl PolicySet {
    /// Defaults overlaid with user overrides; user values win
    pub fn merged(overrides: &PolicyOverrides) -> Self {
        let mut set = Self::default();
        for directive in Directive::ALL {
            if let Some(value) = overrides.get(directive) {
                set.set(directive, value);
            }
        }
        set
    }

    /// Configured value for a directive (may be empty)
    pub fn get(&self, directive: Directive) -> &str {
        &self.values[directive.index()]
    }

    pub fn set(&mut self, directive: Directive, value: impl Into<String>) {
        self.values[directive.index()] = value.into();
    }

    /// `(directive, value)` pairs in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (Directive, &str)> + '_ {
        Directive::ALL.into_iter().map(move |d| (d, self.get(d)))
    }
}
