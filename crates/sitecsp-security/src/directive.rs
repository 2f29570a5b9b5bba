//! CSP fetch directives
//!
//! The closed set of directives a generated policy may carry, in the order
//! they are always emitted.

use std::fmt;
use std::str::FromStr;

use crate::SecurityError;

/// CSP directive names
pub const DEFAULT_SRC: &str = "default-src";
pub const CHILD_SRC: &str = "child-src";
pub const CONNECT_SRC: &str = "connect-src";
pub const FONT_SRC: &str = "font-src";
pub const FRAME_SRC: &str = "frame-src";
pub const IMG_SRC: &str = "img-src";
pub const MANIFEST_SRC: &str = "manifest-src";
pub const MEDIA_SRC: &str = "media-src";
pub const OBJECT_SRC: &str = "object-src";
pub const PREFETCH_SRC: &str = "prefetch-src";
pub const SCRIPT_SRC: &str = "script-src";
pub const SCRIPT_SRC_ELEM: &str = "script-src-elem";
pub const SCRIPT_SRC_ATTR: &str = "script-src-attr";
pub const STYLE_SRC: &str = "style-src";
pub const STYLE_SRC_ELEM: &str = "style-src-elem";
pub const STYLE_SRC_ATTR: &str = "style-src-attr";
pub const WORKER_SRC: &str = "worker-src";

/// A fetch directive
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Directive {
    DefaultSrc,
    ChildSrc,
    ConnectSrc,
    FontSrc,
    FrameSrc,
    ImgSrc,
    ManifestSrc,
    MediaSrc,
    ObjectSrc,
    PrefetchSrc,
    ScriptSrc,
    ScriptSrcElem,
    ScriptSrcAttr,
    StyleSrc,
    StyleSrcElem,
    StyleSrcAttr,
    WorkerSrc,
}

impl Directive {
    /// Number of directives
    pub const COUNT: usize = 17;

    /// Every directive, in canonical emission order
    pub const ALL: [Directive; Self::COUNT] = [
        Directive::DefaultSrc,
        Directive::ChildSrc,
        Directive::ConnectSrc,
        Directive::FontSrc,
        Directive::FrameSrc,
        Directive::ImgSrc,
        Directive::ManifestSrc,
        Directive::MediaSrc,
        Directive::ObjectSrc,
        Directive::PrefetchSrc,
        Directive::ScriptSrc,
        Directive::ScriptSrcElem,
        Directive::ScriptSrcAttr,
        Directive::StyleSrc,
        Directive::StyleSrcElem,
        Directive::StyleSrcAttr,
        Directive::WorkerSrc,
    ];

    /// Position in [`Directive::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Wire name, e.g. `script-src-elem`
    pub fn name(self) -> &'static str {
        match self {
            Directive::DefaultSrc => DEFAULT_SRC,
            Directive::ChildSrc => CHILD_SRC,
            Directive::ConnectSrc => CONNECT_SRC,
            Directive::FontSrc => FONT_SRC,
            Directive::FrameSrc => FRAME_SRC,
            Directive::ImgSrc => IMG_SRC,
            Directive::ManifestSrc => MANIFEST_SRC,
            Directive::MediaSrc => MEDIA_SRC,
            Directive::ObjectSrc => OBJECT_SRC,
            Directive::PrefetchSrc => PREFETCH_SRC,
            Directive::ScriptSrc => SCRIPT_SRC,
            Directive::ScriptSrcElem => SCRIPT_SRC_ELEM,
            Directive::ScriptSrcAttr => SCRIPT_SRC_ATTR,
            Directive::StyleSrc => STYLE_SRC,
            Directive::StyleSrcElem => STYLE_SRC_ELEM,
            Directive::StyleSrcAttr => STYLE_SRC_ATTR,
            Directive::WorkerSrc => WORKER_SRC,
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Directive {
    type Err = SecurityError;

    /// Accepts the wire name or the configuration key
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kebab = to_kebab_case(s.trim());
        Directive::ALL
            .into_iter()
            .find(|d| d.name() == kebab)
            .ok_or_else(|| SecurityError::UnknownDirective(s.to_string()))
    }
}

/// Convert camelCase to kebab-case.
///
/// A hyphen goes between a lowercase letter or digit and a following
/// uppercase letter, then everything is lowercased. Idempotent.
pub fn to_kebab_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    let mut prev: Option<char> = None;

    for c in s.chars() {
        if c.is_ascii_uppercase()
            && prev.is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit())
        {
            out.push('-');
        }
        out.push(c.to_ascii_lowercase());
        prev = Some(c);
    }

    out
}
