//! Page - policy generation for a single built HTML file

use std::fs;
use std::path::{Component, Path, PathBuf};

use sitecsp_html::HtmlParser;
use sitecsp_security::{extract_hashes, policy_string, Directive, DirectiveHashes, PolicySet};

use crate::{Config, EngineError};

/// A page that received a policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRecord {
    /// Site-relative URL path, e.g. `/about/`
    pub web_path: String,
    /// Full Content-Security-Policy header value
    pub policy: String,
}

/// Settings shared by every page in a run
#[derive(Debug, Clone)]
pub struct PageContext {
    pub build_dir: PathBuf,
    pub policies: PolicySet,
    pub set_all_policies: bool,
    pub hash_styles: bool,
}

impl PageContext {
    pub fn from_config(config: &Config) -> Self {
        Self {
            build_dir: config.build_dir.clone(),
            policies: config.policy_set(),
            set_all_policies: config.set_all_policies,
            hash_styles: config.hash_styles,
        }
    }
}

fn strip_build_dir<'a>(build_dir: &Path, path: &'a Path) -> Option<&'a Path> {
    if let Ok(rel) = path.strip_prefix(build_dir) {
        return Some(rel);
    }
    // `./public` and `public` name the same directory
    let without_cur: PathBuf = build_dir
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    path.strip_prefix(&without_cur).ok()
}

/// URL path for a built file: the build directory prefix removed, `/`
/// separators, and a final `index.html` component dropped.
///
/// `public/about/index.html` becomes `/about/`, `public/index.html`
/// becomes `/`, `public/404.html` stays `/404.html`.
pub fn web_path(build_dir: &Path, path: &Path) -> String {
    let relative = strip_build_dir(build_dir, path).unwrap_or(path);

    let mut web = String::new();
    for component in relative.components() {
        if let Component::Normal(part) = component {
            web.push('/');
            web.push_str(&part.to_string_lossy());
        }
    }

    match web.strip_suffix("/index.html") {
        Some(dir) => format!("{dir}/"),
        None if web.is_empty() => "/".to_string(),
        None => web,
    }
}

/// Hash a page's inline scripts and build its policy.
///
/// Pages without any non-empty inline script (or inline style, when style
/// hashing is on) get no record. A read failure aborts the run.
pub fn process_page(path: &Path, ctx: &PageContext) -> Result<Option<PageRecord>, EngineError> {
    let bytes = fs::read(path).map_err(|source| EngineError::ReadPage {
        path: path.to_path_buf(),
        source,
    })?;
    let document = HtmlParser::new().parse_bytes(&bytes, &path.to_string_lossy());

    let mut hashes = DirectiveHashes::new();
    hashes.insert(Directive::ScriptSrc, extract_hashes(&document, "script"));
    if ctx.hash_styles {
        hashes.insert(Directive::StyleSrc, extract_hashes(&document, "style"));
    }

    if hashes.is_empty() {
        tracing::debug!("No inline content in {}, skipping", document.url());
        return Ok(None);
    }

    let record = PageRecord {
        web_path: web_path(&ctx.build_dir, path),
        policy: policy_string(&ctx.policies, ctx.set_all_policies, &hashes),
    };
    tracing::debug!("Built policy for {} ({})", record.web_path, document.url());

    Ok(Some(record))
}
