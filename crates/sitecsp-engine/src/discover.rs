//! HTML page discovery

use std::path::{Component, Path, PathBuf};

use glob::{MatchOptions, Pattern};

use crate::EngineError;

// `*` stays within one path component and hidden files are skipped unless
// the pattern names them explicitly.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// Glob matching every `.html` file below `build_dir`
pub fn html_pattern(build_dir: &Path) -> String {
    let root = Pattern::escape(&build_dir.to_string_lossy());
    let root = root.trim_end_matches('/');
    format!("{root}/**/*.html")
}

/// Strip the `!` negation marker, if present, and any leading `./`
/// segments from an exclude pattern.
///
/// Excludes are always treated as negations, so `!drafts/*.html`,
/// `drafts/*.html` and `./drafts/*.html` mean the same thing.
pub fn normalize_exclude(pattern: &str) -> &str {
    let mut pattern = pattern.strip_prefix('!').unwrap_or(pattern);
    while let Some(rest) = pattern.strip_prefix("./") {
        pattern = rest.trim_start_matches('/');
    }
    pattern
}

// Excludes are matched without leading `./`, so candidates drop it too
fn without_cur_dir(path: &Path) -> PathBuf {
    path.components()
        .skip_while(|c| matches!(c, Component::CurDir))
        .collect()
}

fn compile(pattern: &str) -> Result<Pattern, EngineError> {
    Pattern::new(pattern).map_err(|source| EngineError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// All HTML pages under `build_dir` not matched by any exclude pattern,
/// in sorted path order.
pub fn discover(build_dir: &Path, exclude: &[String]) -> Result<Vec<PathBuf>, EngineError> {
    let excludes = exclude
        .iter()
        .map(|p| compile(normalize_exclude(p)))
        .collect::<Result<Vec<_>, _>>()?;

    let pattern = html_pattern(build_dir);
    let entries = glob::glob_with(&pattern, MATCH_OPTIONS).map_err(|source| {
        EngineError::InvalidPattern {
            pattern: pattern.clone(),
            source,
        }
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry?;
        let candidate = without_cur_dir(&path);
        if excludes.iter().any(|p| p.matches_path_with(&candidate, MATCH_OPTIONS)) {
            tracing::debug!("Excluded {}", path.display());
            continue;
        }
        paths.push(path);
    }
    paths.sort();

    Ok(paths)
}
