//! Content Security Policy assembly
//!
//! Merges configured static sources with per-page hash sources into
//! directive strings. Output order is always [`Directive::ALL`].

use std::collections::BTreeMap;

use crate::{Directive, HashTokenSet, PolicySet};

/// Computed hash sources keyed by directive
#[derive(Debug, Clone, Default)]
pub struct DirectiveHashes {
    hashes: BTreeMap<Directive, HashTokenSet>,
}

impl DirectiveHashes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, directive: Directive, hashes: HashTokenSet) {
        self.hashes.insert(directive, hashes);
    }

    /// Hash sources for a directive; `None` when absent or empty
    pub fn get(&self, directive: Directive) -> Option<&HashTokenSet> {
        self.hashes.get(&directive).filter(|set| !set.is_empty())
    }

    /// True if no directive carries any hash source
    pub fn is_empty(&self) -> bool {
        self.hashes.values().all(HashTokenSet::is_empty)
    }
}

impl FromIterator<(Directive, HashTokenSet)> for DirectiveHashes {
    fn from_iter<I: IntoIterator<Item = (Directive, HashTokenSet)>>(iter: I) -> Self {
        Self {
            hashes: iter.into_iter().collect(),
        }
    }
}

/// Build the directive strings for one page.
///
/// A directive is emitted when it has hash sources, a non-empty configured
/// value, or `set_all` is on. With hashes the form is
/// `<name> <hashes> <value>;`, otherwise `<name> <value>;`. An empty value
/// is kept as-is, leaving a space before the semicolon.
pub fn build_csp(policies: &PolicySet, set_all: bool, hashes: &DirectiveHashes) -> Vec<String> {
    policies
        .iter()
        .filter_map(|(directive, value)| match hashes.get(directive) {
            Some(tokens) => Some(format!("{} {} {};", directive.name(), tokens.join(), value)),
            None if set_all || !value.is_empty() => Some(format!("{} {};", directive.name(), value)),
            None => None,
        })
        .collect()
}

/// Full header value: [`build_csp`] joined by single spaces
pub fn policy_string(policies: &PolicySet, set_all: bool, hashes: &DirectiveHashes) -> String {
    build_csp(policies, set_all, hashes).join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{hash_source, PolicyOverrides};

    fn tokens(contents: &[&str]) -> HashTokenSet {
        contents.iter().map(|c| hash_source(c)).collect()
    }

    fn script_hashes(contents: &[&str]) -> DirectiveHashes {
        [(Directive::ScriptSrc, tokens(contents))].into_iter().collect()
    }

    #[test]
    fn test_hash_with_empty_value_keeps_trailing_space() {
        let csp = build_csp(&PolicySet::default(), false, &script_hashes(&["console.log(1)"]));
        assert_eq!(csp, vec![format!("script-src {} ;", hash_source("console.log(1)"))]);
    }

    #[test]
    fn test_hash_with_configured_value() {
        let mut overrides = PolicyOverrides::default();
        overrides.set(Directive::ScriptSrc, "'self'");
        let policies = PolicySet::merged(&overrides);

        let csp = build_csp(&policies, false, &script_hashes(&["a()", "b()"]));
        assert_eq!(
            csp,
            vec![format!("script-src {} {} 'self';", hash_source("a()"), hash_source("b()"))]
        );
    }

    #[test]
    fn test_configured_values_without_hashes() {
        let mut overrides = PolicyOverrides::default();
        overrides.set(Directive::ImgSrc, "'self' data:");
        overrides.set(Directive::DefaultSrc, "'none'");
        let policies = PolicySet::merged(&overrides);

        let csp = build_csp(&policies, false, &DirectiveHashes::new());
        assert_eq!(csp, vec!["default-src 'none';", "img-src 'self' data:;"]);
    }

    #[test]
    fn test_nothing_configured_emits_nothing() {
        assert!(build_csp(&PolicySet::default(), false, &DirectiveHashes::new()).is_empty());
    }

    #[test]
    fn test_set_all_emits_every_directive() {
        let csp = build_csp(&PolicySet::default(), true, &script_hashes(&["x"]));

        assert_eq!(csp.len(), Directive::COUNT);
        for (line, directive) in csp.iter().zip(Directive::ALL) {
            if directive == Directive::ScriptSrc {
                assert_eq!(line, &format!("script-src {} ;", hash_source("x")));
            } else {
                assert_eq!(line, &format!("{} ;", directive.name()));
            }
        }
    }

    #[test]
    fn test_order_independent_of_insertion() {
        let mut overrides = PolicyOverrides::default();
        overrides.set(Directive::WorkerSrc, "'self'");
        overrides.set(Directive::DefaultSrc, "'self'");
        let policies = PolicySet::merged(&overrides);

        let forward: DirectiveHashes = [
            (Directive::StyleSrc, tokens(&["s"])),
            (Directive::ScriptSrc, tokens(&["j"])),
        ]
        .into_iter()
        .collect();
        let backward: DirectiveHashes = [
            (Directive::ScriptSrc, tokens(&["j"])),
            (Directive::StyleSrc, tokens(&["s"])),
        ]
        .into_iter()
        .collect();

        let a = build_csp(&policies, false, &forward);
        assert_eq!(a, build_csp(&policies, false, &backward));

        let names: Vec<&str> = a.iter().map(|s| s.split(' ').next().unwrap()).collect();
        assert_eq!(names, vec!["default-src", "script-src", "style-src", "worker-src"]);
    }

    #[test]
    fn test_empty_hash_set_treated_as_absent() {
        let hashes: DirectiveHashes = [(Directive::ScriptSrc, HashTokenSet::new())].into_iter().collect();

        assert!(hashes.is_empty());
        assert!(build_csp(&PolicySet::default(), false, &hashes).is_empty());
    }

    #[test]
    fn test_policy_string_joins_with_space() {
        let mut overrides = PolicyOverrides::default();
        overrides.set(Directive::ObjectSrc, "'none'");
        let policies = PolicySet::merged(&overrides);

        let s = policy_string(&policies, false, &script_hashes(&["q"]));
        assert_eq!(s, format!("object-src 'none'; script-src {} ;", hash_source("q")));
    }
}
