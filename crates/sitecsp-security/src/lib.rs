//! sitecsp Security
//!
//! Content-Security-Policy construction for statically generated pages.
//!
//! Features:
//! - The closed set of fetch directives and their wire names
//! - Default-then-override policy configuration
//! - SHA-256 hash sources for inline elements
//! - Deterministic directive assembly

pub mod csp;
pub mod directive;
pub mod hash;
pub mod policy;

pub use csp::{build_csp, policy_string, DirectiveHashes};
pub use directive::{to_kebab_case, Directive};
pub use hash::{extract_hashes, hash_source, HashTokenSet};
pub use policy::{PolicyOverrides, PolicySet};

/// Security error
#[derive(Debug, thiserror::Error)]
pub enum SecurityError {
    #[error("Unknown CSP directive: {0}")]
    UnknownDirective(String),

    #[error("Malformed policy assignment (expected NAME=VALUE): {0}")]
    MalformedPolicy(String),
}
