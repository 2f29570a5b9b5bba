//! sitecsp Engine
//!
//! Post-build step for statically generated sites: finds every HTML page,
//! hashes its inline scripts and writes a `_headers` file mapping each page's
//! URL path to its Content-Security-Policy.
//!
//! # Example
//! ```rust,no_run
//! use sitecsp_engine::{generate, Config};
//!
//! let mut config = Config::new("public");
//! config.exclude.push("public/drafts/*.html".into());
//! let summary = generate(&config)?;
//! println!("{} paths -> {}", summary.updated_count, summary.headers_path.display());
//! # Ok::<(), sitecsp_engine::EngineError>(())
//! ```

mod aggregate;
mod config;
mod discover;
mod headers;
mod page;

use std::path::PathBuf;

pub use aggregate::{run, AggregationResult};
pub use config::Config;
pub use discover::{discover, html_pattern, normalize_exclude};
pub use headers::{render_headers, write_headers, WriteMode, HEADERS_FILE};
pub use page::{process_page, web_path, PageContext, PageRecord};

// Re-export sub-crates for advanced usage
pub use sitecsp_html as html;
pub use sitecsp_security as security;

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine error
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("No build directory configured")]
    MissingBuildDir,

    #[error("Invalid glob pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("File discovery failed: {0}")]
    Discovery(#[from] glob::GlobError),

    #[error("Failed to read {}: {source}", path.display())]
    ReadPage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read config {}: {source}", path.display())]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {}: {source}", path.display())]
    ParseConfig {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write headers file {}: {source}", path.display())]
    WriteHeaders {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Outcome of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Pages that received a policy
    pub updated_count: usize,
    /// Where the headers were written
    pub headers_path: PathBuf,
}

/// Discover, process and write in one go.
///
/// Nothing is written unless every page was processed successfully.
pub fn generate(config: &Config) -> Result<RunSummary, EngineError> {
    let result = run(config)?;
    let headers_path = config.headers_path();
    write_headers(&headers_path, &result.records, config.write_mode)?;

    tracing::info!(
        "Generated headers for {} {}.  Saved at {}.",
        result.updated_count,
        if result.updated_count == 1 { "path" } else { "paths" },
        headers_path.display()
    );

    Ok(RunSummary {
        updated_count: result.updated_count,
        headers_path,
    })
}
