//! sitecsp - Main Entry Point
//!
//! Run after a static site build to write Content-Security-Policy headers
//! for every page with inline scripts.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use sitecsp_engine::security::PolicyOverrides;
use sitecsp_engine::{generate, render_headers, run, Config, WriteMode};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Generate a CSP `_headers` file for a built static site
#[derive(Parser, Debug)]
#[command(name = "sitecsp")]
#[command(version, about, long_about = None)]
struct Cli {
    /// JSON config file (buildDir, exclude, policies, setAllPolicies, ...)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory containing the generated HTML
    #[arg(short, long)]
    build_dir: Option<PathBuf>,

    /// Glob of pages to skip (repeatable, leading `!` optional)
    #[arg(short, long = "exclude", value_name = "GLOB")]
    exclude: Vec<String>,

    /// Static sources for a directive, e.g. `script-src='self'` (repeatable)
    #[arg(short, long = "policy", value_name = "NAME=VALUE")]
    policy: Vec<String>,

    /// Emit every directive even when nothing is configured for it
    #[arg(long)]
    set_all_policies: bool,

    /// Also hash inline <style> elements into style-src
    #[arg(long)]
    hash_styles: bool,

    /// Output file (default: <build-dir>/_headers)
    #[arg(long)]
    headers_file: Option<PathBuf>,

    /// Append to an existing headers file instead of replacing it
    #[arg(long)]
    append: bool,

    /// Print the headers to stdout instead of writing the file
    #[arg(long)]
    dry_run: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Cli {
    /// File config (if any) with command line flags layered on top
    fn into_config(self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };

        if let Some(build_dir) = self.build_dir {
            config.build_dir = build_dir;
        }
        config.exclude.extend(self.exclude);

        let mut overrides = PolicyOverrides::default();
        for assignment in &self.policy {
            let (directive, value) = PolicyOverrides::parse_assignment(assignment)
                .with_context(|| format!("Invalid --policy {assignment:?}"))?;
            overrides.set(directive, value);
        }
        config.policies.extend(&overrides);

        config.set_all_policies |= self.set_all_policies;
        config.hash_styles |= self.hash_styles;
        if self.headers_file.is_some() {
            config.headers_file = self.headers_file;
        }
        if self.append {
            config.write_mode = WriteMode::Append;
        }

        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so --dry-run output stays clean
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let dry_run = cli.dry_run;
    let config = cli.into_config()?;

    if dry_run {
        let result = run(&config).context("Header generation failed")?;
        print!("{}", render_headers(&result.records));
        return Ok(());
    }

    generate(&config).context("Header generation failed")?;
    Ok(())
}
