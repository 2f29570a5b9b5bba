//! Aggregation - fold page results into the records to write

use crate::{discover, process_page, Config, EngineError, PageContext, PageRecord};

/// Records gathered over a run, in discovery order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregationResult {
    pub updated_count: usize,
    pub records: Vec<PageRecord>,
}

impl AggregationResult {
    /// One fold step: pages without a record leave the result unchanged
    pub fn fold(mut self, record: Option<PageRecord>) -> Self {
        if let Some(record) = record {
            self.updated_count += 1;
            self.records.push(record);
        }
        self
    }
}

/// Discover every page and process them one at a time.
///
/// The first failing page aborts the run.
pub fn run(config: &Config) -> Result<AggregationResult, EngineError> {
    config.validate()?;

    let paths = discover(&config.build_dir, &config.exclude)?;
    tracing::info!(
        "Found {} HTML {}...",
        paths.len(),
        if paths.len() == 1 { "file" } else { "files" }
    );

    let ctx = PageContext::from_config(config);
    paths.iter().try_fold(AggregationResult::default(), |acc, path| {
        Ok(acc.fold(process_page(path, &ctx)?))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(path: &str) -> PageRecord {
        PageRecord {
            web_path: path.to_string(),
            policy: "script-src 'sha256-x' ;".to_string(),
        }
    }

    #[test]
    fn test_fold_counts_records() {
        let result = AggregationResult::default()
            .fold(Some(record("/")))
            .fold(None)
            .fold(Some(record("/about/")));

        assert_eq!(result.updated_count, 2);
        assert_eq!(result.records, vec![record("/"), record("/about/")]);
    }

    #[test]
    fn test_fold_none_is_identity() {
        let before = AggregationResult::default().fold(Some(record("/a")));
        assert_eq!(before.clone().fold(None), before);
    }

    #[test]
    fn test_run_requires_build_dir() {
        assert!(matches!(run(&Config::default()), Err(EngineError::MissingBuildDir)));
    }
}
