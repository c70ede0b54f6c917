//! # propdoc-cli
//!
//! CLI library that keeps the template section of an agent prompt document
//! in sync with the `Props` interfaces of UI template components.
//!
//! ## Architecture
//!
//! - [`config`] - Configuration management and TOML parsing
//! - [`scanner`] - Component file discovery and filtering
//! - [`generator`] - Per-file extraction and section assembly
//! - [`splice`] - Locating and replacing the managed region of the document
//! - [`writer`] - File output and dry-run support
//! - [`watcher`] - File system watching for development mode
//! - [`logging`] - `tracing` subscriber setup
//! - [`error`] - Error types and handling

pub mod config;
pub mod error;
pub mod generator;
pub mod logging;
pub mod scanner;
pub mod splice;
pub mod watcher;
pub mod writer;

pub use config::{Config, ConfigManager};
pub use error::{CliError, CliResult};
pub use generator::DocumentGenerator;
pub use scanner::{SourceFile, SourceScanner};
pub use splice::{InsertionPoint, SpliceOutcome, Splicer};
pub use watcher::FileWatcher;
pub use writer::FileWriter;

use std::path::Path;

/// One full pass: the generated section and the document it produces.
#[derive(Debug, Clone)]
pub struct UpdatePlan {
    /// Section generation report.
    pub output: generator::GeneratedOutput,

    /// Splice result for the target document.
    pub outcome: SpliceOutcome,
}

/// Scan, generate and splice without touching the target document.
///
/// Fails before anything is written when the target cannot be read or has
/// no insertion point.
pub fn plan_update(config: &Config, filter: Option<&str>) -> CliResult<UpdatePlan> {
    let mut scanner = SourceScanner::new(&config.source.dir)
        .with_extensions(config.source.extensions.iter().cloned())
        .with_recursive(config.source.recursive);
    if let Some(pattern) = filter {
        scanner = scanner.with_filter(pattern)?;
    }
    let files = scanner.scan_allow_empty()?;

    let output = DocumentGenerator::new(config.clone()).generate(&files);
    let document = read_target(&config.target.file)?;
    let outcome = Splicer::new(&config.target).splice(&document, &output.section)?;

    Ok(UpdatePlan { output, outcome })
}

fn read_target(path: &Path) -> CliResult<String> {
    std::fs::read_to_string(path).map_err(|source| CliError::TargetRead {
        path: path.to_path_buf(),
        source,
    })
}
