//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod check;

use std::path::PathBuf;

use clap::Args;
use rl_config::{CliSettings, Config};
use rl_corpus::{Corpus, CorpusLoader};
use rl_lists::ProcessedDocument;

use crate::error::CliError;
use crate::output::Output;

pub(crate) use build::BuildArgs;
pub(crate) use check::CheckArgs;

/// Arguments shared by every command.
#[derive(Args, Default)]
pub(crate) struct CommonArgs {
    /// Path to configuration file (default: auto-discover rl.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Documentation source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Limit for directives without a `limit` argument (overrides config).
    #[arg(long, allow_negative_numbers = true)]
    default_limit: Option<i32>,

    /// Enable verbose output (per-build statistics).
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommonArgs {
    /// Load configuration, applying CLI overrides.
    fn load_config(&self, output_dir: Option<PathBuf>) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir.clone(),
            output_dir,
            default_limit: self.default_limit,
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}

/// Load the corpus described by `config`.
///
/// The output directory is never read back as sources, even when it is
/// nested inside the source directory.
fn load_corpus(config: &Config, output: &Output) -> Result<Corpus, CliError> {
    let source_dir = &config.docs_resolved.source_dir;
    output.info(&format!("Source directory: {}", source_dir.display()));

    let loader = CorpusLoader::with_meta_suffix(source_dir.clone(), &config.metadata.suffix)
        .skip_dir(config.docs_resolved.output_dir.clone());
    Ok(loader.load()?)
}

/// Print every diagnostic as `path:line:column: message`, returning the count.
fn report_diagnostics(config: &Config, results: &[ProcessedDocument], output: &Output) -> usize {
    let source_dir = &config.docs_resolved.source_dir;
    let mut count = 0;
    for result in results {
        let path = CorpusLoader::path_for_key(source_dir, &result.key);
        for diagnostic in &result.diagnostics {
            let location = format!("{}:{}:{}", path.display(), diagnostic.line, diagnostic.column);
            output.diagnostic(&location, &diagnostic.message);
            count += 1;
        }
    }
    count
}
