//! `rl build` command implementation.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use rl_corpus::CorpusLoader;
use rl_lists::{ListProcessor, ProcessedDocument};

use super::{CommonArgs, load_corpus, report_diagnostics};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Output directory for expanded documents (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// Directive problems are reported but do not fail the build.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, loading or writing fails.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let config = self.common.load_config(self.output_dir)?;
        let corpus = load_corpus(&config, output)?;

        let processor = ListProcessor::new(&corpus).with_default_limit(config.lists.default_limit);
        let results = processor.process_corpus();

        let output_dir = &config.docs_resolved.output_dir;
        ensure_project_dir(&config.docs_resolved.project_dir, output_dir)?;
        for result in &results {
            write_document(output_dir, result)?;
        }

        let problems = report_diagnostics(&config, &results, output);
        let expanded: usize = results.iter().map(|r| r.expanded).sum();
        output.success(&format!(
            "Built {} documents ({expanded} lists expanded) into {}",
            results.len(),
            output_dir.display()
        ));
        if problems > 0 {
            output.warning(&format!("{problems} problem(s) found in list directives"));
        }

        Ok(())
    }
}

/// Write one expanded document under `output_dir`, mirroring its key.
fn write_document(output_dir: &Path, result: &ProcessedDocument) -> Result<(), CliError> {
    let path = CorpusLoader::path_for_key(output_dir, &result.key);
    let write_error = |source| CliError::Write {
        path: path.clone(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    fs::write(&path, &result.text).map_err(write_error)?;
    tracing::debug!(path = %path.display(), "Wrote document");
    Ok(())
}

/// Ensure the `.rl/` project directory has a `.gitignore` when output lands in it.
fn ensure_project_dir(project_dir: &Path, output_dir: &Path) -> Result<(), CliError> {
    if !output_dir.starts_with(project_dir) {
        return Ok(());
    }
    fs::create_dir_all(project_dir).map_err(|source| CliError::Write {
        path: project_dir.to_path_buf(),
        source,
    })?;

    let gitignore_path = project_dir.join(".gitignore");
    if !gitignore_path.exists() {
        let _ = fs::write(&gitignore_path, "# Automatically created by rl\n*\n");
    }
    Ok(())
}
