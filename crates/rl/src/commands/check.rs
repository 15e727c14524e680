//! `rl check` command implementation.

use clap::Args;
use rl_lists::ListProcessor;

use super::{CommonArgs, load_corpus, report_diagnostics};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Diagnostics`] if any directive has a problem, or an
    /// error if configuration or loading fails.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let config = self.common.load_config(None)?;
        let corpus = load_corpus(&config, output)?;

        let processor = ListProcessor::new(&corpus).with_default_limit(config.lists.default_limit);
        let results = processor.process_corpus();

        output.highlight(&format!("Checked {} documents", results.len()));
        let problems = report_diagnostics(&config, &results, output);
        if problems > 0 {
            return Err(CliError::Diagnostics(problems));
        }

        let expanded: usize = results.iter().map(|r| r.expanded).sum();
        output.success(&format!("All {expanded} list directives are valid"));
        Ok(())
    }
}
