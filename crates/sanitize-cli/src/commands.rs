use anyhow::Result;
use tracing::{info_span, warn};

use sanitize_cli::batch::{BatchOutcome, load_config, load_records, sanitize_batch, write_records};
use sanitize_cli::summary::print_chains;

use crate::cli::{ApplyArgs, CheckArgs};

pub fn run_apply(args: &ApplyArgs) -> Result<BatchOutcome> {
    let span = info_span!("apply", config = %args.config.display());
    let _guard = span.enter();

    let config = load_config(&args.config)?;
    let records = load_records(&args.input)?;
    let outcome = sanitize_batch(&config, records);
    if outcome.has_failures() {
        warn!(
            failed = outcome.failures.len(),
            "Not writing output: some records failed to sanitize"
        );
        return Ok(outcome);
    }
    write_records(&outcome.records, args.output.as_deref())?;
    Ok(outcome)
}

pub fn run_check(args: &CheckArgs) -> Result<()> {
    let config = load_config(&args.config)?;
    print_chains(&config);
    Ok(())
}
