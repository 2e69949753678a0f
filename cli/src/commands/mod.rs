//! Whole-run orchestration on top of the per-entry [`Deployer`].
pub mod deploy;

use anyhow::Result;

use crate::config::DotfileEntry;
use crate::deploy::Deployer;
use crate::logging::Logger;

/// Deploy every entry in order, print the summary, and bail if any entry
/// failed. Skipped entries do not count as failures.
///
/// # Errors
///
/// Returns an error if one or more entries recorded a failure.
pub fn deploy_to_completion(
    deployer: &Deployer,
    entries: &[DotfileEntry],
    log: &Logger,
) -> Result<()> {
    let dry_run = deployer.options().dry_run;
    for entry in entries {
        log.stage(&entry.name);
        let result = deployer.deploy(entry);
        log.record_entry(
            &entry.name,
            result.status(dry_run),
            result.message().as_deref(),
        );
    }

    log.print_summary();

    let count = log.failure_count();
    if count > 0 {
        anyhow::bail!("{count} dotfile(s) failed");
    }
    Ok(())
}
