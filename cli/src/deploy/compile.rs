//! Compile hook: a script that regenerates a dotfile before it is linked.
use std::path::Path;

use crate::error::CompileWarning;
use crate::exec::{ExecResult, Executor};

/// Check that `script` is present.
///
/// # Errors
///
/// Returns [`CompileWarning::MissingScript`] if it is not a file.
pub fn check_script(script: &Path) -> Result<(), CompileWarning> {
    if script.is_file() {
        Ok(())
    } else {
        Err(CompileWarning::MissingScript {
            path: script.to_path_buf(),
        })
    }
}

/// Run `script` with `dir` as its working directory. The call blocks until
/// the script exits.
///
/// # Errors
///
/// Returns a [`CompileWarning`] if the script is missing, cannot be spawned
/// or exits non-zero.
pub fn run(
    executor: &dyn Executor,
    script: &Path,
    dir: &Path,
) -> Result<ExecResult, CompileWarning> {
    check_script(script)?;
    executor.run_in(dir, script).map_err(|e| CompileWarning::Failed {
        path: script.to_path_buf(),
        reason: format!("{e:#}"),
    })
}
