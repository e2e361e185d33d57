use std::{
    path::Path,
    process::{Command, Stdio},
};

use crate::trace;

/// Result of a dependency installation. Never fatal for a scaffold run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    Installed,
    /// The installer ran and exited unsuccessfully. `code` is [`None`] when
    /// it was killed by a signal.
    Failed { code: Option<i32> },
    /// The installer could not be started
    Unavailable(String),
}

impl InstallOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, InstallOutcome::Installed)
    }
}

pub trait PackageManager {
    /// Installs the dependencies declared by the manifest in `dir`. Output
    /// goes straight to the invoking terminal.
    fn install(&self, dir: &Path) -> InstallOutcome;
}

/// [`PackageManager`] backed by `npm install`
#[derive(Debug, Clone)]
pub struct Npm {
    program: String,
}

impl Npm {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl PackageManager for Npm {
    fn install(&self, dir: &Path) -> InstallOutcome {
        trace!("Running `{} install` in {}", self.program, dir.display());

        let status = Command::new(&self.program)
            .arg("install")
            .current_dir(dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status();

        match status {
            Ok(status) if status.success() => InstallOutcome::Installed,
            Ok(status) => {
                trace!("{} install exited with {status}", self.program);
                InstallOutcome::Failed {
                    code: status.code(),
                }
            }
            Err(e) => {
                trace!("Failed to start {}: {e}", self.program);
                InstallOutcome::Unavailable(e.to_string())
            }
        }
    }
}
