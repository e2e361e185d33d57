//! Version-control backend: template acquisition and history detachment.

use anyhow::{ensure, Context};
use std::{
    ffi::OsStr,
    path::Path,
    process::{Command, Output, Stdio},
};

use crate::{
    error::{Result, ScaffoldError},
    trace,
};

/// Metadata directory that ties a checkout to its origin
pub const METADATA_DIR: &str = ".git";

pub trait Vcs {
    /// Shallow clone of `url` into `dest`.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Clone`] for any failure of the underlying tool.
    fn clone_template(&self, url: &str, dest: &Path) -> Result<()>;

    /// Starts a new history in `dir` holding every file in one commit.
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] with the first step that failed.
    fn reinit(&self, dir: &Path, message: &str) -> anyhow::Result<()>;
}

/// [`Vcs`] backed by the `git` command line
#[derive(Debug, Clone)]
pub struct Git {
    program: String,
}

impl Git {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn output(&self, dir: Option<&Path>, args: &[&OsStr]) -> std::io::Result<Output> {
        trace!(
            "Running `{} {}`{}",
            self.program,
            args.iter()
                .map(|a| a.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" "),
            dir.map(|d| format!(" in {}", d.display()))
                .unwrap_or_default()
        );

        let mut cmd = Command::new(&self.program);
        if let Some(dir) = dir {
            cmd.current_dir(dir);
        }

        cmd.args(args).stdin(Stdio::null()).output()
    }

    fn run_in(&self, dir: &Path, args: &[&str]) -> anyhow::Result<()> {
        let os_args: Vec<&OsStr> = args.iter().map(OsStr::new).collect();
        let output = self
            .output(Some(dir), &os_args)
            .with_context(|| format!("Failed to run {} {}", self.program, args.join(" ")))?;

        ensure!(
            output.status.success(),
            "{} {} failed: {}",
            self.program,
            args.join(" "),
            String::from_utf8_lossy(&output.stderr).trim()
        );

        Ok(())
    }
}

impl Vcs for Git {
    fn clone_template(&self, url: &str, dest: &Path) -> Result<()> {
        let args = [
            OsStr::new("clone"),
            OsStr::new("--depth"),
            OsStr::new("1"),
            OsStr::new(url),
            dest.as_os_str(),
        ];
        let output = self
            .output(None, &args)
            .map_err(|e| ScaffoldError::clone_failed(url, e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            trace!("Clone failed: {}", stderr.trim());
            return Err(ScaffoldError::clone_failed(url, stderr));
        }

        Ok(())
    }

    fn reinit(&self, dir: &Path, message: &str) -> anyhow::Result<()> {
        self.run_in(dir, &["init"])?;
        self.run_in(dir, &["add", "-A"])?;
        self.run_in(dir, &["commit", "-m", message])
    }
}

/// Drops the template's own history from `dir` and starts a fresh one.
///
/// Best effort: returns whether both steps succeeded and never fails. When
/// the old metadata can not be removed no new history is started, so the
/// template's history is never carried over.
pub fn detach_history<V: Vcs + ?Sized>(vcs: &V, dir: &Path, message: &str) -> bool {
    let result = fs_extra::dir::remove(dir.join(METADATA_DIR))
        .with_context(|| format!("Failed to remove {METADATA_DIR} from {}", dir.display()))
        .and_then(|()| vcs.reinit(dir, message));

    match result {
        Ok(()) => true,
        Err(e) => {
            trace!("Skipping fresh history: {e:#}");
            false
        }
    }
}
