//! The scaffold pipeline: reserve, clone, detach, install.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::{
    config::{Settings, Target},
    error::{Result, ScaffoldError},
    packages::{InstallOutcome, Npm, PackageManager},
    style::bold,
    trace,
    vcs::{detach_history, Git, Vcs},
};

/// What a successful run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub target: Target,
    /// Whether the project got its own single-commit history
    pub history_detached: bool,
    pub install: InstallOutcome,
}

pub struct Scaffold<V = Git, P = Npm> {
    settings: Settings,
    vcs: V,
    packages: P,
}

impl Scaffold<Git, Npm> {
    /// Scaffold backed by the programs named in `settings`
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        let vcs = Git::new(settings.git_program());
        let packages = Npm::new(settings.npm_program());

        Self::with_backends(settings, vcs, packages)
    }
}

impl<V: Vcs, P: PackageManager> Scaffold<V, P> {
    pub fn with_backends(settings: Settings, vcs: V, packages: P) -> Self {
        Self {
            settings,
            vcs,
            packages,
        }
    }

    /// Creates project `name` (or the default name) under `cwd`.
    ///
    /// Only an occupied target and a failed clone are errors. History
    /// detachment and dependency installation are reported in the
    /// [`Outcome`] and never abort the run.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::TargetExists`] without touching the filesystem
    /// if the target is taken, and [`ScaffoldError::Clone`] if the template
    /// could not be fetched.
    pub fn run(&self, name: Option<&str>, cwd: &Path) -> Result<Outcome> {
        let target = self.settings.resolve_target(name, cwd);
        trace!("Target: {}", target.display_path());

        let reserved = reserve(&target)?;

        println!("  Downloading template into {}...", bold(&target.name));
        if let Err(e) = self
            .vcs
            .clone_template(self.settings.template_url(), &target.path)
        {
            release(&reserved);
            return Err(e);
        }

        let history_detached =
            detach_history(&self.vcs, &target.path, self.settings.commit_message());

        println!("  Installing dependencies...");
        println!();
        let install = self.packages.install(&target.path);

        Ok(Outcome {
            target,
            history_detached,
            install,
        })
    }
}

/// Claims the target path by creating it as an empty directory. Creation is
/// atomic, so a path appearing after the existence check is still caught.
///
/// Returns every directory this created, deepest first: the target itself
/// followed by any parents that did not exist yet.
fn reserve(target: &Target) -> Result<Vec<PathBuf>> {
    if target.path.exists() {
        return Err(ScaffoldError::target_exists(&target.name, &target.path));
    }

    let mut created = vec![target.path.clone()];
    created.extend(
        target
            .path
            .ancestors()
            .skip(1)
            .take_while(|p| !p.as_os_str().is_empty() && !p.exists())
            .map(Path::to_path_buf),
    );

    if let Some(parent) = target.path.parent() {
        fs::create_dir_all(parent)?;
    }

    match fs::create_dir(&target.path) {
        Ok(()) => Ok(created),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            Err(ScaffoldError::target_exists(&target.name, &target.path))
        }
        Err(e) => Err(e.into()),
    }
}

/// Gives back what [`reserve`] created after a failed clone. Directories are
/// only removed while empty; anything the clone left behind stays.
fn release(created: &[PathBuf]) {
    for dir in created {
        if let Err(e) = fs::remove_dir(dir) {
            trace!("Leaving {} in place: {e}", dir.display());
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vcs::METADATA_DIR;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Calls(RefCell<Vec<&'static str>>);

    impl Calls {
        fn push(&self, call: &'static str) {
            self.0.borrow_mut().push(call);
        }

        fn get(&self) -> Vec<&'static str> {
            self.0.borrow().clone()
        }
    }

    struct FakeVcs<'a> {
        calls: &'a Calls,
        clone_ok: bool,
        reinit_ok: bool,
    }

    impl Vcs for FakeVcs<'_> {
        fn clone_template(&self, url: &str, dest: &Path) -> Result<()> {
            self.calls.push("clone");
            if !self.clone_ok {
                return Err(ScaffoldError::clone_failed(url, "fatal: unable to access"));
            }

            fs::create_dir_all(dest.join(METADATA_DIR))?;
            fs::write(dest.join(METADATA_DIR).join("ORIG_HEAD"), "template")?;
            fs::write(dest.join("package.json"), "{}")?;
            Ok(())
        }

        fn reinit(&self, dir: &Path, message: &str) -> anyhow::Result<()> {
            self.calls.push("reinit");
            anyhow::ensure!(self.reinit_ok, "git: command not found");

            fs::create_dir(dir.join(METADATA_DIR))?;
            fs::write(dir.join(METADATA_DIR).join("COMMIT"), message)?;
            Ok(())
        }
    }

    struct FakePackages<'a> {
        calls: &'a Calls,
        outcome: InstallOutcome,
    }

    impl PackageManager for FakePackages<'_> {
        fn install(&self, dir: &Path) -> InstallOutcome {
            self.calls.push("install");
            assert!(dir.join("package.json").exists());
            self.outcome.clone()
        }
    }

    fn scaffold<'a>(
        calls: &'a Calls,
        clone_ok: bool,
        reinit_ok: bool,
        outcome: InstallOutcome,
    ) -> Scaffold<FakeVcs<'a>, FakePackages<'a>> {
        Scaffold::with_backends(
            Settings::default(),
            FakeVcs {
                calls,
                clone_ok,
                reinit_ok,
            },
            FakePackages { calls, outcome },
        )
    }

    #[test]
    fn creates_project() {
        let cwd = tempfile::tempdir().unwrap();
        let calls = Calls::default();
        let outcome = scaffold(&calls, true, true, InstallOutcome::Installed)
            .run(Some("my-app"), cwd.path())
            .unwrap();

        let project = cwd.path().join("my-app");
        assert_eq!(outcome.target.name, "my-app");
        assert_eq!(outcome.target.path, project);
        assert!(outcome.history_detached);
        assert!(outcome.install.is_success());
        assert_eq!(calls.get(), ["clone", "reinit", "install"]);

        assert!(project.join("package.json").exists());
        assert!(!project.join(METADATA_DIR).join("ORIG_HEAD").exists());
        assert_eq!(
            fs::read_to_string(project.join(METADATA_DIR).join("COMMIT")).unwrap(),
            crate::config::COMMIT_MESSAGE
        );
    }

    #[test]
    fn existing_target_is_untouched() {
        let cwd = tempfile::tempdir().unwrap();
        let existing = cwd.path().join("taken");
        fs::create_dir(&existing).unwrap();
        fs::write(existing.join("notes.txt"), "keep me").unwrap();

        let calls = Calls::default();
        let err = scaffold(&calls, true, true, InstallOutcome::Installed)
            .run(Some("taken"), cwd.path())
            .unwrap_err();

        assert!(matches!(err, ScaffoldError::TargetExists { ref name, .. } if name == "taken"));
        assert!(calls.get().is_empty());
        assert_eq!(fs::read_dir(&existing).unwrap().count(), 1);
        assert_eq!(
            fs::read_to_string(existing.join("notes.txt")).unwrap(),
            "keep me"
        );
    }

    #[test]
    fn existing_file_blocks_target() {
        let cwd = tempfile::tempdir().unwrap();
        fs::write(cwd.path().join("site"), "").unwrap();

        let calls = Calls::default();
        let err = scaffold(&calls, true, true, InstallOutcome::Installed)
            .run(Some("site"), cwd.path())
            .unwrap_err();

        assert!(matches!(err, ScaffoldError::TargetExists { .. }));
        assert!(cwd.path().join("site").is_file());
    }

    #[test]
    fn default_name_second_run_is_blocked() {
        let cwd = tempfile::tempdir().unwrap();
        let calls = Calls::default();
        let scaffold = scaffold(&calls, true, true, InstallOutcome::Installed);

        let first = scaffold.run(None, cwd.path()).unwrap();
        assert_eq!(first.target.name, crate::config::DEFAULT_NAME);

        let err = scaffold.run(None, cwd.path()).unwrap_err();
        assert!(matches!(err, ScaffoldError::TargetExists { .. }));
        assert_eq!(calls.get(), ["clone", "reinit", "install"]);
    }

    #[test]
    fn clone_failure_stops_pipeline() {
        let cwd = tempfile::tempdir().unwrap();
        let calls = Calls::default();
        let err = scaffold(&calls, false, true, InstallOutcome::Installed)
            .run(Some("my-app"), cwd.path())
            .unwrap_err();

        assert!(matches!(err, ScaffoldError::Clone { .. }));
        assert_eq!(err.exit_code(), 1);
        assert_eq!(calls.get(), ["clone"]);
        assert!(!cwd.path().join("my-app").exists());
    }

    #[test]
    fn history_failure_is_ignored() {
        let cwd = tempfile::tempdir().unwrap();
        let calls = Calls::default();
        let outcome = scaffold(&calls, true, false, InstallOutcome::Installed)
            .run(Some("my-app"), cwd.path())
            .unwrap();

        assert!(!outcome.history_detached);
        assert!(outcome.install.is_success());
        assert_eq!(calls.get(), ["clone", "reinit", "install"]);
        assert!(!cwd.path().join("my-app").join(METADATA_DIR).exists());
    }

    #[test]
    fn install_failure_is_soft() {
        let cwd = tempfile::tempdir().unwrap();
        let calls = Calls::default();

        for (name, failure) in [
            ("a", InstallOutcome::Failed { code: Some(1) }),
            ("b", InstallOutcome::Unavailable("not found".into())),
        ] {
            let outcome = scaffold(&calls, true, true, failure.clone())
                .run(Some(name), cwd.path())
                .unwrap();

            assert_eq!(outcome.install, failure);
            assert!(outcome.history_detached);
        }
    }

    #[test]
    fn nested_clone_failure_removes_created_parents() {
        let cwd = tempfile::tempdir().unwrap();
        fs::create_dir(cwd.path().join("existing")).unwrap();

        let calls = Calls::default();
        let scaffold = scaffold(&calls, false, true, InstallOutcome::Installed);

        for name in ["sites/new/my-app", "existing/my-app"] {
            let err = scaffold.run(Some(name), cwd.path()).unwrap_err();
            assert!(matches!(err, ScaffoldError::Clone { .. }));
        }

        assert!(!cwd.path().join("sites").exists());
        assert!(cwd.path().join("existing").is_dir());
        assert_eq!(fs::read_dir(cwd.path().join("existing")).unwrap().count(), 0);
    }

    #[test]
    fn nested_name_creates_parents() {
        let cwd = tempfile::tempdir().unwrap();
        let calls = Calls::default();
        let outcome = scaffold(&calls, true, true, InstallOutcome::Installed)
            .run(Some("sites/my-app"), cwd.path())
            .unwrap();

        assert_eq!(outcome.target.path, cwd.path().join("sites").join("my-app"));
        assert!(outcome.target.path.join("package.json").exists());
    }
}
