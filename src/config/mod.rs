use anyhow::Context;
use derive_builder::Builder;
use directories::UserDirs;
use std::path::{Path, PathBuf};

/// Remote repository every project is created from
pub const TEMPLATE_URL: &str = "https://github.com/tiff-k/flow-club-build-challenge.git";

/// Project name used when none is given on the command line
pub const DEFAULT_NAME: &str = "flow-club-build-challenge";

/// Message of the single commit in the detached history
pub const COMMIT_MESSAGE: &str = "Initial commit from Flow Club Build Challenge";

pub const GIT_PROGRAM: &str = "git";

#[cfg(not(windows))]
pub const NPM_PROGRAM: &str = "npm";

#[cfg(windows)]
pub const NPM_PROGRAM: &str = "npm.cmd";

pub const TEMPLATE_URL_VAR: &str = "FLOWCLUB_TEMPLATE_URL";
pub const GIT_PROGRAM_VAR: &str = "FLOWCLUB_GIT";
pub const NPM_PROGRAM_VAR: &str = "FLOWCLUB_NPM";

#[derive(Builder, Debug, Clone, PartialEq, Eq)]
#[builder(setter(into))]
pub struct Settings {
    #[builder(default = "TEMPLATE_URL.to_string()")]
    template_url: String,
    #[builder(default = "DEFAULT_NAME.to_string()")]
    default_name: String,
    #[builder(default = "COMMIT_MESSAGE.to_string()")]
    commit_message: String,
    #[builder(default = "GIT_PROGRAM.to_string()")]
    git_program: String,
    #[builder(default = "NPM_PROGRAM.to_string()")]
    npm_program: String,
}

/// Where a project will be created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub name: String,
    pub path: PathBuf,
}

impl Target {
    /// The target path with the user home replaced by `~`
    #[must_use]
    pub fn display_path(&self) -> String {
        let path = self.path.display().to_string();

        match UserDirs::new() {
            Some(dirs) => match self.path.strip_prefix(dirs.home_dir()) {
                Ok(rest) => Path::new("~").join(rest).display().to_string(),
                Err(_) => path,
            },
            None => path,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            template_url: TEMPLATE_URL.to_string(),
            default_name: DEFAULT_NAME.to_string(),
            commit_message: COMMIT_MESSAGE.to_string(),
            git_program: GIT_PROGRAM.to_string(),
            npm_program: NPM_PROGRAM.to_string(),
        }
    }
}

impl Settings {
    /// Create a new [`Settings`] builder
    #[must_use]
    pub fn builder() -> SettingsBuilder {
        SettingsBuilder::default()
    }

    /// Default settings with overrides taken from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] if the settings can not be built.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Default settings with overrides taken from `lookup`. Only the template
    /// source and the two program names can be overridden; blank values are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] if the settings can not be built.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let lookup = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let mut builder = Self::builder();

        if let Some(url) = lookup(TEMPLATE_URL_VAR) {
            builder.template_url(url);
        }
        if let Some(git) = lookup(GIT_PROGRAM_VAR) {
            builder.git_program(git);
        }
        if let Some(npm) = lookup(NPM_PROGRAM_VAR) {
            builder.npm_program(npm);
        }

        builder.build().context("Failed to build settings")
    }

    /// Resolves the project name and its absolute path. An absent or empty
    /// name falls back to the default name. The name is not validated.
    #[must_use]
    pub fn resolve_target(&self, name: Option<&str>, cwd: &Path) -> Target {
        let name = name
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.default_name)
            .to_string();

        Target {
            path: cwd.join(&name),
            name,
        }
    }

    /// Whether the template source differs from the built-in one
    #[must_use]
    pub fn is_custom_source(&self) -> bool {
        self.template_url != TEMPLATE_URL
    }

    #[must_use]
    pub fn template_url(&self) -> &str {
        &self.template_url
    }

    #[must_use]
    pub fn default_name(&self) -> &str {
        &self.default_name
    }

    #[must_use]
    pub fn commit_message(&self) -> &str {
        &self.commit_message
    }

    #[must_use]
    pub fn git_program(&self) -> &str {
        &self.git_program
    }

    #[must_use]
    pub fn npm_program(&self) -> &str {
        &self.npm_program
    }
}
