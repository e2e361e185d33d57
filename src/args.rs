pub use clap::Parser;

/// Environment hooks listed under `--help`. They exist for tests and
/// diagnostics; a normal run always uses the built-in template, git and npm.
pub const ENV_HELP: &str = "\
Environment (testing and diagnostics only):
  FLOWCLUB_TEMPLATE_URL  Clone from this repository instead of the built-in template
  FLOWCLUB_GIT           git executable to run
  FLOWCLUB_NPM           npm executable to run
  FLOWCLUB_TRACE         Print every step and external command to stderr";

/// Bootstrap a new Flow Club Build Challenge project
#[derive(Parser, Debug)]
#[clap(version, after_help = ENV_HELP)]
pub struct Args {
    /// Name of the project directory to create [default: flow-club-build-challenge]
    pub project_name: Option<String>,
}

impl Args {
    #[must_use]
    pub fn project_name(&self) -> Option<&str> {
        self.project_name.as_deref()
    }
}
