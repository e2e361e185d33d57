pub mod args;
pub mod config;
pub mod error;
pub mod log;
pub mod packages;
pub mod report;
pub mod scaffold;
pub mod style;
pub mod vcs;

pub use config::Settings;
pub use error::ScaffoldError;
pub use scaffold::{Outcome, Scaffold};
