//! Onboarding text printed around a scaffold run.

use crate::style::{bold, cyan, dim, green};

pub const TITLE: &str = "Flow Club Build Challenge";
pub const TAGLINE: &str = "Build and deploy your own website with Claude Code";

/// Slash command that starts the challenge once the assistant is open
pub const KICKOFF_COMMAND: &str = "/kickoff";

const STEP_WIDTH: usize = 21;

#[must_use]
pub fn banner() -> String {
    format!("\n  {}\n  {}\n", bold(TITLE), dim(TAGLINE))
}

#[must_use]
pub fn target_exists_hint() -> String {
    "Pick a different name or delete the existing folder.".to_string()
}

#[must_use]
pub fn install_advisory() -> String {
    format!("  {}", dim("npm install had issues — you can retry manually."))
}

fn step(command: &str, note: &str) -> String {
    let pad = " ".repeat(STEP_WIDTH.saturating_sub(command.len()));
    format!("    {}{pad}{}", cyan(command), dim(note))
}

/// Success message and the commands to run next inside project `name`
#[must_use]
pub fn next_steps(name: &str) -> String {
    format!(
        "\n  {done} Your project is ready.\n\n  Next steps:\n\n    {cd} {name}\n{dev}\n{claude}\n{kickoff}\n\n  {bye}\n",
        done = green("Done!"),
        cd = cyan("cd"),
        dev = step("npm run dev", "— start the dev server"),
        claude = step("claude", "— open Claude Code"),
        kickoff = step(KICKOFF_COMMAND, "— start the challenge"),
        bye = dim("Happy building!"),
    )
}
