use anyhow::{Context, Result};
use clap::Parser;
use flowclub::{args::Args, error, info, report, trace, Scaffold, ScaffoldError, Settings};
use std::process::ExitCode;

fn app(args: &Args) -> Result<()> {
    let settings = Settings::from_env()?;
    let cwd = std::env::current_dir().context("Failed to get current dir")?;

    trace!("Settings: {settings:?}");

    println!("{}", report::banner());

    if settings.is_custom_source() {
        info!("Using template from {}", settings.template_url());
    }

    let outcome = Scaffold::new(settings).run(args.project_name(), &cwd)?;

    if !outcome.history_detached {
        trace!("Project kept without a fresh history");
    }

    if !outcome.install.is_success() {
        println!();
        println!("{}", report::install_advisory());
    }

    println!("{}", report::next_steps(&outcome.target.name));

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    match app(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let code = match e.downcast_ref::<ScaffoldError>() {
                Some(err @ ScaffoldError::TargetExists { .. }) => {
                    error!(err);
                    eprintln!("  {}", report::target_exists_hint());
                    err.exit_code()
                }
                Some(err) => {
                    error!(err);
                    err.exit_code()
                }
                None => {
                    error!("{:#}", e);
                    1
                }
            };

            println!();
            ExitCode::from(code)
        }
    }
}
