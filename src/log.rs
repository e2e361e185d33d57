/// Environment variable that turns on [`trace!`] output.
pub const TRACE_VAR: &str = "FLOWCLUB_TRACE";

#[macro_export]
macro_rules! error {
    ($single:expr) => {
        {
            use owo_colors::OwoColorize;

            eprintln!(
                "  {}: {}",
                "error".if_supports_color(owo_colors::Stream::Stderr, |s| s
                        .style(owo_colors::Style::new().bold().red())),
                format_args!("{}", $single)
            );
        }
    };
    ($($arg:tt)+) => {
        {
            use owo_colors::OwoColorize;

            eprintln!(
                "  {}: {}",
                "error".if_supports_color(owo_colors::Stream::Stderr, |s| s
                        .style(owo_colors::Style::new().bold().red())),
                format_args!($($arg)*)
            );
        }
    }
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => {
        {
            use owo_colors::OwoColorize;

            println!(
                "  {}: {}",
                "info".if_supports_color(owo_colors::Stream::Stdout, |s| s
                        .style(owo_colors::Style::new().bold().green())),
                format_args!($($arg)*)
            );
        }
    }
}

/// Debug output for every step and external command, enabled by setting
/// `FLOWCLUB_TRACE`. Written to stderr so it never mixes with the report.
#[macro_export]
macro_rules! trace {
    ($($arg:tt)+) => {
        {
            use owo_colors::OwoColorize;

            if std::env::var_os($crate::log::TRACE_VAR).is_some() {
                eprintln!(
                    "  {}: {}",
                    "trace".if_supports_color(owo_colors::Stream::Stderr, |s| s
                            .style(owo_colors::Style::new().bold())),
                    format_args!($($arg)*)
                );
            }
        }
    }
}
