#![forbid(unsafe_code)]

use catify::cli::{self, EXIT_USAGE};
use catify::config::{ColorOption, Settings};
use catify::output::{HumanReporter, resolve_color};
use std::env;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
const LOG_ENV: &str = "CATIFY_LOG";

fn main() -> ExitCode {
    // Logs go to stderr; stdout carries the file contents
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            let color = match env::var_os("NO_COLOR") {
                Some(_) => ColorOption::Never,
                None => ColorOption::Auto,
            };
            HumanReporter::new(resolve_color(color)).error(e.to_string());
            return ExitCode::from(EXIT_USAGE as u8);
        }
    };

    let reporter = HumanReporter::new(resolve_color(settings.output.color));
    let tokens: Vec<String> = env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();

    let code = cli::run(&tokens, &settings, &reporter);
    ExitCode::from(code as u8)
}
