#![forbid(unsafe_code)]

//! Top-level command flow: parse, dispatch, render

use super::args::parse_arguments;
use super::dispatch::{Invocation, RenderPlan, dispatch};
use crate::config::Settings;
use crate::output::HumanReporter;
use crate::render::{Decorator, Renderer, Sink};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info};

/// Exit codes
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_USAGE: i32 = 2;

/// Run catify over raw command line tokens (program name excluded)
///
/// # Returns
///
/// Exit code:
/// - 0: everything was displayed, or help was shown
/// - 1: some input or the output file failed, or writing failed
/// - 2: usage error, nothing was displayed
pub fn run<I, S>(tokens: I, settings: &Settings, reporter: &HumanReporter) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let records = parse_arguments(tokens);

    match dispatch(&records, &settings.limits) {
        Ok(Invocation::Help) => match reporter.write_usage() {
            Ok(()) => EXIT_SUCCESS,
            Err(_) => EXIT_FAILURE,
        },
        Ok(Invocation::Render(plan)) => render(&plan, settings, reporter),
        Err(e) => {
            reporter.error(e.to_string());
            EXIT_USAGE
        }
    }
}

fn render(plan: &RenderPlan, settings: &Settings, reporter: &HumanReporter) -> i32 {
    let mut status = EXIT_SUCCESS;

    let sink = match Sink::open(&plan.output) {
        Ok(sink) => sink,
        Err(e) => {
            // Output stays redirected, to nowhere
            reporter.error(e.to_string());
            status = EXIT_FAILURE;
            Sink::discard()
        }
    };

    let decorator = plan.decorate.then(|| {
        let seed = settings.decorate.seed.unwrap_or_else(clock_seed);
        let decorator = Decorator::new(
            StdRng::seed_from_u64(seed),
            settings.decorate.glyph_char(),
            settings.decorate.rate,
        );
        info!(seed, glyph = decorator.glyph(), rate = decorator.rate(), "decorating output");
        decorator
    });

    let terminal = sink.is_terminal();
    let mut renderer = Renderer::new(sink, terminal)
        .with_line_buffer(settings.limits.line_buffer)
        .with_optional_decorator(decorator);
    let result = renderer.render_all(&plan.input_paths, |e| reporter.error(e.to_string()));

    match result {
        Ok(report) if report.is_clean() => status,
        Ok(report) => {
            debug!(failed = report.files_failed, "some files were not displayed");
            EXIT_FAILURE
        }
        Err(e) => {
            reporter.error(e.to_string());
            EXIT_FAILURE
        }
    }
}

/// Seed derived from the wall clock
fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}
