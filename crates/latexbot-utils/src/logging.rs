//! Logging and console reporting for latexbot
//!
//! Structured diagnostics go through `tracing`; the human-facing reports
//! (doctor results, compile summaries) are printed to stdout with optional
//! colour from `crossterm`.

use crossterm::style::{Attribute, Color, Stylize};
use std::io::IsTerminal;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::types::{CheckStatus, DoctorOutput};

/// Check if colored output should be used.
///
/// Returns true only if:
/// - stdout is a terminal (TTY)
/// - NO_COLOR environment variable is not set
#[must_use]
pub fn use_color() -> bool {
    std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` wins when set. Otherwise verbose mode logs `latexbot=debug`
/// and adds span-close events; the default is `latexbot=info,warn`.
pub fn init_tracing(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| {
            if verbose {
                EnvFilter::try_new("latexbot=debug,info")
            } else {
                EnvFilter::try_new("latexbot=info,warn")
            }
        })
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if verbose {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_thread_names(false)
                    .with_line_number(false)
                    .with_file(false)
                    .with_writer(std::io::stderr)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_thread_names(false)
                    .with_line_number(false)
                    .with_file(false)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()?;
    }

    Ok(())
}

/// Style `text` when colour is enabled, otherwise return it unchanged.
#[must_use]
pub fn paint(text: &str, color: Color, bold: bool) -> String {
    if use_color() {
        let mut styled = text.with(color);
        if bold {
            styled = styled.attribute(Attribute::Bold);
        }
        format!("{styled}")
    } else {
        text.to_string()
    }
}

/// Print a `✓ message` line in green.
pub fn print_success(message: &str) {
    println!("{} {}", paint("✓", Color::Green, true), message);
}

/// Print a `⚠ message` line in yellow.
pub fn print_warning(message: &str) {
    println!("{} {}", paint("⚠", Color::Yellow, true), message);
}

/// Print the doctor report to stdout.
pub fn log_doctor_report(report: &DoctorOutput) {
    println!(
        "{}",
        paint("🩺 latexbot Environment Health Check", Color::Cyan, true)
    );
    println!(
        "{}",
        paint("─────────────────────────────────────", Color::Cyan, true)
    );
    println!();

    let mut pass_count = 0;
    let mut warn_count = 0;
    let mut fail_count = 0;

    for check in &report.checks {
        match check.status {
            CheckStatus::Pass => pass_count += 1,
            CheckStatus::Warn => warn_count += 1,
            CheckStatus::Fail => fail_count += 1,
        }

        let (status_symbol, color) = match check.status {
            CheckStatus::Pass => ("✓", Color::Green),
            CheckStatus::Warn => ("⚠", Color::Yellow),
            CheckStatus::Fail => ("✗", Color::Red),
        };

        let formatted_name = to_title_case(&check.name);

        match check.status {
            CheckStatus::Pass => {
                println!(
                    "{} {}",
                    paint(status_symbol, color, true),
                    paint(&formatted_name, Color::Reset, true)
                );
            }
            CheckStatus::Warn => {
                println!(
                    "{} {} {}",
                    paint(status_symbol, color, true),
                    paint(&formatted_name, Color::Reset, true),
                    paint("[WARN]", color, true)
                );
            }
            CheckStatus::Fail => {
                println!(
                    "{} {} {}",
                    paint(status_symbol, color, true),
                    paint(&formatted_name, Color::Reset, true),
                    paint("[FAIL]", color, true)
                );
            }
        }

        println!("  {}", check.details);
        println!();
    }

    println!(
        "{}",
        paint("─────────────────────────────────────", Color::DarkGrey, false)
    );

    let summary_detail = summary_detail(pass_count, warn_count, fail_count);

    let (overall_text, overall_color) = if report.ok {
        ("✓ HEALTHY: All systems operational", Color::Green)
    } else {
        ("✗ ISSUES DETECTED", Color::Red)
    };

    println!(
        "{}{}",
        paint(overall_text, overall_color, true),
        paint(&summary_detail, overall_color, true)
    );

    if !report.ok {
        println!();
        println!(
            "{}",
            paint(
                "Tip: Install a TeX distribution such as TeX Live or MiKTeX and make sure its bin directory is on PATH.",
                Color::Yellow,
                false
            )
        );
    }
}

fn summary_detail(pass_count: usize, warn_count: usize, fail_count: usize) -> String {
    let mut summary_parts = Vec::new();
    if fail_count > 0 {
        summary_parts.push(format!("{fail_count} failed"));
    }
    if warn_count > 0 {
        summary_parts.push(format!("{warn_count} warning"));
    }
    if pass_count > 0 && fail_count == 0 && warn_count == 0 {
        summary_parts.push(format!("{pass_count} passed"));
    }

    if !summary_parts.is_empty() && (fail_count > 0 || warn_count > 0) {
        format!(" ({})", summary_parts.join(", "))
    } else {
        String::new()
    }
}

// snake_case to Title Case, keeping known acronyms uppercase
fn to_title_case(s: &str) -> String {
    const ACRONYMS: &[&str] = &["PDF", "CWD", "FC", "TOML", "PATH"];

    s.split('_')
        .map(|word| {
            let upper_word = word.to_uppercase();
            if ACRONYMS.contains(&upper_word.as_str()) {
                return upper_word;
            }

            let mut c = word.chars();
            match c.next() {
                None => String::new(),
                Some(f) => f.to_uppercase().collect::<String>() + c.as_str(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
