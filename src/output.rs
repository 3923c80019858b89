//! User-facing console messages.
//! Prefixed, colored when stdout is a TTY, plain otherwise so output stays scriptable.

use owo_colors::OwoColorize;

use crate::harvest::HarvestReport;

#[derive(Clone, Copy)]
enum Tone {
    Info,
    Warn,
    Error,
    Success,
}

/// Whether stdout is a terminal (colors and ANSI log output only then).
pub fn stdout_is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

fn prefixed(tone: Tone, msg: &str) -> String {
    let label = match tone {
        Tone::Info => "info:",
        Tone::Warn => "warn:",
        Tone::Error => "error:",
        Tone::Success => "ok:",
    };
    if !stdout_is_tty() {
        return format!("{label} {msg}");
    }
    let label = match tone {
        Tone::Info => label.cyan().bold().to_string(),
        Tone::Warn => label.yellow().bold().to_string(),
        Tone::Error => label.red().bold().to_string(),
        Tone::Success => label.green().bold().to_string(),
    };
    format!("{label} {msg}")
}

pub fn print_info(msg: &str) {
    println!("{}", prefixed(Tone::Info, msg));
}

pub fn print_warn(msg: &str) {
    eprintln!("{}", prefixed(Tone::Warn, msg));
}

pub fn print_error(msg: &str) {
    eprintln!("{}", prefixed(Tone::Error, msg));
}

pub fn print_success(msg: &str) {
    println!("{}", prefixed(Tone::Success, msg));
}

/// One-line summary of a finished run. Per-file moves and deletions are
/// already reported through tracing as they happen.
pub fn print_summary(report: &HarvestReport) {
    let mut summary = format!(
        "harvested {} file(s) into {}",
        report.moved.len(),
        report.root.display()
    );
    if !report.removed_dirs.is_empty() {
        summary.push_str(&format!(", removed {} director(ies)", report.removed_dirs.len()));
    }
    print_success(&summary);

    if report.has_warnings() {
        let dirs: Vec<String> = report
            .cleanup_warnings
            .iter()
            .map(|w| w.dir.display().to_string())
            .collect();
        print_warn(&format!(
            "{} director(ies) could not be deleted: {}",
            dirs.len(),
            dirs.join(", ")
        ));
    }
}
