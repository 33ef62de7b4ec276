//! CLI console utilities

use colored::*;
use dumpspace_core::{BuildProgress, ProgressSink};
use indicatif::{ProgressBar, ProgressStyle};

/// CLI console for formatted output
pub struct CliConsole {
    verbose: bool,
}

impl CliConsole {
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Print an info message (verbose only)
    pub fn info(&self, message: &str) {
        if self.verbose {
            eprintln!("{} {}", "ℹ".blue().bold(), message);
        }
    }

    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow().bold(), message.yellow());
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red().bold(), message.red());
    }

    /// Print a header
    pub fn print_header(&self, title: &str) {
        println!();
        println!("{}", title.bold().underline());
        println!("{}", "=".repeat(title.chars().count()).dimmed());
    }

    /// Progress bar fed by dataset build updates
    pub fn build_progress(&self) -> BuildProgressBar {
        let bar = ProgressBar::new(100);
        let template = "{spinner:.blue} [{bar:30.cyan/blue}] {pos:>3}% {msg}";
        match ProgressStyle::default_bar().template(template) {
            Ok(style) => bar.set_style(style.progress_chars("=> ")),
            Err(_) => bar.set_style(ProgressStyle::default_bar()),
        }
        BuildProgressBar { bar }
    }
}

/// Terminal progress bar driven by [`BuildProgress`] updates
pub struct BuildProgressBar {
    bar: ProgressBar,
}

impl BuildProgressBar {
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressSink for BuildProgressBar {
    fn report(&self, progress: BuildProgress) {
        self.bar.set_position(u64::from(progress.percent));
        self.bar.set_message(progress.label);
    }
}
