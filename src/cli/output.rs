//! Output formatting and progress indicators
//!
//! Utilities for displaying status messages, a progress spinner, and
//! errors to the user. Build and test output streams straight from the
//! child processes, so the spinner is suspended while a child runs and
//! the orchestrator's own output is limited to short status lines.

use indicatif::{ProgressBar, ProgressStyle};

/// Status message prefixes
pub mod status {
    /// Success prefix (green checkmark)
    pub const SUCCESS: &str = "✓";

    /// Error prefix (red X)
    pub const ERROR: &str = "✗";
}

/// Create a spinner for operations with unknown duration
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.blue} {msg}")
            .expect("Invalid spinner template"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

/// Global output configuration derived from CLI flags
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Suppress all output except errors
    pub quiet: bool,
    /// Emit machine-readable JSON instead of status lines
    pub json: bool,
}

impl OutputConfig {
    /// Create an output configuration
    pub fn new(quiet: bool, json: bool) -> Self {
        Self { quiet, json }
    }

    /// Print a status line unless quiet or JSON mode is active
    pub fn status(&self, message: &str) {
        if !self.quiet && !self.json {
            println!("{message}");
        }
    }

    /// A progress spinner, hidden in quiet and JSON modes
    pub fn spinner(&self, message: &str) -> ProgressBar {
        if self.quiet || self.json {
            ProgressBar::hidden()
        } else {
            create_spinner(message)
        }
    }
}

/// Display a top-level error to stderr
pub fn display_error(error: &anyhow::Error) {
    eprintln!("{} {error}", status::ERROR);
    for cause in error.chain().skip(1) {
        eprintln!("  caused by: {cause}");
    }
}
