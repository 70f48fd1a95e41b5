//! User-friendly diagnostic messages.
//!
//! Every error shown to the user names what was requested, what exists
//! instead, and how to fix the input.

use std::fmt;
use std::path::PathBuf;

/// Common suggestion messages for consistent error handling.
pub mod suggestions {
    /// Suggestion when the package index cannot be read.
    pub const MISSING_INDEX: &str =
        "help: Run `apt-get update` or point `--index` at an NMRbox Packages list";

    /// Suggestion when the definition or image already exists.
    pub const DEFINITION_EXISTS: &str = "help: Pass `--force` to overwrite existing outputs";

    /// Suggestion when no software was requested.
    pub const NO_REQUESTS: &str =
        "help: Pass FAMILY or FAMILY=VERSION arguments, or a config with a `software:` section";
}

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    fn label(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }

    /// ANSI SGR parameters used when color is on.
    fn style(self) -> &'static str {
        match self {
            Severity::Error => "1;31",
            Severity::Warning => "1;33",
        }
    }
}

fn paint(text: &str, style: &str, color: bool) -> String {
    if color {
        format!("\x1b[{}m{}\x1b[0m", style, text)
    } else {
        text.to_string()
    }
}

/// A message for the terminal, with context lines and numbered suggestions.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub message: String,
    pub severity: Severity,
    /// Rendered as `= ...` lines under the message
    pub context: Vec<String>,
    pub suggestions: Vec<String>,
    /// File the diagnostic is about
    pub location: Option<PathBuf>,
}

impl Diagnostic {
    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            severity,
            context: Vec::new(),
            suggestions: Vec::new(),
            location: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some(path.into());
        self
    }

    /// Render for a terminal, with ANSI colors when `color` is set.
    pub fn format(&self, color: bool) -> String {
        let severity = paint(self.severity.label(), self.severity.style(), color);
        let mut lines = vec![format!("{}: {}", severity, self.message)];

        lines.extend(self.location.iter().map(|path| format!("  --> {}", path.display())));
        lines.extend(self.context.iter().map(|line| format!("  = {}", line)));

        if !self.suggestions.is_empty() {
            lines.push(String::new());
            lines.push(format!("{}: consider:", paint("help", "1;32", color)));
            lines.extend(
                self.suggestions
                    .iter()
                    .enumerate()
                    .map(|(i, suggestion)| format!("  {}. {}", i + 1, suggestion)),
            );
        }

        let mut output = lines.join("\n");
        output.push('\n');
        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(false))
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}
