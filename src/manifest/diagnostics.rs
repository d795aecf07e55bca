//! Collected manifest errors.

use owo_colors::OwoColorize;
use std::error::Error;
use std::fmt;

use crate::utils::error_chain;

/// One failed field of one manifest entry.
#[derive(Debug, Clone)]
pub struct ManifestDiagnostic {
    /// Entry slug, or `#index` when the slug is empty.
    pub entry: String,
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ManifestDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}{}.{}{}",
            "[".dimmed(),
            self.entry.cyan(),
            self.field.cyan(),
            "]".dimmed()
        )?;
        write!(f, "{} {}", "→".red(), self.message)
    }
}

#[derive(Debug, Default)]
pub struct ManifestDiagnostics {
    errors: Vec<ManifestDiagnostic>,
}

impl ManifestDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, entry: &str, field: &'static str, message: impl Into<String>) {
        self.errors.push(ManifestDiagnostic {
            entry: entry.to_string(),
            field,
            message: message.into(),
        });
    }

    /// Record the error of `result`, if any, and pass the value through.
    pub fn check<T, E: Error>(
        &mut self,
        entry: &str,
        field: &'static str,
        result: Result<T, E>,
    ) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.error(entry, field, error_chain(&err));
                None
            }
        }
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ManifestDiagnostic] {
        &self.errors
    }

    pub fn into_result(self) -> Result<(), Self> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ManifestDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}\n", "manifest could not be loaded:".red().bold())?;
        for (i, err) in self.errors.iter().enumerate() {
            write!(f, "{err}")?;
            if i + 1 < self.errors.len() {
                writeln!(f, "\n")?;
            }
        }
        if self.errors.len() > 1 {
            write!(
                f,
                "\n\n{} {} {}",
                "found".dimmed(),
                self.errors.len().to_string().red().bold(),
                "errors".dimmed()
            )?;
        }
        Ok(())
    }
}

impl Error for ManifestDiagnostics {}
