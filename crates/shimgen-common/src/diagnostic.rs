//! Review diagnostics collected during generation.
//!
//! These never abort generation. They point at model entries that were
//! handled by a fixed rule but deserve a human look, such as a class with more
//! than one direct base where only the first one is followed.

use miette::Diagnostic as MietteDiagnostic;
use smol_str::SmolStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticLevel {
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Error, MietteDiagnostic)]
#[error("{message}")]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub message: String,
    /// Class the diagnostic is about, if any.
    pub class: Option<SmolStr>,
    #[help]
    pub help: Option<String>,
}

impl Diagnostic {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Warning,
            message: message.into(),
            class: None,
            help: None,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Info,
            message: message.into(),
            class: None,
            help: None,
        }
    }

    pub fn with_class(mut self, class: impl Into<SmolStr>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}
