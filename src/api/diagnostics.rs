use serde::{Deserialize, Serialize};

use crate::error::DashError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// The charting engine or slider widget failed to load.
    MissingDependency,
    /// A chart's mount point does not exist on the page.
    MissingElement,
    /// A chart's data is not aligned with the time labels.
    InvalidChart,
    /// Unparsable user input.
    MalformedInput,
    /// A surface failed while applying an option update.
    RenderFault,
}

/// Non-fatal problem recorded by a session; the rest of the page keeps working.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub subject: String,
    pub message: String,
}

impl Diagnostic {
    #[must_use]
    pub fn new(kind: DiagnosticKind, subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            subject: subject.into(),
            message: message.into(),
        }
    }

    /// Classifies an error raised while working on `subject`.
    #[must_use]
    pub fn from_error(subject: impl Into<String>, error: &DashError) -> Self {
        let kind = match error {
            DashError::MissingDependency(_) => DiagnosticKind::MissingDependency,
            DashError::MissingElement(_) => DiagnosticKind::MissingElement,
            DashError::InvalidValueRange(_) | DashError::InvalidWindow { .. } => {
                DiagnosticKind::MalformedInput
            }
            DashError::InvalidData(_)
            | DashError::UnknownChart(_)
            | DashError::Parse { .. }
            | DashError::Pattern(_) => DiagnosticKind::RenderFault,
        };
        Self::new(kind, subject, error.to_string())
    }
}
