use std::path::PathBuf;

/// Failures that end a run. There is deliberately no retry path: every
/// variant is terminal and the process exits non-zero with the message.
#[derive(Debug)]
pub enum ReportError {
    /// The per-instance-type export is the one input we cannot do without.
    MissingRequiredInput(PathBuf),
    /// An export entry is missing a field (or carries a non-numeric amount).
    /// This signals an upstream format change, so the whole run fails rather
    /// than producing a partially-correct report.
    MalformedInput { path: PathBuf, detail: String },
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportError::MissingRequiredInput(path) => {
                write!(f, "missing required input file: {}", path.display())
            }
            ReportError::MalformedInput { path, detail } => {
                write!(f, "malformed input in {}: {detail}", path.display())
            }
        }
    }
}

impl std::error::Error for ReportError {}
