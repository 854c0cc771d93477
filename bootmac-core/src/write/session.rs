use crate::safety::{DiskIdentifier, ValidatedDisk};
use std::path::{Path, PathBuf};

/// The operator must type exactly this (case-sensitive, no surrounding whitespace).
pub const CONFIRMATION_LITERAL: &str = "YES";

/// Exact comparison; `yes`, `Yes`, `YES ` and the empty string all fail.
pub fn is_confirmed(input: &str) -> bool {
    input == CONFIRMATION_LITERAL
}

/// One write operation: source image, target, and the operator's confirmation for
/// that specific pair. Lives for a single [`super::write`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteSession {
    source: PathBuf,
    target: DiskIdentifier,
    confirmation: String,
    debug: bool,
}

impl WriteSession {
    pub fn new(
        source: impl Into<PathBuf>,
        target: &ValidatedDisk,
        confirmation: impl Into<String>,
        debug: bool,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.identifier().clone(),
            confirmation: confirmation.into(),
            debug,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn target(&self) -> &DiskIdentifier {
        &self.target
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn is_confirmed(&self) -> bool {
        is_confirmed(&self.confirmation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_exact_literal_confirms() {
        assert!(is_confirmed("YES"));
        for input in ["yes", "Yes", "YES ", " YES", "YES\n", "", "Y", "YESS"] {
            assert!(!is_confirmed(input), "{input:?} must not confirm");
        }
    }
}
