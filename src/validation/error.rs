use std::fmt;

use miette::Diagnostic;
use thiserror::Error;

/// Identifier list rendered as indented lines under the primary message.
/// Sorted at construction so diagnostics are reproducible across runs.
#[derive(Debug)]
pub struct IdList(Vec<String>);

impl IdList {
    pub fn new(mut items: Vec<String>) -> Self {
        items.sort();
        Self(items)
    }

    pub fn items(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for IdList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in &self.0 {
            write!(f, "\n  {item}")?;
        }
        Ok(())
    }
}

/// A violated cross-table invariant. The first one found aborts the run;
/// partial success is not representable.
#[derive(Debug, Error, Diagnostic)]
pub enum CheckError {
    /// Expected and observed identifier sets differ.
    #[error("{message}{items}")]
    SetMismatch { message: String, items: IdList },

    /// An alias chain revisits itself.
    #[error("{file}: link cycle for '{name}' -> '{target}'")]
    Cycle {
        file: String,
        name: String,
        target: String,
    },

    /// A classified link points at an identifier that is neither a known
    /// link nor a known zone.
    #[error("Invalid link targets in {file}{items}")]
    InvalidLinkTargets { file: String, items: IdList },

    /// A short country name is longer than the display ceiling.
    #[error("ISO short name length ({len}) exceeds {max}{items}")]
    NameTooLong {
        len: usize,
        max: usize,
        items: IdList,
    },
}

impl CheckError {
    pub fn set_mismatch(message: impl Into<String>, items: Vec<String>) -> Self {
        CheckError::SetMismatch {
            message: message.into(),
            items: IdList::new(items),
        }
    }
}
