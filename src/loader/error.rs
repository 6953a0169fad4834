use std::path::Path;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// A structurally invalid line in a data table. Carries the source text so
/// the diagnostic can point at the offending token.
#[derive(Error, Debug, Diagnostic)]
#[error("{message}")]
pub struct ParseError {
    #[source_code]
    pub src: NamedSource<String>,
    #[label("here")]
    pub bad_bit: SourceSpan,
    pub message: String,
}

impl ParseError {
    pub fn new(path: &Path, content: &str, span: impl Into<SourceSpan>, message: String) -> Self {
        Self {
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            bad_bit: span.into(),
            message,
        }
    }
}

/// Failure to produce a table from a file: either the file could not be
/// read, or a line in it was malformed.
#[derive(Error, Debug, Diagnostic)]
pub enum LoadError {
    #[error("failed to read {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),
}
