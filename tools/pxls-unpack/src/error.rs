extern crate miette;
extern crate thiserror;

use miette::Diagnostic;
use thiserror::Error;

use crate::extract::ExtractError;

/// Failure that stops processing of one descriptor file.
#[derive(Error, Diagnostic, Debug)]
pub enum ToolError {
    #[error("file access error: {0}")]
    #[diagnostic(code(pxls_unpack::io_error))]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Extract(#[from] ExtractError),

    #[error("manifest writing error: {0}")]
    #[diagnostic(code(pxls_unpack::manifest_error))]
    Manifest(#[from] serde_json::Error),
}
