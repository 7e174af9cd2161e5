extern crate miette;
extern crate thiserror;

use miette::Diagnostic;
use thiserror::Error;

/// Failure that aborts the catalog of a whole descriptor file.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("PACK_SECTION block not found")]
    #[diagnostic(code(pxls::missing_pack_section))]
    MissingPackSection,

    #[error("POSE_SECTION block not found")]
    #[diagnostic(code(pxls::missing_pose_section))]
    MissingPoseSection,
}

/// Problem with a single pack record. The record is skipped.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum RecordIssue {
    #[error("file name not found")]
    #[diagnostic(code(pxls::name_not_found))]
    NameNotFound,

    #[error("file name is not printable ASCII ({bytes:02X?})")]
    #[diagnostic(code(pxls::invalid_name))]
    InvalidName { bytes: Vec<u8> },
}

#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum MarkerError {
    #[error("hex marker has an odd number of digits ({digits:?})")]
    #[diagnostic(code(pxls::marker_odd_length))]
    OddLength { digits: usize },

    #[error("invalid hex digit {found:?} at position {position:?}")]
    #[diagnostic(code(pxls::marker_invalid_digit))]
    InvalidDigit { found: char, position: usize },
}
