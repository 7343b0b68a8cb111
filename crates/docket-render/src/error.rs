//! Error types for the render crate.
//!
//! Rendering itself never fails: malformed expressions, formulas and
//! templates degrade to defaults. These errors only cover handing the
//! finished document to a print surface.

use std::io;
use thiserror::Error;

/// Errors raised at the print boundary.
#[derive(Error, Debug)]
pub enum RenderError {
    /// There are no groups to print.
    #[error("Nothing to print: no data groups")]
    NoPages,

    /// The print surface refused or failed the job.
    #[error("Print surface error: {reason}")]
    Surface {
        /// Description reported by the surface.
        reason: String,
    },

    /// I/O error while writing the document.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for print operations.
pub type Result<T> = std::result::Result<T, RenderError>;
