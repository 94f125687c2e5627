//! Placeholders for the collaborators the native bridge dispatches to.
//!
//! None of these perform the named work. They log, report success and hand
//! back "no handle" where a handle would be returned, so the host can wire up
//! its flows before a real Windows-compatibility or binary-translation engine
//! is linked in.

pub mod box64;
pub mod passthrough;
pub mod wine;

use thiserror::Error;

/// Failure reported by a collaborator, carrying its nonzero status code.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompatError {
    #[error("{layer} failed with code {code}")]
    Failed { layer: &'static str, code: i32 },
}
