use std::{io, path::PathBuf};

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures while setting up a scaling session.
///
/// Writes to the font size bounds never fail, they are clamped or rejected
/// and reported through [`crate::Outcome`].
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to create stylesheet file: {0}")]
    CreateStylesheet(#[source] io::Error),

    #[error("failed to write stylesheet file {path}: {source}")]
    WriteStylesheet {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
