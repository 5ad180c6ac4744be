//! Error types for quire operations.

use thiserror::Error;

/// Errors that can occur while assembling a package.
///
/// Document rendering is pure in-memory string building and cannot fail;
/// every error originates from writing the container.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

pub type Result<T> = std::result::Result<T, Error>;
