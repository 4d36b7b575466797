use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors for a jobpatra run. Per-block parse failures are not
/// errors at this level; the normalizer recovers from them.
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot read source '{}': {source}", path.display())]
    ReadSource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot write destination '{}': {source}", path.display())]
    WriteDestination {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
