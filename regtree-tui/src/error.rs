use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::outline::OutlineError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{}: {source}", path.display())]
    Outline {
        path: PathBuf,
        #[source]
        source: OutlineError,
    },

    #[error(transparent)]
    Tree(#[from] regtree::Error),

    #[error("failed to initialize logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}
