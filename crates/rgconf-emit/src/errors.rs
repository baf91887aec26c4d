use std::io;
use std::path::PathBuf;

use rgconf_registry::Mismatch;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EmitError {
    #[error("{assignment} {mismatch}")]
    InvalidValue {
        assignment: String,
        mismatch: Mismatch,
    },

    #[error("can't write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type EmitResult<T> = anyhow::Result<T>;
