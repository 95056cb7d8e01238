use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaveError {
    #[error("could not load font {}: {source}", .path.display())]
    FontMissing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} is not a TrueType or OpenType font", .path.display())]
    FontFormat { path: PathBuf },
}
