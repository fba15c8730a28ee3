use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("source unavailable: {path}")]
    Source {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<Error> for fwscan_core::error::Error {
    fn from(e: Error) -> Self {
        match e {
            Error::Source { path, source } => {
                fwscan_core::error::Error::SourceUnavailable { path, source }
            }
        }
    }
}
