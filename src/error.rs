use std::io;

#[derive(Debug, thiserror::Error)]
pub enum PlayError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{call} failed: {source}")]
    Terminal {
        call: &'static str,
        source: io::Error,
    },

    #[error("cannot build key matcher: {0}")]
    Keys(#[from] aho_corasick::BuildError),

    #[error("cannot start logger: {0}")]
    Logger(#[from] flexi_logger::FlexiLoggerError),
}
