use thiserror::Error;

/// Library error type for carousel construction and command parsing.
#[derive(Debug, Error)]
pub enum Error {
    /// No viewport geometry was supplied by the host or the configuration.
    #[error("carousel host has no viewport geometry")]
    MissingViewport,

    /// The viewport has a zero dimension, so no slide-width can be derived.
    #[error("invalid viewport geometry {width}x{height}")]
    InvalidViewport { width: u32, height: u32 },

    /// A navigation command could not be recognised.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// `jump` was given something that is not a slide index.
    #[error("invalid slide index: {0}")]
    InvalidIndex(String),

    /// Underlying IO error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// YAML/serde configuration error.
    #[error(transparent)]
    Config(#[from] serde_yaml::Error),
}
