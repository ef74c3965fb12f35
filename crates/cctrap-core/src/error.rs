use std::fmt;

/// Result type for cctrap-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while logging or delegating an invocation
#[derive(Debug)]
pub enum Error {
    /// IO operation failed
    Io(std::io::Error),

    /// The host command interpreter could not be started
    Spawn {
        program: String,
        source: std::io::Error,
    },

    /// A results log chunk could not be interpreted
    Parse { line: usize, message: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Spawn { program, source } => {
                write!(f, "Failed to spawn '{}': {}", program, source)
            }
            Error::Parse { line, message } => {
                write!(f, "Results log error at line {}: {}", line, message)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Spawn { source, .. } => Some(source),
            Error::Parse { .. } => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}
