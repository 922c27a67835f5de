use std::error::Error as StdError;
use std::fmt;
use std::num::ParseFloatError;

// type alias for Result for use across the library
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone)]
pub enum Error {
    /// Text could not be read as path data
    Parse(String),
    /// A value which is not a recognized path segment
    NotASegment(String),
    /// A reserved command with no implementation, e.g. Catmull-Rom
    UnsupportedSegment(String),
    /// Operand count does not match the command's arity
    Arity(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parse(reason) => write!(f, "Parse error: {}", reason),
            Error::NotASegment(value) => write!(f, "Not a path segment: {}", value),
            Error::UnsupportedSegment(value) => {
                write!(f, "Unsupported path segment: {}", value)
            }
            Error::Arity(reason) => write!(f, "Arity error: {}", reason),
        }
    }
}

impl StdError for Error {}

impl From<ParseFloatError> for Error {
    fn from(err: ParseFloatError) -> Error {
        Error::Parse(format!("float: {}", err))
    }
}
