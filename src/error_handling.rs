use std::fmt::{Debug, Display};
use std::path::PathBuf;

pub trait ErrorType: Display + Debug + PartialEq {}

// Where in the input an error was found
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Location {
    // A line of a grammar file, or the whole file when the line is 0
    File { file: PathBuf, line: usize },
    // A comma-separated production group, counted from 1
    Group(usize),
    // A character of the word, counted from 0
    Position(usize),
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::File { file, line: 0 } => write!(f, "{}", file.display()),
            Location::File { file, line } => write!(f, "{}:{}", file.display(), line),
            Location::Group(group) => write!(f, "production {}", group),
            Location::Position(index) => write!(f, "position {}", index),
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct Error<T: ErrorType> {
    pub location: Location,
    pub error: T
}

impl<T: ErrorType> Display for Error<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.location, self.error)
    }
}

impl<T: ErrorType> std::error::Error for Error<T> {}

pub type Errors<T> = Vec<Error<T>>;
