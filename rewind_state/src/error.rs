#![allow(missing_docs)]

use std::{error::Error, fmt, io, sync::Arc};

/// I/O-style error produced by the state and display serializers.
#[derive(Debug, Clone)]
pub enum StateError {
    Context {
        context: String,
        error: Box<StateError>,
    },
    ReadError(Arc<io::Error>),
    WriteError(Arc<io::Error>),
    CorruptData(String),
}

impl StateError {
    /// Wrap an error with a description of what was being serialized.
    pub fn context(context: impl Into<String>, error: StateError) -> Self {
        Self::Context {
            context: context.into(),
            error: Box::new(error),
        }
    }

    pub fn read(error: io::Error) -> Self {
        Self::ReadError(Arc::new(error))
    }

    pub fn write(error: io::Error) -> Self {
        Self::WriteError(Arc::new(error))
    }
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateError::Context { context, error } => write!(f, "{}:\n  {}", context, error),
            StateError::ReadError(error) => {
                write!(f, "failed to read state data: {}", error)
            }
            StateError::WriteError(error) => {
                write!(f, "failed to write state data: {}", error)
            }
            StateError::CorruptData(detail) => write!(f, "corrupt state data: {}", detail),
        }
    }
}

impl Error for StateError {}
