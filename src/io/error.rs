//! Error types and context management for solver operations

use crate::algorithm::solver::Status;
use crate::spatial::grid::Position;
use std::fmt;
use std::path::PathBuf;

/// Main error type for all solver operations
#[derive(Debug)]
pub enum WfcError {
    /// Run inputs don't meet solver requirements
    ///
    /// Raised before any grid allocation, so no partial run state exists
    Configuration {
        /// Description of what's wrong with the inputs
        reason: String,
    },

    /// A cell's possibility set became empty
    Contradiction {
        /// Grid position of the failed cell
        position: Position,
        /// Solver iteration when this occurred (0 when raised outside a run)
        iteration: usize,
    },

    /// Attempt to mutate a cell that already holds a single possibility
    AlreadyResolved {
        /// Grid position of the resolved cell
        position: Position,
    },

    /// Lookup of an identifier that doesn't exist
    NotFound {
        /// Kind of thing that was looked up
        kind: &'static str,
        /// Identifier that was not found
        id: String,
    },

    /// Identifier already registered
    DuplicateId {
        /// Kind of thing being registered
        kind: &'static str,
        /// Conflicting identifier
        id: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Operation not permitted in the solver's current state
    InvalidState {
        /// Operation that was attempted
        operation: &'static str,
        /// Solver status at the time
        status: Status,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Tileset or result document could not be (de)serialized
    Parse {
        /// Path of the document
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },
}

impl fmt::Display for WfcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration { reason } => {
                write!(f, "Invalid configuration: {reason}")
            }
            Self::Contradiction {
                position,
                iteration,
            } => {
                write!(
                    f,
                    "Contradiction at cell {position} (iteration {iteration}): no possibilities remain"
                )
            }
            Self::AlreadyResolved { position } => {
                write!(f, "Cell {position} is already resolved")
            }
            Self::NotFound { kind, id } => {
                write!(f, "{kind} '{id}' not found")
            }
            Self::DuplicateId { kind, id } => {
                write!(f, "{kind} '{id}' already exists")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidState { operation, status } => {
                write!(f, "Cannot {operation} while solver is {status}")
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Parse { path, source } => {
                write!(f, "Failed to parse '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for WfcError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileSystem { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for solver results
pub type Result<T> = std::result::Result<T, WfcError>;

/// Additional context to enrich error messages
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Current solver iteration
    pub iteration: Option<usize>,
    /// Grid position where error occurred
    pub position: Option<Position>,
    /// Operation being performed
    pub operation: Option<&'static str>,
}

/// Enriches error messages with solver state information
pub trait WithContext<T> {
    /// Add error context to a Result
    ///
    /// # Errors
    ///
    /// Propagates the original error with additional context applied
    fn with_context(self, context: ErrorContext) -> Result<T>;

    /// Add just the iteration context
    ///
    /// # Errors
    ///
    /// Propagates the original error with the iteration context applied
    fn at_iteration(self, iteration: usize) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<WfcError>,
{
    fn with_context(self, context: ErrorContext) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            // Cells don't know the iteration they fail in
            if let WfcError::Contradiction {
                iteration,
                position,
            } = &mut error
            {
                if let Some(iter) = context.iteration {
                    *iteration = iter;
                }
                if let Some(pos) = context.position {
                    *position = pos;
                }
            }
            error
        })
    }

    fn at_iteration(self, iteration: usize) -> Result<T> {
        self.with_context(ErrorContext {
            iteration: Some(iteration),
            ..Default::default()
        })
    }
}

impl From<std::io::Error> for WfcError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create a configuration error
pub fn configuration_error(reason: &impl ToString) -> WfcError {
    WfcError::Configuration {
        reason: reason.to_string(),
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> WfcError {
    WfcError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a file system error bound to a path
pub fn file_system_error(
    path: impl Into<PathBuf>,
    operation: &'static str,
    source: std::io::Error,
) -> WfcError {
    WfcError::FileSystem {
        path: path.into(),
        operation,
        source,
    }
}
