//! Error types and context management for synthesis operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all synthesis operations
#[derive(Debug)]
pub enum SynthesisError {
    /// Failed to read or decode the source image
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image decoding error
        source: image::ImageError,
    },

    /// Source data doesn't meet synthesis requirements
    InvalidSourceData {
        /// Description of what's wrong with the source data
        reason: String,
    },

    /// User supplied parameter failed validation
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Canvas area and pool size disagree
    ///
    /// Every pixel must receive exactly one color, so a run can only start
    /// when the chosen canvas holds as many pixels as the pool holds colors.
    GeometryMismatch {
        /// Canvas dimensions (width, height)
        canvas: (u32, u32),
        /// Number of colors in the pool
        pool_size: usize,
    },

    /// Nearest-color lookup was made against an empty pool
    PoolExhausted {
        /// Luminance that was requested
        target: u8,
        /// Traversal pass in progress, if known
        pass: Option<usize>,
        /// Canvas coordinate being assigned, if known
        position: Option<[u32; 2]>,
    },

    /// Failed to encode or save the generated image
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image encoding error
        source: image::ImageError,
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

    /// Pool catalogue file is malformed
    Catalogue {
        /// Path to the catalogue file
        path: PathBuf,
        /// Description of what's wrong with the file
        reason: String,
    },

    /// Internal bookkeeping produced an inconsistent state
    Computation {
        /// Name of the computation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for SynthesisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::GeometryMismatch { canvas, pool_size } => {
                write!(
                    f,
                    "Canvas {}x{} does not match pool of {pool_size} colors",
                    canvas.0, canvas.1
                )
            }
            Self::PoolExhausted {
                target,
                pass,
                position,
            } => {
                write!(f, "Color pool exhausted while matching luminance {target}")?;
                if let Some(pass) = pass {
                    write!(f, " in pass {pass}")?;
                }
                if let Some([x, y]) = position {
                    write!(f, " at ({x}, {y})")?;
                }
                Ok(())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
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
            Self::Catalogue { path, reason } => {
                write!(f, "Invalid catalogue '{}': {reason}", path.display())
            }
            Self::Computation { operation, reason } => {
                write!(f, "Computation error in {operation}: {reason}")
            }
        }
    }
}

impl std::error::Error for SynthesisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for synthesis results
pub type Result<T> = std::result::Result<T, SynthesisError>;

/// Additional context to enrich error messages
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorContext {
    /// Traversal pass in progress
    pub pass: Option<usize>,
    /// Canvas coordinate being processed
    pub position: Option<[u32; 2]>,
}

/// Enriches error messages with traversal state information
pub trait WithContext<T> {
    /// Add error context to a Result
    ///
    /// # Errors
    ///
    /// Propagates the original error with additional context applied
    fn with_context(self, context: ErrorContext) -> Result<T>;

    /// Add just the canvas position
    ///
    /// # Errors
    ///
    /// Propagates the original error with the position applied
    fn at_position(self, x: u32, y: u32) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<SynthesisError>,
{
    fn with_context(self, context: ErrorContext) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            // Only pool exhaustion is tied to a traversal step
            if let SynthesisError::PoolExhausted { pass, position, .. } = &mut error {
                if context.pass.is_some() {
                    *pass = context.pass;
                }
                if context.position.is_some() {
                    *position = context.position;
                }
            }
            error
        })
    }

    fn at_position(self, x: u32, y: u32) -> Result<T> {
        self.with_context(ErrorContext {
            position: Some([x, y]),
            ..Default::default()
        })
    }
}

impl From<image::ImageError> for SynthesisError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for SynthesisError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> SynthesisError {
    SynthesisError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a computation error
pub fn computation_error(operation: &'static str, reason: &impl ToString) -> SynthesisError {
    SynthesisError::Computation {
        operation,
        reason: reason.to_string(),
    }
}

/// Wrap an I/O error with the path and operation it came from
pub fn file_system_error(
    path: impl Into<PathBuf>,
    operation: &'static str,
) -> impl FnOnce(std::io::Error) -> SynthesisError {
    let path = path.into();
    move |source| SynthesisError::FileSystem {
        path,
        operation,
        source,
    }
}
