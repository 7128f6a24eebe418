/// Broad category of a failure.
///
/// The kind decides the process exit code in the `lsq` binary and lets
/// library callers branch on the failure without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The design matrix has a column that is identically zero.
    SingularMatrix,
    /// A QR factorization or triangular solve could not proceed.
    NumericalFailure,
    /// Matrix/vector shapes are inconsistent with each other.
    DimensionMismatch,
    /// Malformed problem file or CLI value.
    InvalidInput,
    /// Filesystem failure while reading or writing problem/solution files.
    Io,
}

impl ErrorKind {
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorKind::InvalidInput => 2,
            ErrorKind::Io => 3,
            ErrorKind::DimensionMismatch => 4,
            ErrorKind::SingularMatrix => 5,
            ErrorKind::NumericalFailure => 6,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    kind: ErrorKind,
    message: String,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn singular(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SingularMatrix, message)
    }

    pub fn numerical(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NumericalFailure, message)
    }

    pub fn dimension(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DimensionMismatch, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn exit_code(&self) -> u8 {
        self.kind.exit_code()
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
