pub type Result<T> = std::result::Result<T, AssemblerError>;

/// Struct to represent IO errors.
#[derive(Debug)]
pub struct IoErrorStruct {
    /// The type of IO error.
    error_type: String,

    /// The error message.
    msg: String,
}

/// Struct to represent archive expansion errors.
#[derive(Debug)]
pub struct ArchiveErrorStruct {
    /// The error message.
    msg: String,
}

/// Struct to represent loader patching errors.
#[derive(Debug)]
pub struct PatchErrorStruct {
    /// The error message.
    msg: String,
}

/// Struct to represent validation errors.
#[derive(Debug)]
pub struct ValidationErrorStruct {
    /// The error message.
    msg: String,
}

/// Enum to represent different types of assembler errors.
#[derive(Debug)]
pub enum AssemblerError {
    IoError(IoErrorStruct),
    ArchiveError(ArchiveErrorStruct),
    PatchError(PatchErrorStruct),
    ValidationError(ValidationErrorStruct),
}

impl AssemblerError {
    /// Create a new validation error.
    ///
    /// # Arguments
    /// * `msg` - The error message.
    ///
    /// # Returns
    /// An `AssemblerError` instance representing a validation error.
    pub fn validation_error(msg: &str) -> Self {
        AssemblerError::ValidationError(ValidationErrorStruct {
            msg: msg.to_string(),
        })
    }

    /// Create a new loader patching error.
    ///
    /// # Arguments
    /// * `msg` - The error message.
    ///
    /// # Returns
    /// An `AssemblerError` instance representing a patch error.
    pub fn patch_error(msg: &str) -> Self {
        AssemblerError::PatchError(PatchErrorStruct {
            msg: msg.to_string(),
        })
    }
}

impl std::fmt::Display for AssemblerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssemblerError::IoError(io_err) => {
                write!(f, "IO {} Error: {}", io_err.error_type, io_err.msg)
            }
            AssemblerError::ArchiveError(archive_err) => {
                write!(f, "Archive Error: {}", archive_err.msg)
            }
            AssemblerError::PatchError(patch_err) => {
                write!(f, "Patch Error: {}", patch_err.msg)
            }
            AssemblerError::ValidationError(validation_err) => {
                write!(f, "Validation Error: {}", validation_err.msg)
            }
        }
    }
}

impl std::error::Error for AssemblerError {}

impl From<std::io::Error> for AssemblerError {
    fn from(error: std::io::Error) -> Self {
        AssemblerError::IoError(IoErrorStruct {
            error_type: error.kind().to_string(),
            msg: error.to_string(),
        })
    }
}

impl From<zip::result::ZipError> for AssemblerError {
    fn from(error: zip::result::ZipError) -> Self {
        AssemblerError::ArchiveError(ArchiveErrorStruct {
            msg: error.to_string(),
        })
    }
}
