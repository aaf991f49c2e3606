use thiserror::Error;

/// Convenient result alias for the sleigh library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a required request field is absent or empty.
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    /// Raised when a behavior value is neither "bueno" nor "malo".
    #[error("invalid behavior value: {value}")]
    InvalidBehavior { value: String },

    /// Raised when a child references a location id that does not exist.
    #[error("unknown location id: {id}")]
    UnknownLocation { id: String },

    /// Raised when a location name is already registered.
    #[error("location name already exists: {name}")]
    DuplicateLocation { name: String },

    /// Raised when a child name is already registered.
    #[error("child name already exists: {name}")]
    DuplicateChild { name: String },

    /// Wrapper for SQLite errors.
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
