use thiserror::Error;

/// Errors raised while reading a ZIP archive
#[derive(Error, Debug)]
pub enum ZipError {
    /// Reading from the underlying source failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The bytes do not form a ZIP structure we can follow
    #[error("Invalid ZIP archive: {0}")]
    InvalidArchive(&'static str),

    /// The entry uses a compression method other than STORED or DEFLATE
    #[error("Unsupported compression method {method} for entry '{name}'")]
    UnsupportedCompression { name: String, method: u16 },

    /// The entry is encrypted
    #[error("Entry '{name}' is encrypted")]
    Encrypted { name: String },

    /// Decoded data does not match the CRC-32 recorded in the central directory
    #[error("CRC-32 mismatch for '{name}': expected {expected:#010x}, found {found:#010x}")]
    ChecksumMismatch {
        name: String,
        expected: u32,
        found: u32,
    },

    /// Decoded data does not match the size recorded in the central directory
    #[error("Size mismatch for '{name}': expected {expected} bytes, found {found}")]
    SizeMismatch {
        name: String,
        expected: u64,
        found: u64,
    },
}

pub type ZipResult<T> = Result<T, ZipError>;
