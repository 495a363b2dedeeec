use failure::Fail;
use std::io;

#[derive(Debug, Fail)]
/// Every way encoding or decoding can fail.
pub enum Error {
    /// A bounded reader was asked for more bytes than it holds.
    #[fail(display = "read over buffer boundaries")]
    EndOfStream,
    /// The input does not yet hold a complete item. The reader has been rolled back to
    /// where the item starts, and the payload is the number of bytes the item needs from
    /// there. Retry once more input has arrived.
    #[fail(display = "need more data: {} bytes required", _0)]
    NeedMoreData(usize),
    /// Growing a buffer failed.
    #[fail(display = "insufficient memory")]
    OutOfMemory,
    /// Opening, seeking, reading or writing a file failed.
    #[fail(display = "file error: {}: {}", reason, cause)]
    File {
        /// What was being attempted.
        reason: &'static str,
        /// The underlying I/O error.
        #[fail(cause)]
        cause: io::Error,
    },
    /// The input is structurally invalid, uses a reserved tag, has the wrong arity, or
    /// holds a value outside the target type's range.
    #[fail(display = "invalid decode: {}", _0)]
    InvalidDecode(String),
    /// The depth budget ran out while walking a nested value.
    #[fail(display = "nesting too deep")]
    NestingTooDeep,
    /// The value has no wire representation.
    #[fail(display = "unsupported value: {}", _0)]
    UnsupportedValue(String),
}

impl Error {
    /// Creates a new [`Error::InvalidDecode`].
    ///
    /// # Arguments
    ///
    /// * `msg` - The message associated with the error.
    pub fn invalid<S: Into<String>>(msg: S) -> Self { Error::InvalidDecode(msg.into()) }

    /// Creates a new [`Error::File`].
    ///
    /// # Arguments
    ///
    /// * `reason` - What was being attempted.
    /// * `cause` - The I/O error that stopped it.
    pub fn file(reason: &'static str, cause: io::Error) -> Self { Error::File { reason, cause } }

    /// Indicates whether this is the streaming retry signal rather than a real failure.
    pub fn is_need_more_data(&self) -> bool {
        match self {
            Error::NeedMoreData(_) => true,
            _ => false,
        }
    }
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
