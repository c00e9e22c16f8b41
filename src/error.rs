use crate::priv_util::SliceReadError;
use core::fmt;
use core::str::Utf8Error;
use std::borrow::Cow;
use std::io;

use num_traits::{FromPrimitive, ToPrimitive};

/// An error describing problems when walking a device tree.
#[derive(Debug)]
pub enum DevTreeError {
    /// An empty path was given as the root of the device tree.
    InvalidRoot,

    /// The handle is already open. It must be closed before it can be opened again.
    Busy,

    /// The handle has not been opened (or has been closed).
    NotOpen,

    /// The data was not formatted as expected.  This likely indicates an error in the Device Tree
    /// we're walking.
    ParseError,

    /// While trying to convert a string that was supposed to be ASCII, invalid
    /// `str` sequences were encounter.
    StrError(Utf8Error),

    /// A property name longer than [`MAX_PROP_NAME_LEN`](crate::spec::MAX_PROP_NAME_LEN).
    PropNameTooLong,

    /// A property was read with a length other than the stored one.
    PropSizeMismatch { expected: usize, found: usize },

    /// A property was read as a type other than the stored one.
    PropTypeMismatch,

    /// A filesystem operation failed.
    Io(io::Error),
}

impl From<SliceReadError> for DevTreeError {
    fn from(_: SliceReadError) -> DevTreeError {
        DevTreeError::ParseError
    }
}

impl From<Utf8Error> for DevTreeError {
    fn from(e: Utf8Error) -> DevTreeError {
        DevTreeError::StrError(e)
    }
}

impl From<io::Error> for DevTreeError {
    fn from(e: io::Error) -> DevTreeError {
        DevTreeError::Io(e)
    }
}

impl fmt::Display for DevTreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DevTreeError::StrError(e) => write!(f, "{}: {}", ErrorCode::Str.as_str(), e),
            DevTreeError::PropSizeMismatch { expected, found } => write!(
                f,
                "{} (expected {} bytes, found {})",
                ErrorCode::PropSize.as_str(),
                expected,
                found
            ),
            DevTreeError::Io(e) => write!(f, "{}", e),
            e => f.write_str(e.code().as_str()),
        }
    }
}

impl std::error::Error for DevTreeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DevTreeError::StrError(e) => Some(e),
            DevTreeError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl DevTreeError {
    fn code(&self) -> ErrorCode {
        match self {
            DevTreeError::InvalidRoot => ErrorCode::InvalidRoot,
            DevTreeError::Busy => ErrorCode::Busy,
            DevTreeError::NotOpen => ErrorCode::NotOpen,
            DevTreeError::ParseError => ErrorCode::Parse,
            DevTreeError::StrError(_) => ErrorCode::Str,
            DevTreeError::PropNameTooLong => ErrorCode::PropName,
            DevTreeError::PropSizeMismatch { .. } => ErrorCode::PropSize,
            DevTreeError::PropTypeMismatch => ErrorCode::PropType,
            DevTreeError::Io(_) => ErrorCode::Io,
        }
    }
}

/// Internal (positive) error codes of an [`ErrorState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum ErrorCode {
    Success = 0,
    InvalidRoot = 1,
    Busy = 2,
    NotOpen = 3,
    Parse = 4,
    Str = 5,
    PropName = 6,
    PropSize = 7,
    PropType = 8,
    /// An I/O error which did not carry an OS error number.
    Io = 9,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Success => "Successful",
            ErrorCode::InvalidRoot => "Invalid root directory",
            ErrorCode::Busy => "The device tree is already open",
            ErrorCode::NotOpen => "The device tree is not open",
            ErrorCode::Parse => "Malformed device tree data",
            ErrorCode::Str => "Invalid string in device tree",
            ErrorCode::PropName => "Property name is too long",
            ErrorCode::PropSize => "Property size mismatch",
            ErrorCode::PropType => "Property type mismatch",
            ErrorCode::Io => "I/O error",
        }
    }
}

/// The error state of a handle.
///
/// `error` is `0` when no error occurred, a positive [`ErrorCode`] for internal errors and
/// negative when `xerrno` holds the OS error number captured at the point of failure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ErrorState {
    error: i32,
    xerrno: i32,
}

impl ErrorState {
    #[inline]
    pub fn clear(&mut self) {
        self.error = 0;
        self.xerrno = 0;
    }

    /// Record `e` as the current error, overwriting any previous one.
    pub fn set(&mut self, e: &DevTreeError) {
        match e {
            DevTreeError::Io(io) => match io.raw_os_error() {
                Some(errno) => self.set_errno(errno),
                None => self.set_code(ErrorCode::Io),
            },
            e => self.set_code(e.code()),
        }
    }

    fn set_code(&mut self, code: ErrorCode) {
        debug_assert!(code != ErrorCode::Success);
        self.error = code.to_i32().unwrap_or(0);
        self.xerrno = 0;
    }

    fn set_errno(&mut self, errno: i32) {
        self.error = -1;
        self.xerrno = errno;
    }

    #[inline]
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.error != 0
    }

    /// Raw discriminant, see the type documentation.
    #[inline]
    #[must_use]
    pub fn code(&self) -> i32 {
        self.error
    }

    /// The OS error number, valid when [`Self::code`] is negative.
    #[inline]
    #[must_use]
    pub fn errno(&self) -> Option<i32> {
        if self.error < 0 {
            Some(self.xerrno)
        } else {
            None
        }
    }

    /// Describes the current error.
    pub fn as_str(&self) -> Cow<'static, str> {
        if self.error < 0 {
            return Cow::Owned(io::Error::from_raw_os_error(self.xerrno).to_string());
        }
        match ErrorCode::from_i32(self.error) {
            Some(code) => Cow::Borrowed(code.as_str()),
            None => Cow::Borrowed("Unknown error occured"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleared_state_is_successful() {
        let mut state = ErrorState::default();
        state.set(&DevTreeError::Busy);
        assert!(state.is_error());
        assert_eq!(state.code(), 2);
        state.clear();
        assert!(!state.is_error());
        assert_eq!(state.as_str(), "Successful");
    }

    #[test]
    fn os_errors_capture_errno() {
        let mut state = ErrorState::default();
        state.set(&DevTreeError::Io(io::Error::from_raw_os_error(2)));
        assert!(state.code() < 0);
        assert_eq!(state.errno(), Some(2));
        assert_eq!(state.as_str(), io::Error::from_raw_os_error(2).to_string());
    }

    #[test]
    fn io_errors_without_errno_use_internal_code() {
        let mut state = ErrorState::default();
        state.set(&DevTreeError::Io(io::Error::new(io::ErrorKind::Other, "boom")));
        assert_eq!(state.code(), 9);
        assert_eq!(state.errno(), None);
        assert_eq!(state.as_str(), "I/O error");
    }
}
