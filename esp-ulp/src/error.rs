//! Error types.
//!
//! The typed [`Ulp`](crate::Ulp) API only ever fails with an [`EspError`]:
//! the status code returned by the ESP-IDF driver, carried verbatim. The
//! dynamic [`binding`](crate::binding) layer can additionally reject a call
//! before it reaches the driver with a [`UsageError`].

use core::{fmt, num::NonZeroI32};

/// `esp_err_t` value signalling success.
pub const ESP_OK: i32 = 0;

/// A non-zero status code returned by the ESP-IDF driver.
///
/// The code is not interpreted or classified in any way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EspError(NonZeroI32);

impl EspError {
    /// Wraps `code`, or returns `None` if it is [`ESP_OK`].
    pub const fn from(code: i32) -> Option<Self> {
        match NonZeroI32::new(code) {
            Some(code) => Some(Self(code)),
            None => None,
        }
    }

    /// Converts a raw `esp_err_t` into a `Result`.
    pub const fn check(code: i32) -> Result<(), Self> {
        match Self::from(code) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// The raw `esp_err_t` value.
    pub const fn code(&self) -> i32 {
        self.0.get()
    }
}

impl fmt::Display for EspError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ESP-IDF error {} ({:#x})", self.code(), self.code())
    }
}

impl core::error::Error for EspError {}

#[cfg(feature = "defmt")]
impl defmt::Format for EspError {
    fn format(&self, fmt: defmt::Formatter<'_>) {
        defmt::write!(fmt, "ESP-IDF error {=i32}", self.code())
    }
}

/// A call that does not match the calling convention of the ULP object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UsageError {
    /// Wrong number of positional arguments.
    ArgumentCount {
        /// Number of arguments the callee takes.
        expected: usize,
        /// Number of arguments supplied.
        given: usize,
    },
    /// A keyword argument was supplied to a callee that takes none.
    UnexpectedKeyword,
    /// An argument could not be converted to the required kind.
    TypeMismatch {
        /// The kind of value the callee requires (`"int"` or `"buffer"`).
        expected: &'static str,
    },
    /// An integer argument does not fit the parameter it is passed to.
    OutOfRange,
    /// No method or attribute with the requested name.
    UnknownAttribute,
}

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UsageError::ArgumentCount { expected, given } => {
                write!(f, "function takes {expected} positional arguments but {given} were given")
            }
            UsageError::UnexpectedKeyword => write!(f, "function doesn't take keyword arguments"),
            UsageError::TypeMismatch { expected } => write!(f, "can't convert to {expected}"),
            UsageError::OutOfRange => write!(f, "integer argument out of range"),
            UsageError::UnknownAttribute => write!(f, "no such attribute"),
        }
    }
}

impl core::error::Error for UsageError {}

/// Any failure of a call made through the [`binding`](crate::binding) layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The call was rejected before reaching the driver.
    Usage(UsageError),
    /// The driver reported a non-zero status.
    Driver(EspError),
}

impl From<UsageError> for Error {
    fn from(err: UsageError) -> Self {
        Error::Usage(err)
    }
}

impl From<EspError> for Error {
    fn from(err: EspError) -> Self {
        Error::Driver(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Usage(err) => write!(f, "{err}"),
            Error::Driver(err) => write!(f, "{err}"),
        }
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Error::Usage(err) => Some(err),
            Error::Driver(err) => Some(err),
        }
    }
}
