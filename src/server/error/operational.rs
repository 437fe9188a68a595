use std::{backtrace::Backtrace, fmt, panic::Location};

use serde::Serialize;

/// Client-facing classification of a failure.
///
/// Serialized as `"fail"` for client-caused failures and `"error"` for everything else.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ErrorStatus {
    Fail,
    Error,
}

impl ErrorStatus {
    /// Classifies a status code.
    ///
    /// # Arguments
    /// - `status_code` - HTTP status code the failure is reported with
    ///
    /// # Returns
    /// - `ErrorStatus::Fail` - Code is in the client error range 400..=499
    /// - `ErrorStatus::Error` - Any other code
    pub fn from_status_code(status_code: u16) -> Self {
        if (400..=499).contains(&status_code) {
            Self::Fail
        } else {
            Self::Error
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fail => "fail",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for ErrorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anticipated failure raised by a request handler.
///
/// Carries the status code the failure should be reported with and the classification
/// derived from it. The classification is fixed at construction; fields are private so it
/// cannot drift from the code afterwards.
///
/// Construction records where the error was raised. The stored location is the caller of
/// [`OperationalError::new`], so diagnostics point at the handler rather than this module.
/// A backtrace is captured as well when `RUST_BACKTRACE` enables it.
pub struct OperationalError {
    message: String,
    status_code: u16,
    status: ErrorStatus,
    location: &'static Location<'static>,
    backtrace: Backtrace,
}

impl OperationalError {
    /// Creates an operational error for the given message and status code.
    ///
    /// # Arguments
    /// - `message` - Human-readable description returned to the client
    /// - `status_code` - HTTP status code the failure is reported with
    ///
    /// # Returns
    /// - `OperationalError` - Classified error with the raise site recorded
    #[track_caller]
    pub fn new(message: impl Into<String>, status_code: u16) -> Self {
        Self {
            message: message.into(),
            status_code,
            status: ErrorStatus::from_status_code(status_code),
            location: Location::caller(),
            backtrace: Backtrace::capture(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn status(&self) -> ErrorStatus {
        self.status
    }

    /// Always `true`: this type only represents anticipated conditions.
    pub fn is_operational(&self) -> bool {
        true
    }

    /// Source location that raised the error.
    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }

    pub fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }
}

impl fmt::Display for OperationalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl fmt::Debug for OperationalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationalError")
            .field("message", &self.message)
            .field("status_code", &self.status_code)
            .field("status", &self.status)
            .field("location", &format_args!("{}", self.location))
            .finish()
    }
}

impl std::error::Error for OperationalError {}
