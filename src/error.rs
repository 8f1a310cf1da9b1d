use thiserror::Error;

/// Why a single form field is rejected. Shown inline next to the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("field is required")]
    Required,
    #[error("field has an invalid format")]
    InvalidFormat,
    #[error("date must be after today")]
    MustBeFuture,
    #[error("time is outside opening hours")]
    OutOfRange,
}

impl FieldError {
    /// Last segment of the translation key, e.g. `validation.time.range`.
    pub fn key_suffix(self) -> &'static str {
        match self {
            FieldError::Required => "required",
            FieldError::InvalidFormat => "invalid",
            FieldError::MustBeFuture => "future",
            FieldError::OutOfRange => "range",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("cannot format appointment date {0:?}")]
    Date(String),
    #[error("cannot format appointment time {0:?}")]
    Time(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// The browser refused to open a new window (popup blocker).
    #[error("window.open was blocked for {0}")]
    Blocked(String),
    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },
    #[error("browser window is not available")]
    NoWindow,
    #[error("every WhatsApp hand-off attempt failed")]
    Exhausted,
}

/// Failure of one submission, caught at the controller boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreferenceError {
    #[error("local storage is not available")]
    StorageUnavailable,
    #[error("could not write preference {key}: {reason}")]
    Write { key: String, reason: String },
    #[error("document is not available")]
    NoDocument,
}
