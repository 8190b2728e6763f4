//! Error types shared by the validator and the converter.

use {std::process::ExitStatus, thiserror::Error};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The PPM header is malformed.
    #[error("malformed PPM header: {0}")]
    Format(String),

    /// The stream ended while the header was still being scanned.
    #[error("unexpected end of file while reading {0}")]
    UnexpectedEof(&'static str),

    /// The pixel payload is shorter than the header declares.
    #[error("incomplete pixel data: expected {expected} bytes, found {actual}")]
    IncompleteData { expected: usize, actual: usize },

    /// The in-process PNG codec was not compiled in.
    #[error("PNG codec is not available in this build")]
    CodecUnavailable,

    #[error("external tool `{tool}` could not be started")]
    ExternalToolUnavailable {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("external tool `{tool}` exited with {status}")]
    ExternalToolFailed { tool: String, status: ExitStatus },

    #[error("usage: {0}")]
    Usage(String),

    #[error(
        "region [{left}, {right}) x [{top}, {bottom}) is outside the {width}x{height} image"
    )]
    RegionOutOfBounds {
        left: i64,
        top: i64,
        right: i64,
        bottom: i64,
        width: u32,
        height: u32,
    },

    #[error("region of size {0} contains no pixels")]
    EmptyRegion(u32),

    #[error("invalid configuration: {key} = {value:?}")]
    InvalidConfig { key: &'static str, value: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Image(#[from] ::image::ImageError),
}

impl Error {
    /// An encoder tier failing with one of these hands over to the next tier.
    pub fn is_fallback(&self) -> bool {
        matches!(
            self,
            Error::CodecUnavailable
                | Error::ExternalToolUnavailable { .. }
                | Error::ExternalToolFailed { .. }
                | Error::Image(::image::ImageError::Unsupported(_))
        )
    }
}

#[test]
fn test_fallback_classification() {
    assert!(Error::CodecUnavailable.is_fallback());
    assert!(Error::ExternalToolUnavailable {
        tool: "convert".into(),
        source: std::io::ErrorKind::NotFound.into(),
    }
    .is_fallback());
    assert!(Error::ExternalToolFailed {
        tool: "false".into(),
        status: failed_status(),
    }
    .is_fallback());
    assert!(Error::Image(::image::ImageError::Unsupported(
        ::image::error::UnsupportedError::from_format_and_kind(
            ::image::error::ImageFormatHint::Unknown,
            ::image::error::UnsupportedErrorKind::Format(::image::error::ImageFormatHint::Unknown),
        )
    ))
    .is_fallback());
    assert!(!Error::Image(::image::ImageError::IoError(
        std::io::ErrorKind::PermissionDenied.into()
    ))
    .is_fallback());
    assert!(!Error::Format("P3".into()).is_fallback());
    assert!(!Error::Io(std::io::ErrorKind::PermissionDenied.into()).is_fallback());
}

#[cfg(test)]
fn failed_status() -> ExitStatus {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        ExitStatus::from_raw(1 << 8)
    }
    #[cfg(windows)]
    {
        use std::os::windows::process::ExitStatusExt;
        ExitStatus::from_raw(1)
    }
}
