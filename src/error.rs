//! Scanner error types

use std::fmt;

/// Category of scanner failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScannerErrorKind {
    /// Camera could not be configured
    CameraSetup,
    /// Text recognition failed on a frame
    PhotoProcessing,
    /// Camera access was denied
    AuthorizationDenied,
    /// Frame capture failed
    Capture,
}

impl fmt::Display for ScannerErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ScannerErrorKind::CameraSetup => "camera setup failed",
            ScannerErrorKind::PhotoProcessing => "photo processing failed",
            ScannerErrorKind::AuthorizationDenied => "camera authorization denied",
            ScannerErrorKind::Capture => "capture failed",
        };
        f.write_str(text)
    }
}

/// Error surfaced to the scan caller
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct ScannerError {
    /// What went wrong
    pub kind: ScannerErrorKind,
    /// Underlying failure, if any
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl ScannerError {
    /// Create an error with no underlying cause
    pub fn new(kind: ScannerErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Text recognition failed with the given cause
    pub fn photo_processing(source: anyhow::Error) -> Self {
        Self {
            kind: ScannerErrorKind::PhotoProcessing,
            source: Some(source.into()),
        }
    }

    /// Description of the underlying cause, if there is one
    pub fn cause_message(&self) -> Option<String> {
        self.source.as_ref().map(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_photo_processing_keeps_source() {
        let err = ScannerError::photo_processing(anyhow::anyhow!("engine unavailable"));

        assert_eq!(err.kind, ScannerErrorKind::PhotoProcessing);
        assert_eq!(err.to_string(), "photo processing failed");
        assert_eq!(err.cause_message().as_deref(), Some("engine unavailable"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_error_without_source() {
        let err = ScannerError::new(ScannerErrorKind::AuthorizationDenied);

        assert_eq!(err.to_string(), "camera authorization denied");
        assert!(err.cause_message().is_none());
        assert!(err.source().is_none());
    }
}
