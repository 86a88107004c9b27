//! Vision/OCR Layer
//!
//! Boundary to the text recognition engine. The engine itself is external; this
//! module defines what it hands back per frame and the trait it is driven through.

pub mod replay;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::capture::frame::CapturedFrame;

pub use replay::{load_frames, ReplayRecognizer};

/// One recognized text region from a single frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedTextCandidate {
    /// Recognized text
    pub text: String,
    /// Recognition confidence (0.0 - 1.0)
    pub confidence: f32,
    /// Bounding box (x, y, width, height), informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<(u32, u32, u32, u32)>,
}

impl RecognizedTextCandidate {
    /// Create a candidate without bounds
    pub fn new(text: impl Into<String>, confidence: f32) -> Self {
        Self {
            text: text.into(),
            confidence,
            bounds: None,
        }
    }

    /// Attach a bounding box
    pub fn with_bounds(mut self, bounds: (u32, u32, u32, u32)) -> Self {
        self.bounds = Some(bounds);
        self
    }
}

/// Text recognition engine
///
/// Returns the top candidate for each text region found in the frame. Errors are
/// reported to the scan caller as photo processing failures.
pub trait TextRecognizer: Send {
    fn recognize(&self, frame: &CapturedFrame) -> Result<Vec<RecognizedTextCandidate>>;
}

impl<F> TextRecognizer for F
where
    F: Fn(&CapturedFrame) -> Result<Vec<RecognizedTextCandidate>> + Send,
{
    fn recognize(&self, frame: &CapturedFrame) -> Result<Vec<RecognizedTextCandidate>> {
        self(frame)
    }
}
