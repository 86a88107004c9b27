//! Recorded OCR output played back frame by frame

use anyhow::{anyhow, Context, Result};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::path::Path;
use tracing::debug;

use super::{RecognizedTextCandidate, TextRecognizer};
use crate::capture::frame::CapturedFrame;

/// One recorded frame: either the engine's candidates or the error it raised
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReplayFrame {
    Candidates(Vec<RecognizedTextCandidate>),
    Failure { error: String },
}

/// Recognizer that returns recorded frames in order, then empty batches
pub struct ReplayRecognizer {
    frames: Mutex<VecDeque<ReplayFrame>>,
}

impl ReplayRecognizer {
    /// Create a recognizer from recorded frames
    pub fn new(frames: Vec<ReplayFrame>) -> Self {
        Self {
            frames: Mutex::new(frames.into()),
        }
    }

    /// Create a recognizer from plain candidate batches
    pub fn from_batches(batches: Vec<Vec<RecognizedTextCandidate>>) -> Self {
        Self::new(batches.into_iter().map(ReplayFrame::Candidates).collect())
    }

    /// Frames not yet played back
    pub fn remaining(&self) -> usize {
        self.frames.lock().len()
    }
}

impl TextRecognizer for ReplayRecognizer {
    fn recognize(&self, _frame: &CapturedFrame) -> Result<Vec<RecognizedTextCandidate>> {
        match self.frames.lock().pop_front() {
            Some(ReplayFrame::Candidates(candidates)) => {
                debug!("Replaying frame with {} candidates", candidates.len());
                Ok(candidates)
            }
            Some(ReplayFrame::Failure { error }) => Err(anyhow!(error)),
            None => Ok(vec![]),
        }
    }
}

/// Load recorded frames from a JSON file (an array of frames)
pub fn load_frames(path: &Path) -> Result<Vec<ReplayFrame>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read frames file {:?}", path))?;
    let frames: Vec<ReplayFrame> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse frames file {:?}", path))?;
    Ok(frames)
}
