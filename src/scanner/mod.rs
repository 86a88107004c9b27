//! Scan Session Layer
//!
//! Runs text recognition on each frame and feeds the results into the consensus
//! accumulator. One analyzer serves exactly one scanning session.

pub mod worker;

use tracing::{debug, warn};

use crate::analysis::{ConsensusAccumulator, CreditCard};
use crate::capture::frame::CapturedFrame;
use crate::config::ScannerConfig;
use crate::error::ScannerError;
use crate::vision::TextRecognizer;

pub use worker::{ScanEvent, ScanWorker};

/// Frame-by-frame card analyzer
pub struct ImageAnalyzer<R: TextRecognizer> {
    recognizer: R,
    accumulator: ConsensusAccumulator,
}

impl<R: TextRecognizer> ImageAnalyzer<R> {
    /// Create an analyzer with default settings
    pub fn new(recognizer: R) -> Self {
        Self::with_config(recognizer, &ScannerConfig::default())
    }

    /// Create an analyzer with custom settings
    pub fn with_config(recognizer: R, config: &ScannerConfig) -> Self {
        Self {
            recognizer,
            accumulator: ConsensusAccumulator::with_config(config),
        }
    }

    /// Analyze one frame
    ///
    /// `Ok(Some(card))` is returned once, on the frame that decides the card number.
    /// A recognizer failure is returned as a photo processing error for that frame
    /// only; the session continues with the next frame.
    pub fn analyze(&mut self, frame: &CapturedFrame) -> Result<Option<CreditCard>, ScannerError> {
        if self.accumulator.is_finalized() {
            return Ok(None);
        }

        let candidates = match self.recognizer.recognize(frame) {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!("Text recognition failed: {:#}", e);
                return Err(ScannerError::photo_processing(e));
            }
        };

        debug!("Recognized {} text candidates", candidates.len());
        Ok(self.accumulator.ingest(&candidates))
    }

    /// Accumulator state for this session
    pub fn accumulator(&self) -> &ConsensusAccumulator {
        &self.accumulator
    }

    /// Fields decided so far
    pub fn progress(&self) -> &CreditCard {
        self.accumulator.card()
    }

    /// Whether the session has produced its card
    pub fn is_finished(&self) -> bool {
        self.accumulator.is_finalized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScannerErrorKind;
    use crate::vision::replay::{ReplayFrame, ReplayRecognizer};
    use crate::vision::RecognizedTextCandidate;

    const NUMBER: &str = "4111 1111 1111 1111";

    fn number_frame() -> ReplayFrame {
        ReplayFrame::Candidates(vec![RecognizedTextCandidate::new(NUMBER, 0.9)])
    }

    #[test]
    fn test_analyze_until_number_decided() {
        let recognizer = ReplayRecognizer::new(vec![number_frame(), number_frame(), number_frame()]);
        let mut analyzer = ImageAnalyzer::new(recognizer);
        let frame = CapturedFrame::empty();

        assert!(analyzer.analyze(&frame).unwrap().is_none());
        assert!(analyzer.analyze(&frame).unwrap().is_none());

        let card = analyzer.analyze(&frame).unwrap().unwrap();
        assert_eq!(card.number.as_deref(), Some(NUMBER));
        assert!(analyzer.is_finished());

        assert!(analyzer.analyze(&frame).unwrap().is_none());
    }

    #[test]
    fn test_recognizer_failure_is_photo_processing() {
        let recognizer = ReplayRecognizer::new(vec![
            number_frame(),
            ReplayFrame::Failure { error: "vision request failed".to_string() },
            number_frame(),
            number_frame(),
        ]);
        let mut analyzer = ImageAnalyzer::new(recognizer);
        let frame = CapturedFrame::empty();

        assert!(analyzer.analyze(&frame).unwrap().is_none());

        let err = analyzer.analyze(&frame).unwrap_err();
        assert_eq!(err.kind, ScannerErrorKind::PhotoProcessing);
        assert_eq!(err.cause_message().as_deref(), Some("vision request failed"));
        assert_eq!(analyzer.accumulator().frames_ingested(), 1);

        assert!(analyzer.analyze(&frame).unwrap().is_none());
        assert!(analyzer.analyze(&frame).unwrap().is_some());
    }

    #[test]
    fn test_no_recognition_after_finish() {
        let recognizer = ReplayRecognizer::new(vec![
            number_frame(),
            number_frame(),
            number_frame(),
            number_frame(),
        ]);
        let mut analyzer = ImageAnalyzer::new(recognizer);
        let frame = CapturedFrame::empty();

        for _ in 0..3 {
            analyzer.analyze(&frame).unwrap();
        }
        assert!(analyzer.analyze(&frame).unwrap().is_none());
        assert_eq!(analyzer.recognizer.remaining(), 1);
    }
}
