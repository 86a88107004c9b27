//! card-scanner - Credit card field extraction from streaming OCR text
//!
//! Each camera frame yields a batch of recognized strings. Strings are classified
//! into card number, holder name, or expiry date, and each field is decided once
//! the same value has been seen often enough across frames.

pub mod analysis;
pub mod capture;
pub mod config;
pub mod error;
pub mod scanner;
pub mod vision;

pub use analysis::{classify, ConsensusAccumulator, CreditCard, ExpireDate, FieldClassifier, FieldKind};
pub use capture::CapturedFrame;
pub use config::ScannerConfig;
pub use error::{ScannerError, ScannerErrorKind};
pub use scanner::{ImageAnalyzer, ScanEvent, ScanWorker};
pub use vision::{RecognizedTextCandidate, TextRecognizer};
