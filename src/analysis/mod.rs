//! Card Field Analysis
//!
//! Classifies recognized text into card fields and votes across frames until the
//! card number reaches consensus.

pub mod card;
pub mod classifier;
pub mod consensus;

pub use card::{CreditCard, ExpireDate};
pub use classifier::{classify, FieldClassifier, FieldKind};
pub use consensus::{ConsensusAccumulator, SessionState};
