//! Temporal consensus over per-frame field observations
//!
//! Single frames are unreliable, so every classified value is counted across the
//! whole session. The first value of a field to exceed the threshold is decided
//! and kept, even if another value overtakes it later. The session completes when
//! the card number is decided.

use std::collections::HashMap;
use tracing::{debug, info};

use crate::analysis::card::CreditCard;
use crate::analysis::classifier::{FieldClassifier, FieldKind};
use crate::config::{ConsensusConfig, ScannerConfig};
use crate::vision::RecognizedTextCandidate;

/// Lifecycle of a scanning session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Still collecting votes
    Accumulating,
    /// Card number decided and the result handed out
    Finalized,
}

/// Vote counter and decision state for one scanning session
#[derive(Debug)]
pub struct ConsensusAccumulator {
    classifier: FieldClassifier,
    config: ConsensusConfig,
    /// Observation counts per distinct classified value
    tally: HashMap<FieldKind, u32>,
    /// Decided fields so far
    card: CreditCard,
    state: SessionState,
    frames_ingested: u64,
}

impl Default for ConsensusAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsensusAccumulator {
    /// Create an accumulator with default settings
    pub fn new() -> Self {
        Self::with_config(&ScannerConfig::default())
    }

    /// Create an accumulator from scanner configuration
    pub fn with_config(config: &ScannerConfig) -> Self {
        Self {
            classifier: FieldClassifier::new(&config.classifier),
            config: config.consensus.clone(),
            tally: HashMap::new(),
            card: CreditCard::default(),
            state: SessionState::Accumulating,
            frames_ingested: 0,
        }
    }

    /// Fold one frame's candidates into the tally
    ///
    /// Returns the card on the call where the number is first decided and `None`
    /// otherwise. Calls after that are no-ops.
    pub fn ingest(&mut self, candidates: &[RecognizedTextCandidate]) -> Option<CreditCard> {
        if self.state == SessionState::Finalized {
            debug!("Ignoring frame after session finalized");
            return None;
        }

        self.frames_ingested += 1;

        let observations: Vec<FieldKind> = candidates
            .iter()
            .filter(|c| c.confidence > self.config.min_confidence)
            .filter_map(|c| self.classifier.classify(&c.text))
            .collect();

        for field in observations {
            self.vote(field);
        }

        if self.card.number.is_none() {
            return None;
        }

        self.state = SessionState::Finalized;
        info!(
            "Card finalized after {} frames (name: {}, expire date: {})",
            self.frames_ingested,
            self.card.name.is_some(),
            self.card.expire_date.is_some()
        );
        Some(self.card.clone())
    }

    fn vote(&mut self, field: FieldKind) {
        let count = self.tally.entry(field.clone()).or_insert(0);
        *count += 1;
        let count = *count;

        debug!("Vote for {} -> {}", field.label(), count);

        if count <= self.config.threshold {
            return;
        }

        match field {
            FieldKind::Number(number) if self.card.number.is_none() => {
                info!("Card number decided after {} observations", count);
                self.card.number = Some(number);
            }
            FieldKind::Name(name) if self.card.name.is_none() => {
                info!("Holder name decided after {} observations", count);
                self.card.name = Some(name);
            }
            FieldKind::ExpireDate(date) if self.card.expire_date.is_none() => {
                info!("Expire date {} decided after {} observations", date, count);
                self.card.expire_date = Some(date);
            }
            _ => {}
        }
    }

    /// Current session state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether the card number has been decided
    pub fn is_finalized(&self) -> bool {
        self.state == SessionState::Finalized
    }

    /// Fields decided so far
    pub fn card(&self) -> &CreditCard {
        &self.card
    }

    /// Number of times a value has been observed
    pub fn count(&self, field: &FieldKind) -> u32 {
        self.tally.get(field).copied().unwrap_or(0)
    }

    /// All observed values with their counts, in no particular order
    pub fn tally(&self) -> impl Iterator<Item = (&FieldKind, u32)> {
        self.tally.iter().map(|(field, count)| (field, *count))
    }

    /// Number of frames folded in before finalization
    pub fn frames_ingested(&self) -> u64 {
        self.frames_ingested
    }

    /// Discard all votes and start a fresh session
    pub fn reset(&mut self) {
        self.tally.clear();
        self.card = CreditCard::default();
        self.state = SessionState::Accumulating;
        self.frames_ingested = 0;
    }
}
