//! Background scan worker
//!
//! A single thread owns the analyzer, so frames submitted from any thread are
//! processed strictly one at a time.

use anyhow::{Context, Result};
use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::RwLock;
use std::sync::Arc;
use std::thread::JoinHandle;
use tracing::{info, warn};

use super::ImageAnalyzer;
use crate::analysis::CreditCard;
use crate::capture::frame::CapturedFrame;
use crate::config::ScannerConfig;
use crate::error::ScannerError;
use crate::vision::TextRecognizer;

/// Messages sent from the worker to the scan caller
#[derive(Debug)]
pub enum ScanEvent {
    /// Recognition failed on one frame; scanning continues
    Failed(ScannerError),
    /// Card number decided; the worker stops after sending this
    Finished(CreditCard),
}

/// Scan session running on its own thread
pub struct ScanWorker {
    /// Channel to send frames to the worker
    frames: Option<Sender<CapturedFrame>>,
    /// Channel to receive events from the worker
    events: Receiver<ScanEvent>,
    /// Fields decided so far
    progress: Arc<RwLock<CreditCard>>,
    /// Handle to worker thread
    handle: Option<JoinHandle<()>>,
}

impl ScanWorker {
    /// Start a scan session in a background thread
    pub fn spawn<R>(recognizer: R, config: &ScannerConfig) -> Result<Self>
    where
        R: TextRecognizer + 'static,
    {
        let (frame_tx, frame_rx) = unbounded::<CapturedFrame>();
        let (event_tx, event_rx) = unbounded();
        let progress = Arc::new(RwLock::new(CreditCard::default()));

        let mut analyzer = ImageAnalyzer::with_config(recognizer, config);
        let shared_progress = progress.clone();

        let handle = std::thread::Builder::new()
            .name("card-scan".to_string())
            .spawn(move || {
                info!("Scan worker starting...");
                for frame in frame_rx.iter() {
                    match analyzer.analyze(&frame) {
                        Ok(Some(card)) => {
                            *shared_progress.write() = card.clone();
                            let _ = event_tx.send(ScanEvent::Finished(card));
                            break;
                        }
                        Ok(None) => {
                            let current = analyzer.progress();
                            if *shared_progress.read() != *current {
                                *shared_progress.write() = current.clone();
                            }
                        }
                        Err(e) => {
                            if event_tx.send(ScanEvent::Failed(e)).is_err() {
                                warn!("Scan caller went away, stopping worker");
                                break;
                            }
                        }
                    }
                }
                info!("Scan worker exiting...");
            })
            .context("Failed to spawn scan worker thread")?;

        Ok(Self {
            frames: Some(frame_tx),
            events: event_rx,
            progress,
            handle: Some(handle),
        })
    }

    /// Queue a frame for analysis
    ///
    /// Returns `false` once the worker has finished or been stopped.
    pub fn submit(&self, frame: CapturedFrame) -> bool {
        match &self.frames {
            Some(tx) => tx.send(frame).is_ok(),
            None => false,
        }
    }

    /// Events produced by the worker
    pub fn events(&self) -> &Receiver<ScanEvent> {
        &self.events
    }

    /// Snapshot of the fields decided so far
    pub fn progress(&self) -> CreditCard {
        self.progress.read().clone()
    }

    /// Check if the worker thread is still running
    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .map(|h| !h.is_finished())
            .unwrap_or(false)
    }

    /// Stop accepting frames and wait for queued frames to drain
    pub fn stop(&mut self) {
        self.frames = None;
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for ScanWorker {
    fn drop(&mut self) {
        self.stop();
    }
}
