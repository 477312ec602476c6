//! Lone-pair marker asset delivery.
//!
//! The host loads the decorative marker asset asynchronously and hands it
//! over through a [`MarkerSender`]. Until it arrives, lone pairs are queued
//! in a [`LonePairQueue`]; the engine polls the [`MarkerReceiver`] once per
//! frame and gives up after the configured timeout.

use std::sync::mpsc;

use glam::DVec3;
use web_time::{Duration, Instant};

use crate::error::MolviewError;

/// Host-side handle to the loaded marker asset. Lone-pair primitives clone
/// it; the host resolves `asset_id` to its own mesh.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MarkerHandle {
    /// Host-defined asset identifier.
    pub asset_id: u64,
    /// Human-readable asset name (for logs).
    pub name: String,
}

impl MarkerHandle {
    /// Create a handle for `asset_id`.
    #[must_use]
    pub fn new(asset_id: u64, name: impl Into<String>) -> Self {
        Self {
            asset_id,
            name: name.into(),
        }
    }
}

/// Sending half, held by the host's asset loader.
#[derive(Debug, Clone)]
pub struct MarkerSender {
    tx: mpsc::Sender<MarkerHandle>,
}

impl MarkerSender {
    /// Deliver the loaded marker. Returns `false` if the engine is gone.
    pub fn send(&self, handle: MarkerHandle) -> bool {
        self.tx.send(handle).is_ok()
    }
}

/// Receiving half, polled by the engine. Keeps the last delivered marker.
#[derive(Debug)]
pub struct MarkerReceiver {
    rx: mpsc::Receiver<MarkerHandle>,
    marker: Option<MarkerHandle>,
}

impl MarkerReceiver {
    /// Non-blocking poll. Returns the marker once one has been delivered.
    pub fn poll(&mut self) -> Option<&MarkerHandle> {
        while let Ok(handle) = self.rx.try_recv() {
            log::debug!("marker asset '{}' ready", handle.name);
            self.marker = Some(handle);
        }
        self.marker.as_ref()
    }

    /// The marker, if it already arrived (does not poll).
    #[must_use]
    pub fn marker(&self) -> Option<&MarkerHandle> {
        self.marker.as_ref()
    }
}

/// Create a connected sender/receiver pair.
#[must_use]
pub fn marker_channel() -> (MarkerSender, MarkerReceiver) {
    let (tx, rx) = mpsc::channel();
    (MarkerSender { tx }, MarkerReceiver { rx, marker: None })
}

/// A lone pair waiting for the marker asset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingLonePair {
    /// Registry index of the owning model.
    pub model: usize,
    /// Index of the owning atom within its model.
    pub owner: usize,
    /// Model-local position of the owning atom.
    pub owner_position: DVec3,
    /// Model-local lone-pair position.
    pub position: DVec3,
}

/// Lone pairs queued until the marker arrives, with a wait deadline.
#[derive(Debug, Default)]
pub struct LonePairQueue {
    pending: Vec<PendingLonePair>,
    waiting_since: Option<Instant>,
}

impl LonePairQueue {
    /// Queue a lone pair.
    pub fn push(&mut self, pair: PendingLonePair) {
        self.pending.push(pair);
    }

    /// Number of queued lone pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Take every queued lone pair and stop the wait clock.
    pub fn take_all(&mut self) -> Vec<PendingLonePair> {
        self.waiting_since = None;
        std::mem::take(&mut self.pending)
    }

    /// Drop everything queued.
    pub fn clear(&mut self) {
        let _ = self.take_all();
    }

    /// Check the wait deadline. The clock starts on the first check after
    /// something is queued.
    ///
    /// # Errors
    ///
    /// [`MolviewError::AssetTimeout`] once `timeout` has elapsed. The queue
    /// is emptied so the error is reported once.
    pub fn check_deadline(
        &mut self,
        now: Instant,
        timeout: Duration,
    ) -> Result<(), MolviewError> {
        if self.pending.is_empty() {
            self.waiting_since = None;
            return Ok(());
        }
        let since = *self.waiting_since.get_or_insert(now);
        let waited = now.saturating_duration_since(since);
        if waited >= timeout {
            let dropped = self.take_all().len();
            log::error!(
                "marker asset not ready after {waited:?}, dropping {dropped} lone pairs"
            );
            return Err(MolviewError::AssetTimeout { waited });
        }
        Ok(())
    }
}
