//! Background document fetching.
//!
//! Each reload request gets a generation number and runs on its own named
//! thread. Results come back over a channel; only the result for the most
//! recently requested generation is ever handed out.

use std::sync::{mpsc, Arc};

use super::StructureSource;
use crate::error::MolviewError;

/// Fetched document text tagged with its reload generation.
#[derive(Debug)]
pub struct ReloadResult {
    /// Generation of the request that produced this result.
    pub generation: u64,
    /// Document text, or why fetching failed.
    pub result: Result<String, MolviewError>,
}

/// Spawns fetches and filters out stale results.
#[derive(Debug)]
pub struct ReloadWorker {
    tx: mpsc::Sender<ReloadResult>,
    rx: mpsc::Receiver<ReloadResult>,
    latest: u64,
}

impl ReloadWorker {
    /// Worker with no requests in flight.
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx, latest: 0 }
    }

    /// Most recently issued generation.
    #[must_use]
    pub fn latest_generation(&self) -> u64 {
        self.latest
    }

    /// Issue a new generation without fetching, making every in-flight
    /// request stale.
    pub fn supersede(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    /// Fetch `source` on a background thread under a new generation.
    ///
    /// # Errors
    ///
    /// [`MolviewError::ThreadSpawn`] if the thread cannot be started.
    pub fn request(
        &mut self,
        source: Arc<dyn StructureSource>,
    ) -> Result<u64, MolviewError> {
        let generation = self.supersede();
        let tx = self.tx.clone();
        log::debug!("reload {generation}: fetching {}", source.describe());

        let _handle = std::thread::Builder::new()
            .name(format!("molview-reload-{generation}"))
            .spawn(move || {
                let result = source.fetch();
                let _ = tx.send(ReloadResult { generation, result });
            })
            .map_err(MolviewError::ThreadSpawn)?;
        Ok(generation)
    }

    /// Non-blocking drain. Returns the result for the latest generation if
    /// it has arrived; stale results are discarded.
    pub fn poll(&self) -> Option<ReloadResult> {
        let mut current = None;
        while let Ok(result) = self.rx.try_recv() {
            if result.generation == self.latest {
                current = Some(result);
            } else {
                log::debug!(
                    "dropping stale reload {} (latest {})",
                    result.generation,
                    self.latest
                );
            }
        }
        current
    }
}

impl Default for ReloadWorker {
    fn default() -> Self {
        Self::new()
    }
}
