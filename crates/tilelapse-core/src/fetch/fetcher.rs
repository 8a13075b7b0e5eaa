use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::error::{Result, TilelapseError};
use crate::mosaic::{MosaicGrid, TileCoordinate};

use super::http::HttpClient;
use super::retry::{Backoff, Sleeper, ThreadSleeper};

/// Outcome of fetching one tile: its raw bytes, or absent after exhausting retries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TileFetchResult {
    Fetched(Vec<u8>),
    Absent,
}

impl TileFetchResult {
    pub fn is_fetched(&self) -> bool {
        matches!(self, Self::Fetched(_))
    }

    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Fetched(bytes) => Some(bytes),
            Self::Absent => None,
        }
    }
}

/// Fetches tiles from a templated URL, retrying with exponential backoff.
pub struct TileFetcher {
    client: Arc<dyn HttpClient>,
    sleeper: Arc<dyn Sleeper>,
    url_template: String,
    backoff: Backoff,
}

impl TileFetcher {
    pub fn new(client: Arc<dyn HttpClient>, url_template: impl Into<String>, backoff: Backoff) -> Self {
        Self {
            client,
            sleeper: Arc::new(ThreadSleeper),
            url_template: url_template.into(),
            backoff,
        }
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn url_for(&self, coord: TileCoordinate) -> String {
        coord.url(&self.url_template)
    }

    /// Fetch one tile using the configured retry budget.
    pub fn fetch(&self, coord: TileCoordinate) -> TileFetchResult {
        self.fetch_with_retries(coord, self.backoff.max_retries)
    }

    /// Fetch one tile, giving up after `max_retries` consecutive failures.
    pub fn fetch_with_retries(&self, coord: TileCoordinate, max_retries: u32) -> TileFetchResult {
        let backoff = Backoff::new(max_retries);
        let attempts = backoff.attempts();
        let url = self.url_for(coord);

        for attempt in 0..attempts {
            debug!(tile = %coord, attempt = attempt + 1, "Fetching tile");
            match self.client.get(&url) {
                Ok(bytes) => return TileFetchResult::Fetched(bytes),
                Err(e) => {
                    warn!(tile = %coord, attempt = attempt + 1, error = %e, "Tile fetch failed");
                    if attempt + 1 < attempts {
                        self.sleeper.sleep(Backoff::delay_for(attempt));
                    }
                }
            }
        }

        warn!(tile = %coord, attempts, "Tile marked absent");
        TileFetchResult::Absent
    }

    /// Fetch every tile of `grid` on a pool of `workers` threads.
    ///
    /// Results are returned in grid order regardless of completion order.
    pub fn fetch_all(&self, grid: &MosaicGrid, workers: usize) -> Result<Vec<TileFetchResult>> {
        self.fetch_all_with_progress(grid, workers, |_| {})
    }

    /// Like [`fetch_all`](Self::fetch_all); `on_progress` receives the number of finished tiles.
    pub fn fetch_all_with_progress(
        &self,
        grid: &MosaicGrid,
        workers: usize,
        on_progress: impl Fn(usize) + Sync,
    ) -> Result<Vec<TileFetchResult>> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers.max(1))
            .thread_name(|i| format!("tile-fetch-{i}"))
            .build()
            .map_err(|e| TilelapseError::config(format!("Failed to build fetch pool: {e}")))?;

        let done = AtomicUsize::new(0);
        let results: Vec<TileFetchResult> = pool.install(|| {
            grid.coordinates()
                .par_iter()
                .map(|&coord| {
                    let result = self.fetch(coord);
                    on_progress(done.fetch_add(1, Ordering::Relaxed) + 1);
                    result
                })
                .collect()
        });

        Ok(results)
    }
}
