use std::collections::{HashMap, VecDeque};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::asset::{Asset, GeoSample};
use crate::config::LoadingConfig;
use crate::consts::DEFAULT_METADATA_WORKERS;

use super::exif::MetadataExtractor;
use super::progress::{LoadReporter, LoadStage};

/// Limits for one metadata batch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchLimits {
    /// Longest a single extraction may run, counted from when it starts.
    /// `None` waits for every extraction.
    pub timeout: Option<Duration>,
    /// Extractions running at once. 0 means one per available CPU.
    pub workers: usize,
}

impl BatchLimits {
    pub fn new(timeout: Option<Duration>, workers: usize) -> Self {
        Self { timeout, workers }
    }

    pub fn from_config(loading: &LoadingConfig) -> Self {
        Self::new(loading.fetch_timeout(), loading.metadata_workers)
    }

    fn worker_count(&self, total: usize) -> usize {
        let workers = if self.workers == 0 {
            thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(DEFAULT_METADATA_WORKERS)
        } else {
            self.workers
        };
        workers.clamp(1, total.max(1))
    }
}

/// Read the geolocation of every asset concurrently.
///
/// The result has one sample per asset, in asset order. Extractions run on
/// their own threads, at most `limits.workers` at a time. With a timeout,
/// an extraction that runs longer than it is abandoned: its asset becomes
/// absent and it stops counting against the worker cap, so assets still
/// queued behind it start on time. A failing or panicking extraction also
/// degrades its asset alone; the batch itself never fails.
pub fn fetch_geo_batch(
    extractor: Arc<dyn MetadataExtractor>,
    assets: &[Asset],
    limits: BatchLimits,
    reporter: &dyn LoadReporter,
) -> Vec<GeoSample> {
    let total = assets.len();
    let workers = limits.worker_count(total);
    reporter.begin_stage(LoadStage::ReadingMetadata, Some(total));
    debug!(total, workers, timeout = ?limits.timeout, "Reading metadata");

    let (tx, rx) = mpsc::channel::<(usize, GeoSample)>();
    let mut queued: VecDeque<usize> = (0..total).collect();
    let mut running: HashMap<usize, Instant> = HashMap::new();
    let mut samples: Vec<Option<GeoSample>> = vec![None; total];
    let mut settled = 0;
    let mut timed_out = 0;

    while settled < total {
        while running.len() < workers {
            let Some(slot) = queued.pop_front() else {
                break;
            };
            let url = &assets[slot].url;
            match spawn_extraction(&extractor, slot, url, tx.clone()) {
                Ok(()) => {
                    running.insert(slot, Instant::now());
                }
                Err(e) => {
                    warn!(url = %url, error = %e, "Could not start metadata read");
                    samples[slot] = Some(GeoSample::absent());
                    settled += 1;
                    reporter.advance(settled);
                }
            }
        }
        if running.is_empty() {
            continue;
        }

        let received = match limits.timeout {
            Some(timeout) => {
                let oldest = running.values().min().copied().unwrap_or_else(Instant::now);
                let wait = (oldest + timeout).saturating_duration_since(Instant::now());
                rx.recv_timeout(wait).ok()
            }
            None => match rx.recv() {
                Ok(message) => Some(message),
                Err(_) => break,
            },
        };

        // A late result from an abandoned extraction is no longer running.
        if let Some((slot, sample)) = received {
            if running.remove(&slot).is_some() {
                samples[slot] = Some(sample);
                settled += 1;
                reporter.advance(settled);
            }
        }

        if let Some(timeout) = limits.timeout {
            let now = Instant::now();
            let expired: Vec<usize> = running
                .iter()
                .filter(|(_, started)| now.duration_since(**started) >= timeout)
                .map(|(&slot, _)| slot)
                .collect();
            for slot in expired {
                running.remove(&slot);
                warn!(
                    url = %assets[slot].url,
                    timeout_ms = timeout.as_millis() as u64,
                    "Metadata read timed out, placing at random"
                );
                samples[slot] = Some(GeoSample::absent());
                settled += 1;
                timed_out += 1;
                reporter.advance(settled);
            }
        }
    }

    let samples: Vec<GeoSample> = samples
        .into_iter()
        .zip(assets)
        .map(|(sample, asset)| {
            sample.unwrap_or_else(|| {
                warn!(url = %asset.url, "Metadata never read, placing at random");
                GeoSample::absent()
            })
        })
        .collect();
    reporter.finish_stage();

    info!(
        total,
        timed_out,
        located = samples.iter().filter(|s| s.has_location()).count(),
        "Metadata batch complete"
    );
    samples
}

fn spawn_extraction(
    extractor: &Arc<dyn MetadataExtractor>,
    slot: usize,
    url: &str,
    tx: mpsc::Sender<(usize, GeoSample)>,
) -> std::io::Result<()> {
    let extractor = Arc::clone(extractor);
    let url = url.to_string();
    thread::Builder::new()
        .name(format!("flow-geo-{slot}"))
        .spawn(move || {
            let sample = extract_or_absent(extractor.as_ref(), &url);
            // nobody listens once the read has timed out
            let _ = tx.send((slot, sample));
        })
        .map(|_| ())
}

/// Run one extraction; any error or panic becomes an absent sample.
pub fn extract_or_absent(extractor: &dyn MetadataExtractor, url: &str) -> GeoSample {
    match catch_unwind(AssertUnwindSafe(|| extractor.extract(url))) {
        Ok(Ok(sample)) => sample,
        Ok(Err(e)) => {
            warn!(url, error = %e, "Error reading metadata");
            GeoSample::absent()
        }
        Err(_) => {
            warn!(url, "Metadata extractor panicked");
            GeoSample::absent()
        }
    }
}
