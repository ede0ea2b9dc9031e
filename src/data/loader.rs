use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};

use anyhow::{Context, Result};

use super::codec::parse_csv;
use super::model::Dataset;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Read and parse an inspection CSV.
pub fn load_file(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let dataset = parse_csv(&text).with_context(|| format!("parsing {}", path.display()))?;
    Ok(dataset)
}

/// Write serialized export text to `path`, replacing any existing file.
pub fn save_export(path: &Path, text: &str) -> Result<()> {
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))
}

// ---------------------------------------------------------------------------
// Background loading
// ---------------------------------------------------------------------------

/// Result of one background load, tagged with the request that started it.
#[derive(Debug)]
pub struct LoadOutcome {
    pub generation: u64,
    pub path: PathBuf,
    pub result: Result<Dataset>,
}

/// Monotonic request counter. Only the newest request may land.
#[derive(Debug, Default)]
pub struct LoadGeneration {
    latest: u64,
}

impl LoadGeneration {
    /// Start a new request and return its token.
    pub fn begin(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.latest
    }

    pub fn latest(&self) -> u64 {
        self.latest
    }
}

/// Reads and parses files on worker threads, dropping completions that a
/// newer request has overtaken.
pub struct BackgroundLoader {
    generation: LoadGeneration,
    tx: Sender<LoadOutcome>,
    rx: Receiver<LoadOutcome>,
    in_flight: usize,
}

impl Default for BackgroundLoader {
    fn default() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            generation: LoadGeneration::default(),
            tx,
            rx,
            in_flight: 0,
        }
    }
}

impl BackgroundLoader {
    /// Start loading `path`. `on_done` runs on the worker after the result
    /// is sent (the UI uses it to request a repaint).
    pub fn spawn<F>(&mut self, path: PathBuf, on_done: F) -> u64
    where
        F: FnOnce() + Send + 'static,
    {
        let generation = self.generation.begin();
        let sender = self.tx.clone();
        self.in_flight += 1;
        log::debug!("Loading {} (request {generation})", path.display());

        std::thread::spawn(move || {
            let result = load_file(&path);
            let _ = sender.send(LoadOutcome {
                generation,
                path,
                result,
            });
            on_done();
        });
        generation
    }

    /// Whether any request has not reported back yet.
    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    /// Drain finished loads and return the newest one if it is current.
    pub fn poll(&mut self) -> Option<LoadOutcome> {
        let mut current = None;
        while let Ok(outcome) = self.rx.try_recv() {
            self.in_flight = self.in_flight.saturating_sub(1);
            current = self.accept(outcome).or(current);
        }
        current
    }

    /// Block until a current outcome arrives or `timeout` passes.
    #[cfg(test)]
    pub fn wait(&mut self, timeout: std::time::Duration) -> Option<LoadOutcome> {
        let deadline = std::time::Instant::now() + timeout;
        loop {
            let remaining = deadline.checked_duration_since(std::time::Instant::now())?;
            let outcome = self.rx.recv_timeout(remaining).ok()?;
            self.in_flight = self.in_flight.saturating_sub(1);
            if let Some(outcome) = self.accept(outcome) {
                return Some(outcome);
            }
        }
    }

    fn accept(&self, outcome: LoadOutcome) -> Option<LoadOutcome> {
        if self.generation.is_current(outcome.generation) {
            Some(outcome)
        } else {
            log::debug!(
                "Discarding stale load of {} (request {}, latest {})",
                outcome.path.display(),
                outcome.generation,
                self.generation.latest()
            );
            None
        }
    }
}
