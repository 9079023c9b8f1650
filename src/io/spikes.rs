//! Somatic spike-time sources.
//!
//! Spike times are produced by whatever wrote the simulation output, so
//! loading is a strategy seam: the pipeline asks a `SpikeSource` for
//! sorted integer sample steps and callers plug in the implementation
//! matching their file layout. No hidden fallback paths.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

/// Loader strategy for somatic spike times.
pub trait SpikeSource {
    /// Sorted simulation sample steps at which a spike occurred.
    fn load(&self, path: &Path) -> Result<Vec<u64>, String>;
}

/// CSV with a `timestamps` column of spike times in milliseconds.
///
/// Times are converted to integer sample steps at `samples_per_ms`
/// (10.0 for the usual dt = 0.1 ms simulations) and sorted.
#[derive(Clone, Copy, Debug)]
pub struct CsvSpikeSource {
    pub samples_per_ms: f32,
}

impl Default for CsvSpikeSource {
    fn default() -> Self {
        Self { samples_per_ms: 10.0 }
    }
}

impl CsvSpikeSource {
    pub fn parse<R: Read>(&self, reader: R) -> Result<Vec<u64>, String> {
        assert!(
            self.samples_per_ms > 0.0,
            "samples_per_ms must be positive"
        );
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|e| format!("cannot read header row: {e}"))?
            .clone();
        let ts_col = headers
            .iter()
            .position(|h| h == "timestamps")
            .ok_or_else(|| "missing 'timestamps' column".to_string())?;

        let mut steps = Vec::new();
        for (row_idx, result) in csv_reader.records().enumerate() {
            let record = result.map_err(|e| format!("CSV row {}: {e}", row_idx + 1))?;
            let cell = record
                .get(ts_col)
                .ok_or_else(|| format!("row {}: missing timestamp field", row_idx + 1))?;
            let ms: f64 = cell
                .trim()
                .parse()
                .map_err(|e| format!("row {}: bad timestamp '{cell}': {e}", row_idx + 1))?;
            if !ms.is_finite() || ms < 0.0 {
                return Err(format!("row {}: negative or non-finite timestamp", row_idx + 1));
            }
            steps.push((ms * self.samples_per_ms as f64).round() as u64);
        }
        steps.sort_unstable();
        Ok(steps)
    }
}

impl SpikeSource for CsvSpikeSource {
    fn load(&self, path: &Path) -> Result<Vec<u64>, String> {
        let file =
            File::open(path).map_err(|e| format!("cannot open {}: {e}", path.display()))?;
        let steps = self.parse(file)?;
        debug!(
            target: "io::spikes",
            "loaded {} spikes from {}",
            steps.len(),
            path.display()
        );
        Ok(steps)
    }
}
