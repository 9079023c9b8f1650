use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Decimation step: simulation samples per rhythm sample.
    #[serde(default = "AnalysisConfig::default_step")]
    pub step: u64,
    /// Number of phase-bin edges from -pi to pi (edges, not bins).
    #[serde(default = "AnalysisConfig::default_edge_count")]
    pub edge_count: usize,
}

impl AnalysisConfig {
    fn default_step() -> u64 {
        10
    }
    fn default_edge_count() -> usize {
        13
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            step: Self::default_step(),
            edge_count: Self::default_edge_count(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpikesConfig {
    /// Sample steps per millisecond of spike timestamps (10 for dt = 0.1 ms).
    #[serde(default = "SpikesConfig::default_samples_per_ms")]
    pub samples_per_ms: f32,
}

impl SpikesConfig {
    fn default_samples_per_ms() -> f32 {
        10.0
    }
}

impl Default for SpikesConfig {
    fn default() -> Self {
        Self {
            samples_per_ms: Self::default_samples_per_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub spikes: SpikesConfig,
}

impl AppConfig {
    pub fn load_or_default(path: &str) -> Self {
        let path_obj = Path::new(path);
        if path_obj.exists() {
            match fs::read_to_string(path_obj) {
                Ok(contents) => match toml::from_str(&contents) {
                    Ok(cfg) => return cfg,
                    Err(err) => {
                        eprintln!("Failed to parse config {path}: {err}. Using defaults.");
                    }
                },
                Err(err) => {
                    eprintln!("Failed to read config {path}: {err}. Using defaults.");
                }
            }
            return Self::default();
        }

        // File does not exist: write commented defaults and return them.
        let default_cfg = Self::default();
        match toml::to_string_pretty(&default_cfg) {
            Ok(text) => {
                let mut commented = String::new();
                for line in text.lines() {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        commented.push('\n');
                    } else if trimmed.starts_with('[') && trimmed.ends_with(']') {
                        commented.push_str(line);
                        commented.push('\n');
                    } else {
                        commented.push_str("# ");
                        commented.push_str(line);
                        commented.push('\n');
                    }
                }
                if let Err(err) = fs::write(path_obj, commented) {
                    eprintln!("Failed to write default config to {path}: {err}");
                }
            }
            Err(_) => {
                eprintln!("Failed to serialize default config; continuing with defaults");
            }
        }
        default_cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn unique_path(name: &str) -> std::path::PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!(
            "dendrophase_config_test_{}_{}",
            name,
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        p
    }

    #[test]
    fn load_or_default_writes_defaults_cleanly() {
        let path = unique_path("defaults.toml");
        let path_str = path.to_string_lossy().to_string();
        let _ = fs::remove_file(&path);

        let cfg = AppConfig::load_or_default(&path_str);
        assert!(path.exists(), "config file should be created");
        assert_eq!(cfg.analysis.step, 10);
        assert_eq!(cfg.analysis.edge_count, 13);
        assert_eq!(cfg.spikes.samples_per_ms, 10.0);

        let contents = fs::read_to_string(&path).expect("read written config");
        assert!(
            contents.contains("# step = 10"),
            "should write commented step"
        );
        assert!(
            contents.contains("# edge_count = 13"),
            "should write commented edge_count"
        );
        assert!(contents.contains("[analysis]"));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn load_or_default_reads_existing() {
        let path = unique_path("custom.toml");
        let path_str = path.to_string_lossy().to_string();
        let custom = AppConfig {
            analysis: AnalysisConfig {
                step: 20,
                edge_count: 25,
            },
            spikes: SpikesConfig { samples_per_ms: 40.0 },
        };
        let text = toml::to_string_pretty(&custom).unwrap();
        fs::write(&path, text).unwrap();

        let cfg = AppConfig::load_or_default(&path_str);
        assert_eq!(cfg.analysis.step, 20);
        assert_eq!(cfg.analysis.edge_count, 25);
        assert_eq!(cfg.spikes.samples_per_ms, 40.0);

        let _ = fs::remove_file(&path);
    }
}
