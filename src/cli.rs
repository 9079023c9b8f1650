use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Dendritic-event CSV path
    #[arg(value_name = "EVENTS_CSV")]
    pub events_path: String,

    /// Rhythm file: one sample per line
    #[arg(long, value_name = "RHYTHM_FILE")]
    pub rhythm: String,

    /// Treat the rhythm file as a raw oscillation (instantaneous phase is
    /// computed and decimated); otherwise it holds decimated phases
    #[arg(long, default_value_t = false)]
    pub raw: bool,

    /// Decimation step in simulation samples (overrides config)
    #[arg(long)]
    pub step: Option<u64>,

    /// Number of phase-bin edges from -pi to pi (overrides config)
    #[arg(long)]
    pub edges: Option<usize>,

    /// Path to config TOML
    #[arg(long, default_value = "config.toml")]
    pub config: String,

    /// Output directory for the aggregated tables
    #[arg(long, default_value = "target/entrainment")]
    pub out_dir: String,
}
