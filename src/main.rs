// Entry point: runs the file-level entrainment pipeline and writes the
// aggregated tables as CSV.

use std::error::Error;
use std::fs::{create_dir_all, read_to_string, write};
use std::path::Path;

use clap::Parser;
use tracing::info;

use dendrophase::cli::Args;
use dendrophase::config::AppConfig;
use dendrophase::core::analytic::rhythm_from_signal;
use dendrophase::core::rhythm::RhythmSeries;
use dendrophase::pipeline::{entrainment_from_file, TypeHistograms, TypePpc};

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = AppConfig::load_or_default(&args.config);
    let step = args.step.unwrap_or(config.analysis.step);
    let edge_count = args.edges.unwrap_or(config.analysis.edge_count);

    let samples = read_samples(&args.rhythm)?;
    let rhythm = if args.raw {
        rhythm_from_signal(&samples, step)
    } else {
        RhythmSeries::new(samples)
    };
    info!(
        "rhythm: {} samples at step {step}, {edge_count} bin edges",
        rhythm.len()
    );

    let (hist_by_type, ppc_by_type) =
        entrainment_from_file(Path::new(&args.events_path), &rhythm, step, edge_count)?;

    let out_dir = Path::new(&args.out_dir);
    create_dir_all(out_dir)?;
    write(
        out_dir.join("hist_by_type.csv"),
        render_histograms(&hist_by_type, edge_count.saturating_sub(1)),
    )?;
    write(out_dir.join("ppc_by_type.csv"), render_ppc(&ppc_by_type))?;

    println!("Saved entrainment tables to {}", out_dir.display());
    Ok(())
}

/// One float per line; blank lines are skipped.
fn read_samples(path: &str) -> Result<Vec<f32>, Box<dyn Error>> {
    let text = read_to_string(path).map_err(|e| format!("cannot read {path}: {e}"))?;
    let mut samples = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let v: f32 = line
            .parse()
            .map_err(|e| format!("{path} line {}: {e}", i + 1))?;
        samples.push(v);
    }
    Ok(samples)
}

fn render_histograms(tables: &[TypeHistograms], bin_count: usize) -> String {
    let mut out = String::from("Type,bound,row");
    for b in 0..bin_count {
        out.push_str(&format!(",bin_{b}"));
    }
    out.push('\n');
    for table in tables {
        for r in 0..table.onset.rows {
            push_hist_row(&mut out, &table.seg_type, "onset", r, table.onset.row(r));
        }
        if let Some(offset) = &table.offset {
            for r in 0..offset.rows {
                push_hist_row(&mut out, &table.seg_type, "offset", r, offset.row(r));
            }
        }
    }
    out
}

fn push_hist_row(out: &mut String, seg_type: &str, bound: &str, row: usize, values: &[f32]) {
    out.push_str(&format!("{seg_type},{bound},{row}"));
    for v in values {
        out.push_str(&format!(",{v}"));
    }
    out.push('\n');
}

fn render_ppc(tables: &[TypePpc]) -> String {
    let mut out = String::from("Type,bound,row,ppc\n");
    for table in tables {
        for (r, v) in table.onset.iter().enumerate() {
            out.push_str(&format!("{},onset,{r},{v}\n", table.seg_type));
        }
        if let Some(offset) = &table.offset {
            for (r, v) in offset.iter().enumerate() {
                out.push_str(&format!("{},offset,{r},{v}\n", table.seg_type));
            }
        }
    }
    out
}
