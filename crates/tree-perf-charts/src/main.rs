// File: crates/tree-perf-charts/src/main.rs
// Summary: Renders every known timing CSV into PNG charts and reports per-file outcomes on stdout.

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tree_perf_charts::{run_batch, BatchConfig, BatchReport, RenderOutcome, INPUTS};

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stdout)
        .with_target(false)
        .try_init();

    // Args: [data_dir] [out_dir]
    let config = BatchConfig::from_args(std::env::args().skip(1));
    info!(data_dir = %config.data_dir.display(), out_dir = %config.out_dir.display(), "rendering charts");

    let report = run_batch(&config, INPUTS);
    print_report(&report);

    // Partial failure is reported, never turned into an exit code.
    Ok(())
}

fn print_report(report: &BatchReport) {
    for file in &report.files {
        let input = file.input.display();
        let charts = match &file.charts {
            Ok(charts) => charts,
            Err(e) if e.is_file_not_found() => {
                warn!("File not found: {input}");
                continue;
            }
            Err(e) => {
                warn!("An error occurred: {e}");
                continue;
            }
        };
        if let Some(schema) = file.schema {
            info!("{input}: {} rows, schema {schema}", file.rows);
        }
        for chart in charts {
            match &chart.result {
                Ok(RenderOutcome::Written(path)) => info!("Wrote {}", path.display()),
                Ok(RenderOutcome::Skipped(reason)) => info!("{input}: skipped {} chart ({reason})", chart.kind),
                Err(e) => warn!("An error occurred: {e}"),
            }
        }
    }
    info!(
        "done: {} charts written, {} skipped, {} failed, {} inputs missing",
        report.written(),
        report.skipped(),
        report.failed(),
        report.missing()
    );
}
