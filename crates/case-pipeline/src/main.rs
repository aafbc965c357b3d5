//! Case Feature Pipeline - Main Entry Point

use case_pipeline::{init_logging, run, PipelineConfig};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => PipelineConfig::load(&path)?,
        None => PipelineConfig::load_default()?,
    };
    init_logging(&config.log_level);

    info!("=== Case Feature Pipeline v{} ===", env!("CARGO_PKG_VERSION"));

    let summary = run(&config)?;
    info!(
        "Wrote {} cases x {} columns to {}",
        summary.cases,
        summary.columns,
        config.output_path.display()
    );

    Ok(())
}
