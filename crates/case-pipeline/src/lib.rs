//! Case Feature Pipeline
//!
//! Loads raw placement records, aggregates them into one row per case and
//! writes the resulting model-ready table.

mod config;
mod io;

pub use crate::config::{load_catalogue, PipelineConfig};
pub use crate::io::{load_dataset, read_csv, read_json, write_csv, write_json, write_table};

use anyhow::{Context, Result};
use feature_engine::AggregationEngine;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Outcome of one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    /// Distinct cases written
    pub cases: usize,
    /// Columns written, including key and outcome
    pub columns: usize,
}

/// Initialize logging; `RUST_LOG` overrides `level`
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

/// Load, aggregate and write according to `config`
pub fn run(config: &PipelineConfig) -> Result<RunSummary> {
    info!("Loading records from {}", config.input_path.display());
    let data = load_dataset(&config.input_path)?;
    let catalogue = config.catalogue()?;

    let engine =
        AggregationEngine::with_config(data, catalogue.into_descriptors(), config.engine.clone());
    let table = engine.finalize().context("Failed to build case table")?;

    write_table(&table, &config.output_path)?;

    Ok(RunSummary {
        cases: table.len(),
        columns: table.columns().len(),
    })
}
