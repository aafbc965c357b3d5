//! Pipeline configuration

use anyhow::{Context, Result};
use feature_engine::{Catalogue, CatalogueSpec, EngineConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Prefix for environment overrides, e.g. `CASE_PIPELINE__ENGINE__DESIRABILITY`
const ENV_PREFIX: &str = "CASE_PIPELINE";

/// Pipeline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Raw placement records (`.csv` or `.json`)
    pub input_path: PathBuf,

    /// Destination of the per-case table (`.csv` or `.json`)
    pub output_path: PathBuf,

    /// Feature catalogue file; the stock catalogue is used when absent
    pub catalogue_path: Option<PathBuf>,

    /// Log level when `RUST_LOG` is not set
    pub log_level: String,

    /// Outcome settings
    pub engine: EngineConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("data/placements.csv"),
            output_path: PathBuf::from("data/case_features.csv"),
            catalogue_path: None,
            log_level: "info".to_string(),
            engine: EngineConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Load from a config file, then apply environment overrides
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()
            .and_then(|settings| settings.try_deserialize())
            .with_context(|| format!("Failed to load config from {}", path.display()))
    }

    /// Load `config/pipeline.*` if present, falling back to defaults
    pub fn load_default() -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config/pipeline").required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()
            .context("Failed to read default config")?;
        settings
            .try_deserialize()
            .context("Failed to deserialize config")
    }

    /// Catalogue named by `catalogue_path`, or the stock one
    pub fn catalogue(&self) -> Result<Catalogue> {
        match &self.catalogue_path {
            Some(path) => load_catalogue(path),
            None => {
                info!("No catalogue configured, using the stock child-welfare catalogue");
                Ok(Catalogue::child_welfare())
            }
        }
    }
}

/// Load a feature catalogue file (`features = [{ column, calculate }]`,
/// `causes = [..]`)
pub fn load_catalogue<P: AsRef<Path>>(path: P) -> Result<Catalogue> {
    let path = path.as_ref();
    let spec: CatalogueSpec = config::Config::builder()
        .add_source(config::File::from(path))
        .build()
        .and_then(|settings| settings.try_deserialize())
        .with_context(|| format!("Failed to read catalogue {}", path.display()))?;
    let catalogue = Catalogue::from_spec(&spec)
        .with_context(|| format!("Invalid catalogue {}", path.display()))?;
    info!("Loaded {} features from {}", catalogue.len(), path.display());
    Ok(catalogue)
}
