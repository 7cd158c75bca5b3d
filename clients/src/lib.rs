//! Shared plumbing for the `ftm-*` binaries.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use ftm_model::Model;
use tracing::info;

/// Model location, shared by every binary.
#[derive(Debug, Args)]
pub struct ModelArgs {
    /// Path to the JSON definition set.
    #[arg(long, env = "FTM_MODEL", default_value = "model.json")]
    pub model: PathBuf,
}

impl ModelArgs {
    /// Loads the definition set named by `--model`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not describe a
    /// valid model.
    pub fn load(&self) -> Result<Model> {
        info!("Loading model from {}", self.model.display());
        ftm_conformance::load_model(&self.model)
    }
}

/// Installs the stderr log subscriber. `RUST_LOG` overrides the default
/// `warn` level.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();
}
