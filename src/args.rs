//! CLI argument definitions.

use clap::Args;
use std::path::PathBuf;

/// Arguments for `generate`.
#[derive(Args, Clone, Debug)]
pub struct GenerateArgs {
    /// Path to template YAML file
    #[arg(long, short = 't')]
    pub template: PathBuf,

    /// Named override from the template file applied to every instance
    #[arg(long = "override", value_name = "NAME")]
    pub override_name: Option<String>,

    /// Number of instances to generate
    #[arg(long, short = 'n', default_value = "1")]
    pub count: u64,

    /// Random seed for deterministic generation (overrides the file's seed)
    #[arg(long, env = "FAKE_DATA_SEED")]
    pub seed: Option<u64>,

    /// Output file (default: stdout)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Pretty-print each instance instead of one per line
    #[arg(long)]
    pub pretty: bool,
}

/// Arguments for `check`.
#[derive(Args, Clone, Debug)]
pub struct CheckArgs {
    /// Path to template YAML file
    #[arg(long, short = 't')]
    pub template: PathBuf,

    /// Random seed used while test-producing instances
    #[arg(long, env = "FAKE_DATA_SEED")]
    pub seed: Option<u64>,
}
