use crate::workflow::BumpOptions;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "bump-deps",
    about = "Bump pinned dependency versions in pyproject.toml to the latest release",
    version,
    author
)]
pub struct Cli {
    /// Path to pyproject.toml (defaults to ./pyproject.toml)
    #[arg(long, value_name = "FILE", default_value = "pyproject.toml")]
    pub path: PathBuf,

    /// Base URL of the package index JSON API
    #[arg(long, value_name = "URL", env = "BUMP_DEPS_INDEX_URL")]
    pub index_url: Option<String>,

    /// HTTP timeout for each version lookup, in seconds
    #[arg(long, value_name = "SECS", default_value_t = 30)]
    pub timeout: u64,

    /// Report what would change without writing the file
    #[arg(long)]
    pub dry_run: bool,

    /// Only print errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Enable verbose output for debugging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn options(&self) -> BumpOptions {
        BumpOptions {
            manifest_path: self.path.clone(),
            index_url: self.index_url.clone(),
            timeout: Duration::from_secs(self.timeout),
            dry_run: self.dry_run,
            quiet: self.quiet,
        }
    }
}
