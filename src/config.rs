use std::path::PathBuf;

use clap::Parser;

/// Compute World Cup group standings, third-place qualifiers and the knockout bracket
#[derive(Parser, Debug, Clone)]
#[command(name = "worldcup-engine", version, about)]
pub struct Config {
    /// Tournament document (teams, results, bracket slot table) as JSON
    #[arg(long, env = "TOURNAMENT_PATH")]
    pub input: PathBuf,

    /// Write the snapshot here instead of stdout
    #[arg(long, env = "SNAPSHOT_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Pretty-print the snapshot JSON
    #[arg(long, env = "PRETTY_JSON", default_value = "false")]
    pub pretty: bool,

    /// Fail unless every group has all six results
    #[arg(long, env = "REQUIRE_COMPLETE", default_value = "false")]
    pub require_complete: bool,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.input.is_file() {
            anyhow::bail!("tournament file {} does not exist", self.input.display());
        }
        if let Some(output) = &self.output {
            if output == &self.input {
                anyhow::bail!("--output must not overwrite the tournament input");
            }
            if output.is_dir() {
                anyhow::bail!("--output {} is a directory", output.display());
            }
        }
        Ok(())
    }
}
