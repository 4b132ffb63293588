use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

mod config;

use config::Config;
use worldcup_engine::{compute_snapshot, Tournament};

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries only the snapshot
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::parse();
    config.validate()?;

    let tournament = Tournament::load(&config.input)?;
    let fingerprint = tournament
        .fingerprint()
        .context("Failed to fingerprint tournament")?;
    info!(
        "Loaded tournament {} (fingerprint {})",
        config.input.display(),
        fingerprint
    );

    let snapshot = compute_snapshot(&tournament).context("Failed to compute tournament snapshot")?;

    if config.require_complete && !snapshot.is_group_stage_complete() {
        anyhow::bail!(
            "only {}/{} groups are complete (--require-complete)",
            snapshot.groups_complete,
            snapshot.groups.len()
        );
    }

    let json = if config.pretty {
        serde_json::to_string_pretty(&snapshot)?
    } else {
        serde_json::to_string(&snapshot)?
    };

    match &config.output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write snapshot to {}", path.display()))?;
            info!("Snapshot written to {}", path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}
