//! `pipershare` -- verify and fetch local Piper voice assets.
//!
//! Provides the following subcommands:
//!
//! - `pipershare list` -- List the voices in the active catalog.
//! - `pipershare ensure` -- Verify a voice's files, copying missing or
//!   corrupted ones from the share directory.
//! - `pipershare find` -- Print a voice's resolved model/config paths.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pipershare_voices::{default_download_dir, find_voice, VoiceManager, DEFAULT_SHARE_DIR};

/// Piper voice asset verification CLI.
#[derive(Parser)]
#[command(name = "pipershare", about = "Piper voice asset verification CLI", version)]
struct Cli {
    /// Enable verbose (debug-level) logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory already holding voice files; repeatable, in lookup
    /// priority order.
    #[arg(long = "data-dir", global = true)]
    data_dirs: Vec<PathBuf>,

    /// Destination for fetched files and the cached catalog.
    #[arg(long, global = true)]
    download_dir: Option<PathBuf>,

    /// Authoritative share directory for voice files.
    #[arg(long, global = true, default_value = DEFAULT_SHARE_DIR)]
    share_dir: PathBuf,

    /// Refresh the cached catalog from the share before loading.
    #[arg(long, global = true)]
    update_voices: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand)]
enum Commands {
    /// List the voices in the active catalog.
    List,

    /// Verify a voice's files, copying missing or corrupted ones.
    Ensure {
        /// Voice name, e.g. `en_US-lessac-medium`.
        voice: String,
    },

    /// Print the resolved model and config paths for a voice.
    Find {
        /// Voice name or a literal path to an `.onnx` model.
        voice: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let download_dir = match cli.download_dir {
        Some(dir) => dir,
        None => default_download_dir()?,
    };
    std::fs::create_dir_all(&download_dir)
        .with_context(|| format!("creating download directory {}", download_dir.display()))?;

    // Fetched files land in the download dir, so it joins the search list.
    let mut data_dirs = cli.data_dirs;
    if !data_dirs.contains(&download_dir) {
        data_dirs.push(download_dir.clone());
    }

    let manager = VoiceManager::with_share_dir(cli.share_dir);

    match cli.command {
        Commands::List => {
            let catalog = manager.load_catalog(&download_dir, cli.update_voices)?;
            let mut names: Vec<&str> = catalog.names().collect();
            names.sort_unstable();
            for name in names {
                println!("{name}");
            }
        }
        Commands::Ensure { voice } => {
            let catalog = manager.load_catalog(&download_dir, cli.update_voices)?;
            manager
                .ensure_voice_exists(&voice, &data_dirs, &download_dir, &catalog)
                .with_context(|| format!("ensuring voice {voice}"))?;
            tracing::info!("Voice {} is ready", voice);
        }
        Commands::Find { voice } => {
            let (model, config) = find_voice(&voice, &data_dirs)?;
            println!("{}", model.display());
            println!("{}", config.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }
}
