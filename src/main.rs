use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use drawkit::{default_config_path, init_logging, DrawingConfig, Session, BUILD_DATE, VERSION};

#[derive(Parser, Debug)]
#[command(name = "drawkit", about = "Inspect and rewrite Drawkit drawings")]
struct Cli {
    /// Configuration file (JSON or TOML)
    #[arg(long, env = "DRAWKIT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the items and connections of a drawing
    Info { drawing: PathBuf },
    /// Load, reconnect and rewrite a drawing
    Normalize {
        drawing: PathBuf,
        /// Output file; the input is overwritten when omitted
        out: Option<PathBuf>,
    },
    /// Write the effective configuration to a file
    Config {
        /// Defaults to the platform configuration path
        file: Option<PathBuf>,
    },
    /// Print version information
    Version,
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    let cli = Cli::parse();

    match cli.command {
        Command::Info { drawing } => {
            let mut session = Session::from_config_file(cli.config.as_deref())?;
            session.open(&drawing)?;
            print!("{}", session.summary());
        }
        Command::Normalize { drawing, out } => {
            let out = out.unwrap_or_else(|| drawing.clone());
            let mut session = Session::from_config_file(cli.config.as_deref())?;
            session.open(&drawing)?;
            let made = session.canvas_mut().reconnect_all();
            tracing::info!("Reconnect pass made {} connection(s)", made);
            session.save(&out)?;
        }
        Command::Config { file } => {
            let target = match file {
                Some(path) => path,
                None => default_config_path()?,
            };
            let config = match &cli.config {
                Some(path) => DrawingConfig::load_from_file(path)
                    .with_context(|| format!("failed to load configuration {}", path.display()))?,
                None => DrawingConfig::default(),
            };
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            config.save_to_file(&target)?;
            println!("{}", target.display());
        }
        Command::Version => {
            println!("drawkit {} (built {})", VERSION, BUILD_DATE);
        }
    }

    Ok(())
}
