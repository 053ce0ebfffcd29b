//! Oracle Relay - Main Entry Point
//!
//! Runs the relay's startup sequence and exposes its checkpoint and signing
//! operations from the command line.

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine};
use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use oracle_relay::config::{resolve_config_path, Settings};
use oracle_relay::models::Digest;
use oracle_relay::services::AttestationService;

#[derive(Parser)]
#[command(name = "oracle-relay", version)]
#[command(about = "Credential and checkpoint layer of the oracle relay", long_about = None)]
struct Cli {
    /// Config file (overridden by ORACLE_RELAY_CONFIG)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the resume offset and loaded key material
    Status,
    /// Sign a digest and print the base64 signature
    #[command(group(ArgGroup::new("input").required(true).args(["data", "digest"])))]
    Sign {
        /// Text to hash with SHA-256 before signing
        #[arg(long)]
        data: Option<String>,
        /// Base64 of an already computed 32-byte digest
        #[arg(long)]
        digest: Option<String>,
    },
    /// Persist a new offset
    Commit {
        offset: u64,
    },
}

fn main() -> ExitCode {
    // Default: info level for oracle_relay, warn for everything else
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,oracle_relay=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config_path = resolve_config_path(cli.config);
    let settings = Settings::load_from(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    info!("Starting Oracle Relay v{}", oracle_relay::VERSION);

    // Nothing below runs unless every credential and the offset loaded.
    let service =
        AttestationService::start(&settings).context("Refusing to start without credentials")?;

    match cli.command {
        Commands::Status => {
            println!("resume offset: {}", service.resume_offset());
            println!("listen address: {}", settings.server.listen_addr());
            println!("chain endpoint: {}", settings.chain.endpoint);
            println!("signing key: {} bits", service.signing_key().size() * 8);
            let wallet = if service.wallet().expose().is_empty() {
                "empty"
            } else {
                "loaded"
            };
            println!("wallet secret: {}", wallet);
        }
        Commands::Sign { data, digest } => {
            let digest = if let Some(encoded) = digest {
                STANDARD
                    .decode(encoded.trim())
                    .context("Digest is not valid base64")?
            } else if let Some(data) = data {
                Digest::sha256(data.as_bytes()).as_bytes().to_vec()
            } else {
                anyhow::bail!("either --data or --digest is required");
            };

            let signature = service.sign(&digest)?;
            println!("{}", signature);
        }
        Commands::Commit { offset } => {
            service.commit(offset)?;
            info!("Offset {} saved", offset);
        }
    }

    Ok(())
}
