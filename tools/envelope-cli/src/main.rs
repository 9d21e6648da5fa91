//! `envelope`: generate keys, seal, open and inspect signed envelopes.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use envelope_cli::{commands, EnvelopeReport};
use envelope_telemetry::{init_telemetry, TelemetryConfig};
use shared_crypto::KeyType;

/// Signed envelope tool
#[derive(Parser, Debug)]
#[command(name = "envelope")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log filter directive (overrides ENVELOPE_LOG_LEVEL / RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Emit JSON log lines (overrides ENVELOPE_JSON_LOGS)
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a private key
    Keygen {
        /// Signature scheme (ed25519 or secp256k1)
        #[arg(long, default_value = "ed25519")]
        key_type: KeyType,

        /// Where to write the protobuf-encoded private key
        #[arg(long)]
        out: PathBuf,
    },

    /// Sign a file into an envelope
    Seal {
        /// Private key file
        #[arg(long)]
        key: PathBuf,

        /// Signing domain
        #[arg(long)]
        domain: String,

        /// Payload type identifier
        #[arg(long)]
        payload_type: String,

        /// Payload file
        #[arg(long)]
        input: PathBuf,

        /// Where to write the envelope
        #[arg(long)]
        out: PathBuf,
    },

    /// Verify an envelope and extract its payload
    Open {
        /// Expected signing domain
        #[arg(long)]
        domain: String,

        /// Envelope file
        #[arg(long)]
        input: PathBuf,

        /// Where to write the verified payload
        #[arg(long)]
        payload_out: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show an envelope's fields without verifying it
    Inspect {
        /// Envelope file
        #[arg(long)]
        input: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn print_report(report: &EnvelopeReport, json: bool) -> Result<()> {
    if json {
        println!("{}", report.to_json()?);
    } else {
        println!("{report}");
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = TelemetryConfig::from_env();
    if let Some(level) = cli.log_level {
        config = config.with_log_level(level);
    }
    if cli.json_logs {
        config = config.with_json_logs(true);
    }
    let _guard = init_telemetry(config)?;

    match cli.command {
        Command::Keygen { key_type, out } => {
            let public_key = commands::keygen(key_type, &out)?;
            println!("{}", hex::encode(public_key.fingerprint()));
        }
        Command::Seal {
            key,
            domain,
            payload_type,
            input,
            out,
        } => {
            commands::seal(&key, &domain, &payload_type, &input, &out)?;
        }
        Command::Open {
            domain,
            input,
            payload_out,
            json,
        } => {
            let report = commands::open(&domain, &input, payload_out.as_deref())?;
            print_report(&report, json)?;
        }
        Command::Inspect { input, json } => {
            let report = commands::inspect(&input)?;
            print_report(&report, json)?;
        }
    }

    Ok(())
}
