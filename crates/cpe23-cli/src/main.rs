//! CPE 2.3 validator - command-line entry point
//!
//! Validates one CPE 2.3 formatted string and prints its attribute
//! decomposition. Exits 1 with a usage message on a wrong argument count,
//! and with a clean non-zero status and a human-readable message on any
//! malformed input.

use anyhow::{Context, Result};
use clap::Parser;
use cpe23::Cpe23;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// CPE 2.3 formatted-string validator
#[derive(Parser, Debug)]
#[command(name = "cpe23")]
#[command(version)]
#[command(about = "Validate and decompose a CPE 2.3 formatted string", long_about = None)]
struct Args {
    /// Candidate CPE string, e.g. cpe:2.3:a:apache:log4j:2.14.1:*:*:*:*:*:*:*
    cpe: String,

    /// Print the decomposition as a JSON object
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::try_parse().unwrap_or_else(|err| {
        use clap::error::ErrorKind;
        let _ = err.print();
        match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => std::process::exit(0),
            _ => std::process::exit(1),
        }
    });

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(input = %args.cpe, "validating CPE string");
    let cpe = Cpe23::parse(&args.cpe).context("not a well-formed CPE 2.3 string")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&cpe)?);
    } else {
        for (attribute, component) in cpe.attributes() {
            println!("{attribute:<10} = {component}");
        }
    }
    Ok(())
}
