use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod formatters;

use commands::{ApduArgs, DecodeArgs, DescribeArgs};
use formatters::FormatMode;

#[derive(Parser)]
#[command(name = "emv-inspect")]
#[command(about = "EMV TLV Inspector - Decode BER-TLV card data and APDUs from hex")]
#[command(version)]
struct Args {
    /// Output format mode
    #[arg(short, long, value_enum, default_value_t = FormatMode::Human, global = true)]
    format: FormatMode,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode a BER-TLV buffer into a tag tree
    Decode(DecodeArgs),
    /// Split a card response into data and status word, then decode the data
    Response(DecodeArgs),
    /// Parse a command APDU
    Apdu(ApduArgs),
    /// Look up tag names, optionally interpreting a value
    Describe(DescribeArgs),
}

fn main() -> ExitCode {
    // Initialize tracing subscriber with environment-based filtering
    // Set RUST_LOG=debug to see skipped bytes, RUST_LOG=trace for every element
    // Default: warn level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn"))
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let format_mode = args.format;

    let result = match args.command {
        Command::Decode(decode_args) => commands::decode::cmd_decode(&decode_args, format_mode),
        Command::Response(decode_args) => commands::response::cmd_response(&decode_args, format_mode),
        Command::Apdu(apdu_args) => commands::apdu::cmd_apdu(&apdu_args, format_mode),
        Command::Describe(describe_args) => commands::describe::cmd_describe(&describe_args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
