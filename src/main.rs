//! otpgen - One-Time Password CLI Tool
//!
//! A command-line tool for generating and verifying RFC 6238 time-based
//! one-time passwords, and for producing otpauth:// provisioning URIs.

use clap::{Parser, Subcommand};
use otpgen_core::init_logging;

mod cli;

use cli::TokenArgs;

#[derive(Parser)]
#[command(name = "otpgen")]
#[command(about = "Time-based one-time password generation and verification")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a code for the current period
    Generate {
        #[command(flatten)]
        options: TokenArgs,
    },
    /// Verify a candidate code against the secret
    Verify {
        /// The candidate code to check
        code: String,

        #[command(flatten)]
        options: TokenArgs,
    },
    /// Print the otpauth:// provisioning URI
    Uri {
        #[command(flatten)]
        options: TokenArgs,

        /// Also render the URI as a terminal QR code
        #[arg(long)]
        qr: bool,
    },
}

fn main() {
    // Initialize logging
    if let Err(e) = init_logging() {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate { options } => cli::generate::run_generate(&options),
        Commands::Verify { code, options } => cli::verify::run_verify(&code, &options),
        Commands::Uri { options, qr } => cli::uri::run_uri(&options, qr),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}
