use clap::Parser;
use geotrack_processor::cli::{args::Args, commands};
use std::process;
use tokio_util::sync::CancellationToken;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    // Create async runtime and run the main command logic with signal handling
    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        // Create cancellation token for coordinating graceful shutdown
        let cancellation_token = CancellationToken::new();

        // Set up graceful shutdown handling
        let shutdown_signal = async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to install CTRL+C signal handler");

            // Cancel all operations when Ctrl+C is received
            cancellation_token.cancel();
        };

        // Run the main command with cancellation support
        tokio::select! {
            result = commands::run(args, cancellation_token.clone()) => {
                result
            }
            _ = shutdown_signal => {
                eprintln!("\nReceived CTRL+C, shutting down gracefully...");
                Err(geotrack_processor::Error::processing_interrupted(
                    "Processing interrupted by user".to_string()
                ))
            }
        }
    });

    match result {
        Ok(_stats) => {
            // Success - stats have already been reported by the command
            process::exit(0);
        }
        Err(error) => {
            // Error occurred - print to stderr and exit with error code
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Geotrack Processor - GPS Track Converter");
    println!("========================================");
    println!();
    println!("Convert recorded GPS tracks (GPX files) into validated, location-tagged");
    println!("pipe-delimited tables plus a JSON manifest for bulk loading.");
    println!();
    println!("USAGE:");
    println!("    geotrack-processor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    process     Process GPX tracks into delimited tables (main command)");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Process tracks from the default downloads directory:");
    println!("    geotrack-processor process");
    println!();
    println!("    # Process a fresh archive with custom paths and threshold:");
    println!("    geotrack-processor process --archive tracks.zip --input /data/tracks \\");
    println!("                               --output /data/uploads --distance-threshold 500");
    println!();
    println!("    # Preview without writing anything:");
    println!("    geotrack-processor process --dry-run -v");
    println!();
    println!("For detailed help on any command, use:");
    println!("    geotrack-processor <COMMAND> --help");
}
