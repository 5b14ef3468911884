//! Process command implementation for the geotrack processor CLI
//!
//! This module contains the complete processing workflow: configuration,
//! track discovery, parallel per-track processing, manifest generation and
//! the final report.

use super::shared::{
    ProcessingStats, build_configuration, create_progress_bar, is_critical_error,
    prepare_directories, setup_logging,
};
use crate::app::adapters::filesystem::{clean_directory, discover_track_files, extract_archive};
use crate::app::services::gpx_parser::GpxParser;
use crate::app::services::manifest::ManifestBuilder;
use crate::app::services::track_enricher::{LocationIndex, TrackEnricher};
use crate::app::services::track_writer::TrackWriter;
use crate::cli::args::{OutputFormat, ProcessArgs};
use crate::config::Config;
use crate::{Error, Result};
use futures::StreamExt;
use indicatif::HumanDuration;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Process command runner for the geotrack processor
///
/// This function orchestrates the entire processing workflow:
/// 1. Set up logging and configuration
/// 2. Prepare directories and unpack an archive if requested
/// 3. Discover and process tracks with parallel workers
/// 4. Write the manifest and generate summary statistics
pub async fn run_process(
    args: ProcessArgs,
    cancellation_token: CancellationToken,
) -> Result<ProcessingStats> {
    let start_time = Instant::now();

    // Set up logging
    setup_logging(&args)?;

    info!("Starting geotrack processor");
    debug!("Command line arguments: {:?}", args);

    // Validate arguments
    args.validate()?;

    // Build configuration from defaults plus CLI overrides
    let config = build_configuration(&args)?;
    debug!("Loaded configuration: {:?}", config);

    // Validate and prepare directories
    prepare_directories(&config)?;

    // Unpack the archive first if one was supplied
    if let Some(archive) = &config.processing.archive {
        let members = extract_archive(archive, &config.processing.input_path)?;
        info!("Unpacked {} archive members", members);
    }

    // Discover track files to process
    let track_files = discover_track_files(&config.processing.input_path)?;
    info!("Discovered {} track files", track_files.len());

    if track_files.is_empty() {
        warn!(
            "No track files found in input directory: {}",
            config.processing.input_path.display()
        );
        return Ok(ProcessingStats {
            processing_time: start_time.elapsed(),
            ..Default::default()
        });
    }

    if config.processing.dry_run {
        return run_dry_run(&config, &track_files);
    }

    // Build the location index (injectable, immutable)
    let locations = match &config.processing.locations_file {
        Some(path) => Arc::new(LocationIndex::from_json_file(path)?),
        None => Arc::new(LocationIndex::default()),
    };
    info!("Location index ready: {} known locations", locations.len());

    let enricher = Arc::new(TrackEnricher::new(locations, config.validation.clone()));
    let writer = TrackWriter::new(&config.processing.output_path);

    // Process all tracks, stopping early on ctrl-c
    let mut stats = tokio::select! {
        result = process_tracks(
            &config,
            Arc::clone(&enricher),
            writer,
            &track_files,
            args.show_progress(),
        ) => result,
        _ = cancellation_token.cancelled() => {
            Err(Error::processing_interrupted(
                "Processing cancelled before completion".to_string(),
            ))
        }
    }?;

    // Optionally clean the input directory once everything succeeded
    if args.clean_input {
        info!(
            "Cleaning input directory: {}",
            config.processing.input_path.display()
        );
        clean_directory(&config.processing.input_path);
    }

    stats.processing_time = start_time.elapsed();

    // Generate final report
    generate_final_report(&args, &stats)?;

    Ok(stats)
}

/// Perform a dry run showing what would be processed
fn run_dry_run(config: &Config, track_files: &[PathBuf]) -> Result<ProcessingStats> {
    info!("Performing dry run - no files will be created");

    let writer = TrackWriter::new(&config.processing.output_path);

    for file in track_files {
        let track_name = file
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("unknown");
        info!("Would process track: {}", file.display());
        info!("Would create: {}", writer.output_path(track_name).display());
    }
    info!("Would create: {}", config.manifest_path().display());

    info!(
        "Dry run complete: {} tracks would be processed",
        track_files.len()
    );

    Ok(ProcessingStats {
        tracks_discovered: track_files.len(),
        ..Default::default()
    })
}

/// Summary of one successfully processed track
#[derive(Debug, Clone)]
struct TrackSummary {
    track_name: String,
    points_written: usize,
    valid_points: usize,
    output_file: String,
    bytes_written: u64,
}

/// Process all discovered tracks with a bounded number of parallel workers
///
/// Tracks are independent: each worker carries its own previous-point cursor
/// and there is no shared mutable state. A failed track is skipped (no output
/// file, no manifest entry) unless the error is critical.
async fn process_tracks(
    config: &Config,
    enricher: Arc<TrackEnricher>,
    writer: TrackWriter,
    track_files: &[PathBuf],
    show_progress: bool,
) -> Result<ProcessingStats> {
    let workers = config.resolved_workers();
    info!(
        "Processing {} tracks with {} workers",
        track_files.len(),
        workers
    );

    let progress_bar = if show_progress {
        Some(create_progress_bar(
            track_files.len() as u64,
            "Processing tracks...",
        ))
    } else {
        None
    };

    let mut manifest_builder = ManifestBuilder::new(
        &config.processing.storage_bucket,
        &config.processing.storage_prefix,
    );

    let mut stats = ProcessingStats {
        tracks_discovered: track_files.len(),
        ..Default::default()
    };

    let mut outcomes = futures::stream::iter(track_files.iter().cloned())
        .map(|file| {
            let enricher = Arc::clone(&enricher);
            let writer = writer.clone();
            async move {
                let display = file.display().to_string();
                let result = match tokio::task::spawn_blocking(move || {
                    process_track_file(&file, &enricher, &writer)
                })
                .await
                {
                    Ok(result) => result,
                    Err(e) => Err(Error::processing_interrupted(format!(
                        "Track worker task failed: {}",
                        e
                    ))),
                };
                (display, result)
            }
        })
        .buffer_unordered(workers);

    while let Some((file, result)) = outcomes.next().await {
        match result {
            Ok(summary) => {
                manifest_builder.add_track(&summary.track_name);
                stats.tracks_processed += 1;
                stats.points_processed += summary.points_written;
                stats.valid_points += summary.valid_points;
                stats
                    .output_sizes
                    .push((summary.output_file, summary.bytes_written));

                if let Some(pb) = &progress_bar {
                    pb.set_message(format!("Processed {}", summary.track_name));
                }
            }
            Err(e) => {
                error!("Failed to process {}: {}", file, e);
                stats.errors_encountered += 1;

                // Continue with other tracks unless it's a critical error
                if is_critical_error(&e) {
                    return Err(e);
                }
            }
        }

        if let Some(pb) = &progress_bar {
            pb.inc(1);
        }
    }

    if let Some(pb) = &progress_bar {
        pb.finish_with_message(format!("Processed {} tracks", stats.tracks_processed));
    }

    // Write the manifest once, for successful tracks only
    let manifest_path = config.manifest_path();
    manifest_builder.write(&manifest_path)?;

    info!(
        "Processing complete: {}/{} tracks, {} points ({} valid)",
        stats.tracks_processed, stats.tracks_discovered, stats.points_processed, stats.valid_points
    );

    Ok(stats)
}

/// Process one track file: parse, enrich, write.
///
/// The output file is only created after the whole track enriched
/// successfully, so a malformed input never leaves partial output behind.
fn process_track_file(
    file: &Path,
    enricher: &TrackEnricher,
    writer: &TrackWriter,
) -> Result<TrackSummary> {
    let parser = GpxParser::new();
    let track = parser.parse_file(file)?;

    let enriched = enricher.enrich_track(&track.track_name, &track.points)?;
    let valid_points = enriched.iter().filter(|point| point.is_valid).count();

    let write_result = writer.write_track(&track.track_name, &enriched)?;

    let output_file = write_result
        .output_path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(&track.track_name)
        .to_string();

    Ok(TrackSummary {
        track_name: track.track_name,
        points_written: write_result.rows_written,
        valid_points,
        output_file,
        bytes_written: write_result.bytes_written,
    })
}

/// Generate final processing report
fn generate_final_report(args: &ProcessArgs, stats: &ProcessingStats) -> Result<()> {
    info!("Generating final report");

    match args.output_format {
        OutputFormat::Human => generate_human_report(stats),
        OutputFormat::Json => generate_json_report(stats),
        OutputFormat::Csv => generate_csv_report(stats),
    }
}

/// Generate human-readable report
fn generate_human_report(stats: &ProcessingStats) -> Result<()> {
    let duration = HumanDuration(stats.processing_time);
    let total_size = ProcessingStats::format_size(stats.total_output_size());

    println!("\n🎉 Track Processing Complete!");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📊 Processing Summary:");
    println!("   • Tracks discovered: {}", stats.tracks_discovered);
    println!("   • Tracks processed: {}", stats.tracks_processed);
    println!("   • Points processed: {}", stats.points_processed);
    println!("   • Valid points: {}", stats.valid_points);
    println!("   • Total output size: {}", total_size);
    println!("   • Processing time: {}", duration);

    if stats.errors_encountered > 0 {
        println!("⚠️  Errors encountered: {}", stats.errors_encountered);
    }

    if !stats.output_sizes.is_empty() {
        println!("\n📁 Output Files:");
        for (filename, size) in &stats.output_sizes {
            println!("   • {}: {}", filename, ProcessingStats::format_size(*size));
        }
    }

    println!();
    Ok(())
}

/// Generate JSON report for machine consumption
fn generate_json_report(stats: &ProcessingStats) -> Result<()> {
    let json_stats = serde_json::json!({
        "tracks_discovered": stats.tracks_discovered,
        "tracks_processed": stats.tracks_processed,
        "points_processed": stats.points_processed,
        "valid_points": stats.valid_points,
        "errors_encountered": stats.errors_encountered,
        "processing_time_seconds": stats.processing_time.as_secs_f64(),
        "total_output_size_bytes": stats.total_output_size(),
        "output_files": stats.output_sizes.iter().map(|(name, size)| {
            serde_json::json!({
                "filename": name,
                "size_bytes": size
            })
        }).collect::<Vec<_>>()
    });

    println!("{}", serde_json::to_string_pretty(&json_stats)?);
    Ok(())
}

/// Generate CSV report for data analysis
fn generate_csv_report(stats: &ProcessingStats) -> Result<()> {
    println!("metric,value");
    println!("tracks_discovered,{}", stats.tracks_discovered);
    println!("tracks_processed,{}", stats.tracks_processed);
    println!("points_processed,{}", stats.points_processed);
    println!("valid_points,{}", stats.valid_points);
    println!("errors_encountered,{}", stats.errors_encountered);
    println!(
        "processing_time_seconds,{}",
        stats.processing_time.as_secs_f64()
    );
    println!("total_output_size_bytes,{}", stats.total_output_size());

    Ok(())
}
