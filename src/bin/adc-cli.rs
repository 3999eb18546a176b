//! adc-cli - Command-line interface for hfs-adc
//!
//! Expands the ADC-compressed region of a raw disk image, keeping the
//! uncompressed prefix and the trailing volume header block unchanged.

use clap::Parser;
use hfs_adc::{expand_image, resolve, AdcDecoder, ImageStats};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "adc-cli")]
#[command(about = "Expand the ADC-compressed region of a raw HFS disk image")]
#[command(version)]
struct Cli {
    /// Input disk image
    input: PathBuf,

    /// Output disk image
    #[arg(required_unless_present = "info")]
    output: Option<PathBuf>,

    /// Print the volume header and region information instead of writing output
    #[arg(short, long)]
    info: bool,

    /// Force overwrite of output file
    #[arg(short, long)]
    force: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let result = match (&cli.output, cli.info) {
        (_, true) => show_image_info(&cli.input, cli.verbose),
        (Some(output), false) => {
            expand_file(&cli.input, output, cli.force, cli.verbose, cli.quiet).map(|_| ())
        }
        (None, false) => Err("An output path is required".into()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Path of the temporary file written before the output is committed
fn partial_path(output: &Path) -> PathBuf {
    let mut name = output.as_os_str().to_owned();
    name.push(".partial");
    PathBuf::from(name)
}

fn expand_file(
    input: &Path,
    output: &Path,
    force: bool,
    verbose: bool,
    quiet: bool,
) -> Result<ImageStats, Box<dyn std::error::Error>> {
    // Check if input file exists
    if !input.exists() {
        return Err(format!("Input file '{}' does not exist", input.display()).into());
    }

    // Check if output file exists and force flag
    if output.exists() && !force {
        return Err(format!(
            "Output file '{}' already exists. Use --force to overwrite",
            output.display()
        )
        .into());
    }

    if verbose {
        println!("Expanding '{}' to '{}'", input.display(), output.display());
    }

    let start_time = Instant::now();

    let file = File::open(input)?;
    let input_size = file.metadata()?.len();

    if verbose {
        println!("Input size: {} bytes", input_size);
    }

    // Show progress bar for large files
    let progress = if !quiet && input_size > 1024 * 1024 {
        let pb = ProgressBar::new(input_size);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {bytes}/{total_bytes} {msg}",
                )?
                .progress_chars("#>-"),
        );
        pb.set_message("Expanding...");
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut reader = progress.wrap_read(BufReader::new(file));
    let partial = partial_path(output);

    let result = (|| -> hfs_adc::Result<ImageStats> {
        let mut writer = BufWriter::new(File::create(&partial)?);
        let stats = expand_image(&mut reader, input_size, &mut writer)?;
        writer.into_inner().map_err(|e| e.into_error())?.sync_all()?;
        Ok(stats)
    })();

    let stats = match result {
        Ok(stats) => stats,
        Err(e) => {
            progress.abandon();
            let _ = fs::remove_file(&partial);
            return Err(format!("Expansion failed: {}", e).into());
        }
    };

    fs::rename(&partial, output)?;
    progress.finish_with_message("Expansion complete");

    let expansion_time = start_time.elapsed();

    if !quiet {
        println!("✓ Expansion successful!");
        println!("  Input:      {} bytes", input_size);
        println!("  Output:     {} bytes", stats.total_out);
        println!(
            "  Region:     [{}, {}) -> {} bytes",
            stats.region.start, stats.region.end, stats.decode.bytes_out
        );
        println!("  Ratio:      {:.1}%", stats.decode.ratio());
        println!("  Time:       {:.2?}", expansion_time);

        if verbose {
            println!("  Literals:   {}", stats.decode.literal_count);
            println!(
                "  Matches:    {} ({} overlapping, longest {})",
                stats.decode.match_count,
                stats.decode.overlap_match_count,
                stats.decode.longest_match
            );
        }
    }

    Ok(stats)
}

fn show_image_info(input: &Path, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    // Check if input file exists
    if !input.exists() {
        return Err(format!("Input file '{}' does not exist", input.display()).into());
    }

    let file = File::open(input)?;
    let file_size = file.metadata()?.len();
    let mut reader = BufReader::new(file);

    let region = resolve(&mut reader, file_size)?;
    let header = region.header;

    println!("Volume Image Information:");
    println!("  File: {}", input.display());
    println!("  Size: {} bytes", file_size);
    println!(
        "  Signature: {}",
        String::from_utf8_lossy(&header.signature)
    );
    println!("  Allocation Blocks: {}", header.allocation_block_count);
    println!("  Allocation Block Size: {} bytes", header.allocation_block_size);
    println!("  First Allocation Block: {}", header.first_allocation_block);
    println!(
        "  Compressed Region: [{}, {}) ({} bytes)",
        region.start,
        region.end,
        region.len()
    );

    // Decode into a sink to learn the expanded size
    reader.seek(SeekFrom::Start(region.start))?;
    let mut decoder = AdcDecoder::new(&mut reader, region.len());
    match decoder.decode_to(&mut io::sink()) {
        Ok(stats) => {
            println!("  Expanded Region: {} bytes", stats.bytes_out);
            println!("  Compression Ratio: {:.1}%", stats.ratio());
            if verbose {
                println!("  Literals: {}", stats.literal_count);
                println!("  Matches: {}", stats.match_count);
            }
            println!("  Status: ✓ Valid ADC region");
        }
        Err(e) => {
            println!("  Status: ✗ Invalid or corrupted ADC region");
            if verbose {
                println!("  Error: {}", e);
            }
        }
    }

    io::stdout().flush()?;
    Ok(())
}
