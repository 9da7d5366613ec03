use clap::{Parser, Subcommand};
use squeeze::compress::{CompressError, SearchEvent, compress_with_events};
use squeeze::gallery::Gallery;
use squeeze::imaging::{
    BackendError, ImageBackend, RustBackend, file_size, get_dimensions, is_supported_input,
    load_source, supported_input_extensions,
};
use squeeze::{config, output};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "squeeze")]
#[command(about = "Shrink photos to a fixed JPEG quality or a target file size")]
#[command(long_about = "\
Shrink photos to a fixed JPEG quality or a target file size

Two modes:

  --quality N     Encode once at JPEG quality N (0-100).
  --target-kb N   Start at quality 100 and step down by 5 until the file
                  is at most N KB. If even quality 5 is too large, the
                  smallest attempt is kept and a warning is printed.

With neither flag the mode from squeeze.toml applies (default: quality 50).
Results are saved to the gallery directory (default: Pictures/). Existing
files are never overwritten: photo.jpg, photo (1).jpg, photo (2).jpg, ...

Run 'squeeze gen-config' to generate a documented squeeze.toml.")]
#[command(version)]
struct Cli {
    /// Config file
    #[arg(long, default_value = "squeeze.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct CompressArgs {
    /// Image to compress (JPEG, PNG, TIFF, WebP)
    input: PathBuf,

    /// Encode once at this JPEG quality (0-100)
    #[arg(long, conflicts_with = "target_kb")]
    #[arg(value_parser = clap::value_parser!(u32).range(0..=100))]
    quality: Option<u32>,

    /// Lower quality until the file is at most this many KB
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    target_kb: Option<u64>,

    /// Gallery directory to save into
    #[arg(long)]
    gallery: Option<String>,

    /// File name for the saved image
    #[arg(long)]
    name: Option<String>,

    /// Compress and report, but do not save
    #[arg(long)]
    dry_run: bool,

    /// Print a JSON report instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Compress an image and save it to the gallery
    Compress(CompressArgs),
    /// Show dimensions and file size of an image
    Info {
        /// Image to inspect
        input: PathBuf,
    },
    /// Print a stock squeeze.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Compress(args) => {
            let config = config::load_config(&cli.config)?
                .with_overrides(args.quality, args.target_kb, args.gallery, args.name)?;
            run_compress(
                &RustBackend::new(),
                &config,
                &args.input,
                args.dry_run,
                args.json,
            )?;
        }
        Command::Info { input } => {
            let dims = get_dimensions(&RustBackend::new(), &input)?;
            let size = file_size(&input)?;
            output::print_info(&input, dims, size);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn run_compress(
    backend: &impl ImageBackend,
    config: &config::Config,
    input: &Path,
    dry_run: bool,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !is_supported_input(input) {
        return Err(CompressError::InvalidInput(format!(
            "{} is not a supported image (expected one of: {})",
            input.display(),
            supported_input_extensions().join(", ")
        ))
        .into());
    }
    let invalid = |e: BackendError| CompressError::InvalidInput(e.to_string());
    let source_size = file_size(input).map_err(invalid)?;
    let image = load_source(backend, input).map_err(invalid)?;
    let source = output::SourceSummary {
        path: input.display().to_string(),
        width: image.width(),
        height: image.height(),
        size: source_size,
    };
    let policy = config.compression.policy();

    if !json {
        output::print_lines(&output::format_source(&source));
        println!("{}", output::format_search_header(&policy));
    }

    // Encode on a worker thread; this thread streams progress as it arrives.
    let (tx, rx) = std::sync::mpsc::channel::<SearchEvent>();
    let (result, events) = std::thread::scope(|s| {
        let worker = s.spawn(|| compress_with_events(backend, &image, policy, Some(tx)));
        let mut events = Vec::new();
        for event in rx {
            if !json {
                println!("{}", output::format_search_event(&event));
            }
            events.push(event);
        }
        let result = worker
            .join()
            .unwrap_or_else(|panic| std::panic::resume_unwind(panic));
        (result, events)
    });
    let result = result?;

    let published = if dry_run {
        None
    } else {
        let gallery = Gallery::new(&config.gallery.directory);
        Some(gallery.publish(result.bytes(), &config.gallery.file_name)?)
    };

    if json {
        let report = output::CompressReport::new(source, &result, events, published);
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        output::print_lines(&output::format_result(&result, source_size));
        output::print_lines(&output::format_published(published.as_ref()));
    }

    Ok(())
}
