use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use simplelog::{
    ColorChoice, CombinedLogger, Config, LevelFilter, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};
use tilepack::{
    files::{self, IMAGE_EXTENSION, MAP_EXTENSION},
    hconcat, unpack, PackConfig, Packer, TILE_SIZE_DEFAULT,
};

/// Pack level images into a shared tilesheet plus coordinate maps, or unpack
/// coordinate maps back into level images
#[derive(Parser, Debug)]
#[command(name = "tilepack", version, about)]
struct Args {
    /// Level images to pack, or coordinate maps to unpack
    #[arg(required = true)]
    sources: Vec<PathBuf>,

    /// Tilesheet image to write when packing or read when unpacking
    #[arg(short, long, default_value = "./tilesheet.png")]
    tilesheet: PathBuf,

    /// Directory for the maps or images produced (created if missing)
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Size of each tile in pixels
    #[arg(short, long, default_value_t = TILE_SIZE_DEFAULT)]
    size: u32,

    /// Don't compress tilesheet columns when packing
    #[arg(short, long)]
    no_compress: bool,

    /// Pack fully transparent black tiles like any other tile instead of
    /// leaving those cells empty
    #[arg(long)]
    keep_blank: bool,

    /// When unpacking, also write every rebuilt level side by side to this image
    #[arg(long)]
    preview: Option<PathBuf>,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Also write the log to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Warn;
        }
        return match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };
    }

    fn config(&self) -> PackConfig {
        return PackConfig::default()
            .with_tile_size(self.size)
            .with_compaction(!self.no_compress)
            .with_blank_as_empty(!self.keep_blank);
    }
}

fn init_logging(args: &Args) -> Result<()> {
    let level = args.level();
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if let Some(path) = &args.log_file {
        let file = fs::File::create(path)
            .with_context(|| format!("cannot create log file {}", path.display()))?;
        loggers.push(WriteLogger::new(level, Config::default(), file));
    }
    CombinedLogger::init(loggers)?;
    return Ok(());
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(err) = init_logging(&args) {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }
    return match run(&args) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(failed) => {
            log::error!("{failed} file(s) failed");
            ExitCode::FAILURE
        }
        Err(err) => {
            log::error!("{err:#}");
            ExitCode::FAILURE
        }
    };
}

/// Returns how many files failed without stopping the run
fn run(args: &Args) -> Result<usize> {
    let config = args.config();
    config.validate()?;

    fs::create_dir_all(&args.output)
        .with_context(|| format!("cannot create output directory {}", args.output.display()))?;

    let packing = files::is_raster(&args.sources[0]);
    log::debug!(
        "{} mode, {} source(s), {config:?}",
        if packing { "pack" } else { "unpack" },
        args.sources.len()
    );
    if packing {
        return pack(args, config);
    }
    return unpack_all(args, config);
}

/// Every source feeds the shared pool, so any source that can't be read
/// aborts the run. Maps that can't be written are reported and skipped.
fn pack(args: &Args, config: PackConfig) -> Result<usize> {
    let mut packer = Packer::new(config)?;
    for source in &args.sources {
        let image = files::load_rgba(source)
            .with_context(|| format!("cannot read level {}", source.display()))?;
        packer
            .add_image(&image)
            .with_context(|| format!("cannot pack {}", source.display()))?;
    }
    let packed = packer.finish()?;

    let mut failed = 0;
    for (source, map) in args.sources.iter().zip(&packed.maps) {
        let written = files::output_path(source, &args.output, MAP_EXTENSION)
            .and_then(|path| files::write_map(map, &path).map(|_| path));
        match written {
            Ok(path) => log::info!("{} -> {}", source.display(), path.display()),
            Err(err) => {
                log::error!("cannot write map for {}: {err}", source.display());
                failed += 1;
            }
        }
    }

    files::save_image(&packed.tilesheet, &args.tilesheet)
        .with_context(|| format!("cannot write tilesheet {}", args.tilesheet.display()))?;
    log::info!("wrote tilesheet {}", args.tilesheet.display());
    return Ok(failed);
}

/// One bad map doesn't stop the others
fn unpack_all(args: &Args, config: PackConfig) -> Result<usize> {
    let tilesheet = files::load_rgba(&args.tilesheet)
        .with_context(|| format!("cannot read tilesheet {}", args.tilesheet.display()))?;

    let mut failed = 0;
    let mut rebuilt = Vec::new();
    for source in &args.sources {
        match unpack_one(source, &args.output, &tilesheet, config.tile_size) {
            Ok((path, image)) => {
                log::info!("{} -> {}", source.display(), path.display());
                if args.preview.is_some() {
                    rebuilt.push(image);
                }
            }
            Err(err) => {
                log::error!("{err:#}");
                failed += 1;
            }
        }
    }

    if let Some(preview) = &args.preview {
        let strip = hconcat(&rebuilt)?;
        files::save_image(&strip, preview)
            .with_context(|| format!("cannot write preview {}", preview.display()))?;
        log::info!("wrote preview {}", preview.display());
    }
    return Ok(failed);
}

fn unpack_one(
    source: &Path,
    output: &Path,
    tilesheet: &image::RgbaImage,
    tile_size: u32,
) -> Result<(PathBuf, image::RgbaImage)> {
    let map = files::read_map(source)
        .with_context(|| format!("cannot read map {}", source.display()))?;
    let image = unpack(&map, tilesheet, tile_size)
        .with_context(|| format!("cannot rebuild {}", source.display()))?;
    let path = files::output_path(source, output, IMAGE_EXTENSION)?;
    files::save_image(&image, &path)
        .with_context(|| format!("cannot write {}", path.display()))?;
    return Ok((path, image));
}
