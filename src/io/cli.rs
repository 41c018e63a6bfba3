//! Command-line interface for drawing images and maintaining the pool catalogue

use crate::algorithm::executor::{SynthesisConfig, Synthesizer};
use crate::algorithm::pool::ColorPool;
use crate::algorithm::traversal::BlockSize;
use crate::io::catalogue::{default_catalogue_path, load_catalogue, save_catalogue};
use crate::io::configuration::{DEFAULT_ALIGN_CODE, DEFAULT_BLOCK_CODE};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::{decode_source, write_png_atomically};
use crate::io::progress::ProgressManager;
use crate::math::TOTAL_COLORS;
use crate::spatial::Alignment;
use clap::{Args, Parser, Subcommand};
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "allrgb")]
#[command(
    author,
    version,
    about = "Redraw an image using every 24-bit RGB color exactly once"
)]
/// Command-line arguments for the drawing tool
pub struct Cli {
    /// Operation to perform
    #[command(subcommand)]
    pub command: Command,

    /// Suppress progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Available operations
#[derive(Subcommand)]
pub enum Command {
    /// Draw SOURCE using all 16,777,216 colors and save it as a PNG at DEST
    Draw(DrawArgs),
    /// Generate the pool catalogue used to skip color generation
    Catalogue(CatalogueArgs),
}

/// Arguments of the `draw` command
#[derive(Args)]
pub struct DrawArgs {
    /// Source image (PNG, JPEG or GIF, detected from content)
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Output PNG path
    #[arg(value_name = "DEST")]
    pub dest: PathBuf,

    /// Traversal grid code: 0, 1, 2, 3 give 1, 4, 9, 16 interleaved passes
    #[arg(
        value_name = "BLOCK",
        default_value_t = DEFAULT_BLOCK_CODE,
        value_parser = clap::value_parser!(u8).range(0..=3)
    )]
    pub block_code: u8,

    /// Crop alignment: -1 start (top/left), 0 center, 1 end (bottom/right)
    #[arg(
        value_name = "ALIGN",
        default_value_t = DEFAULT_ALIGN_CODE,
        allow_negative_numbers = true,
        value_parser = clap::value_parser!(i8).range(-1..=1)
    )]
    pub align_code: i8,

    /// Pool catalogue to load instead of generating colors
    #[arg(short, long, value_name = "PATH")]
    pub catalogue: Option<PathBuf>,

    /// Always generate colors, ignoring any catalogue
    #[arg(long)]
    pub no_catalogue: bool,
}

impl DrawArgs {
    /// Validated traversal block size
    ///
    /// # Errors
    ///
    /// Returns an error if the block code is outside `0..=3`
    pub fn block_size(&self) -> Result<BlockSize> {
        BlockSize::from_code(self.block_code)
    }

    /// Validated crop alignment
    ///
    /// # Errors
    ///
    /// Returns an error if the alignment code is outside `-1..=1`
    pub fn alignment(&self) -> Result<Alignment> {
        Alignment::from_code(self.align_code)
    }

    /// Synthesis parameters for the full color space
    ///
    /// # Errors
    ///
    /// Returns an error if either code is out of range
    pub fn synthesis_config(&self) -> Result<SynthesisConfig> {
        Ok(SynthesisConfig {
            block_size: self.block_size()?,
            alignment: self.alignment()?,
            ..SynthesisConfig::default()
        })
    }
}

/// Arguments of the `catalogue` command
#[derive(Args)]
pub struct CatalogueArgs {
    /// Catalogue location (default: ~/.allrgb/pool.catalogue)
    #[arg(short, long, value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Regenerate even if a valid catalogue exists
    #[arg(short, long)]
    pub force: bool,
}

/// Executes the parsed command line
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a runner for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the selected command
    ///
    /// # Errors
    ///
    /// Returns an error if argument validation, decoding, synthesis or
    /// writing the output fails
    pub fn run(&self) -> Result<()> {
        match &self.cli.command {
            Command::Draw(args) => self.draw(args),
            Command::Catalogue(args) => Self::catalogue(args),
        }
    }

    fn draw(&self, args: &DrawArgs) -> Result<()> {
        let start_time = Instant::now();
        let config = args.synthesis_config()?;
        if !args.source.is_file() {
            return Err(invalid_parameter(
                "source",
                &args.source.display(),
                &"not a readable file",
            ));
        }

        let source = decode_source(&args.source)?;
        let pool = Self::initial_pool(args);
        let mut synthesizer = Synthesizer::with_pool(&source, pool, &config)?;

        let progress = self.cli.should_show_progress().then(|| {
            let manager = ProgressManager::new(
                synthesizer.aspect().area(),
                synthesizer.plan().pass_count(),
            );
            manager.set_label(&display_name(&args.dest));
            manager
        });

        while synthesizer.execute_row()? {
            if let Some(ref pm) = progress {
                pm.update(synthesizer.assigned(), synthesizer.pass_index());
            }
        }

        if let Some(ref pm) = progress {
            pm.update(synthesizer.assigned(), synthesizer.pass_index());
            pm.finish();
        }

        let canvas = synthesizer.finish()?;
        write_png_atomically(&canvas, &args.dest)?;
        info!(
            "Drew {} in {:.1?}",
            args.dest.display(),
            start_time.elapsed()
        );

        Ok(())
    }

    fn initial_pool(args: &DrawArgs) -> ColorPool {
        let path = if args.no_catalogue {
            None
        } else {
            args.catalogue.clone().or_else(default_catalogue_path)
        };

        if let Some(path) = path {
            match load_catalogue(&path) {
                Ok(Some(pool)) if pool.size() == TOTAL_COLORS => return pool,
                Ok(Some(pool)) => warn!(
                    "Ignoring catalogue {} with {} colors",
                    path.display(),
                    pool.size()
                ),
                Ok(None) => {}
                Err(e) => warn!("Ignoring catalogue: {e}"),
            }
        }

        info!("Generating {TOTAL_COLORS} colors");
        ColorPool::full()
    }

    fn catalogue(args: &CatalogueArgs) -> Result<()> {
        let path = args
            .path
            .clone()
            .or_else(default_catalogue_path)
            .ok_or_else(|| {
                invalid_parameter("path", &"", &"no home directory; pass --path explicitly")
            })?;

        if !args.force {
            match load_catalogue(&path) {
                Ok(Some(pool)) if pool.size() == TOTAL_COLORS => {
                    info!("Catalogue {} is already complete", path.display());
                    return Ok(());
                }
                Ok(_) => {}
                Err(e) => warn!("Replacing catalogue: {e}"),
            }
        }

        info!("Generating {TOTAL_COLORS} colors");
        save_catalogue(&ColorPool::full(), &path)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}
