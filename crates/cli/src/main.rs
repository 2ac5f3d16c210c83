//! CLI for inventorying, rewriting and rearranging PowerPoint decks.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use deck_core::LengthUnit;
use deck_pptx::{DeckBuilder, InventoryExtractor, InventoryOptions, Rearranger, Replacer, SlideSpec};
use std::path::PathBuf;

/// Inventory, rewrite and rearrange .pptx presentations.
#[derive(Parser, Debug)]
#[command(name = "deck")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a JSON inventory of every slide, shape and paragraph
    Inventory {
        /// Input presentation (.pptx)
        input: PathBuf,

        /// Output JSON file
        output: PathBuf,

        /// Unit for positions and sizes (inches, points, emu)
        #[arg(short, long, default_value_t = LengthUnit::Inches)]
        unit: LengthUnit,

        /// Write compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },

    /// Replace shape text from a replacement JSON document
    Replace {
        /// Input presentation (.pptx)
        input: PathBuf,

        /// Replacement JSON keyed by slide-N / shape-N
        replacements: PathBuf,

        /// Output presentation (.pptx)
        output: PathBuf,
    },

    /// Keep, reorder and duplicate slides by zero-based index
    Rearrange {
        /// Input presentation (.pptx)
        input: PathBuf,

        /// Output presentation (.pptx)
        output: PathBuf,

        /// Comma-separated slide indices, e.g. "0,2,2,1"
        #[arg(allow_hyphen_values = true)]
        indices: String,
    },

    /// Create a new presentation with title-and-body slides
    New {
        /// Output presentation (.pptx)
        output: PathBuf,

        /// Number of slides
        #[arg(short, long, default_value = "1")]
        slides: usize,

        /// Slide width in inches
        #[arg(long, default_value = "13.333")]
        width: f64,

        /// Slide height in inches
        #[arg(long, default_value = "7.5")]
        height: f64,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    match args.command {
        Command::Inventory {
            input,
            output,
            unit,
            compact,
        } => {
            log::debug!("Inventorying {} in {}", input.display(), unit);
            let options = InventoryOptions::default()
                .with_unit(unit)
                .with_pretty(!compact);
            let inventory = InventoryExtractor::new()
                .with_options(options)
                .run(&input, &output)
                .with_context(|| {
                    format!(
                        "Failed to inventory {} into {}",
                        input.display(),
                        output.display()
                    )
                })?;
            println!(
                "Inventoried {} slides, {} shapes: {}",
                inventory.slide_count(),
                inventory.shape_count(),
                output.display()
            );
        }
        Command::Replace {
            input,
            replacements,
            output,
        } => {
            let count = Replacer::new()
                .run(&input, &replacements, &output)
                .with_context(|| {
                    format!(
                        "Failed to apply {} to {}",
                        replacements.display(),
                        input.display()
                    )
                })?;
            println!("Replaced text in {} shapes: {}", count, output.display());
        }
        Command::Rearrange {
            input,
            output,
            indices,
        } => {
            log::debug!("Rearranging {} as [{}]", input.display(), indices);
            let count = Rearranger::new()
                .run(&input, &output, &indices)
                .with_context(|| format!("Failed to rearrange {}", input.display()))?;
            println!("Wrote {} slides: {}", count, output.display());
        }
        Command::New {
            output,
            slides,
            width,
            height,
        } => {
            let builder = DeckBuilder::new()
                .with_slide_size(width, height)
                .add_slides((1..=slides).map(|n| {
                    SlideSpec::title_and_body(&format!("Slide {}", n), &format!("Content for slide {}", n))
                }));
            builder
                .save(&output)
                .with_context(|| format!("Failed to create {}", output.display()))?;
            println!("Created {} slides: {}", slides, output.display());
        }
    }

    Ok(())
}
