//! # eplabel CLI
//!
//! Command-line interface for EPL2 label printing.
//!
//! ## Usage
//!
//! ```bash
//! # Print the calibration outline
//! eplabel calibrate
//!
//! # Two rows of text, centred
//! eplabel text --centre "S/N 00000001" "REV B"
//!
//! # Bar code, three copies, with a custom config
//! eplabel --config label.json barcode --quantity 3 S/N:00000001
//!
//! # Show the commands instead of printing
//! eplabel --dry-run qr https://example.com --caption ERP-1234
//! ```
//!
//! Set `RUST_LOG=debug` to see every batch sent.

use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use eplabel::{
    BarcodeOptions, DeviceHandle, LabelConfig, LabelError, LabelPrinter, MemoryTransport,
    Placement, PrintReport, Transport,
    components::{BinaryImage, HAlign},
};

/// eplabel - EPL2 label printer utility
#[derive(Parser, Debug)]
#[command(name = "eplabel")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON label configuration (defaults to a 50x20mm GK420t scroll)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Printer device path
    #[arg(long, value_name = "PATH", global = true, conflicts_with = "dry_run")]
    device: Option<PathBuf>,

    /// Write the EPL2 commands to stdout instead of a printer
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print an outline of the label with tuning hints
    Calibrate,

    /// Print rows of text, continuing on further labels as needed
    Text {
        /// One argument per row
        #[arg(required = true)]
        lines: Vec<String>,

        /// Font size (1-5)
        #[arg(long, default_value_t = 3)]
        font: u8,

        /// Top of the first row in dots (centred when omitted)
        #[arg(long)]
        start_y: Option<u32>,

        /// Centre each row across the label
        #[arg(long)]
        centre: bool,
    },

    /// Print one line in the largest font, cropped to fit
    Title { text: String },

    /// Print a Code 128 bar code with a caption
    Barcode {
        text: String,

        /// Bar height in mm (half the label when omitted)
        #[arg(long)]
        height_mm: Option<f32>,

        /// Omit the caption
        #[arg(long)]
        no_caption: bool,

        /// White-on-black caption
        #[arg(long)]
        invert: bool,

        #[arg(long, default_value_t = 1)]
        quantity: u32,
    },

    /// Print a QR code, optionally with caption lines below it
    Qr {
        data: String,

        /// Dots per QR module
        #[arg(long, default_value_t = 3)]
        scale: u32,

        /// Caption line (repeatable)
        #[arg(long)]
        caption: Vec<String>,

        #[arg(long, default_value_t = 1)]
        quantity: u32,
    },

    /// Print an outlined box, centred
    #[command(name = "box")]
    Outline {
        width_mm: f32,
        length_mm: f32,

        #[arg(long, default_value_t = 0.25)]
        stroke_mm: f32,

        #[arg(long, default_value_t = 1)]
        quantity: u32,
    },

    /// Print an image file (PNG, ...) or a text file of 0/1 rows
    Image {
        path: PathBuf,

        /// Luma below this prints black
        #[arg(long, default_value_t = 128)]
        threshold: u8,

        #[arg(long, default_value_t = 1)]
        quantity: u32,
    },

    /// Enable the cutter
    Cut {
        /// Cut after every N labels instead of every label
        #[arg(long, value_name = "N")]
        every: Option<u32>,
    },

    /// Calibrate the gap sensor for a new scroll
    Sense,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), LabelError> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => LabelConfig::load(path)?,
        None => LabelConfig::default(),
    };

    if cli.dry_run {
        let mut printer = LabelPrinter::new(config, MemoryTransport::new())?;
        execute(&mut printer, cli.command)?;

        let mut stdout = io::stdout().lock();
        for batch in printer.transport().batches() {
            stdout.write_all(batch)?;
        }
        stdout.flush()?;
    } else {
        let device = cli.device.map(DeviceHandle::new).unwrap_or_default();
        let mut printer = LabelPrinter::open(config, &device)?;
        execute(&mut printer, cli.command)?;
    }

    Ok(())
}

/// Configure the printer and run one command.
fn execute<T: Transport>(
    printer: &mut LabelPrinter<T>,
    command: Commands,
) -> Result<(), LabelError> {
    if let Commands::Sense = command {
        return printer.auto_sense();
    }

    printer.configure()?;

    let report = match command {
        Commands::Calibrate => printer.print_calibrator()?,
        Commands::Text {
            lines,
            font,
            start_y,
            centre,
        } => {
            let align = if centre { HAlign::Centre } else { HAlign::Left };
            printer.print_text_aligned(&lines, font, start_y, align)?
        }
        Commands::Title { text } => printer.print_title(&text)?,
        Commands::Barcode {
            text,
            height_mm,
            no_caption,
            invert,
            quantity,
        } => {
            let options = BarcodeOptions {
                height_mm,
                caption: !no_caption,
                invert_caption: invert,
                quantity,
            };
            printer.print_barcode(&text, &options)?
        }
        Commands::Qr {
            data,
            scale,
            caption,
            quantity,
        } => {
            if caption.is_empty() {
                printer.print_qr(&data, scale, &Placement::default().quantity(quantity))?
            } else {
                printer.print_qr_with_text(&data, &caption, scale, quantity)?
            }
        }
        Commands::Outline {
            width_mm,
            length_mm,
            stroke_mm,
            quantity,
        } => printer.print_box(
            width_mm,
            length_mm,
            stroke_mm,
            &Placement::default().quantity(quantity),
        )?,
        Commands::Image {
            path,
            threshold,
            quantity,
        } => {
            let image = load_image(&path, threshold)?;
            printer.print_binary_image(&image, &Placement::default().quantity(quantity))?
        }
        Commands::Cut { every } => {
            match every {
                Some(n) => printer.cut_every(n)?,
                None => printer.cut()?,
            }
            return Ok(());
        }
        Commands::Sense => PrintReport::default(),
    };

    for warning in &report.warnings {
        eprintln!("Warning: {}", warning);
    }
    log::info!("{} labels printed", report.labels);
    Ok(())
}

/// Load a bitmap: `.txt` files hold rows of `0` (black) and `1` (white),
/// anything else is decoded as an image and thresholded.
fn load_image(path: &Path, threshold: u8) -> Result<BinaryImage, LabelError> {
    if path.extension().is_some_and(|ext| ext == "txt") {
        let text = fs::read_to_string(path)?;
        let rows: Vec<&str> = text.lines().filter(|row| !row.trim().is_empty()).collect();
        return BinaryImage::from_rows(&rows);
    }

    let image = image::open(path).map_err(|e| {
        LabelError::MalformedBitmap(format!("Failed to load {}: {}", path.display(), e))
    })?;
    BinaryImage::from_luma(&image.to_luma8(), threshold)
}
