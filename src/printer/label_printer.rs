//! # Label Printer
//!
//! [`LabelPrinter`] is the high-level API: it measures objects, places them
//! on the label, spreads copies across the scroll columns and sends each
//! finished row of labels.
//!
//! ## Print Jobs
//!
//! Every `print_*` call is one job:
//!
//! ```text
//! Idle ──► Building ──► Flushed ──► Idle
//!            │   ▲
//!            └───┘ label full: next column, or P1 + send and a new row
//! ```
//!
//! On a multi-column scroll one `P1` prints a whole row of labels, so the
//! buffer is only sent when every column of the row is filled, or when the
//! job ends.
//!
//! With [`LabelPrinter::set_keep_row_open`] a job that ends part way along
//! a row leaves it unsent, and the next job continues in the following
//! column. [`LabelPrinter::finish_row`] prints whatever is left.
//!
//! ## Cropping
//!
//! | Call | Too wide |
//! |------|----------|
//! | `print_title` | trailing characters dropped |
//! | `print_barcode` | trailing characters dropped |
//! | `print_text` | printed anyway, reported as a warning |

use crate::components::{
    Barcode, BinaryImage, BoxShape, HAlign, Label, Line, TITLE_FONT, Text, VAlign,
};
use crate::encoder::EplEncoder;
use crate::error::{LabelError, LabelWarning};
use crate::protocol::text::TextStyle;
use crate::render::{MatrixEncoder, QrRenderer};
use crate::transport::{DeviceHandle, DeviceTransport, Transport};

use super::config::LabelConfig;
use super::layout::{Cursor, RowPlan};

/// Guide text printed by [`LabelPrinter::print_calibrator`], with its y
/// position in dots.
const CALIBRATION_GUIDE: [(&str, u32); 6] = [
    ("Increase", 5),
    ("LENGTH_ADJUST", 20),
    ("to move up", 35),
    ("Decrease", 60),
    ("X_OFFSET", 75),
    ("to move left", 90),
];

/// Caption fonts tried before falling back to font 1.
const LARGE_CAPTION_FONTS: [u8; 2] = [3, 2];

/// Where a single object goes on each label, and how many labels to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub h: HAlign,
    pub v: VAlign,
    pub quantity: u32,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            h: HAlign::Centre,
            v: VAlign::Middle,
            quantity: 1,
        }
    }
}

impl Placement {
    /// Explicit top-left corner in label dots.
    pub fn at(x: u32, y: u32) -> Self {
        Self {
            h: HAlign::At(x),
            v: VAlign::At(y),
            quantity: 1,
        }
    }

    pub fn aligned(h: HAlign, v: VAlign) -> Self {
        Self {
            h,
            v,
            quantity: 1,
        }
    }

    pub fn quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }
}

/// Options for [`LabelPrinter::print_barcode`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarcodeOptions {
    /// Bar height; half the label length when `None`
    pub height_mm: Option<f32>,
    /// Print the payload as text below the bars
    pub caption: bool,
    /// White-on-black caption
    pub invert_caption: bool,
    pub quantity: u32,
}

impl Default for BarcodeOptions {
    fn default() -> Self {
        Self {
            height_mm: None,
            caption: true,
            invert_caption: false,
            quantity: 1,
        }
    }
}

/// Outcome of a print job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrintReport {
    /// Label positions filled
    pub labels: u32,
    /// Print markers sent (one per scroll row)
    pub batches: u32,
    pub warnings: Vec<LabelWarning>,
}

/// # Label Printer
///
/// ```
/// use eplabel::{LabelConfig, LabelPrinter, MemoryTransport};
///
/// let mut printer = LabelPrinter::new(LabelConfig::default(), MemoryTransport::new())?;
/// let report = printer.print_text(&["S/N 0001", "REV B"], 3, None)?;
///
/// assert_eq!(report.labels, 1);
/// assert_eq!(printer.transport().batches().len(), 1);
/// # Ok::<(), eplabel::LabelError>(())
/// ```
pub struct LabelPrinter<T: Transport> {
    encoder: EplEncoder<T>,
    label: Label,
    cursor: Cursor,
    qr: QrRenderer,
    keep_row_open: bool,
}

impl LabelPrinter<DeviceTransport> {
    /// Open the printer behind `device`.
    pub fn open(config: LabelConfig, device: &DeviceHandle) -> Result<Self, LabelError> {
        Self::new(config, device.open()?)
    }
}

impl<T: Transport> LabelPrinter<T> {
    pub fn new(config: LabelConfig, transport: T) -> Result<Self, LabelError> {
        let label = config.label()?;
        let mut encoder = EplEncoder::new(config, transport)?;
        encoder.clear_command();
        Ok(Self {
            encoder,
            label,
            cursor: Cursor::default(),
            qr: QrRenderer::default(),
            keep_row_open: false,
        })
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn config(&self) -> &LabelConfig {
        self.encoder.config()
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn encoder(&self) -> &EplEncoder<T> {
        &self.encoder
    }

    pub fn encoder_mut(&mut self) -> &mut EplEncoder<T> {
        &mut self.encoder
    }

    pub fn transport(&self) -> &T {
        self.encoder.transport()
    }

    pub fn into_transport(self) -> T {
        self.encoder.into_transport()
    }

    /// Renderer used by [`Self::print_qr`] and [`Self::print_qr_with_text`].
    pub fn set_qr_renderer(&mut self, renderer: QrRenderer) {
        self.qr = renderer;
    }

    /// Let consecutive jobs share a scroll row.
    ///
    /// A job that does not fill the last column leaves the row in the
    /// buffer; call [`Self::finish_row`] after the final job. Setup calls
    /// (`configure`, `cut`, `auto_sense`) clear the buffer and discard an
    /// open row.
    pub fn set_keep_row_open(&mut self, keep: bool) {
        self.keep_row_open = keep;
    }

    /// Print a partially filled row left by an earlier job.
    ///
    /// Returns `false` when no row was open.
    pub fn finish_row(&mut self) -> Result<bool, LabelError> {
        if self.cursor.column == 0 {
            return Ok(false);
        }
        self.commit_row()?;
        Ok(true)
    }

    // ========================================================================
    // DEVICE SETUP
    // ========================================================================

    /// Send the setup sequence from the configuration, preceded by a gap
    /// sensor calibration when `auto_calibrate` is set.
    pub fn configure(&mut self) -> Result<(), LabelError> {
        self.cursor = Cursor::default();
        self.encoder.clear_command();
        if self.encoder.config().auto_calibrate {
            self.encoder.auto_sense();
        }
        self.encoder.configure()?.send_command()?;
        log::info!("printer configured");
        Ok(())
    }

    /// Calibrate the gap sensor for a newly loaded scroll.
    pub fn auto_sense(&mut self) -> Result<(), LabelError> {
        self.cursor = Cursor::default();
        self.encoder.clear_command().auto_sense().send_command()?;
        Ok(())
    }

    /// Enable the cutter after every label.
    ///
    /// ## Errors
    ///
    /// `FeatureUnavailable` if the configuration has no cutter.
    pub fn cut(&mut self) -> Result<(), LabelError> {
        self.require_cutter()?;
        self.cursor = Cursor::default();
        self.encoder.clear_command().set_cut(true).send_command()?;
        Ok(())
    }

    /// Enable the cutter after every `quantity` labels.
    pub fn cut_every(&mut self, quantity: u32) -> Result<(), LabelError> {
        self.require_cutter()?;
        self.cursor = Cursor::default();
        self.encoder
            .clear_command()
            .set_cut_after(quantity)?
            .send_command()?;
        Ok(())
    }

    fn require_cutter(&self) -> Result<(), LabelError> {
        if self.encoder.config().cutter_enabled {
            Ok(())
        } else {
            Err(LabelError::FeatureUnavailable("no cutter is configured".into()))
        }
    }

    // ========================================================================
    // PRINT JOBS
    // ========================================================================

    /// Text rows, top to bottom, continuing on further labels when the
    /// label is full.
    ///
    /// Rows are left aligned. Without `start_y` the rows of a full label are
    /// centred vertically. Rows wider than the label are printed uncropped
    /// and listed in the report's warnings.
    pub fn print_text<S: AsRef<str>>(
        &mut self,
        texts: &[S],
        font_size: u8,
        start_y: Option<u32>,
    ) -> Result<PrintReport, LabelError> {
        self.print_text_aligned(texts, font_size, start_y, HAlign::Left)
    }

    /// [`Self::print_text`] with every row placed across the label by
    /// `align`, each row on its own.
    pub fn print_text_aligned<S: AsRef<str>>(
        &mut self,
        texts: &[S],
        font_size: u8,
        start_y: Option<u32>,
        align: HAlign,
    ) -> Result<PrintReport, LabelError> {
        let rows = texts
            .iter()
            .map(|t| Text::new(t.as_ref(), font_size))
            .collect::<Result<Vec<_>, _>>()?;
        if rows.is_empty() {
            return Ok(PrintReport::default());
        }

        let mut warnings = Vec::new();
        for row in &rows {
            if row.width_dot() > self.label.width_dot {
                log::warn!(
                    "text '{}' is {} dots wide, label is {}",
                    row.text(),
                    row.width_dot(),
                    self.label.width_dot
                );
                warnings.push(LabelWarning::PayloadTooWide {
                    text: row.text().to_string(),
                    width_dot: row.width_dot(),
                    max_width_dot: self.label.width_dot,
                });
            }
        }

        let plan = RowPlan::new(self.label.length_dot, font_size, rows.len(), start_y)?;
        let pages: Vec<&[Text]> = rows.chunks(plan.rows_per_label).collect();
        let label = self.label;

        let mut report = self.print_labels(pages.len() as u32, |encoder, page| {
            let mut next_y = plan.start_y_dot;
            for (index, row) in pages[page as usize].iter().enumerate() {
                let (x, _) = label.align(row.dimensions(), align, VAlign::Top);
                let y = plan.row_y(index);
                encoder.encode_text(row.text(), x, y, font_size)?;
                next_y = y + plan.pitch_dot;
            }
            Ok(next_y)
        })?;
        report.warnings = warnings;
        Ok(report)
    }

    /// One line in the largest font, centred, cropped to the label width.
    pub fn print_title(&mut self, text: &str) -> Result<PrintReport, LabelError> {
        let full = Text::new(text, TITLE_FONT)?;
        let title = Text::fitted(text, TITLE_FONT, self.label.width_dot)?.ok_or(
            LabelError::PayloadTooWide {
                width_dot: full.width_dot(),
                max_width_dot: self.label.width_dot,
            },
        )?;

        let mut warnings = Vec::new();
        if title.text() != text {
            log::warn!("title '{}' cropped to '{}'", text, title.text());
            warnings.push(LabelWarning::Cropped {
                original: text.to_string(),
                printed: title.text().to_string(),
            });
        }

        let (x, y) = self
            .label
            .align(title.dimensions(), HAlign::Centre, VAlign::Middle);
        let mut report = self.print_labels(1, |encoder, _| {
            encoder.encode_text(title.text(), x, y, TITLE_FONT)?;
            Ok(y + title.height_dot())
        })?;
        report.warnings = warnings;
        Ok(report)
    }

    /// Code 128 bar code, top centre, with the payload as a caption below.
    ///
    /// The payload is cropped until the bars and quiet zones fit the label.
    /// The caption uses the largest font (3 to 1) narrower than the label
    /// minus 2 mm.
    pub fn print_barcode(
        &mut self,
        text: &str,
        options: &BarcodeOptions,
    ) -> Result<PrintReport, LabelError> {
        let conv = self.encoder.config().converter();
        let height_mm = options.height_mm.unwrap_or(self.label.length_mm / 2.0);
        let barcode = Barcode::new(text, height_mm, Some(self.label.width_dot), &conv)?;

        let mut warnings = Vec::new();
        if barcode.is_cropped() {
            warnings.push(LabelWarning::Cropped {
                original: text.to_string(),
                printed: barcode.text().to_string(),
            });
        }

        let (bar_x, bar_y) = self
            .label
            .align(barcode.dimensions(), HAlign::Centre, VAlign::Top);
        let caption = if options.caption {
            let caption = self.caption_text(barcode.text())?;
            let (x, _) = self
                .label
                .align(caption.dimensions(), HAlign::Centre, VAlign::Top);
            let y = bar_y + barcode.height_dot() + caption_gap(&caption);
            Some((caption, x, y))
        } else {
            None
        };
        let style = if options.invert_caption {
            TextStyle::default().reversed()
        } else {
            TextStyle::default()
        };

        let mut report = self.print_labels(options.quantity, |encoder, _| {
            encoder.encode_barcode_c128(
                barcode.text(),
                bar_x,
                bar_y,
                barcode.height_dot(),
                false,
            )?;
            let mut bottom = bar_y + barcode.height_dot();
            if let Some((caption, x, y)) = &caption {
                encoder.encode_text_styled(caption.text(), *x, *y, caption.font_size(), &style)?;
                bottom = y + caption.height_dot();
            }
            Ok(bottom)
        })?;
        report.warnings = warnings;
        Ok(report)
    }

    pub fn print_binary_image(
        &mut self,
        image: &BinaryImage,
        placement: &Placement,
    ) -> Result<PrintReport, LabelError> {
        let (x, y) = self.label.align(image.dimensions(), placement.h, placement.v);
        self.print_labels(placement.quantity, |encoder, _| {
            encoder.encode_image(image, x, y)?;
            Ok(y + image.length_dot())
        })
    }

    /// Outlined box, `stroke_mm` thick.
    pub fn print_box(
        &mut self,
        width_mm: f32,
        length_mm: f32,
        stroke_mm: f32,
        placement: &Placement,
    ) -> Result<PrintReport, LabelError> {
        let conv = self.encoder.config().converter();
        let shape = BoxShape::new(width_mm, length_mm, stroke_mm, &conv)?;
        let (x, y) = self.label.align(shape.dimensions(), placement.h, placement.v);
        self.print_labels(placement.quantity, |encoder, _| {
            encoder.encode_box(shape.width_dot, shape.length_dot, shape.stroke_dot, x, y)?;
            Ok(y + shape.length_dot)
        })
    }

    /// Straight line in a `width × length` footprint; equal sides draw a
    /// square outline.
    pub fn print_line(
        &mut self,
        width_mm: f32,
        length_mm: f32,
        stroke_mm: f32,
        placement: &Placement,
    ) -> Result<PrintReport, LabelError> {
        let conv = self.encoder.config().converter();
        let line = Line::new(width_mm, length_mm, stroke_mm, &conv)?;
        let (x, y) = self.label.align(line.dimensions(), placement.h, placement.v);
        let segments = line.segments(x, y);
        self.print_labels(placement.quantity, |encoder, _| {
            for segment in &segments {
                encoder.encode_segment(segment)?;
            }
            Ok(y + line.length_dot)
        })
    }

    /// QR code rendered on the host and sent as a bitmap.
    pub fn print_qr(
        &mut self,
        data: &str,
        scale: u32,
        placement: &Placement,
    ) -> Result<PrintReport, LabelError> {
        let symbol = self.qr.render(data, scale)?;
        let (x, y) = self.label.align(symbol.dimensions(), placement.h, placement.v);
        self.print_labels(placement.quantity, |encoder, _| {
            encoder.encode_qr_code(&symbol, x, y)?;
            Ok(y + symbol.length_dot())
        })
    }

    /// QR code at the top centre with caption lines stacked below it.
    ///
    /// Each caption uses the largest font (3 to 1) that fits; blank
    /// captions are skipped.
    pub fn print_qr_with_text<S: AsRef<str>>(
        &mut self,
        data: &str,
        captions: &[S],
        scale: u32,
        quantity: u32,
    ) -> Result<PrintReport, LabelError> {
        let symbol = self.qr.render(data, scale)?;
        let (qr_x, qr_y) = self
            .label
            .align(symbol.dimensions(), HAlign::Centre, VAlign::Top);

        let mut lines = Vec::new();
        let mut y = qr_y + symbol.length_dot();
        for caption in captions.iter().map(AsRef::as_ref) {
            if caption.is_empty() {
                continue;
            }
            let text = self.caption_text(caption)?;
            let (x, _) = self
                .label
                .align(text.dimensions(), HAlign::Centre, VAlign::Top);
            let line_y = y + caption_gap(&text);
            y = line_y + text.height_dot();
            lines.push((text, x, line_y));
        }

        self.print_labels(quantity, |encoder, _| {
            encoder.encode_qr_code(&symbol, qr_x, qr_y)?;
            for (text, x, line_y) in &lines {
                encoder.encode_text(text.text(), *x, *line_y, text.font_size())?;
            }
            Ok(y)
        })
    }

    /// Outline of the label (1 mm inside its edges) with guide text, on
    /// every column of one scroll row.
    ///
    /// Use it to tune `length_adjust_mm` and `x_offset_mm`.
    pub fn print_calibrator(&mut self) -> Result<PrintReport, LabelError> {
        let conv = self.encoder.config().converter();
        let outline = BoxShape::new(
            self.label.width_mm - 1.0,
            self.label.length_mm - 1.0,
            0.125,
            &conv,
        )?;
        let guide = CALIBRATION_GUIDE
            .iter()
            .map(|(text, y)| Ok((Text::new(*text, 1)?, *y)))
            .collect::<Result<Vec<_>, LabelError>>()?;

        let columns = self.encoder.config().scroll_columns;
        self.print_labels(columns, |encoder, _| {
            encoder.encode_box(outline.width_dot, outline.length_dot, outline.stroke_dot, 0, 0)?;
            for (text, y) in &guide {
                encoder.encode_text(text.text(), 5, *y, text.font_size())?;
            }
            Ok(outline.length_dot)
        })
    }

    // ========================================================================
    // JOB MECHANICS
    // ========================================================================

    /// Fill `count` label positions column by column, committing each full
    /// scroll row and the final partial one (unless rows are kept open).
    ///
    /// `draw` gets the label index and returns the y just below what it
    /// drew.
    fn print_labels<F>(&mut self, count: u32, mut draw: F) -> Result<PrintReport, LabelError>
    where
        F: FnMut(&mut EplEncoder<T>, u32) -> Result<u32, LabelError>,
    {
        if count == 0 {
            return Err(LabelError::InvalidSetting("quantity must be at least 1".into()));
        }
        let columns = self.encoder.config().scroll_columns;
        let mut report = PrintReport::default();

        if self.keep_row_open && self.cursor.column > 0 {
            log::debug!("continuing open row at column {}", self.cursor.column);
        } else {
            self.cursor = Cursor::default();
            self.encoder.clear_command();
        }

        for index in 0..count {
            self.encoder.set_origin_column(self.cursor.column)?;
            self.cursor.row_y_dot = draw(&mut self.encoder, index)?;
            report.labels += 1;

            self.cursor.column += 1;
            let last = index + 1 == count;
            if self.cursor.column == columns || (last && !self.keep_row_open) {
                self.commit_row()?;
                report.batches += 1;
                log::debug!("scroll row {} sent", report.batches);
            } else if !last {
                log::debug!("advancing to column {}", self.cursor.column);
            }
        }
        self.encoder.set_origin_column(0)?;

        log::info!("printed {} labels in {} rows", report.labels, report.batches);
        Ok(report)
    }

    /// End the row in the buffer with `P1` and send it.
    fn commit_row(&mut self) -> Result<(), LabelError> {
        self.encoder.encode_print_label(1)?.send_command()?;
        self.cursor = Cursor::default();
        Ok(())
    }

    /// Caption in the largest font that leaves a 2 mm margin, font 1 if none
    /// does.
    fn caption_text(&self, text: &str) -> Result<Text, LabelError> {
        let conv = self.encoder.config().converter();
        let limit_mm = self.label.width_mm - 2.0;
        let fits = |caption: &Text| conv.dot_to_mm(caption.width_dot()) < limit_mm;

        for font_size in LARGE_CAPTION_FONTS {
            let caption = Text::new(text, font_size)?;
            if fits(&caption) {
                return Ok(caption);
            }
        }
        let caption = Text::new(text, 1)?;
        if !fits(&caption) {
            log::warn!("caption '{}' is wider than the label", text);
        }
        Ok(caption)
    }
}

/// Space above a caption, proportional to its height and larger for
/// smaller fonts.
fn caption_gap(caption: &Text) -> u32 {
    ((4 - caption.font_size()) as f32 * 0.2 * caption.height_dot() as f32) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MemoryTransport;

    fn printer(config: LabelConfig) -> LabelPrinter<MemoryTransport> {
        LabelPrinter::new(config, MemoryTransport::new()).unwrap()
    }

    fn plain() -> LabelConfig {
        LabelConfig {
            x_offset_mm: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_new_printer_sends_nothing() {
        let p = printer(plain());
        assert!(p.transport().batches().is_empty());
        assert_eq!(p.label().width_dot, 400);
    }

    #[test]
    fn test_configure() {
        let mut p = printer(plain());
        p.configure().unwrap();
        assert_eq!(
            p.transport().batches_text(),
            vec!["N\nR0,0\nI8,1,044\nQ174,16\nq400\nS3\nD13\nZB\n"]
        );
    }

    #[test]
    fn test_configure_with_auto_calibrate() {
        let mut p = printer(LabelConfig {
            auto_calibrate: true,
            ..plain()
        });
        p.configure().unwrap();
        assert!(p.transport().batches_text()[0].starts_with("N\nxa\nR0,0\n"));
    }

    #[test]
    fn test_cut_requires_cutter() {
        let mut p = printer(plain());
        assert!(matches!(p.cut(), Err(LabelError::FeatureUnavailable(_))));
        assert!(matches!(
            p.cut_every(2),
            Err(LabelError::FeatureUnavailable(_))
        ));
        assert!(p.transport().batches().is_empty());

        let mut p = printer(LabelConfig {
            cutter_enabled: true,
            ..plain()
        });
        p.cut().unwrap();
        p.cut_every(3).unwrap();
        assert_eq!(p.transport().batches_text(), vec!["N\nOC1\n", "N\nOC3\n"]);
    }

    #[test]
    fn test_title_centred() {
        let mut p = printer(plain());
        let report = p.print_title("HI").unwrap();
        assert!(report.warnings.is_empty());
        // 68 dots wide, 48 high on 400 x 160
        assert_eq!(
            p.transport().batches_text(),
            vec!["N\nA166,56,0,5,1,1,N,\"HI\"\nP1\n"]
        );
    }

    #[test]
    fn test_title_cropped() {
        let mut p = printer(plain());
        let report = p.print_title("ABCDEFGHIJKLMNOP").unwrap();
        // 400 / 34 = 11 characters
        assert_eq!(
            report.warnings,
            vec![LabelWarning::Cropped {
                original: "ABCDEFGHIJKLMNOP".into(),
                printed: "ABCDEFGHIJK".into(),
            }]
        );
        assert!(p.transport().batches_text()[0].contains("\"ABCDEFGHIJK\""));
    }

    #[test]
    fn test_quantity_fills_columns() {
        let mut p = printer(LabelConfig {
            scroll_columns: 2,
            ..plain()
        });
        let report = p
            .print_box(10.0, 10.0, 0.5, &Placement::at(0, 0).quantity(3))
            .unwrap();
        assert_eq!(report.labels, 3);
        assert_eq!(report.batches, 2);

        let batches = p.transport().batches_text();
        assert_eq!(batches.len(), 2);
        // second column starts at 400 + 16
        assert!(batches[0].contains("LO0,0,80,4\n"));
        assert!(batches[0].contains("LO416,0,80,4\n"));
        assert!(batches[0].ends_with("P1\n"));
        assert!(batches[1].starts_with("N\nLO0,0,80,4\n"));
    }

    #[test]
    fn test_zero_quantity() {
        let mut p = printer(plain());
        assert!(matches!(
            p.print_box(10.0, 10.0, 0.5, &Placement::default().quantity(0)),
            Err(LabelError::InvalidSetting(_))
        ));
    }

    #[test]
    fn test_barcode_with_caption() {
        let mut p = printer(plain());
        p.print_barcode("123", &BarcodeOptions::default()).unwrap();
        let batch = &p.transport().batches_text()[0];
        // bars are half the 20mm label
        assert!(batch.starts_with("N\nB"));
        assert!(batch.contains(",0,0,1,1,3,80,N,\"123\"\n"));
        // caption in font 3 (42 dots): 80 + (4-3)*0.2*20
        assert!(batch.contains("A179,84,0,3,1,1,N,\"123\"\n"));
    }

    #[test]
    fn test_barcode_without_caption() {
        let mut p = printer(plain());
        let options = BarcodeOptions {
            caption: false,
            height_mm: Some(5.0),
            ..Default::default()
        };
        p.print_barcode("ABC", &options).unwrap();
        let batch = &p.transport().batches_text()[0];
        assert!(!batch.contains("\nA"));
        assert!(batch.contains(",40,N,\"ABC\"\n"));
    }

    #[test]
    fn test_line_square_is_four_segments() {
        let mut p = printer(plain());
        p.print_line(5.0, 5.0, 0.25, &Placement::at(0, 0)).unwrap();
        let batch = &p.transport().batches_text()[0];
        assert_eq!(batch.matches("LO").count(), 4);
    }

    #[test]
    fn test_calibrator() {
        let mut p = printer(plain());
        p.print_calibrator().unwrap();
        let batch = &p.transport().batches_text()[0];
        assert!(batch.starts_with("N\nLO0,0,392,1\n"));
        assert!(batch.contains("A5,20,0,1,1,1,N,\"LENGTH_ADJUST\"\n"));
        assert!(batch.ends_with("P1\n"));
    }

    #[test]
    fn test_qr_with_text() {
        let mut p = printer(plain());
        let report = p
            .print_qr_with_text("A1", &["ERP-1234", "", "0001"], 2, 1)
            .unwrap();
        assert_eq!(report.labels, 1);
        let batch = &p.transport().batches_text()[0];
        // 23 modules x 2 = 46 dots, padded to 48: 6 bytes x 46 rows
        assert!(batch.starts_with("N\nGW176,0,6,46\n"));
        assert_eq!(batch.matches("\nA").count(), 2);
    }

    #[test]
    fn test_transport_failure_propagates() {
        let mut p = LabelPrinter::new(plain(), MemoryTransport::failing()).unwrap();
        assert!(matches!(
            p.print_title("X"),
            Err(LabelError::Transport(_))
        ));
    }

    #[test]
    fn test_text_rows_centred() {
        let mut p = printer(plain());
        p.print_text_aligned(&["AB", "ABCD"], 3, Some(10), HAlign::Centre)
            .unwrap();
        // 28 and 56 dots wide on 400
        assert_eq!(
            p.transport().batches_text(),
            vec!["N\nA186,10,0,3,1,1,N,\"AB\"\nA172,32,0,3,1,1,N,\"ABCD\"\nP1\n"]
        );
    }

    #[test]
    fn test_oversized_centred_row_starts_at_origin() {
        let mut p = printer(plain());
        let report = p
            .print_text_aligned(&["ABCDEFGHIJKL"], 5, Some(0), HAlign::Centre)
            .unwrap();
        assert_eq!(report.warnings.len(), 1);
        assert!(p.transport().batches_text()[0].contains("A0,0,0,5,"));
    }

    #[test]
    fn test_control_characters_rejected() {
        let mut p = printer(plain());
        assert!(matches!(
            p.print_text(&["A\nP99"], 3, None),
            Err(LabelError::InvalidDimension(_))
        ));
        assert!(p.print_title("A\r\nP99").is_err());
        assert!(
            p.print_barcode("123\nP99", &BarcodeOptions::default())
                .is_err()
        );
        assert!(p.print_qr_with_text("A1", &["ok", "P\n99"], 2, 1).is_err());
        assert!(p.transport().batches().is_empty());
    }

    fn three_narrow_columns() -> LabelConfig {
        LabelConfig {
            label_width_mm: 25.0,
            scroll_columns: 3,
            ..plain()
        }
    }

    #[test]
    fn test_keep_row_open_shares_a_row() {
        let mut p = printer(three_narrow_columns());
        p.set_keep_row_open(true);
        let square = Placement::at(0, 0).quantity(2);

        let first = p.print_box(10.0, 10.0, 0.5, &square).unwrap();
        assert_eq!(first.batches, 0);
        assert!(p.transport().batches().is_empty());
        assert_eq!(p.cursor().column, 2);

        // the third column completes the row, the fourth label opens a new one
        let second = p.print_box(10.0, 10.0, 0.5, &square).unwrap();
        assert_eq!(second.batches, 1);
        assert_eq!(
            p.transport().batches_text(),
            vec!["N\nLO0,0,80,4\nLO0,76,80,4\nLO0,4,4,72\nLO76,4,4,72\n\
                  LO216,0,80,4\nLO216,76,80,4\nLO216,4,4,72\nLO292,4,4,72\n\
                  LO432,0,80,4\nLO432,76,80,4\nLO432,4,4,72\nLO508,4,4,72\nP1\n"]
        );

        assert!(p.finish_row().unwrap());
        assert!(!p.finish_row().unwrap());
        let batches = p.transport().batches_text();
        assert_eq!(batches.len(), 2);
        assert!(batches[1].starts_with("N\nLO0,0,80,4\n"));
        assert!(batches[1].ends_with("P1\n"));
    }

    #[test]
    fn test_setup_discards_open_row() {
        let mut p = printer(three_narrow_columns());
        p.set_keep_row_open(true);
        p.print_title("A").unwrap();
        assert_eq!(p.cursor().column, 1);

        p.configure().unwrap();
        assert_eq!(p.cursor().column, 0);
        assert!(!p.finish_row().unwrap());
        assert_eq!(p.transport().batches().len(), 1);
    }
}
