//! # Printable Objects
//!
//! Value types for everything that can be placed on a label. Each object is
//! described in millimetres (or, for text and raster images, in the printer's
//! native units) and carries its dot dimensions, computed once at
//! construction.
//!
//! ```
//! use eplabel::components::*;
//! use eplabel::units::UnitConverter;
//!
//! let conv = UnitConverter::new(8.0);
//! let label = Label::new(50.0, 20.0, &conv).unwrap();
//! let text = Text::new("HELLO", 3).unwrap();
//!
//! let item = Printable::from(text);
//! let (x, y) = label.align(item.dimensions(), HAlign::Centre, VAlign::Middle);
//! assert_eq!((x, y), (165, 70));
//! ```
//!
//! Objects are immutable; constructors validate their input and fail fast
//! rather than clamping.

mod barcode;
mod graphics;
mod layout;
mod shapes;
mod text;

pub use barcode::*;
pub use graphics::*;
pub use layout::*;
pub use shapes::*;
pub use text::*;

/// Size of an object in device dots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width_dot: u32,
    pub length_dot: u32,
}

/// Anything that can be placed on a label.
#[derive(Debug, Clone, PartialEq)]
pub enum Printable {
    Barcode(Barcode),
    BinaryImage(BinaryImage),
    Box(BoxShape),
    Line(Line),
    Text(Text),
}

impl Printable {
    /// Footprint of the object on the label.
    pub fn dimensions(&self) -> Dimensions {
        match self {
            Self::Barcode(b) => b.dimensions(),
            Self::BinaryImage(i) => i.dimensions(),
            Self::Box(b) => b.dimensions(),
            Self::Line(l) => l.dimensions(),
            Self::Text(t) => t.dimensions(),
        }
    }
}

impl From<Barcode> for Printable {
    fn from(value: Barcode) -> Self {
        Self::Barcode(value)
    }
}

impl From<BinaryImage> for Printable {
    fn from(value: BinaryImage) -> Self {
        Self::BinaryImage(value)
    }
}

impl From<BoxShape> for Printable {
    fn from(value: BoxShape) -> Self {
        Self::Box(value)
    }
}

impl From<Line> for Printable {
    fn from(value: Line) -> Self {
        Self::Line(value)
    }
}

impl From<Text> for Printable {
    fn from(value: Text) -> Self {
        Self::Text(value)
    }
}
