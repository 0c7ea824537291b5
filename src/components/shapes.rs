//! # Boxes and Lines
//!
//! Vector shapes drawn with the `LO` (line draw black) command. The printer
//! only knows solid rectangles, so an outlined box is four of them:
//!
//! ```text
//! (x,y)
//!   ┌──────────── top: width × stroke ────────────┐
//!   │                                             │
//!  left                                         right
//!  stroke ×                                    stroke ×
//!  (length − 2·stroke)                (length − 2·stroke)
//!   │                                             │
//!   └────────── bottom: width × stroke ───────────┘
//! ```
//!
//! Top and bottom span the full width. The sides sit between them, so the
//! corners are covered exactly once.

use super::Dimensions;
use crate::error::LabelError;
use crate::units::UnitConverter;

/// Orientation of a [`Line`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineDirection {
    Vertical,
    Horizontal,
    /// Four connected segments outlining a square
    Square,
}

/// One solid stroke, ready for a line-draw instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub x: u32,
    pub y: u32,
    /// Extent along the direction of travel
    pub length_dot: u32,
    pub thickness_dot: u32,
    /// Horizontal or Vertical
    pub direction: LineDirection,
}

/// The four strokes of a closed rectangle, in the order top, bottom, left,
/// right.
///
/// Callers guarantee `2 × stroke ≤ width` and `2 × stroke ≤ length`.
pub fn outline_segments(x: u32, y: u32, width: u32, length: u32, stroke: u32) -> [Segment; 4] {
    let side = length.saturating_sub(2 * stroke);
    [
        Segment {
            x,
            y,
            length_dot: width,
            thickness_dot: stroke,
            direction: LineDirection::Horizontal,
        },
        Segment {
            x,
            y: y + length - stroke,
            length_dot: width,
            thickness_dot: stroke,
            direction: LineDirection::Horizontal,
        },
        Segment {
            x,
            y: y + stroke,
            length_dot: side,
            thickness_dot: stroke,
            direction: LineDirection::Vertical,
        },
        Segment {
            x: x + width - stroke,
            y: y + stroke,
            length_dot: side,
            thickness_dot: stroke,
            direction: LineDirection::Vertical,
        },
    ]
}

/// Shared size/stroke checks for boxes and lines.
fn stroked_dots(
    width_mm: f32,
    length_mm: f32,
    stroke_mm: f32,
    conv: &UnitConverter,
) -> Result<(u32, u32, u32), LabelError> {
    if !(width_mm > 0.0 && length_mm > 0.0) {
        return Err(LabelError::InvalidDimension(format!(
            "shape must be larger than zero, got {}x{}mm",
            width_mm, length_mm
        )));
    }
    if !(stroke_mm >= 0.0) || stroke_mm > width_mm.min(length_mm) / 2.0 {
        return Err(LabelError::InvalidDimension(format!(
            "stroke of {}mm does not fit a {}x{}mm shape",
            stroke_mm, width_mm, length_mm
        )));
    }

    let width_dot = conv.mm_to_dot(width_mm)?;
    let length_dot = conv.mm_to_dot(length_mm)?;
    let stroke_dot = conv.mm_to_dot(stroke_mm)?;
    if width_dot == 0 || length_dot == 0 {
        return Err(LabelError::InvalidDimension(format!(
            "{}x{}mm is smaller than one dot",
            width_mm, length_mm
        )));
    }
    if stroke_dot == 0 {
        return Err(LabelError::InvalidDimension(format!(
            "stroke of {}mm is thinner than one dot",
            stroke_mm
        )));
    }
    if 2 * stroke_dot > width_dot.min(length_dot) {
        return Err(LabelError::InvalidDimension(format!(
            "stroke of {} dots does not fit {}x{} dots",
            stroke_dot, width_dot, length_dot
        )));
    }
    Ok((width_dot, length_dot, stroke_dot))
}

/// An outlined rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxShape {
    pub width_mm: f32,
    pub length_mm: f32,
    pub stroke_mm: f32,
    pub width_dot: u32,
    pub length_dot: u32,
    pub stroke_dot: u32,
}

impl BoxShape {
    /// ## Errors
    ///
    /// `InvalidDimension` when a side is not positive or the stroke is wider
    /// than half the shorter side.
    pub fn new(
        width_mm: f32,
        length_mm: f32,
        stroke_mm: f32,
        conv: &UnitConverter,
    ) -> Result<Self, LabelError> {
        let (width_dot, length_dot, stroke_dot) =
            stroked_dots(width_mm, length_mm, stroke_mm, conv)?;
        Ok(Self {
            width_mm,
            length_mm,
            stroke_mm,
            width_dot,
            length_dot,
            stroke_dot,
        })
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            width_dot: self.width_dot,
            length_dot: self.length_dot,
        }
    }
}

/// A straight line inside a `width × length` footprint.
///
/// The direction follows the footprint: wider than long is horizontal,
/// longer than wide is vertical, and equal sides outline a square.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub width_mm: f32,
    pub length_mm: f32,
    pub stroke_mm: f32,
    pub width_dot: u32,
    pub length_dot: u32,
    pub stroke_dot: u32,
    pub direction: LineDirection,
}

impl Line {
    pub fn new(
        width_mm: f32,
        length_mm: f32,
        stroke_mm: f32,
        conv: &UnitConverter,
    ) -> Result<Self, LabelError> {
        let (width_dot, length_dot, stroke_dot) =
            stroked_dots(width_mm, length_mm, stroke_mm, conv)?;
        let direction = if width_mm < length_mm {
            LineDirection::Vertical
        } else if length_mm < width_mm {
            LineDirection::Horizontal
        } else {
            LineDirection::Square
        };
        Ok(Self {
            width_mm,
            length_mm,
            stroke_mm,
            width_dot,
            length_dot,
            stroke_dot,
            direction,
        })
    }

    /// Strokes that draw this line with its top-left corner at (x, y).
    pub fn segments(&self, x: u32, y: u32) -> Vec<Segment> {
        match self.direction {
            LineDirection::Horizontal => vec![Segment {
                x,
                y,
                length_dot: self.width_dot,
                thickness_dot: self.stroke_dot,
                direction: LineDirection::Horizontal,
            }],
            LineDirection::Vertical => vec![Segment {
                x,
                y,
                length_dot: self.length_dot,
                thickness_dot: self.stroke_dot,
                direction: LineDirection::Vertical,
            }],
            LineDirection::Square => {
                outline_segments(x, y, self.width_dot, self.length_dot, self.stroke_dot).to_vec()
            }
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            width_dot: self.width_dot,
            length_dot: self.length_dot,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conv() -> UnitConverter {
        UnitConverter::new(8.0)
    }

    #[test]
    fn test_box_dots() {
        let b = BoxShape::new(49.0, 19.0, 0.125, &conv()).unwrap();
        assert_eq!((b.width_dot, b.length_dot, b.stroke_dot), (392, 152, 1));
    }

    #[test]
    fn test_box_stroke_too_wide() {
        assert!(matches!(
            BoxShape::new(10.0, 4.0, 2.5, &conv()),
            Err(LabelError::InvalidDimension(_))
        ));
        // exactly half is allowed
        assert!(BoxShape::new(10.0, 4.0, 2.0, &conv()).is_ok());
    }

    #[test]
    fn test_box_negative_stroke() {
        assert!(BoxShape::new(10.0, 4.0, -0.1, &conv()).is_err());
    }

    #[test]
    fn test_sub_dot_stroke_rejected() {
        // 0.05mm rounds to 0 dots at 8 dots/mm
        for stroke in [0.0, 0.05] {
            assert!(matches!(
                BoxShape::new(10.0, 10.0, stroke, &conv()),
                Err(LabelError::InvalidDimension(_))
            ));
        }
        assert!(matches!(
            Line::new(20.0, 1.0, 0.05, &conv()),
            Err(LabelError::InvalidDimension(_))
        ));
        assert!(BoxShape::new(10.0, 10.0, 0.0625, &conv()).is_ok());
    }

    #[test]
    fn test_box_zero_size() {
        assert!(BoxShape::new(0.0, 4.0, 0.0, &conv()).is_err());
    }

    #[test]
    fn test_line_direction() {
        let c = conv();
        assert_eq!(
            Line::new(1.0, 30.0, 0.5, &c).unwrap().direction,
            LineDirection::Vertical
        );
        assert_eq!(
            Line::new(30.0, 1.0, 0.5, &c).unwrap().direction,
            LineDirection::Horizontal
        );
        assert_eq!(
            Line::new(10.0, 10.0, 0.5, &c).unwrap().direction,
            LineDirection::Square
        );
    }

    #[test]
    fn test_square_line_has_four_segments() {
        let line = Line::new(10.0, 10.0, 0.5, &conv()).unwrap();
        assert_eq!(line.segments(0, 0).len(), 4);
        let horizontal = Line::new(10.0, 1.0, 0.5, &conv()).unwrap();
        assert_eq!(
            horizontal.segments(3, 4),
            vec![Segment {
                x: 3,
                y: 4,
                length_dot: 80,
                thickness_dot: 4,
                direction: LineDirection::Horizontal,
            }]
        );
    }

    /// Mark every dot covered by the segments and count coverage.
    fn coverage(segments: &[Segment], w: u32, h: u32) -> Vec<u32> {
        let mut grid = vec![0u32; (w * h) as usize];
        for s in segments {
            let (sw, sh) = match s.direction {
                LineDirection::Vertical => (s.thickness_dot, s.length_dot),
                _ => (s.length_dot, s.thickness_dot),
            };
            for y in s.y..s.y + sh {
                for x in s.x..s.x + sw {
                    grid[(y * w + x) as usize] += 1;
                }
            }
        }
        grid
    }

    #[test]
    fn test_outline_is_closed_without_overlap() {
        for (w, h, s) in [(20, 10, 2), (9, 9, 3), (12, 4, 2), (5, 7, 1)] {
            let segments = outline_segments(0, 0, w, h, s);
            let grid = coverage(&segments, w, h);
            for y in 0..h {
                for x in 0..w {
                    let on_border = x < s || y < s || x >= w - s || y >= h - s;
                    let expected = if on_border { 1 } else { 0 };
                    assert_eq!(
                        grid[(y * w + x) as usize],
                        expected,
                        "({}, {}) in {}x{} stroke {}",
                        x,
                        y,
                        w,
                        h,
                        s
                    );
                }
            }
        }
    }
}
