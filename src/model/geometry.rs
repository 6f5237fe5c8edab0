//! Geometry and style values shared by every level of the hierarchy.

use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in page space (y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BBox {
    /// Left edge
    pub xl: f64,
    /// Top edge
    pub yt: f64,
    /// Right edge
    pub xr: f64,
    /// Bottom edge
    pub yb: f64,
}

impl BBox {
    /// Create a bounding box from its four edges.
    pub fn new(xl: f64, yt: f64, xr: f64, yb: f64) -> Self {
        Self { xl, yt, xr, yb }
    }

    /// Create a bounding box from an `[xl, yt, xr, yb]` array.
    pub fn from_array(bbox: [f64; 4]) -> Self {
        Self::new(bbox[0], bbox[1], bbox[2], bbox[3])
    }

    /// Width of the box.
    pub fn width(&self) -> f64 {
        self.xr - self.xl
    }

    /// Height of the box.
    pub fn height(&self) -> f64 {
        self.yb - self.yt
    }

    /// Area of the box.
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Horizontal center.
    pub fn xc(&self) -> f64 {
        (self.xl + self.xr) / 2.0
    }

    /// Vertical center.
    pub fn yc(&self) -> f64 {
        (self.yt + self.yb) / 2.0
    }

    /// Smallest box covering both boxes.
    pub fn union(&self, other: &BBox) -> BBox {
        BBox {
            xl: self.xl.min(other.xl),
            yt: self.yt.min(other.yt),
            xr: self.xr.max(other.xr),
            yb: self.yb.max(other.yb),
        }
    }

    /// Union of every box in the iterator, or `None` when it is empty.
    pub fn union_all<'a, I>(boxes: I) -> Option<BBox>
    where
        I: IntoIterator<Item = &'a BBox>,
    {
        boxes
            .into_iter()
            .fold(None, |acc: Option<BBox>, bbox| match acc {
                Some(acc) => Some(acc.union(bbox)),
                None => Some(*bbox),
            })
    }

    /// Check whether `other` lies entirely inside this box.
    pub fn contains(&self, other: &BBox) -> bool {
        self.xl <= other.xl && self.yt <= other.yt && self.xr >= other.xr && self.yb >= other.yb
    }
}

/// Text origin: start of the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Origin {
    /// Horizontal origin
    pub xo: f64,
    /// Vertical origin (baseline)
    pub yo: f64,
}

impl Origin {
    /// Create an origin.
    pub fn new(xo: f64, yo: f64) -> Self {
        Self { xo, yo }
    }
}

/// Visual style of a span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    /// Font name (e.g., "Helvetica-Bold")
    pub font: String,

    /// Font size in points
    pub size: f64,

    /// Packed sRGB color (0xRRGGBB)
    pub rgb_color: u32,

    /// Span flags (superscript, italic, serif, monospace, bold)
    pub flags: u32,

    /// Character flags
    pub char_flags: u32,

    /// Bidirectional embedding level
    pub bidi: i32,

    /// Alpha channel (255 = opaque)
    pub alpha: u8,

    /// Font ascender
    pub ascender: f64,

    /// Font descender
    pub descender: f64,
}

impl Style {
    /// Create a plain style with the given font and size.
    pub fn new(font: impl Into<String>, size: f64) -> Self {
        Self {
            font: font.into(),
            size,
            ..Default::default()
        }
    }

    /// Set the color.
    pub fn with_color(mut self, rgb_color: u32) -> Self {
        self.rgb_color = rgb_color;
        self
    }

    /// Set the span flags.
    pub fn with_flags(mut self, flags: u32) -> Self {
        self.flags = flags;
        self
    }

    /// Compare the visual attributes that matter when coalescing spans.
    ///
    /// Sizes are compared at two decimals; font metrics are ignored.
    pub fn same_appearance(&self, other: &Style) -> bool {
        self.font == other.font
            && round2(self.size) == round2(other.size)
            && self.flags == other.flags
            && self.char_flags == other.char_flags
            && self.bidi == other.bidi
            && self.alpha == other.alpha
            && self.rgb_color == other.rgb_color
    }
}

impl Default for Style {
    fn default() -> Self {
        Self {
            font: String::new(),
            size: 0.0,
            rgb_color: 0,
            flags: 0,
            char_flags: 0,
            bidi: 0,
            alpha: 255,
            ascender: 0.0,
            descender: 0.0,
        }
    }
}

/// Round to two decimals, the precision used for baseline and size comparisons.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
