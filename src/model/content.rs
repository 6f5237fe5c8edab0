//! Span-level types.

use serde::{Deserialize, Serialize};

use super::record::{insert_bbox, Record};
use super::{BBox, Origin, Style};
use crate::cleanup::normalize_text;

/// Identifiers of the line, block and page that own a content.
///
/// Only used for navigation and export; the owning objects live in the
/// [`Document`](super::Document) arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineRef {
    /// Zero-based page number
    pub page_number: usize,
    /// Document-wide block id
    pub block_id: usize,
    /// Block index as reported by the source
    pub block_number: usize,
    /// Document-wide line id
    pub line_id: usize,
    /// Line index within its block
    pub line_number: usize,
}

/// A single text span with geometry and style.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Content {
    /// Document-wide sequential id
    pub id: usize,

    /// Span index within its line
    pub number: usize,

    /// Normalized, non-empty text
    text: String,

    /// Bounding box
    pub bbox: BBox,

    /// Baseline origin
    pub origin: Origin,

    /// Font and color
    pub style: Style,

    /// Horizontal bucket assigned by delimiter partitioning
    pub horizontal_end_on_page: Option<usize>,

    /// Owning line, when the content came from a document
    pub line: Option<LineRef>,
}

impl Content {
    /// Create a content, normalizing its text.
    ///
    /// Returns `None` when the text normalizes to nothing.
    pub fn new(id: usize, text: &str, bbox: BBox, origin: Origin, style: Style) -> Option<Self> {
        let text = normalize_text(text)?;
        Some(Self {
            id,
            number: 0,
            text,
            bbox,
            origin,
            style,
            horizontal_end_on_page: None,
            line: None,
        })
    }

    /// Set the span index within its line.
    pub fn with_number(mut self, number: usize) -> Self {
        self.number = number;
        self
    }

    /// Attach the owning line.
    pub fn with_line(mut self, line: LineRef) -> Self {
        self.line = Some(line);
        self
    }

    /// The normalized text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Left edge.
    pub fn xl(&self) -> f64 {
        self.bbox.xl
    }

    /// Top edge.
    pub fn yt(&self) -> f64 {
        self.bbox.yt
    }

    /// Right edge.
    pub fn xr(&self) -> f64 {
        self.bbox.xr
    }

    /// Bottom edge.
    pub fn yb(&self) -> f64 {
        self.bbox.yb
    }

    /// Horizontal center.
    pub fn xc(&self) -> f64 {
        self.bbox.xc()
    }

    /// Vertical center.
    pub fn yc(&self) -> f64 {
        self.bbox.yc()
    }

    /// Horizontal origin.
    pub fn xo(&self) -> f64 {
        self.origin.xo
    }

    /// Vertical origin.
    pub fn yo(&self) -> f64 {
        self.origin.yo
    }

    /// Width of the bounding box.
    pub fn width(&self) -> f64 {
        self.bbox.width()
    }

    /// Height of the bounding box.
    pub fn height(&self) -> f64 {
        self.bbox.height()
    }

    /// Area of the bounding box.
    pub fn area(&self) -> f64 {
        self.bbox.area()
    }

    /// Page number of the owning line.
    pub fn page_number(&self) -> Option<usize> {
        self.line.map(|l| l.page_number)
    }

    /// Id of the owning block.
    pub fn block_id(&self) -> Option<usize> {
        self.line.map(|l| l.block_id)
    }

    /// Id of the owning line.
    pub fn line_id(&self) -> Option<usize> {
        self.line.map(|l| l.line_id)
    }

    /// Flatten into a record. Owners appear by identifier only.
    pub fn get_dict(&self) -> Record {
        let mut record = Record::new();
        record.insert("id".into(), self.id.into());
        record.insert("number".into(), self.number.into());
        record.insert("text".into(), self.text.clone().into());
        insert_bbox(&mut record, &self.bbox);
        record.insert("xo".into(), self.xo().into());
        record.insert("yo".into(), self.yo().into());
        record.insert("width".into(), self.width().into());
        record.insert("height".into(), self.height().into());
        record.insert("area".into(), self.area().into());
        record.insert("ascender".into(), self.style.ascender.into());
        record.insert("descender".into(), self.style.descender.into());
        record.insert("size".into(), self.style.size.into());
        record.insert("font".into(), self.style.font.clone().into());
        record.insert("flags".into(), self.style.flags.into());
        record.insert("char_flags".into(), self.style.char_flags.into());
        record.insert("bidi".into(), self.style.bidi.into());
        record.insert("alpha".into(), self.style.alpha.into());
        record.insert("rgb_color".into(), self.style.rgb_color.into());
        record.insert(
            "horizontal_end_on_page".into(),
            self.horizontal_end_on_page.into(),
        );
        record.insert("page_number".into(), self.page_number().into());
        record.insert("block_id".into(), self.block_id().into());
        record.insert(
            "block_number".into(),
            self.line.map(|l| l.block_number).into(),
        );
        record.insert("line_id".into(), self.line_id().into());
        record.insert("line_number".into(), self.line.map(|l| l.line_number).into());
        record
    }

    /// Absorb the next span of a merge run.
    ///
    /// Text is appended raw; call [`Content::finish_merge`] once the run ends.
    pub(crate) fn absorb(&mut self, next: &Content, separator: &str) {
        self.text.push_str(separator);
        self.text.push_str(&next.text);
        self.bbox = self.bbox.union(&next.bbox);
        self.style.ascender = self.style.ascender.max(next.style.ascender);
        self.style.descender = self.style.descender.min(next.style.descender);
    }

    /// Re-apply text normalization after a merge run.
    pub(crate) fn finish_merge(&mut self) {
        if let Some(text) = normalize_text(&self.text) {
            self.text = text;
        }
    }
}
