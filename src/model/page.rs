//! Page-level types.

use serde::Serialize;

use super::record::{insert_bbox, Record};
use super::{BBox, Content, Line};

/// A single page in the document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    /// Page number (0-indexed)
    pub number: usize,

    /// Page width in points (1 point = 1/72 inch)
    pub width: f64,

    /// Page height in points
    pub height: f64,

    /// Text blocks on the page
    pub blocks: Vec<Block>,
}

impl Page {
    /// Create a new page with the given dimensions.
    pub fn new(number: usize, width: f64, height: f64) -> Self {
        Self {
            number,
            width,
            height,
            blocks: Vec::new(),
        }
    }

    /// Add a block to the page.
    pub fn add_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the page has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Union of the block boxes.
    pub fn union_bbox(&self) -> Option<BBox> {
        BBox::union_all(self.blocks.iter().map(|b| &b.bbox))
    }

    /// All lines on the page, in block order.
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.blocks.iter().flat_map(|b| b.lines.iter())
    }

    /// All spans on the page, in block and line order.
    pub fn contents(&self) -> impl Iterator<Item = &Content> {
        self.lines().flat_map(|l| l.contents.iter())
    }

    /// Flatten into a record.
    pub fn get_dict(&self) -> Record {
        let mut record = Record::new();
        record.insert("number".into(), self.number.into());
        record.insert("width".into(), self.width.into());
        record.insert("height".into(), self.height.into());
        record.insert("block_count".into(), self.len().into());
        record
    }
}

/// A block of lines on a page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    /// Document-wide sequential id
    pub id: usize,

    /// Block index as reported by the source
    pub number: usize,

    /// Bounding box reported by the source
    pub bbox: BBox,

    /// Number of the owning page
    pub page_number: usize,

    /// Lines in source order
    pub lines: Vec<Line>,
}

impl Block {
    /// Create an empty block.
    pub fn new(id: usize, number: usize, bbox: BBox, page_number: usize) -> Self {
        Self {
            id,
            number,
            bbox,
            page_number,
            lines: Vec::new(),
        }
    }

    /// Add a line to the block.
    pub fn add_line(&mut self, line: Line) {
        self.lines.push(line);
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the block has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Union of the line boxes.
    pub fn union_bbox(&self) -> Option<BBox> {
        BBox::union_all(self.lines.iter().map(|l| &l.bbox))
    }

    /// Flatten into a record.
    pub fn get_dict(&self) -> Record {
        let mut record = Record::new();
        record.insert("id".into(), self.id.into());
        record.insert("number".into(), self.number.into());
        insert_bbox(&mut record, &self.bbox);
        record.insert("line_count".into(), self.len().into());
        record.insert("page_number".into(), self.page_number.into());
        record
    }
}
