//! Line-level types.

use serde::Serialize;

use super::record::{insert_bbox, Record};
use super::{BBox, Content};

/// A visual text line: spans sharing a baseline inside a block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    /// Document-wide sequential id
    pub id: usize,

    /// Line index within its block
    pub number: usize,

    /// Bounding box reported by the source
    pub bbox: BBox,

    /// Id of the owning block
    pub block_id: usize,

    /// Number of the owning page
    pub page_number: usize,

    /// Spans in source order
    pub contents: Vec<Content>,
}

impl Line {
    /// Create an empty line.
    pub fn new(id: usize, number: usize, bbox: BBox, block_id: usize, page_number: usize) -> Self {
        Self {
            id,
            number,
            bbox,
            block_id,
            page_number,
            contents: Vec::new(),
        }
    }

    /// Add a span to the line.
    pub fn add_content(&mut self, content: Content) {
        self.contents.push(content);
    }

    /// Number of spans.
    pub fn len(&self) -> usize {
        self.contents.len()
    }

    /// Check if the line has no spans.
    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// Union of the span boxes.
    pub fn union_bbox(&self) -> Option<BBox> {
        BBox::union_all(self.contents.iter().map(|c| &c.bbox))
    }

    /// Span texts joined by single spaces.
    pub fn text(&self) -> String {
        self.contents
            .iter()
            .map(Content::text)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Flatten into a record.
    pub fn get_dict(&self) -> Record {
        let mut record = Record::new();
        record.insert("id".into(), self.id.into());
        record.insert("number".into(), self.number.into());
        insert_bbox(&mut record, &self.bbox);
        record.insert("width".into(), self.bbox.width().into());
        record.insert("height".into(), self.bbox.height().into());
        record.insert("area".into(), self.bbox.area().into());
        record.insert("content_count".into(), self.len().into());
        record.insert("block_id".into(), self.block_id.into());
        record.insert("page_number".into(), self.page_number.into());
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Origin, Style};

    fn content(id: usize, text: &str, xl: f64, xr: f64) -> Content {
        Content::new(
            id,
            text,
            BBox::new(xl, 10.0, xr, 20.0),
            Origin::new(xl, 18.0),
            Style::new("Helvetica", 10.0),
        )
        .unwrap()
    }

    #[test]
    fn test_line_union_and_text() {
        let mut line = Line::new(0, 0, BBox::new(0.0, 10.0, 100.0, 20.0), 0, 0);
        assert!(line.is_empty());
        assert_eq!(line.union_bbox(), None);

        line.add_content(content(0, "Total", 5.0, 30.0));
        line.add_content(content(1, "42.00", 60.0, 90.0));

        assert_eq!(line.len(), 2);
        assert_eq!(line.text(), "Total 42.00");
        assert_eq!(line.union_bbox(), Some(BBox::new(5.0, 10.0, 90.0, 20.0)));
    }

    #[test]
    fn test_line_get_dict() {
        let line = Line::new(3, 1, BBox::new(0.0, 0.0, 10.0, 2.0), 7, 2);
        let record = line.get_dict();
        assert_eq!(record["id"], 3);
        assert_eq!(record["area"], 20.0);
        assert_eq!(record["content_count"], 0);
        assert_eq!(record["block_id"], 7);
        assert_eq!(record["page_number"], 2);
    }
}
