//! Document-level types.

use std::collections::HashMap;

use serde::Serialize;

use super::record::{extend_prefixed, Record};
use super::{Block, Content, Line, Page};

/// The owner of the page → block → line → content hierarchy.
///
/// Contents refer back to their owners by id; this type resolves those ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Document {
    /// Pages in the document
    pub pages: Vec<Page>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Add a page to the document.
    pub fn add_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Get a page by number.
    pub fn page(&self, number: usize) -> Option<&Page> {
        self.pages.iter().find(|p| p.number == number)
    }

    /// Get a block by its document-wide id.
    pub fn block(&self, id: usize) -> Option<&Block> {
        self.blocks().find(|b| b.id == id)
    }

    /// Get a line by its document-wide id.
    pub fn line(&self, id: usize) -> Option<&Line> {
        self.lines().find(|l| l.id == id)
    }

    /// All blocks in document order.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.pages.iter().flat_map(|p| p.blocks.iter())
    }

    /// All lines in document order.
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.pages.iter().flat_map(|p| p.lines())
    }

    /// All contents in document order.
    pub fn contents(&self) -> impl Iterator<Item = &Content> {
        self.pages.iter().flat_map(|p| p.contents())
    }

    /// Number of contents in the document.
    pub fn content_count(&self) -> usize {
        self.contents().count()
    }

    /// One normalized string per line.
    pub fn texts(&self) -> Vec<String> {
        self.lines()
            .filter(|l| !l.is_empty())
            .map(Line::text)
            .collect()
    }

    /// Flatten a content together with its owners.
    ///
    /// The content's own fields come first, followed by its line's fields
    /// prefixed `line_`, its block's prefixed `block_` and its page's
    /// prefixed `page_`. Owners that cannot be resolved are left out.
    pub fn content_record(&self, content: &Content) -> Record {
        self.wide_record(content, |id| self.line(id), |id| self.block(id))
    }

    /// Wide records for every content, in document order.
    pub fn records(&self) -> Vec<Record> {
        self.records_for(self.contents())
    }

    /// Wide records for the given contents, in iteration order.
    ///
    /// Owners are indexed once, so this is linear in the number of contents.
    pub fn records_for<'a>(
        &self,
        contents: impl IntoIterator<Item = &'a Content>,
    ) -> Vec<Record> {
        let owners = Owners::new(self);
        contents
            .into_iter()
            .map(|c| {
                self.wide_record(
                    c,
                    |id| owners.lines.get(&id).copied(),
                    |id| owners.blocks.get(&id).copied(),
                )
            })
            .collect()
    }

    fn wide_record<'a>(
        &'a self,
        content: &Content,
        line: impl Fn(usize) -> Option<&'a Line>,
        block: impl Fn(usize) -> Option<&'a Block>,
    ) -> Record {
        let mut record = content.get_dict();
        let Some(line_ref) = content.line else {
            return record;
        };

        if let Some(line) = line(line_ref.line_id) {
            extend_prefixed(&mut record, "line", line.get_dict());
        }
        if let Some(block) = block(line_ref.block_id) {
            extend_prefixed(&mut record, "block", block.get_dict());
        }
        if let Some(page) = self.page(line_ref.page_number) {
            extend_prefixed(&mut record, "page", page.get_dict());
        }
        record
    }
}

/// Lines and blocks of a document keyed by id.
struct Owners<'a> {
    lines: HashMap<usize, &'a Line>,
    blocks: HashMap<usize, &'a Block>,
}

impl<'a> Owners<'a> {
    fn new(document: &'a Document) -> Self {
        Self {
            lines: document.lines().map(|l| (l.id, l)).collect(),
            blocks: document.blocks().map(|b| (b.id, b)).collect(),
        }
    }
}
