//! Building the content hierarchy from a page source.

use std::path::Path;

use super::options::ExtractOptions;
use super::password::password_from_filename;
use super::source::{PageSource, RawBlock, RawSpan};
use crate::contents::PdfContents;
use crate::error::{Error, Result};
use crate::model::{BBox, Block, Content, Document, Line, LineRef, Origin, Page, Style};

/// Document-wide id counters. Only retained elements consume an id.
#[derive(Debug, Default)]
struct Ids {
    block: usize,
    line: usize,
    content: usize,
}

/// Extracts a [`Document`] or [`PdfContents`] from a [`PageSource`].
///
/// # Example
///
/// ```
/// use pdf_contents::extract::{Extractor, JsonPageSource};
///
/// let source: JsonPageSource = r#"{"width": 612, "height": 792, "blocks": []}"#.parse()?;
/// let contents = Extractor::new(source).extract_contents()?;
/// assert!(contents.is_empty());
/// # Ok::<(), pdf_contents::Error>(())
/// ```
pub struct Extractor<S: PageSource> {
    source: S,
    options: ExtractOptions,
    prepared: bool,
}

impl<S: PageSource> Extractor<S> {
    /// Create an extractor with default options.
    pub fn new(source: S) -> Self {
        Self {
            source,
            options: ExtractOptions::default(),
            prepared: false,
        }
    }

    /// Replace the options.
    pub fn with_options(mut self, options: ExtractOptions) -> Self {
        self.options = options;
        self.prepared = false;
        self
    }

    /// The underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Consume the extractor, returning its source.
    pub fn into_source(self) -> S {
        self.source
    }

    /// Build the full page → block → line → content hierarchy.
    pub fn extract_document(&mut self) -> Result<Document> {
        self.prepare()?;

        let mut document = Document::new();
        let mut ids = Ids::default();
        for index in 0..self.source.page_count() {
            let raw = self.source.load_page(index)?;
            let mut page = Page::new(index, raw.width, raw.height);
            for raw_block in &raw.blocks {
                if let Some(block) = build_block(raw_block, index, &mut ids) {
                    page.add_block(block);
                }
            }
            log::debug!("page {}: {} retained blocks", index, page.len());
            document.add_page(page);
        }

        log::debug!(
            "extracted {} pages, {} blocks, {} lines, {} contents",
            document.page_count(),
            ids.block,
            ids.line,
            ids.content
        );
        Ok(document)
    }

    /// Extract the flattened contents.
    ///
    /// A document without text yields an empty container unless
    /// [`ExtractOptions::require_content`] is set.
    pub fn extract_contents(&mut self) -> Result<PdfContents> {
        let document = self.extract_document()?;
        let contents = PdfContents::from_document(&document)?;
        if contents.is_empty() {
            if self.options.require_content {
                return Err(Error::NoContent);
            }
            log::warn!("no text content found in {}", self.describe());
        }
        Ok(contents)
    }

    /// Extract one normalized string per line.
    pub fn extract_texts(&mut self) -> Result<Vec<String>> {
        let texts = self.extract_document()?.texts();
        if texts.is_empty() && self.options.require_content {
            return Err(Error::NoContent);
        }
        Ok(texts)
    }

    /// Check the document name and unlock the source, once.
    fn prepare(&mut self) -> Result<()> {
        if self.prepared {
            return Ok(());
        }

        if self.options.require_pdf_extension {
            if let Some(name) = &self.options.document_name {
                let extension = Path::new(name)
                    .extension()
                    .map(|e| e.to_string_lossy().to_lowercase())
                    .unwrap_or_default();
                if extension != "pdf" {
                    return Err(Error::UnsupportedExtension(name.clone()));
                }
            }
        }

        if self.source.needs_password() {
            let password = match (&self.options.password, &self.options.document_name) {
                (Some(password), _) => password.clone(),
                (None, Some(name)) => password_from_filename(name)?,
                (None, None) => return Err(Error::MissingPassword),
            };
            if !self.source.authenticate(&password) {
                return Err(Error::InvalidPassword);
            }
            log::debug!("authenticated {}", self.describe());
        }

        self.prepared = true;
        Ok(())
    }

    fn describe(&self) -> &str {
        self.options.document_name.as_deref().unwrap_or("document")
    }
}

fn build_block(raw: &RawBlock, page_number: usize, ids: &mut Ids) -> Option<Block> {
    let mut block = Block::new(ids.block, raw.number, BBox::from_array(raw.bbox), page_number);

    for (line_number, raw_line) in raw.lines.iter().enumerate() {
        let line_ref = LineRef {
            page_number,
            block_id: ids.block,
            block_number: raw.number,
            line_id: ids.line,
            line_number,
        };
        let mut line = Line::new(
            ids.line,
            line_number,
            BBox::from_array(raw_line.bbox),
            ids.block,
            page_number,
        );

        for (span_number, span) in raw_line.spans.iter().enumerate() {
            if let Some(content) = build_content(span, ids.content) {
                line.add_content(content.with_number(span_number).with_line(line_ref));
                ids.content += 1;
            }
        }

        if !line.is_empty() {
            block.add_line(line);
            ids.line += 1;
        }
    }

    if block.is_empty() {
        return None;
    }
    ids.block += 1;
    Some(block)
}

fn build_content(span: &RawSpan, id: usize) -> Option<Content> {
    let style = Style {
        font: span.font.clone(),
        size: span.size,
        rgb_color: span.color,
        flags: span.flags,
        char_flags: span.char_flags,
        bidi: span.bidi,
        alpha: span.alpha,
        ascender: span.ascender,
        descender: span.descender,
    };
    let content = Content::new(
        id,
        &span.text,
        BBox::from_array(span.bbox),
        Origin::new(span.origin[0], span.origin[1]),
        style,
    );
    if content.is_none() {
        log::trace!("skipping blank span {:?}", span.text);
    }
    content
}
