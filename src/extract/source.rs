//! Page source abstraction.
//!
//! A [`PageSource`] yields raw page dictionaries in the MuPDF "text dict"
//! shape (page → blocks → lines → spans). The extractor only ever talks to
//! this trait, so any engine able to produce that shape can feed it.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

fn opaque() -> u8 {
    255
}

/// A raw text span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSpan {
    /// Text as produced by the engine, before normalization
    #[serde(default)]
    pub text: String,
    /// Bounding box `[x0, y0, x1, y1]`
    pub bbox: [f64; 4],
    /// Baseline origin `[x, y]`
    pub origin: [f64; 2],
    /// Font size
    #[serde(default)]
    pub size: f64,
    /// Font name
    #[serde(default)]
    pub font: String,
    /// Span flags
    #[serde(default)]
    pub flags: u32,
    /// Character flags
    #[serde(default)]
    pub char_flags: u32,
    /// Bidirectional level
    #[serde(default)]
    pub bidi: i32,
    /// Alpha channel
    #[serde(default = "opaque")]
    pub alpha: u8,
    /// Packed sRGB color
    #[serde(default)]
    pub color: u32,
    /// Font ascender
    #[serde(default)]
    pub ascender: f64,
    /// Font descender
    #[serde(default)]
    pub descender: f64,
}

/// A raw text line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawLine {
    /// Bounding box `[x0, y0, x1, y1]`
    pub bbox: [f64; 4],
    /// Spans in visual order
    #[serde(default)]
    pub spans: Vec<RawSpan>,
}

/// A raw block. Image blocks carry no lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBlock {
    /// Block index on its page
    #[serde(default)]
    pub number: usize,
    /// Block kind (0 = text, 1 = image)
    #[serde(rename = "type", default)]
    pub kind: u32,
    /// Bounding box `[x0, y0, x1, y1]`
    pub bbox: [f64; 4],
    /// Lines of a text block
    #[serde(default)]
    pub lines: Vec<RawLine>,
}

/// A raw page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPage {
    /// Page width in points
    pub width: f64,
    /// Page height in points
    pub height: f64,
    /// Blocks in engine order
    #[serde(default)]
    pub blocks: Vec<RawBlock>,
}

/// Provider of raw pages.
pub trait PageSource {
    /// Whether the source must be unlocked before pages can be read.
    fn needs_password(&self) -> bool {
        false
    }

    /// Try a password. Returns `false` when it is rejected.
    fn authenticate(&mut self, _password: &str) -> bool {
        true
    }

    /// Number of pages.
    fn page_count(&self) -> usize;

    /// Load the page at a zero-based index.
    fn load_page(&self, index: usize) -> Result<RawPage>;
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PageDump {
    Pages(Vec<RawPage>),
    Document { pages: Vec<RawPage> },
    Page(RawPage),
}

/// A [`PageSource`] over a JSON dump of text dicts.
///
/// Accepts an array of pages, an object with a `pages` array, or a single
/// page object.
#[derive(Debug, Clone, Default)]
pub struct JsonPageSource {
    pages: Vec<RawPage>,
    password: Option<String>,
    unlocked: bool,
}

impl JsonPageSource {
    /// Create a source over pages already in memory.
    pub fn from_pages(pages: Vec<RawPage>) -> Self {
        Self {
            pages,
            ..Default::default()
        }
    }

    /// Read a dump from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let dump: PageDump = serde_json::from_reader(reader)?;
        Ok(Self::from_dump(dump))
    }

    /// Read a dump from a file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Lock the source behind a password.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self.unlocked = false;
        self
    }

    /// The pages of the dump.
    pub fn pages(&self) -> &[RawPage] {
        &self.pages
    }

    fn from_dump(dump: PageDump) -> Self {
        let pages = match dump {
            PageDump::Pages(pages) | PageDump::Document { pages } => pages,
            PageDump::Page(page) => vec![page],
        };
        Self::from_pages(pages)
    }
}

impl FromStr for JsonPageSource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let dump: PageDump = serde_json::from_str(s)?;
        Ok(Self::from_dump(dump))
    }
}

impl PageSource for JsonPageSource {
    fn needs_password(&self) -> bool {
        self.password.is_some() && !self.unlocked
    }

    fn authenticate(&mut self, password: &str) -> bool {
        match &self.password {
            Some(expected) if expected != password => false,
            _ => {
                self.unlocked = true;
                true
            }
        }
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn load_page(&self, index: usize) -> Result<RawPage> {
        self.pages
            .get(index)
            .cloned()
            .ok_or(Error::IndexOutOfRange {
                index,
                len: self.pages.len(),
            })
    }
}
