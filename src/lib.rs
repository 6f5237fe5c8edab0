//! # pdf-contents
//!
//! Structural content of parsed PDF pages, and the tools to work with it.
//!
//! Text spans are modelled as a page → block → line → content hierarchy and
//! flattened into a [`PdfContents`] container that can be sorted by
//! attribute paths, joined into continuous runs, partitioned into
//! horizontal buckets, grouped by row or attribute, and validated against
//! an expected sequence of texts.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdf_contents::{load_contents, JoinOptions};
//!
//! fn main() -> pdf_contents::Result<()> {
//!     // Load a text-dict dump produced by a PDF engine
//!     let mut contents = load_contents("statement.json")?;
//!
//!     // Reading order, then coalesce adjacent spans
//!     contents.sort(&[], true)?;
//!     contents.join(&JoinOptions::new().with_separator(" "), true)?;
//!
//!     for text in contents.texts() {
//!         println!("{}", text);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Arena hierarchy**: owners are referenced by id, so every level
//!   serializes without cycles
//! - **Attribute paths**: `"page.number"`, `"-yo"`, `"block.id"` resolve
//!   through an explicit registry
//! - **Atomic operations**: a failed call leaves the container untouched
//! - **Opt-in memoization**: repeated identical calls are skipped per container

pub mod cleanup;
pub mod contents;
pub mod error;
pub mod extract;
pub mod model;

// Re-export commonly used types
pub use contents::{AttrPath, AttrValue, JoinOptions, PdfContents, SortKey, SortOrder};
pub use error::{Error, Result};
pub use extract::{
    password_from_filename, ExtractOptions, Extractor, JsonPageSource, PageSource, RawPage,
};
pub use model::{BBox, Block, Content, Document, Line, LineRef, Origin, Page, Record, Style};

use std::io::Read;
use std::path::Path;

/// Extract contents from any page source with default options.
pub fn extract_contents<S: PageSource>(source: S) -> Result<PdfContents> {
    Extractor::new(source).extract_contents()
}

/// Load contents from a JSON text-dict dump on disk.
///
/// # Arguments
///
/// * `path` - Path to the JSON dump
///
/// # Example
///
/// ```no_run
/// use pdf_contents::load_contents;
///
/// let contents = load_contents("statement.json").unwrap();
/// println!("Contents: {}", contents.len());
/// ```
pub fn load_contents<P: AsRef<Path>>(path: P) -> Result<PdfContents> {
    extract_contents(JsonPageSource::open(path)?)
}

/// Load contents from a JSON text-dict dump in memory.
///
/// # Example
///
/// ```
/// use pdf_contents::contents_from_json;
///
/// let json = r#"{"width": 612, "height": 792, "blocks": [{
///     "number": 0, "type": 0, "bbox": [10, 90, 60, 102],
///     "lines": [{"bbox": [10, 90, 60, 102], "spans": [
///         {"text": "Total", "bbox": [10, 90, 60, 102], "origin": [10, 100]}
///     ]}]
/// }]}"#;
/// let contents = contents_from_json(json)?;
/// assert_eq!(contents.texts(), vec!["Total"]);
/// # Ok::<(), pdf_contents::Error>(())
/// ```
pub fn contents_from_json(json: &str) -> Result<PdfContents> {
    extract_contents(json.parse::<JsonPageSource>()?)
}

/// Load contents from a reader over a JSON text-dict dump.
pub fn contents_from_reader<R: Read>(reader: R) -> Result<PdfContents> {
    extract_contents(JsonPageSource::from_reader(reader)?)
}

/// Load a JSON dump of a password-protected document.
///
/// The password is taken from `document_name` (`statement#secret#.pdf`)
/// and checked against the one the source was locked with.
pub fn load_contents_with_name<P: AsRef<Path>>(
    path: P,
    document_name: &str,
    password: Option<&str>,
) -> Result<PdfContents> {
    let mut source = JsonPageSource::open(path)?;
    if let Some(password) = password {
        source = source.with_password(password);
    }
    Extractor::new(source)
        .with_options(ExtractOptions::new().with_document_name(document_name))
        .extract_contents()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DUMP: &str = r#"[{
        "width": 612.0,
        "height": 792.0,
        "blocks": [{
            "number": 0,
            "type": 0,
            "bbox": [10.0, 90.0, 200.0, 102.0],
            "lines": [{
                "bbox": [10.0, 90.0, 200.0, 102.0],
                "spans": [
                    {"text": "Total", "bbox": [10.0, 90.0, 40.0, 102.0], "origin": [10.0, 100.0]},
                    {"text": "due", "bbox": [40.0, 90.0, 60.0, 102.0], "origin": [40.0, 100.0]}
                ]
            }]
        }]
    }]"#;

    #[test]
    fn test_contents_from_json() {
        let contents = contents_from_json(DUMP).unwrap();
        assert_eq!(contents.texts(), vec!["Total", "due"]);
    }

    #[test]
    fn test_contents_from_reader() {
        let contents = contents_from_reader(DUMP.as_bytes()).unwrap();
        assert_eq!(contents.len(), 2);
    }

    #[test]
    fn test_contents_from_invalid_json() {
        assert!(matches!(contents_from_json("[{"), Err(Error::Json(_))));
    }

    #[test]
    fn test_load_contents_missing_file() {
        let result = load_contents("/nonexistent/statement.json");
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_quick_start_pipeline() {
        let mut contents = contents_from_json(DUMP).unwrap();
        contents.sort(&[], true).unwrap();
        contents
            .join(&JoinOptions::new().with_separator(" "), true)
            .unwrap();
        assert_eq!(contents.texts(), vec!["Total due"]);
        assert!(contents.is_joined());
    }
}
