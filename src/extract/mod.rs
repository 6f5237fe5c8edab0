//! Extraction boundary: raw page sources and the hierarchy builder.

mod extractor;
mod options;
mod password;
mod source;

pub use extractor::Extractor;
pub use options::ExtractOptions;
pub use password::password_from_filename;
pub use source::{JsonPageSource, PageSource, RawBlock, RawLine, RawPage, RawSpan};
