//! Document model types for extracted page content.
//!
//! The hierarchy is an arena: a [`Document`] owns its pages, each page owns
//! its blocks, each block its lines and each line its contents. Children
//! point back to their owners through plain identifiers ([`LineRef`],
//! `block_id`, `page_number`), so the model serializes without cycles.

mod content;
mod document;
mod geometry;
mod line;
mod page;
mod record;

pub use content::{Content, LineRef};
pub use document::Document;
pub use geometry::{BBox, Origin, Style};
pub use line::Line;
pub use page::{Block, Page};
pub use record::Record;

pub(crate) use geometry::round2;
