//! The [`PdfContents`] container and its manipulation operations.
//!
//! Every manipulation comes as an in-place mutator and a value-returning
//! twin that leaves the receiver untouched:
//!
//! | in place | by value |
//! |----------|----------|
//! | [`PdfContents::sort`] | [`PdfContents::sorted`] |
//! | [`PdfContents::join`] | [`PdfContents::joined`] |
//! | [`PdfContents::assign_horizontal_end_on_page`] | [`PdfContents::horizontal_end_on_page_assigned`] |
//!
//! Each takes a `use_cache` flag. With it set, a call identical to one
//! already applied since the sequence last changed returns immediately.
//! Operations either complete or fail without touching the container.

mod attr;
mod bucket;
mod cache;
mod join;
mod options;
mod query;
mod sort;
mod validate;

pub use attr::{AttrPath, AttrValue};
pub use options::JoinOptions;
pub use sort::{SortKey, SortOrder};

use std::collections::HashSet;
use std::ops::{Bound, Index, RangeBounds};

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::{Content, Document, Record};
use cache::{CacheKey, OperationCache};

/// Ordered, mutable collection of contents.
///
/// Holds owned snapshots of [`Content`]; the [`Document`] it was built from
/// stays the owner of the hierarchy. No two entries share an id.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PdfContents {
    contents: Vec<Content>,

    #[serde(skip)]
    cache: OperationCache,

    #[serde(skip)]
    horizontal_end_on_page_by_x: Option<Vec<f64>>,
}

impl PdfContents {
    /// Create a container, rejecting duplicate content ids.
    pub fn new(contents: Vec<Content>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(contents.len());
        if let Some(dup) = contents.iter().find(|c| !seen.insert(c.id)) {
            return Err(Error::Configuration(format!(
                "duplicate content id {}",
                dup.id
            )));
        }
        Ok(Self {
            contents,
            ..Default::default()
        })
    }

    /// Flatten a document's contents in document order.
    pub fn from_document(document: &Document) -> Result<Self> {
        Self::new(document.contents().cloned().collect())
    }

    /// Number of contents.
    pub fn len(&self) -> usize {
        self.contents.len()
    }

    /// Whether the container is empty.
    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// Get a content by position.
    pub fn get(&self, index: usize) -> Option<&Content> {
        self.contents.get(index)
    }

    /// Iterate over the contents in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Content> {
        self.contents.iter()
    }

    /// The contents as a slice.
    pub fn as_slice(&self) -> &[Content] {
        &self.contents
    }

    /// Copy a range of contents into a new container.
    ///
    /// Returns `None` when the range is out of bounds.
    pub fn slice<R: RangeBounds<usize>>(&self, range: R) -> Option<Self> {
        let bounds: (Bound<usize>, Bound<usize>) =
            (range.start_bound().cloned(), range.end_bound().cloned());
        self.contents
            .get(bounds)
            .map(|contents| self.derive(contents.to_vec()))
    }

    /// Consume the container, returning its contents.
    pub fn into_vec(self) -> Vec<Content> {
        self.contents
    }

    /// Texts of all contents in order.
    pub fn texts(&self) -> Vec<&str> {
        self.contents.iter().map(Content::text).collect()
    }

    /// Flat records of all contents in order.
    pub fn records(&self) -> Vec<Record> {
        self.contents.iter().map(Content::get_dict).collect()
    }

    /// Wide records including each content's line, block and page fields.
    pub fn records_with(&self, document: &Document) -> Vec<Record> {
        document.records_for(&self.contents)
    }

    /// Keys of the latest sort still reflected in the current order.
    pub fn sorted_by(&self) -> Option<&[SortKey]> {
        self.cache.last_sort()
    }

    /// Whether a join is reflected in the current sequence.
    pub fn is_joined(&self) -> bool {
        self.cache.has_join()
    }

    /// Delimiters of the latest bucket assignment.
    pub fn horizontal_end_on_page_by_x(&self) -> Option<&[f64]> {
        self.horizontal_end_on_page_by_x.as_deref()
    }

    /// Stable multi-key sort. An empty `by` sorts in reading order.
    pub fn sort(&mut self, by: &[SortKey], use_cache: bool) -> Result<()> {
        let reading_order;
        let keys = if by.is_empty() {
            reading_order = SortKey::reading_order();
            reading_order.as_slice()
        } else {
            by
        };

        let key = CacheKey::sort(keys);
        if use_cache && self.cache.contains(&key) {
            return Ok(());
        }

        let order = sort::sort_permutation(&self.contents, keys)?;
        let changed = order.iter().enumerate().any(|(pos, &i)| pos != i);
        if changed {
            let mut rank = vec![0; order.len()];
            for (pos, &i) in order.iter().enumerate() {
                rank[i] = pos;
            }
            let mut ranked: Vec<(usize, Content)> = rank
                .into_iter()
                .zip(std::mem::take(&mut self.contents))
                .collect();
            ranked.sort_unstable_by_key(|(pos, _)| *pos);
            self.contents = ranked.into_iter().map(|(_, c)| c).collect();
        }

        log::debug!(
            "sorted {} contents by [{}] (changed: {})",
            self.contents.len(),
            keys.iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
            changed
        );
        self.cache.record(key, changed);
        Ok(())
    }

    /// Sorted copy of the container.
    pub fn sorted(&self, by: &[SortKey], use_cache: bool) -> Result<Self> {
        let mut contents = self.clone();
        contents.sort(by, use_cache)?;
        Ok(contents)
    }

    /// Collapse runs of continuous contents in the current order.
    pub fn join(&mut self, options: &JoinOptions, use_cache: bool) -> Result<()> {
        options.validate()?;

        let key = CacheKey::join(options);
        if use_cache && self.cache.contains(&key) {
            return Ok(());
        }

        let before = self.contents.len();
        let (joined, absorbed) =
            join::join_contents(std::mem::take(&mut self.contents), options);
        self.contents = joined;

        log::debug!(
            "joined {} contents into {} ({} absorbed)",
            before,
            self.contents.len(),
            absorbed
        );

        // Merges drop entries without moving the rest, so an earlier sort
        // usually still holds. Keep it only if the merged values agree.
        let kept_sort = self
            .cache
            .last_sort()
            .filter(|keys| absorbed > 0 && self.still_sorted_by(keys))
            .map(<[SortKey]>::to_vec);
        self.cache.record(key, absorbed > 0);
        if let Some(keys) = kept_sort {
            self.cache.record(CacheKey::sort(&keys), false);
        }
        Ok(())
    }

    fn still_sorted_by(&self, keys: &[SortKey]) -> bool {
        match sort::sort_permutation(&self.contents, keys) {
            Ok(order) => order.iter().enumerate().all(|(pos, &i)| pos == i),
            Err(_) => false,
        }
    }

    /// Joined copy of the container.
    pub fn joined(&self, options: &JoinOptions, use_cache: bool) -> Result<Self> {
        let mut contents = self.clone();
        contents.join(options, use_cache)?;
        Ok(contents)
    }

    /// Assign each content the horizontal bucket of its origin.
    ///
    /// Bucket `i` is the smallest index with `xo < x_delimiters[i]`, or
    /// `x_delimiters.len()` when the origin is past every delimiter.
    /// Delimiters must be finite and strictly ascending.
    pub fn assign_horizontal_end_on_page(
        &mut self,
        x_delimiters: &[f64],
        use_cache: bool,
    ) -> Result<()> {
        bucket::validate_delimiters(x_delimiters)?;

        let key = CacheKey::buckets(x_delimiters);
        if use_cache && self.cache.contains(&key) {
            return Ok(());
        }

        let mut changed = false;
        for content in &mut self.contents {
            let bucket = Some(bucket::bucket_for(content.xo(), x_delimiters));
            if content.horizontal_end_on_page != bucket {
                content.horizontal_end_on_page = bucket;
                changed = true;
            }
        }
        self.horizontal_end_on_page_by_x = Some(x_delimiters.to_vec());

        log::debug!(
            "assigned {} contents to {} horizontal buckets",
            self.contents.len(),
            x_delimiters.len() + 1
        );
        self.cache.record(key, changed);
        Ok(())
    }

    /// Copy of the container with horizontal buckets assigned.
    pub fn horizontal_end_on_page_assigned(
        &self,
        x_delimiters: &[f64],
        use_cache: bool,
    ) -> Result<Self> {
        let mut contents = self.clone();
        contents.assign_horizontal_end_on_page(x_delimiters, use_cache)?;
        Ok(contents)
    }

    /// Contents on the same page and row as the one at `i_ref`.
    ///
    /// Baselines are rounded to two decimals before comparison; the bound
    /// is inclusive and the reference itself is part of the result.
    pub fn get_contents_from_same_row(
        &self,
        i_ref: usize,
        yo_diff_tolerance: f64,
    ) -> Result<Self> {
        let indices = query::same_row(&self.contents, i_ref, yo_diff_tolerance)?;
        Ok(self.select(&indices))
    }

    /// Contents on the same page whose `attr` matches the one at `i_ref`.
    ///
    /// Numeric attributes match within `diff_tolerance`; text attributes
    /// must be equal.
    pub fn get_contents_from_same_attr(
        &self,
        i_ref: usize,
        attr: &str,
        diff_tolerance: f64,
    ) -> Result<Self> {
        let attr: AttrPath = attr.parse()?;
        let indices = query::same_attr(&self.contents, i_ref, attr, diff_tolerance)?;
        Ok(self.select(&indices))
    }

    /// Contents owned by the same block as the one at `i_ref`.
    pub fn get_contents_from_same_block(&self, i_ref: usize) -> Result<Self> {
        let indices = query::same_block(&self.contents, i_ref)?;
        Ok(self.select(&indices))
    }

    /// Contents owned by the same line as the one at `i_ref`.
    pub fn get_contents_from_same_line(&self, i_ref: usize) -> Result<Self> {
        let indices = query::same_line(&self.contents, i_ref)?;
        Ok(self.select(&indices))
    }

    /// Check the texts against an expected sequence.
    ///
    /// With `exactly_text` the sequences must be equal. Otherwise each
    /// expected string must be found, ignoring case, in order.
    pub fn check_if_matches<S: AsRef<str>>(
        &self,
        known_contents: &[S],
        exactly_text: bool,
    ) -> bool {
        validate::matches_pattern(&self.texts(), known_contents, exactly_text)
    }

    /// Check that each criterion is satisfied by some content.
    ///
    /// A criterion is a list of attribute values that must all hold on one
    /// content. `text` values are searched as substrings unless
    /// `exactly_text` is set; other attributes must be equal. Criteria are
    /// independent of each other and of the container order.
    ///
    /// ```
    /// use pdf_contents::{contents_from_json, AttrPath, AttrValue};
    ///
    /// let contents = contents_from_json(r#"[{"width": 595.0, "height": 842.0, "blocks": [
    ///     {"number": 0, "type": 0, "bbox": [40, 40, 120, 52], "lines": [
    ///         {"bbox": [40, 40, 120, 52], "spans": [
    ///             {"text": "Total due", "bbox": [40, 40, 120, 52], "origin": [40, 50],
    ///              "size": 9.0, "font": "Arial-Bold"}]}]}]}]"#).unwrap();
    ///
    /// let total = vec![
    ///     (AttrPath::Text, AttrValue::Text("Total")),
    ///     (AttrPath::PageNumber, AttrValue::Int(0)),
    ///     (AttrPath::Font, AttrValue::Text("Arial-Bold")),
    /// ];
    /// assert!(contents.check_if_matches_attrs(&[total], false).unwrap());
    /// ```
    pub fn check_if_matches_attrs(
        &self,
        criteria: &[Vec<(AttrPath, AttrValue<'_>)>],
        exactly_text: bool,
    ) -> Result<bool> {
        validate::matches_criteria(&self.contents, criteria, exactly_text)
    }

    fn select(&self, indices: &[usize]) -> Self {
        self.derive(indices.iter().map(|&i| self.contents[i].clone()).collect())
    }

    /// New container over a subset of this one's contents.
    fn derive(&self, contents: Vec<Content>) -> Self {
        Self {
            contents,
            cache: OperationCache::default(),
            horizontal_end_on_page_by_x: self.horizontal_end_on_page_by_x.clone(),
        }
    }
}

impl Index<usize> for PdfContents {
    type Output = Content;

    fn index(&self, index: usize) -> &Content {
        &self.contents[index]
    }
}

impl<'a> IntoIterator for &'a PdfContents {
    type Item = &'a Content;
    type IntoIter = std::slice::Iter<'a, Content>;

    fn into_iter(self) -> Self::IntoIter {
        self.contents.iter()
    }
}

impl IntoIterator for PdfContents {
    type Item = Content;
    type IntoIter = std::vec::IntoIter<Content>;

    fn into_iter(self) -> Self::IntoIter {
        self.contents.into_iter()
    }
}
