//! Read-only grouping queries. Every query returns indices in container order.

use super::attr::AttrPath;
use crate::error::{Error, Result};
use crate::model::{round2, Content};

pub(crate) fn check_tolerance(name: &str, tolerance: f64) -> Result<()> {
    if tolerance.is_finite() && tolerance >= 0.0 {
        Ok(())
    } else {
        Err(Error::Configuration(format!(
            "{} must be a finite non-negative number, got {}",
            name, tolerance
        )))
    }
}

fn reference(contents: &[Content], i_ref: usize) -> Result<&Content> {
    contents.get(i_ref).ok_or(Error::IndexOutOfRange {
        index: i_ref,
        len: contents.len(),
    })
}

/// Entries on the reference's page whose rounded baseline is within tolerance.
pub(crate) fn same_row(
    contents: &[Content],
    i_ref: usize,
    tolerance: f64,
) -> Result<Vec<usize>> {
    let reference = reference(contents, i_ref)?;
    check_tolerance("yo_diff_tolerance", tolerance)?;

    let page = reference.page_number();
    let yo = round2(reference.yo());
    Ok(contents
        .iter()
        .enumerate()
        .filter(|(_, c)| {
            c.page_number() == page && (round2(c.yo()) - yo).abs() <= tolerance
        })
        .map(|(i, _)| i)
        .collect())
}

/// Entries on the reference's page whose `attr` matches the reference's value.
pub(crate) fn same_attr(
    contents: &[Content],
    i_ref: usize,
    attr: AttrPath,
    tolerance: f64,
) -> Result<Vec<usize>> {
    let reference = reference(contents, i_ref)?;
    check_tolerance("diff_tolerance", tolerance)?;

    let page = reference.page_number();
    let target = attr.resolve(reference)?;
    let tolerance = if attr.is_numeric() { tolerance } else { 0.0 };

    let mut indices = Vec::new();
    for (i, content) in contents.iter().enumerate() {
        if content.page_number() != page {
            continue;
        }
        if attr.resolve(content)?.matches(&target, tolerance) {
            indices.push(i);
        }
    }
    Ok(indices)
}

/// Entries owned by the same block as the reference.
pub(crate) fn same_block(contents: &[Content], i_ref: usize) -> Result<Vec<usize>> {
    let reference = reference(contents, i_ref)?;
    let block_id = owner_id(reference, AttrPath::BlockId, Content::block_id)?;
    Ok(filter_indices(contents, |c| c.block_id() == Some(block_id)))
}

/// Entries owned by the same line as the reference.
pub(crate) fn same_line(contents: &[Content], i_ref: usize) -> Result<Vec<usize>> {
    let reference = reference(contents, i_ref)?;
    let line_id = owner_id(reference, AttrPath::LineId, Content::line_id)?;
    Ok(filter_indices(contents, |c| c.line_id() == Some(line_id)))
}

fn owner_id(
    content: &Content,
    path: AttrPath,
    get: impl Fn(&Content) -> Option<usize>,
) -> Result<usize> {
    get(content).ok_or_else(|| {
        Error::attribute(
            path.name(),
            format!("content {} has no owning line", content.id),
        )
    })
}

fn filter_indices(contents: &[Content], keep: impl Fn(&Content) -> bool) -> Vec<usize> {
    contents
        .iter()
        .enumerate()
        .filter(|(_, c)| keep(c))
        .map(|(i, _)| i)
        .collect()
}
