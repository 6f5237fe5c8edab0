//! Multi-key stable ordering of contents.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::attr::{AttrPath, AttrValue};
use crate::error::{Error, Result};
use crate::model::Content;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    /// Smallest first
    #[default]
    Ascending,
    /// Largest first
    Descending,
}

/// One selector of a multi-key sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortKey {
    /// Attribute compared by this key
    pub attr: AttrPath,
    /// Direction of the comparison
    pub order: SortOrder,
}

impl SortKey {
    /// Ascending key on `attr`.
    pub fn ascending(attr: AttrPath) -> Self {
        Self {
            attr,
            order: SortOrder::Ascending,
        }
    }

    /// Descending key on `attr`.
    pub fn descending(attr: AttrPath) -> Self {
        Self {
            attr,
            order: SortOrder::Descending,
        }
    }

    /// Natural reading order: page, then top to bottom, then left to right.
    pub fn reading_order() -> Vec<SortKey> {
        vec![
            SortKey::ascending(AttrPath::PageNumber),
            SortKey::ascending(AttrPath::Yo),
            SortKey::ascending(AttrPath::Xo),
        ]
    }

    /// Parse a list of keys such as `["page.number", "-yo"]`.
    pub fn parse_list<S: AsRef<str>>(keys: &[S]) -> Result<Vec<SortKey>> {
        keys.iter().map(|k| k.as_ref().parse()).collect()
    }

    fn compare(&self, a: &AttrValue<'_>, b: &AttrValue<'_>) -> Ordering {
        let ordering = a.total_cmp(b);
        match self.order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }
}

/// `"yo"` sorts ascending, `"-yo"` descending; a leading `+` is accepted.
impl FromStr for SortKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(path) = s.strip_prefix('-') {
            Ok(SortKey::descending(path.parse()?))
        } else if let Some(path) = s.strip_prefix('+') {
            Ok(SortKey::ascending(path.parse()?))
        } else {
            Ok(SortKey::ascending(s.parse()?))
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.order {
            SortOrder::Ascending => write!(f, "{}", self.attr),
            SortOrder::Descending => write!(f, "-{}", self.attr),
        }
    }
}

/// Compute the stable sort permutation of `contents` under `keys`.
///
/// Every key is resolved on every content before anything is compared, so
/// a resolution failure leaves the caller free to keep its data untouched.
pub(crate) fn sort_permutation(
    contents: &[Content],
    keys: &[SortKey],
) -> Result<Vec<usize>> {
    let rows = contents
        .iter()
        .map(|content| {
            keys.iter()
                .map(|key| key.attr.resolve(content))
                .collect::<Result<Vec<_>>>()
        })
        .collect::<Result<Vec<_>>>()?;

    let mut order: Vec<usize> = (0..contents.len()).collect();
    // `sort_by` is stable: equal rows keep their relative order.
    order.sort_by(|&a, &b| {
        keys.iter()
            .zip(rows[a].iter().zip(rows[b].iter()))
            .map(|(key, (va, vb))| key.compare(va, vb))
            .find(|ordering| *ordering != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    });
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BBox, Origin, Style};

    fn content(id: usize, xo: f64, yo: f64) -> Content {
        Content::new(
            id,
            &format!("c{}", id),
            BBox::new(xo, yo - 8.0, xo + 10.0, yo + 2.0),
            Origin::new(xo, yo),
            Style::new("Helvetica", 10.0),
        )
        .unwrap()
    }

    #[test]
    fn test_parse_sort_key() {
        assert_eq!(
            "yo".parse::<SortKey>().unwrap(),
            SortKey::ascending(AttrPath::Yo)
        );
        assert_eq!(
            "-block.id".parse::<SortKey>().unwrap(),
            SortKey::descending(AttrPath::BlockId)
        );
        assert_eq!(
            "+xo".parse::<SortKey>().unwrap(),
            SortKey::ascending(AttrPath::Xo)
        );
        assert!(matches!(
            "--yo".parse::<SortKey>(),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_display_round_trip() {
        let key = SortKey::descending(AttrPath::PageNumber);
        assert_eq!(key.to_string(), "-page.number");
    }

    #[test]
    fn test_permutation_multi_key() {
        let contents = vec![
            content(0, 90.0, 10.0),
            content(1, 10.0, 20.0),
            content(2, 10.0, 10.0),
        ];
        let keys = vec![
            SortKey::ascending(AttrPath::Yo),
            SortKey::ascending(AttrPath::Xo),
        ];
        assert_eq!(sort_permutation(&contents, &keys).unwrap(), vec![2, 0, 1]);
    }

    #[test]
    fn test_permutation_is_stable() {
        let contents = vec![
            content(0, 50.0, 10.0),
            content(1, 10.0, 10.0),
            content(2, 30.0, 10.0),
        ];
        let keys = vec![SortKey::ascending(AttrPath::Yo)];
        assert_eq!(sort_permutation(&contents, &keys).unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_permutation_descending() {
        let contents = vec![content(0, 10.0, 10.0), content(1, 20.0, 10.0)];
        let keys = vec![SortKey::descending(AttrPath::Xo)];
        assert_eq!(sort_permutation(&contents, &keys).unwrap(), vec![1, 0]);
    }

    #[test]
    fn test_permutation_fails_on_missing_owner() {
        let contents = vec![content(0, 10.0, 10.0)];
        let err = sort_permutation(&contents, &SortKey::reading_order()).unwrap_err();
        assert!(matches!(err, Error::AttributeResolution { .. }));
    }
}
