//! Attribute registry: named paths resolved to typed accessors on [`Content`].

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::model::Content;

/// A field of [`Content`] addressable by name.
///
/// Owner fields (`page.number`, `block.id`, ...) resolve through the
/// content's [`LineRef`](crate::model::LineRef) and fail on contents that
/// have no owning line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttrPath {
    /// Document-wide content id (`id`)
    Id,
    /// Span index within its line (`number`)
    Number,
    /// Normalized text (`text`)
    Text,
    /// Left edge of the box (`xl`)
    Xl,
    /// Top edge of the box (`yt`)
    Yt,
    /// Right edge of the box (`xr`)
    Xr,
    /// Bottom edge of the box (`yb`)
    Yb,
    /// Horizontal center (`xc`)
    Xc,
    /// Vertical center (`yc`)
    Yc,
    /// Origin x (`xo`)
    Xo,
    /// Baseline y (`yo`)
    Yo,
    /// Box width (`width`)
    Width,
    /// Box height (`height`)
    Height,
    /// Box area (`area`)
    Area,
    /// Font ascender (`ascender`)
    Ascender,
    /// Font descender (`descender`)
    Descender,
    /// Font size in points (`size`)
    Size,
    /// Font name (`font`)
    Font,
    /// Span flags (`flags`)
    Flags,
    /// Character flags (`char_flags`)
    CharFlags,
    /// Bidirectional embedding level (`bidi`)
    Bidi,
    /// Alpha channel (`alpha`)
    Alpha,
    /// Packed sRGB color (`rgb_color`)
    RgbColor,
    /// Assigned horizontal bucket, absent until assigned (`horizontal_end_on_page`)
    HorizontalEndOnPage,
    /// Number of the owning page (`page.number`)
    PageNumber,
    /// Id of the owning block (`block.id`)
    BlockId,
    /// Source index of the owning block (`block.number`)
    BlockNumber,
    /// Id of the owning line (`line.id`)
    LineId,
    /// Index of the owning line within its block (`line.number`)
    LineNumber,
}

const REGISTRY: &[(&str, AttrPath)] = &[
    ("id", AttrPath::Id),
    ("number", AttrPath::Number),
    ("text", AttrPath::Text),
    ("xl", AttrPath::Xl),
    ("yt", AttrPath::Yt),
    ("xr", AttrPath::Xr),
    ("yb", AttrPath::Yb),
    ("xc", AttrPath::Xc),
    ("yc", AttrPath::Yc),
    ("xo", AttrPath::Xo),
    ("yo", AttrPath::Yo),
    ("width", AttrPath::Width),
    ("height", AttrPath::Height),
    ("area", AttrPath::Area),
    ("ascender", AttrPath::Ascender),
    ("descender", AttrPath::Descender),
    ("size", AttrPath::Size),
    ("font", AttrPath::Font),
    ("flags", AttrPath::Flags),
    ("char_flags", AttrPath::CharFlags),
    ("bidi", AttrPath::Bidi),
    ("alpha", AttrPath::Alpha),
    ("rgb_color", AttrPath::RgbColor),
    ("horizontal_end_on_page", AttrPath::HorizontalEndOnPage),
    ("page.number", AttrPath::PageNumber),
    ("block.id", AttrPath::BlockId),
    ("block.number", AttrPath::BlockNumber),
    ("line.id", AttrPath::LineId),
    ("line.number", AttrPath::LineNumber),
];

impl AttrPath {
    /// The registered name of this path.
    pub fn name(&self) -> &'static str {
        REGISTRY
            .iter()
            .find(|(_, path)| path == self)
            .map(|(name, _)| *name)
            .unwrap_or("?")
    }

    /// Whether values of this path are numbers.
    pub fn is_numeric(&self) -> bool {
        !matches!(self, AttrPath::Text | AttrPath::Font)
    }

    /// Resolve the value of this path on a content.
    pub fn resolve<'a>(&self, content: &'a Content) -> Result<AttrValue<'a>> {
        let value = match self {
            AttrPath::Id => AttrValue::Int(content.id as i64),
            AttrPath::Number => AttrValue::Int(content.number as i64),
            AttrPath::Text => AttrValue::Text(content.text()),
            AttrPath::Xl => AttrValue::Float(content.xl()),
            AttrPath::Yt => AttrValue::Float(content.yt()),
            AttrPath::Xr => AttrValue::Float(content.xr()),
            AttrPath::Yb => AttrValue::Float(content.yb()),
            AttrPath::Xc => AttrValue::Float(content.xc()),
            AttrPath::Yc => AttrValue::Float(content.yc()),
            AttrPath::Xo => AttrValue::Float(content.xo()),
            AttrPath::Yo => AttrValue::Float(content.yo()),
            AttrPath::Width => AttrValue::Float(content.width()),
            AttrPath::Height => AttrValue::Float(content.height()),
            AttrPath::Area => AttrValue::Float(content.area()),
            AttrPath::Ascender => AttrValue::Float(content.style.ascender),
            AttrPath::Descender => AttrValue::Float(content.style.descender),
            AttrPath::Size => AttrValue::Float(content.style.size),
            AttrPath::Font => AttrValue::Text(&content.style.font),
            AttrPath::Flags => AttrValue::Int(content.style.flags as i64),
            AttrPath::CharFlags => AttrValue::Int(content.style.char_flags as i64),
            AttrPath::Bidi => AttrValue::Int(content.style.bidi as i64),
            AttrPath::Alpha => AttrValue::Int(content.style.alpha as i64),
            AttrPath::RgbColor => AttrValue::Int(content.style.rgb_color as i64),
            AttrPath::HorizontalEndOnPage => match content.horizontal_end_on_page {
                Some(bucket) => AttrValue::Int(bucket as i64),
                None => AttrValue::Absent,
            },
            AttrPath::PageNumber
            | AttrPath::BlockId
            | AttrPath::BlockNumber
            | AttrPath::LineId
            | AttrPath::LineNumber => {
                let line = content.line.ok_or_else(|| {
                    Error::attribute(
                        self.name(),
                        format!("content {} has no owning line", content.id),
                    )
                })?;
                let id = match self {
                    AttrPath::PageNumber => line.page_number,
                    AttrPath::BlockId => line.block_id,
                    AttrPath::BlockNumber => line.block_number,
                    AttrPath::LineId => line.line_id,
                    _ => line.line_number,
                };
                AttrValue::Int(id as i64)
            }
        };
        Ok(value)
    }
}

impl FromStr for AttrPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let well_formed = !s.is_empty()
            && s.split('.').all(|segment| {
                !segment.is_empty()
                    && segment
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '_')
            });
        if !well_formed {
            return Err(Error::Configuration(format!(
                "malformed attribute path '{}'",
                s
            )));
        }

        REGISTRY
            .iter()
            .find(|(name, _)| *name == s)
            .map(|(_, path)| *path)
            .ok_or_else(|| Error::attribute(s, "unknown attribute"))
    }
}

impl fmt::Display for AttrPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A resolved attribute value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttrValue<'a> {
    /// The field is unset (e.g., no bucket assigned yet)
    Absent,
    /// An integer field
    Int(i64),
    /// A floating point field
    Float(f64),
    /// A text field
    Text(&'a str),
}

impl AttrValue<'_> {
    /// Numeric view of the value.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttrValue::Int(i) => Some(*i as f64),
            AttrValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            AttrValue::Absent => 0,
            AttrValue::Int(_) | AttrValue::Float(_) => 1,
            AttrValue::Text(_) => 2,
        }
    }

    /// Total order: absent < numbers < text.
    pub fn total_cmp(&self, other: &AttrValue<'_>) -> Ordering {
        match (self, other) {
            (AttrValue::Int(a), AttrValue::Int(b)) => a.cmp(b),
            (AttrValue::Text(a), AttrValue::Text(b)) => a.cmp(b),
            _ => match (self.as_f64(), other.as_f64()) {
                (Some(a), Some(b)) => a.total_cmp(&b),
                _ => self.rank().cmp(&other.rank()),
            },
        }
    }

    /// Compare within a tolerance.
    ///
    /// Numbers match when their absolute difference is at most `tolerance`;
    /// anything else must be exactly equal.
    pub fn matches(&self, other: &AttrValue<'_>, tolerance: f64) -> bool {
        match (self.as_f64(), other.as_f64()) {
            (Some(a), Some(b)) => (a - b).abs() <= tolerance,
            _ => self.total_cmp(other) == Ordering::Equal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BBox, LineRef, Origin, Style};

    fn content() -> Content {
        Content::new(
            7,
            "Total",
            BBox::new(10.0, 20.0, 40.0, 30.0),
            Origin::new(10.0, 28.0),
            Style::new("Helvetica", 9.5),
        )
        .unwrap()
    }

    #[test]
    fn test_parse_registered_paths() {
        for (name, path) in REGISTRY {
            assert_eq!(name.parse::<AttrPath>().unwrap(), *path);
            assert_eq!(path.name(), *name);
        }
        assert_eq!("page.number".parse::<AttrPath>().unwrap(), AttrPath::PageNumber);
    }

    #[test]
    fn test_parse_unknown_path() {
        let err = "block.xl".parse::<AttrPath>().unwrap_err();
        assert!(matches!(err, Error::AttributeResolution { .. }));
    }

    #[test]
    fn test_parse_malformed_path() {
        for bad in ["", "page..number", ".yo", "yo.", "y o", "yo-"] {
            let err = bad.parse::<AttrPath>().unwrap_err();
            assert!(matches!(err, Error::Configuration(_)), "{bad:?}");
        }
    }

    #[test]
    fn test_resolve_fields() {
        let c = content();
        assert_eq!(AttrPath::Id.resolve(&c).unwrap(), AttrValue::Int(7));
        assert_eq!(AttrPath::Xr.resolve(&c).unwrap(), AttrValue::Float(40.0));
        assert_eq!(
            AttrPath::Font.resolve(&c).unwrap(),
            AttrValue::Text("Helvetica")
        );
        assert_eq!(
            AttrPath::HorizontalEndOnPage.resolve(&c).unwrap(),
            AttrValue::Absent
        );
    }

    #[test]
    fn test_resolve_owner_fields() {
        let c = content();
        let err = AttrPath::BlockId.resolve(&c).unwrap_err();
        assert!(matches!(err, Error::AttributeResolution { .. }));

        let c = c.with_line(LineRef {
            page_number: 2,
            block_id: 5,
            block_number: 1,
            line_id: 11,
            line_number: 3,
        });
        assert_eq!(AttrPath::PageNumber.resolve(&c).unwrap(), AttrValue::Int(2));
        assert_eq!(AttrPath::LineNumber.resolve(&c).unwrap(), AttrValue::Int(3));
    }

    #[test]
    fn test_value_ordering() {
        assert_eq!(
            AttrValue::Absent.total_cmp(&AttrValue::Int(0)),
            Ordering::Less
        );
        assert_eq!(
            AttrValue::Int(2).total_cmp(&AttrValue::Float(1.5)),
            Ordering::Greater
        );
        assert_eq!(
            AttrValue::Text("a").total_cmp(&AttrValue::Text("b")),
            Ordering::Less
        );
    }

    #[test]
    fn test_value_matches() {
        assert!(AttrValue::Float(10.0).matches(&AttrValue::Float(10.4), 0.5));
        assert!(!AttrValue::Float(10.0).matches(&AttrValue::Float(10.6), 0.5));
        assert!(AttrValue::Text("a").matches(&AttrValue::Text("a"), 100.0));
        assert!(!AttrValue::Text("a").matches(&AttrValue::Text("b"), 100.0));
    }
}
