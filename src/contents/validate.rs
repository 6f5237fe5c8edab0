//! Validation of extracted contents against expected texts or attributes.

use super::attr::{AttrPath, AttrValue};
use crate::error::Result;
use crate::model::Content;

/// Compare `texts` with `expected`.
///
/// Exact mode requires equal lengths and pairwise equal strings. Otherwise
/// every expected string must occur, ignoring case, in the produced texts,
/// each one after the end of the previous match.
pub(crate) fn matches_pattern<S: AsRef<str>>(
    texts: &[&str],
    expected: &[S],
    exactly: bool,
) -> bool {
    if exactly {
        return texts.len() == expected.len()
            && texts
                .iter()
                .zip(expected)
                .all(|(text, want)| *text == want.as_ref());
    }

    let haystacks: Vec<String> = texts.iter().map(|t| t.to_lowercase()).collect();
    let mut text_index = 0;
    let mut offset = 0;

    'expected: for want in expected {
        let needle = want.as_ref().to_lowercase();
        while let Some(haystack) = haystacks.get(text_index) {
            if let Some(pos) = haystack[offset..].find(&needle) {
                offset += pos + needle.len();
                continue 'expected;
            }
            text_index += 1;
            offset = 0;
        }
        log::debug!("expected text '{}' not found", want.as_ref());
        return false;
    }
    true
}

/// Whether every criterion is satisfied by at least one content.
///
/// A content satisfies a criterion when all of its `(path, value)` pairs
/// hold. `text` is a case-sensitive substring test unless `exactly_text`
/// is set; every other path must be equal.
pub(crate) fn matches_criteria(
    contents: &[Content],
    criteria: &[Vec<(AttrPath, AttrValue<'_>)>],
    exactly_text: bool,
) -> Result<bool> {
    for criterion in criteria {
        let mut found = false;
        for content in contents {
            if satisfies(content, criterion, exactly_text)? {
                found = true;
                break;
            }
        }
        if !found {
            log::debug!("no content satisfies {:?}", criterion);
            return Ok(false);
        }
    }
    Ok(true)
}

fn satisfies(
    content: &Content,
    criterion: &[(AttrPath, AttrValue<'_>)],
    exactly_text: bool,
) -> Result<bool> {
    for (path, expected) in criterion {
        let actual = path.resolve(content)?;
        let hit = match (path, actual, expected) {
            (AttrPath::Text, AttrValue::Text(text), AttrValue::Text(want)) if !exactly_text => {
                text.contains(*want)
            }
            _ => actual.matches(expected, 0.0),
        };
        if !hit {
            return Ok(false);
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::model::{BBox, LineRef, Origin, Style};

    fn content(id: usize, text: &str, font: &str, page: usize) -> Content {
        Content::new(
            id,
            text,
            BBox::new(10.0, 10.0, 60.0, 20.0),
            Origin::new(10.0, 18.0),
            Style::new(font, 10.0),
        )
        .unwrap()
        .with_line(LineRef {
            page_number: page,
            block_id: page,
            block_number: 0,
            line_id: id,
            line_number: 0,
        })
    }

    fn statement() -> Vec<Content> {
        vec![
            content(0, "Total due", "Arial-Bold", 0),
            content(1, "42.00", "Arial", 0),
            content(2, "Page 2", "Arial", 1),
        ]
    }

    #[test]
    fn test_criteria_combine_attributes() {
        let contents = statement();
        let criteria = vec![
            vec![
                (AttrPath::Text, AttrValue::Text("Total")),
                (AttrPath::PageNumber, AttrValue::Int(0)),
                (AttrPath::Font, AttrValue::Text("Arial-Bold")),
            ],
            vec![(AttrPath::Text, AttrValue::Text("42.00"))],
        ];
        assert!(matches_criteria(&contents, &criteria, false).unwrap());

        // Every pair must hold on the same content.
        let criteria = vec![vec![
            (AttrPath::Text, AttrValue::Text("Total")),
            (AttrPath::PageNumber, AttrValue::Int(1)),
        ]];
        assert!(!matches_criteria(&contents, &criteria, false).unwrap());
    }

    #[test]
    fn test_criteria_text_containment() {
        let contents = statement();
        let partial = vec![vec![(AttrPath::Text, AttrValue::Text("Total"))]];
        assert!(matches_criteria(&contents, &partial, false).unwrap());
        assert!(!matches_criteria(&contents, &partial, true).unwrap());

        let lowercase = vec![vec![(AttrPath::Text, AttrValue::Text("total"))]];
        assert!(!matches_criteria(&contents, &lowercase, false).unwrap());

        let full = vec![vec![(AttrPath::Text, AttrValue::Text("Total due"))]];
        assert!(matches_criteria(&contents, &full, true).unwrap());
    }

    #[test]
    fn test_criteria_numeric_equality() {
        let contents = statement();
        let at_x = vec![vec![(AttrPath::Xo, AttrValue::Float(10.0))]];
        assert!(matches_criteria(&contents, &at_x, false).unwrap());

        let near_x = vec![vec![(AttrPath::Xo, AttrValue::Float(10.001))]];
        assert!(!matches_criteria(&contents, &near_x, false).unwrap());

        assert!(matches_criteria(&contents, &[], true).unwrap());
    }

    #[test]
    fn test_criteria_unresolvable_path() {
        let mut orphan = content(0, "x", "Arial", 0);
        orphan.line = None;
        let criteria = vec![vec![(AttrPath::LineId, AttrValue::Int(0))]];
        let err = matches_criteria(&[orphan], &criteria, false).unwrap_err();
        assert!(matches!(err, Error::AttributeResolution { .. }));
    }

    #[test]
    fn test_exact_match() {
        let texts = ["Invoice", "Total"];
        assert!(matches_pattern(&texts, &["Invoice", "Total"], true));
        assert!(!matches_pattern(&texts, &["Invoice", "total"], true));
        assert!(!matches_pattern(&texts, &["Invoice"], true));
        assert!(!matches_pattern(&texts, &["Invoice", "Total", "42"], true));
    }

    #[test]
    fn test_exact_empty() {
        let none: [&str; 0] = [];
        assert!(matches_pattern(&[], &none, true));
        assert!(!matches_pattern(&["x"], &none, true));
        assert!(matches_pattern(&["x"], &none, false));
    }

    #[test]
    fn test_contains_in_order() {
        let texts = ["INVOICE #123", "Total due", "42.00"];
        assert!(matches_pattern(&texts, &["Invoice", "Total", "42.00"], false));
        assert!(!matches_pattern(&texts, &["Total", "Invoice"], false));
        assert!(!matches_pattern(&texts, &["Balance"], false));
    }

    #[test]
    fn test_several_matches_in_one_text() {
        let texts = ["Name: Jane Doe", "Date"];
        assert!(matches_pattern(&texts, &["name", "doe", "date"], false));
        // "name" is consumed; the second occurrence must come later.
        assert!(!matches_pattern(&texts, &["name", "name"], false));
    }
}
