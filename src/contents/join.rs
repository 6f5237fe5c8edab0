//! Coalescing of adjacent continuous contents.

use super::options::JoinOptions;
use crate::model::Content;

/// Whether `next` continues the run ending in `merged`.
pub(crate) fn is_continuous(merged: &Content, next: &Content, options: &JoinOptions) -> bool {
    let same_line = match (merged.line, next.line) {
        (Some(a), Some(b)) => a.line_id == b.line_id,
        _ => {
            merged.page_number() == next.page_number()
                && (merged.yo() - next.yo()).abs() <= options.yo_tolerance
        }
    };
    if !same_line {
        return false;
    }

    // Backward spans start a new run.
    if next.xo() < merged.xl() || next.xo() - merged.xr() > options.max_gap {
        return false;
    }

    if options.respect_buckets && merged.horizontal_end_on_page != next.horizontal_end_on_page {
        return false;
    }

    !options.match_style || merged.style.same_appearance(&next.style)
}

/// Single left-to-right pass collapsing continuous runs.
///
/// Returns the joined sequence and the number of absorbed contents.
pub(crate) fn join_contents(
    contents: Vec<Content>,
    options: &JoinOptions,
) -> (Vec<Content>, usize) {
    let mut joined: Vec<Content> = Vec::with_capacity(contents.len());
    let mut absorbed = 0;
    let mut run_open = false;

    for content in contents {
        if let Some(merged) = joined.last_mut() {
            if is_continuous(merged, &content, options) {
                merged.absorb(&content, &options.separator);
                absorbed += 1;
                run_open = true;
                continue;
            }
            if run_open {
                merged.finish_merge();
                run_open = false;
            }
        }
        joined.push(content);
    }

    if run_open {
        if let Some(merged) = joined.last_mut() {
            merged.finish_merge();
        }
    }

    (joined, absorbed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BBox, LineRef, Origin, Style};

    fn line_ref(line_id: usize) -> LineRef {
        LineRef {
            page_number: 0,
            block_id: 0,
            block_number: 0,
            line_id,
            line_number: line_id,
        }
    }

    fn span(id: usize, text: &str, xl: f64, xr: f64, line_id: usize) -> Content {
        Content::new(
            id,
            text,
            BBox::new(xl, 90.0, xr, 102.0),
            Origin::new(xl, 100.0),
            Style::new("Helvetica", 10.0),
        )
        .unwrap()
        .with_line(line_ref(line_id))
    }

    #[test]
    fn test_join_adjacent_spans() {
        let contents = vec![
            span(0, "Hello", 10.0, 40.0, 0),
            span(1, "world", 40.0, 70.0, 0),
        ];
        let (joined, absorbed) = join_contents(contents, &JoinOptions::default());

        assert_eq!(absorbed, 1);
        assert_eq!(joined.len(), 1);
        assert_eq!(joined[0].text(), "Helloworld");
        assert_eq!(joined[0].bbox, BBox::new(10.0, 90.0, 70.0, 102.0));
        assert_eq!(joined[0].id, 0);
    }

    #[test]
    fn test_join_with_separator() {
        let contents = vec![
            span(0, "Hello", 10.0, 40.0, 0),
            span(1, "world", 40.0, 70.0, 0),
        ];
        let options = JoinOptions::new().with_separator(" ");
        let (joined, _) = join_contents(contents, &options);
        assert_eq!(joined[0].text(), "Hello world");
    }

    #[test]
    fn test_gap_breaks_run() {
        let contents = vec![
            span(0, "a", 10.0, 20.0, 0),
            span(1, "b", 25.0, 30.0, 0),
        ];
        let (joined, absorbed) =
            join_contents(contents.clone(), &JoinOptions::default());
        assert_eq!(absorbed, 0);
        assert_eq!(joined.len(), 2);

        let (joined, _) = join_contents(contents, &JoinOptions::new().with_max_gap(5.0));
        assert_eq!(joined.len(), 1);
    }

    #[test]
    fn test_backward_span_starts_new_run() {
        let contents = vec![
            span(0, "t0", 10.0, 20.0, 0),
            span(1, "t1", 5.0, 8.0, 0),
            span(2, "t2", 8.0, 12.0, 0),
        ];
        let options = JoinOptions::new().with_max_gap(5.0);
        let (joined, absorbed) = join_contents(contents, &options);
        assert_eq!(absorbed, 1);
        assert_eq!(
            joined.iter().map(Content::text).collect::<Vec<_>>(),
            vec!["t0", "t1t2"]
        );
    }

    #[test]
    fn test_overlapping_span_joins() {
        let contents = vec![
            span(0, "ab", 10.0, 30.0, 0),
            span(1, "c", 25.0, 35.0, 0),
        ];
        let (joined, _) = join_contents(contents, &JoinOptions::default());
        assert_eq!(joined.len(), 1);
        assert_eq!(joined[0].bbox.xr, 35.0);
    }

    #[test]
    fn test_different_lines_do_not_join() {
        let contents = vec![
            span(0, "a", 10.0, 20.0, 0),
            span(1, "b", 20.0, 30.0, 1),
        ];
        let (joined, _) = join_contents(contents, &JoinOptions::default());
        assert_eq!(joined.len(), 2);
    }

    #[test]
    fn test_lineless_spans_use_baseline() {
        let mut a = span(0, "a", 10.0, 20.0, 0);
        let mut b = span(1, "b", 20.0, 30.0, 0);
        a.line = None;
        b.line = None;
        b.origin.yo = 100.005;
        let (joined, _) =
            join_contents(vec![a.clone(), b.clone()], &JoinOptions::default());
        assert_eq!(joined.len(), 1);

        b.origin.yo = 101.0;
        let (joined, _) = join_contents(vec![a, b], &JoinOptions::default());
        assert_eq!(joined.len(), 2);
    }

    #[test]
    fn test_buckets_split_runs() {
        let a = span(0, "a", 10.0, 20.0, 0);
        let mut b = span(1, "b", 20.0, 30.0, 0);
        b.horizontal_end_on_page = Some(1);

        let (joined, _) =
            join_contents(vec![a.clone(), b.clone()], &JoinOptions::default());
        assert_eq!(joined.len(), 2);

        let options = JoinOptions::new().respect_buckets(false);
        let (joined, _) = join_contents(vec![a, b], &options);
        assert_eq!(joined.len(), 1);
    }

    #[test]
    fn test_match_style() {
        let a = span(0, "a", 10.0, 20.0, 0);
        let mut b = span(1, "b", 20.0, 30.0, 0);
        b.style = Style::new("Helvetica-Bold", 10.0);

        let (joined, _) =
            join_contents(vec![a.clone(), b.clone()], &JoinOptions::default());
        assert_eq!(joined.len(), 1);
        assert_eq!(joined[0].style.font, "Helvetica");

        let options = JoinOptions::new().match_style(true);
        let (joined, _) = join_contents(vec![a, b], &options);
        assert_eq!(joined.len(), 2);
    }

    #[test]
    fn test_join_is_idempotent() {
        let contents = vec![
            span(0, "a", 10.0, 20.0, 0),
            span(1, "b", 20.0, 30.0, 0),
            span(2, "c", 35.0, 40.0, 0),
            span(3, "d", 40.0, 50.0, 0),
            span(4, "e", 0.0, 5.0, 1),
        ];
        let (once, _) = join_contents(contents, &JoinOptions::default());
        let (twice, absorbed) = join_contents(once.clone(), &JoinOptions::default());
        assert_eq!(absorbed, 0);
        assert_eq!(once, twice);
        assert_eq!(
            once.iter().map(Content::text).collect::<Vec<_>>(),
            vec!["ab", "cd", "e"]
        );
    }
}
