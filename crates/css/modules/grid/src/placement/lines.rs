//! Resolving `grid-*-start` / `grid-*-end` pairs to line spans.
//!
//! Spec: §8.3 Line-based Placement, §8.3.1 Grid Placement Conflict Handling

use crate::types::{GridLine, GridPlacement};

/// Largest line index (in either direction) a placement can resolve to.
pub const MAX_GRID_LINE: i32 = 1000;

/// A span whose lines are relative to the explicit grid's start line.
///
/// Negative lines lie before the explicit grid and are translated once the
/// number of leading implicit tracks is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UntranslatedSpan {
    /// Both lines are known
    Definite { start: i32, end: i32 },
    /// Only the track count is known; the position comes from auto placement
    Indefinite { span: usize },
}

impl UntranslatedSpan {
    /// Number of tracks covered.
    pub fn span_size(&self) -> usize {
        match *self {
            Self::Definite { start, end } => end.abs_diff(start) as usize,
            Self::Indefinite { span } => span,
        }
    }

    /// Start line, when definite.
    pub fn start(&self) -> Option<i32> {
        match *self {
            Self::Definite { start, .. } => Some(start),
            Self::Indefinite { .. } => None,
        }
    }
}

/// `0` is not a valid line and `span 0` is not a valid span.
fn normalize(line: GridLine) -> GridLine {
    match line {
        GridLine::Line(0) => GridLine::Auto,
        GridLine::Span(0) => GridLine::Span(1),
        other => other,
    }
}

/// Zero-based line index relative to the explicit grid start.
fn line_index(number: i32, explicit_track_count: usize) -> i32 {
    let number = number.clamp(-MAX_GRID_LINE, MAX_GRID_LINE);
    if number > 0 {
        number - 1
    } else {
        let explicit = explicit_track_count.min(MAX_GRID_LINE as usize) as i32;
        explicit + 1 + number
    }
}

fn span_count(span: u32) -> i32 {
    span.min(MAX_GRID_LINE as u32) as i32
}

/// Resolve one axis of an item's placement.
///
/// Conflicts follow CSS: equal lines span one track, reversed lines swap,
/// and a span on both sides drops the end span.
pub fn resolve_placement(placement: GridPlacement, explicit_track_count: usize) -> UntranslatedSpan {
    let start = normalize(placement.start);
    let end = normalize(placement.end);
    let index = |number: i32| line_index(number, explicit_track_count);

    let (first, last) = match (start, end) {
        (GridLine::Line(start_line), GridLine::Line(end_line)) => {
            let (first, last) = (index(start_line), index(end_line));
            if first == last {
                (first, first + 1)
            } else {
                (first.min(last), first.max(last))
            }
        }
        (GridLine::Line(start_line), GridLine::Span(span)) => {
            let first = index(start_line);
            (first, first + span_count(span))
        }
        (GridLine::Line(start_line), GridLine::Auto) => {
            let first = index(start_line);
            (first, first + 1)
        }
        (GridLine::Span(span), GridLine::Line(end_line)) => {
            let last = index(end_line);
            (last - span_count(span), last)
        }
        (GridLine::Auto, GridLine::Line(end_line)) => {
            let last = index(end_line);
            (last - 1, last)
        }
        (GridLine::Span(span), GridLine::Auto | GridLine::Span(_))
        | (GridLine::Auto, GridLine::Span(span)) => {
            return UntranslatedSpan::Indefinite {
                span: span_count(span) as usize,
            };
        }
        (GridLine::Auto, GridLine::Auto) => return UntranslatedSpan::Indefinite { span: 1 },
    };

    let first = first.clamp(-MAX_GRID_LINE, MAX_GRID_LINE - 1);
    let last = last.clamp(first + 1, MAX_GRID_LINE);
    UntranslatedSpan::Definite {
        start: first,
        end: last,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definite(start: i32, end: i32) -> UntranslatedSpan {
        UntranslatedSpan::Definite { start, end }
    }

    /// # Panics
    /// Panics if line numbers resolve to the wrong indices.
    #[test]
    fn test_line_numbers() {
        assert_eq!(resolve_placement(GridPlacement::lines(1, 3), 3), definite(0, 2));
        assert_eq!(resolve_placement(GridPlacement::lines(-1, -3), 3), definite(1, 3));
        assert_eq!(resolve_placement(GridPlacement::lines(2, 2), 3), definite(1, 2));
        assert_eq!(
            resolve_placement(GridPlacement::new(GridLine::Line(-5), GridLine::Auto), 2),
            definite(-2, -1)
        );
    }

    /// # Panics
    /// Panics if span conflicts are not resolved per the placement rules.
    #[test]
    fn test_span_conflicts() {
        assert_eq!(
            resolve_placement(GridPlacement::new(GridLine::Span(2), GridLine::Line(4)), 3),
            definite(1, 3)
        );
        assert_eq!(
            resolve_placement(GridPlacement::new(GridLine::Span(3), GridLine::Span(5)), 3),
            UntranslatedSpan::Indefinite { span: 3 }
        );
        assert_eq!(
            resolve_placement(GridPlacement::new(GridLine::Span(0), GridLine::Auto), 3),
            UntranslatedSpan::Indefinite { span: 1 }
        );
        assert_eq!(
            resolve_placement(GridPlacement::new(GridLine::Line(0), GridLine::Auto), 3),
            UntranslatedSpan::Indefinite { span: 1 }
        );
    }

    /// # Panics
    /// Panics if huge line numbers are not clamped.
    #[test]
    fn test_clamped_lines() {
        let huge_lines = resolve_placement(GridPlacement::lines(i32::MAX, i32::MAX), 0);
        assert_eq!(huge_lines, definite(MAX_GRID_LINE - 1, MAX_GRID_LINE));
        let huge_span =
            resolve_placement(GridPlacement::new(GridLine::Line(1), GridLine::Span(u32::MAX)), 0);
        assert_eq!(huge_span, definite(0, MAX_GRID_LINE));
    }
}
