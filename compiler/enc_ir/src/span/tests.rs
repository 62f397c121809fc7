use super::*;

#[test]
fn test_span_basic() {
    let span = Span::new(10, 20);
    assert!(span.contains(15));
    assert!(!span.contains(20));
}

#[test]
fn test_span_from_bounds_normalizes_reversed() {
    assert_eq!(Span::from_bounds(4, 9), Span::new(4, 9));
    assert_eq!(Span::from_bounds(9, 4), Span::point(9));
}

#[test]
fn test_span_try_from_range() {
    let Ok(span) = Span::try_from_range(50..100) else {
        panic!("expected Ok for valid range");
    };
    assert_eq!(span, Span::new(50, 100));

    let large = u32::MAX as usize + 1;
    assert!(matches!(
        Span::try_from_range(large..large + 1),
        Err(SpanError::StartTooLarge(_))
    ));
    assert!(matches!(
        Span::try_from_range(0..large),
        Err(SpanError::EndTooLarge(_))
    ));
}

#[test]
fn test_span_error_display() {
    let msg = format!("{}", SpanError::StartTooLarge(0x1_0000_0000));
    assert!(msg.contains("start"));
    assert!(msg.contains("0x100000000"));
}

#[test]
fn test_span_contains_span() {
    let outer = Span::new(10, 30);
    assert!(outer.contains_span(Span::new(10, 30)));
    assert!(outer.contains_span(Span::new(12, 20)));
    assert!(outer.contains_span(Span::point(30)));
    assert!(!outer.contains_span(Span::new(5, 20)));
    assert!(!outer.contains_span(Span::new(20, 31)));
}

#[test]
fn test_span_merge() {
    let merged = Span::new(20, 30).merge(Span::new(10, 25));
    assert_eq!(merged, Span::new(10, 30));
}

#[test]
fn test_span_debug_display() {
    let span = Span::new(100, 200);
    assert_eq!(format!("{span:?}"), "100..200");
    assert_eq!(format!("{span}"), "100..200");
    assert_eq!(span.to_range(), 100..200);
}

#[test]
fn test_span_ordering_is_by_start_then_end() {
    let mut spans = vec![Span::new(5, 9), Span::new(1, 4), Span::new(5, 6)];
    spans.sort();
    assert_eq!(spans, vec![Span::new(1, 4), Span::new(5, 6), Span::new(5, 9)]);
}
