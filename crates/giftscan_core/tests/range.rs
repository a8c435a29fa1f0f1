use giftscan_core::{IdRange, QueryError, RequestedRange};
use pretty_assertions::assert_eq;

#[test]
fn parses_start_and_end() {
    let range = RequestedRange::parse("10-50").unwrap();
    assert_eq!(range, RequestedRange { start: 10, end: 50 });
}

#[test]
fn reversed_ends_are_swapped() {
    let range = RequestedRange::parse("50-10").unwrap();
    assert_eq!(range, RequestedRange { start: 10, end: 50 });
    assert_eq!(range.clamp(1000), IdRange::new(10, 50));
}

#[test]
fn whitespace_around_numbers_is_accepted() {
    let range = RequestedRange::parse(" 3 - 7 ").unwrap();
    assert_eq!(range, RequestedRange { start: 3, end: 7 });
}

#[test]
fn malformed_ranges_are_rejected() {
    for raw in ["abc", "", "5", "1-2-3", "a-5", "5-b", "-5-10", "1.5-3", "1--3"] {
        let err = RequestedRange::parse(raw).unwrap_err();
        assert!(
            matches!(err, QueryError::InvalidRangeFormat(ref r) if r == raw),
            "{raw:?} gave {err:?}"
        );
    }
}

#[test]
fn clamps_to_catalog_bounds() {
    let range = RequestedRange::parse("0-500").unwrap().clamp(100).unwrap();
    assert_eq!((range.start(), range.end()), (1, 100));
    assert_eq!(range.len(), 100);
}

#[test]
fn range_touching_catalog_max_keeps_only_max() {
    let range = RequestedRange { start: 100, end: 200 }.clamp(100).unwrap();
    assert_eq!(range.ids().collect::<Vec<_>>(), vec![100]);
}

#[test]
fn range_above_catalog_is_empty() {
    let range = RequestedRange::parse("150-200").unwrap().clamp(100);
    assert_eq!(range, None);
}

#[test]
fn range_entirely_below_one_is_empty() {
    let range = RequestedRange { start: -10, end: 0 };
    assert_eq!(range.clamp(100), None);
}

#[test]
fn id_range_rejects_empty_and_zero() {
    assert!(IdRange::new(0, 5).is_none());
    assert!(IdRange::new(6, 5).is_none());
    let range = IdRange::new(5, 5).unwrap();
    assert!(range.contains(5));
    assert!(!range.contains(6));
}
