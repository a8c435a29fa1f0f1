use giftscan_core::{
    finalize_results, item_link, ItemRecord, Query, QueryError, SortOrder, DEFAULT_LIMIT,
};
use pretty_assertions::assert_eq;

fn record(id: u64) -> ItemRecord {
    ItemRecord {
        model: "capX".to_string(),
        id,
        owner: format!("@owner{id}"),
        link: item_link("https://t.me/nft", "capX", id),
    }
}

fn ids(records: &[ItemRecord]) -> Vec<u64> {
    records.iter().map(|r| r.id).collect()
}

#[test]
fn ascending_keeps_smallest_ids() {
    let completion_order = vec![record(9), record(2), record(7), record(4), record(5)];
    let out = finalize_results(completion_order, SortOrder::Asc, 3);
    assert_eq!(ids(&out), vec![2, 4, 5]);
}

#[test]
fn descending_keeps_largest_ids() {
    let completion_order = vec![record(9), record(2), record(7), record(4), record(5)];
    let out = finalize_results(completion_order, SortOrder::Desc, 3);
    assert_eq!(ids(&out), vec![9, 7, 5]);
}

#[test]
fn limit_larger_than_candidates_returns_all() {
    let out = finalize_results(vec![record(3), record(1)], SortOrder::Asc, 20);
    assert_eq!(ids(&out), vec![1, 3]);
}

#[test]
fn zero_limit_returns_nothing() {
    let out = finalize_results(vec![record(3), record(1)], SortOrder::Desc, 0);
    assert!(out.is_empty());
}

#[test]
fn link_is_built_from_model_and_id() {
    assert_eq!(item_link("https://t.me/nft/", "capX", 42), "https://t.me/nft/capX-42");
    assert_eq!(record(7).link, "https://t.me/nft/capX-7");
}

#[test]
fn order_parses_only_known_values() {
    assert_eq!("asc".parse::<SortOrder>().unwrap(), SortOrder::Asc);
    assert_eq!("desc".parse::<SortOrder>().unwrap(), SortOrder::Desc);
    assert!(matches!(
        "DESC".parse::<SortOrder>(),
        Err(QueryError::InvalidOrder(ref raw)) if raw == "DESC"
    ));
    assert_eq!(SortOrder::default(), SortOrder::Asc);
}

#[test]
fn new_query_uses_default_limit_and_ascending_order() {
    let query = Query::new("capX", "1-10");
    assert_eq!(query.limit, DEFAULT_LIMIT);
    assert_eq!(query.limit, 20);
    assert_eq!(query.order, SortOrder::Asc);
}
