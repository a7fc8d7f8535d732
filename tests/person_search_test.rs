//! End-to-end person search scenarios against in-memory fixtures.

use hearth::compose::{ProfileRegistry, QueryComposer};
use hearth::query::Query;
use hearth::request::{EntityType, SearchRequest};
use hearth::search::{MemoryExecutor, SearchService};
use serde_json::{Value, json};

fn person_fixtures() -> Vec<Value> {
    vec![
        json!({
            "id": "cd7a9034",
            "firstname": "Jonathan",
            "surname": "Smith",
            "dateOfBirth": "1987-03-12",
            "tenures": [
                {
                    "assetFullAddress": "12 Mare Street, Hackney",
                    "paymentReference": "2286511253",
                    "uprn": "100021065786"
                }
            ]
        }),
        json!({
            "id": "81f5f3b2",
            "firstname": "Alice",
            "surname": "Jones",
            "dateOfBirth": "1990-07-01",
            "tenures": [
                {
                    "assetFullAddress": "9 Dalston Lane, Hackney",
                    "paymentReference": "1148930027",
                    "uprn": "100021070004"
                }
            ]
        }),
    ]
}

fn service() -> SearchService<MemoryExecutor> {
    let executor = MemoryExecutor::new().with_collection("persons", person_fixtures());
    SearchService::new(ProfileRegistry::standard(), executor)
}

#[test]
fn test_search_no_match() {
    let request = SearchRequest::new(EntityType::Person, "XXXXXXXX");
    let response = service().search(&request).unwrap();

    assert_eq!(response.total, 0);
    assert!(response.documents(EntityType::Person).is_empty());
}

#[test]
fn test_partial_name_finds_the_right_person_ranked_first() {
    // "Jon Sm" should find Jonathan Smith via wildcard terms. "Jones"
    // also contains "Jon", so Alice is a weaker hit behind him.
    let request = SearchRequest::new(EntityType::Person, "Jon Sm");
    let response = service().search(&request).unwrap();

    assert!(response.total >= 1);
    assert_eq!(response.documents(EntityType::Person)[0]["id"], "cd7a9034");
}

#[test]
fn test_full_name_ranks_the_right_person_first() {
    let request = SearchRequest::new(EntityType::Person, "Jon Smith");
    let response = service().search(&request).unwrap();

    assert!(response.total >= 1);
    assert_eq!(
        response.documents(EntityType::Person)[0]["surname"],
        "Smith"
    );
}

#[test]
fn test_name_part_removed_still_matches() {
    let request = SearchRequest::new(EntityType::Person, "Jonathan");
    let response = service().search(&request).unwrap();

    assert_eq!(response.total, 1);
    assert_eq!(response.documents(EntityType::Person)[0]["id"], "cd7a9034");
}

#[test]
fn test_misspelled_name_still_ranks_the_person_first() {
    // Both words carry a one-edit typo; fuzzy matching absorbs them.
    let request = SearchRequest::new(EntityType::Person, "Jonathon Smyth");
    let response = service().search(&request).unwrap();

    assert!(response.total >= 1);
    assert_eq!(response.documents(EntityType::Person)[0]["id"], "cd7a9034");
}

#[test]
fn test_person_found_by_id() {
    let request = SearchRequest::new(EntityType::Person, "81f5f3b2");
    let response = service().search(&request).unwrap();

    assert_eq!(response.total, 1);
    assert_eq!(response.documents(EntityType::Person)[0]["id"], "81f5f3b2");
}

#[test]
fn test_person_found_by_tenure_address() {
    let request = SearchRequest::new(EntityType::Person, "Mare Street");
    let response = service().search(&request).unwrap();

    assert!(response.total > 0);
    assert_eq!(response.documents(EntityType::Person)[0]["id"], "cd7a9034");
}

#[test]
fn test_person_found_by_payment_reference() {
    let request = SearchRequest::new(EntityType::Person, "2286511253");
    let response = service().search(&request).unwrap();

    assert!(response.total > 0);
    assert_eq!(response.documents(EntityType::Person)[0]["id"], "cd7a9034");
}

#[test]
fn test_empty_search_text_returns_everything() {
    let request = SearchRequest::new(EntityType::Person, "");
    let response = service().search(&request).unwrap();

    assert_eq!(response.total, 2);
    assert_eq!(response.documents(EntityType::Person).len(), 2);
}

#[test]
fn test_surname_sort_orders_and_tie_breaks() {
    let request = SearchRequest::new(EntityType::Person, "").sort_by("surname");
    let response = service().search(&request).unwrap();
    let docs = response.documents(EntityType::Person);
    assert_eq!(docs[0]["surname"], "Jones");
    assert_eq!(docs[1]["surname"], "Smith");

    let request = SearchRequest::new(EntityType::Person, "")
        .sort_by("surname")
        .descending(true);
    let response = service().search(&request).unwrap();
    let docs = response.documents(EntityType::Person);
    assert_eq!(docs[0]["surname"], "Smith");
}

#[test]
fn test_unknown_sort_key_falls_back_to_relevance() {
    let request = SearchRequest::new(EntityType::Person, "Smith").sort_by("shoeSize");
    let response = service().search(&request).unwrap();
    assert_eq!(response.total, 1);
}

#[test]
fn test_page_zero_and_one_return_the_same_page() {
    let first = SearchRequest::new(EntityType::Person, "").page(0).page_size(1);
    let second = SearchRequest::new(EntityType::Person, "").page(1).page_size(1);

    let a = service().search(&first).unwrap();
    let b = service().search(&second).unwrap();
    assert_eq!(
        a.documents(EntityType::Person),
        b.documents(EntityType::Person)
    );
    assert_eq!(a.total, 2);
}

#[test]
fn test_paging_walks_the_result_set() {
    let page_one = SearchRequest::new(EntityType::Person, "")
        .sort_by("surname")
        .page(1)
        .page_size(1);
    let page_two = page_one.clone().page(2);

    let a = service().search(&page_one).unwrap();
    let b = service().search(&page_two).unwrap();

    assert_eq!(a.documents(EntityType::Person)[0]["surname"], "Jones");
    assert_eq!(b.documents(EntityType::Person)[0]["surname"], "Smith");
    assert_eq!(a.total, 2);
    assert_eq!(b.total, 2);
}

#[test]
fn test_composed_person_tree_has_the_expected_clauses() {
    let registry = ProfileRegistry::standard();
    let profile = registry.profile(EntityType::Person).unwrap();
    let request = SearchRequest::new(EntityType::Person, "Jon Smith");

    let tree = QueryComposer::new(profile).compose(&request).unwrap();
    let rendered = serde_json::to_string(&tree.to_json()).unwrap();

    assert!(rendered.contains("cross_fields"));
    assert!(rendered.contains("*Jon*"));
    assert!(rendered.contains("*Smith*"));
    assert!(rendered.contains("\"nested\""));
}
