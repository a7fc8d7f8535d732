//! End-to-end asset search scenarios: exact vs wildcard precedence and
//! structural filtering.

use hearth::request::{EntityType, SearchRequest};
use hearth::search::{MemoryExecutor, SearchService};
use serde_json::{Value, json};

fn asset_fixtures() -> Vec<Value> {
    vec![
        json!({
            "id": "a1",
            "assetType": "Dwelling",
            "assetAddress": {
                "addressLine1": "12 Mare Street",
                "postCode": "E8 1DY",
                "uprn": "100021065786"
            }
        }),
        json!({
            "id": "a2",
            "assetType": "Block",
            "assetAddress": {
                "addressLine1": "E8 1DY House, Dalston Lane",
                "postCode": "N1 6PQ",
                "uprn": "100021070004"
            }
        }),
        json!({
            "id": "a3",
            "assetType": "Garage",
            "assetAddress": {
                "addressLine1": "Lockup 4, Morning Lane",
                "postCode": "E9 6LH",
                "uprn": "100021080123"
            }
        }),
    ]
}

fn service() -> SearchService<MemoryExecutor> {
    use hearth::compose::ProfileRegistry;
    let executor = MemoryExecutor::new().with_collection("assets", asset_fixtures());
    SearchService::new(ProfileRegistry::standard(), executor)
}

#[test]
fn test_exact_postcode_outranks_wildcard_address_hit() {
    // a1 matches "E8 1DY" exactly on postCode; a2 only contains the
    // text inside its address line.
    let request = SearchRequest::new(EntityType::Asset, "E8 1DY");
    let response = service().search(&request).unwrap();

    assert_eq!(response.total, 2);
    let docs = response.documents(EntityType::Asset);
    assert_eq!(docs[0]["id"], "a1");
    assert_eq!(docs[1]["id"], "a2");
}

#[test]
fn test_exact_match_flag_drops_address_line_wildcards() {
    let request = SearchRequest::new(EntityType::Asset, "E8 1DY").exact_match(true);
    let response = service().search(&request).unwrap();

    // a2's only claim was a wildcard hit on its address line.
    assert_eq!(response.total, 1);
    assert_eq!(response.documents(EntityType::Asset)[0]["id"], "a1");
}

#[test]
fn test_uprn_lookup() {
    let request = SearchRequest::new(EntityType::Asset, "100021070004");
    let response = service().search(&request).unwrap();

    assert_eq!(response.total, 1);
    assert_eq!(response.documents(EntityType::Asset)[0]["id"], "a2");
}

#[test]
fn test_filter_only_listing() {
    // No search text: structural filters alone drive the result set.
    let request =
        SearchRequest::new(EntityType::Asset, "").filter("assetTypes", ["Dwelling", "Block"]);
    let response = service().search(&request).unwrap();

    assert_eq!(response.total, 2);
    let docs = response.documents(EntityType::Asset);
    assert!(docs.iter().all(|d| d["assetType"] != "Garage"));
}

#[test]
fn test_filter_narrows_a_text_search_without_rescoring() {
    let request = SearchRequest::new(EntityType::Asset, "E8 1DY").filter("assetTypes", ["Block"]);
    let response = service().search(&request).unwrap();

    assert_eq!(response.total, 1);
    assert_eq!(response.documents(EntityType::Asset)[0]["id"], "a2");
}

#[test]
fn test_unknown_filter_name_is_rejected() {
    let request = SearchRequest::new(EntityType::Asset, "").filter("colours", ["red"]);
    let err = service().search(&request).unwrap_err();
    assert!(err.is_caller_error());
}

#[test]
fn test_address_sort() {
    let request = SearchRequest::new(EntityType::Asset, "").sort_by("addressLine1");
    let response = service().search(&request).unwrap();

    let lines: Vec<&str> = response
        .documents(EntityType::Asset)
        .iter()
        .map(|d| d["assetAddress"]["addressLine1"].as_str().unwrap())
        .collect();
    let mut sorted = lines.clone();
    sorted.sort_by_key(|s| s.to_lowercase());
    assert_eq!(lines, sorted);
}
