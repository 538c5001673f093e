//! HTTP-level tests for the public catalog.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, get, FakeBackend};

fn titles(items: &serde_json::Value) -> Vec<&str> {
    items
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["title"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn catalog_lists_active_listings_featured_first() {
    let backend = Arc::new(FakeBackend::seeded());
    let response = get(common::build_test_app(backend), "/api/v1/listings").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["total"], 4);
    // Newest first within each group.
    assert_eq!(
        titles(&data["featured"]),
        ["3BR Modern Apartment Kilimani", "Toyota Camry 2020"]
    );
    assert_eq!(
        titles(&data["regular"]),
        ["4BR Family House Karen", "Honda CR-V 2019"]
    );
}

#[tokio::test]
async fn catalog_cards_carry_formatted_price_and_wire_fields() {
    let backend = Arc::new(FakeBackend::seeded());
    let json = body_json(get(common::build_test_app(backend), "/api/v1/listings?type=car").await).await;

    let camry = &json["data"]["featured"][0];
    assert_eq!(camry["title"], "Toyota Camry 2020");
    assert_eq!(camry["type"], "car");
    assert_eq!(camry["formatted_price"], "KSH 3,200,000");
}

#[tokio::test]
async fn type_filter_all_means_no_filter() {
    let backend = Arc::new(FakeBackend::seeded());
    let json = body_json(get(common::build_test_app(backend), "/api/v1/listings?type=all").await).await;
    assert_eq!(json["data"]["total"], 4);
}

#[tokio::test]
async fn filters_combine() {
    let backend = Arc::new(FakeBackend::seeded());
    let json = body_json(
        get(
            common::build_test_app(backend),
            "/api/v1/listings?type=property&location=karen&price_range=20000000%2B",
        )
        .await,
    )
    .await;

    assert_eq!(json["data"]["total"], 1);
    assert_eq!(titles(&json["data"]["regular"]), ["4BR Family House Karen"]);
}

#[tokio::test]
async fn free_text_search_matches_title() {
    let backend = Arc::new(FakeBackend::seeded());
    let json = body_json(get(common::build_test_app(backend), "/api/v1/listings?q=camry").await).await;
    assert_eq!(json["data"]["total"], 1);
}

#[tokio::test]
async fn explicit_price_bounds_filter() {
    let backend = Arc::new(FakeBackend::seeded());
    let json = body_json(
        get(
            common::build_test_app(backend),
            "/api/v1/listings?min_price=2500000&max_price=3500000",
        )
        .await,
    )
    .await;

    let mut found = titles(&json["data"]["featured"]);
    found.extend(titles(&json["data"]["regular"]));
    found.sort_unstable();
    assert_eq!(found, ["Honda CR-V 2019", "Toyota Camry 2020"]);
}

#[tokio::test]
async fn invalid_filters_return_400() {
    let backend = Arc::new(FakeBackend::seeded());

    let response = get(common::build_test_app(backend.clone()), "/api/v1/listings?type=boat").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");

    let response = get(
        common::build_test_app(backend.clone()),
        "/api/v1/listings?min_price=10&max_price=5",
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get(
        common::build_test_app(backend),
        "/api/v1/listings?price_range=0-1000000&min_price=5",
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn listing_detail_includes_contact_link() {
    let backend = Arc::new(FakeBackend::seeded());
    let camry = backend.listing_titled("Toyota Camry 2020");

    let response = get(
        common::build_test_app(backend),
        &format!("/api/v1/listings/{}", camry.id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["id"], camry.id.to_string());
    assert_eq!(data["formatted_price"], "KSH 3,200,000");
    assert!(data["whatsapp_link"]
        .as_str()
        .unwrap()
        .starts_with("https://wa.me/254712345678?text="));
    assert_eq!(
        data["enquiry_message"],
        "Hi! I'm interested in the Toyota Camry 2020 listed for KSH 3,200,000. Could you provide more information?"
    );
}

#[tokio::test]
async fn sold_listing_is_hidden_from_public_detail() {
    let backend = Arc::new(FakeBackend::seeded());
    let sold = backend.listing_titled("Nissan X-Trail 2021");

    let response = get(
        common::build_test_app(backend),
        &format!("/api/v1/listings/{}", sold.id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_listing_returns_404() {
    let backend = Arc::new(FakeBackend::seeded());
    let response = get(
        common::build_test_app(backend),
        "/api/v1/listings/5f0c6f7e-2b0e-4d6b-9d55-0f2f2a1f0a11",
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}
