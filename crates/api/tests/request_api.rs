//! Integration tests for the `/requests` resource.

mod common;

use axum::http::StatusCode;
use common::{assert_error_envelope, body_json, get};

// ---------------------------------------------------------------------------
// Test: listing is paginated and enveloped
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_requests_returns_paginated_envelope() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/requests?page=1&limit=2").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Success");
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
    assert_eq!(json["pagination"]["page"], 1);
    assert_eq!(json["pagination"]["limit"], 2);
    assert_eq!(json["pagination"]["total"], 3);
    assert_eq!(json["pagination"]["pages"], 2);
}

#[tokio::test]
async fn second_page_holds_the_remainder() {
    let app = common::build_test_app();
    let json = body_json(get(app, "/api/v1/requests?page=2&limit=2").await).await;

    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["id"], "r-3");
}

// ---------------------------------------------------------------------------
// Test: listed requests are shaped
// ---------------------------------------------------------------------------

#[tokio::test]
async fn listed_requests_have_lowercase_enums_and_formatted_relations() {
    let app = common::build_test_app();
    let json = body_json(get(app, "/api/v1/requests").await).await;

    let first = &json["data"][0];
    assert_eq!(first["status"], "pending");
    assert_eq!(first["priority"], "high");
    assert_eq!(first["client"]["fullName"], "Lucia Verdi");
    assert_eq!(first["category"]["name"], "Idraulica");
    assert!(first["professional"].is_null());
    assert_eq!(first["quotes"], serde_json::json!([]));
    assert_eq!(first["createdAt"], "2024-03-01T10:00:00.000Z");
}

// ---------------------------------------------------------------------------
// Test: filters accept any case
// ---------------------------------------------------------------------------

#[tokio::test]
async fn status_filter_is_case_insensitive() {
    let app = common::build_test_app();
    let json = body_json(get(app, "/api/v1/requests?status=in_progress").await).await;

    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["id"], "r-2");
    assert_eq!(data[0]["status"], "in_progress");
    assert_eq!(json["pagination"]["total"], 1);
}

#[tokio::test]
async fn priority_and_category_filters_combine() {
    let app = common::build_test_app();
    let json = body_json(
        get(
            app,
            "/api/v1/requests?priority=Urgent&categoryId=c-idraulica",
        )
        .await,
    )
    .await;

    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["priority"], "urgent");
}

// ---------------------------------------------------------------------------
// Test: invalid query parameters are rejected with VALIDATION_ERROR
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_status_is_rejected() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/requests?status=archived").await;

    let status = response.status();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_error_envelope(&json, status, "VALIDATION_ERROR");
    assert!(json["error"]["details"]["status"].is_array());
}

#[tokio::test]
async fn out_of_range_limit_is_rejected() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/requests?limit=0").await;

    let status = response.status();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error_envelope(&body_json(response).await, status, "VALIDATION_ERROR");
}

#[tokio::test]
async fn non_numeric_page_is_rejected() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/requests?page=abc").await;

    let status = response.status();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error_envelope(&body_json(response).await, status, "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Test: GET /requests/{id}
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_request_normalizes_capitalized_relations() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/requests/r-2").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["id"], "r-2");
    assert_eq!(data["assignmentType"], "staff");
    assert_eq!(data["category"]["id"], "c-idraulica");
    assert_eq!(data["subcategory"]["name"], "Caldaie");
    assert_eq!(data["professional"]["professionData"]["name"], "Idraulico");
    assert_eq!(data["professional"]["hourlyRate"], 45.5);
    assert_eq!(data["quotes"][0]["amount"], 120.0);
    assert_eq!(data["quotes"][0]["status"], "SENT");
    assert_eq!(data["attachments"][0]["fileName"], "foto.jpg");
    assert_eq!(data["attachments"][0]["recipientId"], "u-client");
    assert!(data["attachments"][0].get("userId").is_none());
    assert_eq!(data["updates"], serde_json::json!([]));
}

#[tokio::test]
async fn get_unknown_request_returns_404_envelope() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/requests/missing").await;

    let status = response.status();
    assert_eq!(status, StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_error_envelope(&json, status, "NOT_FOUND");
    assert_eq!(
        json["error"]["message"],
        "AssistanceRequest with id missing not found"
    );
}

// ---------------------------------------------------------------------------
// Test: GET /requests/{id}/quotes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn request_quotes_compute_total_amount() {
    let app = common::build_test_app();
    let json = body_json(get(app, "/api/v1/requests/r-2/quotes").await).await;

    let quotes = json["data"].as_array().unwrap();
    assert_eq!(quotes.len(), 2);

    // Items present: total is the sum of item totals in cents.
    assert_eq!(quotes[0]["id"], "q-1");
    assert_eq!(quotes[0]["totalAmount"], 2500);
    assert_eq!(quotes[0]["items"][0]["unitPrice"], 1000);

    // No items: total falls back to the amount.
    assert_eq!(quotes[1]["id"], "q-2");
    assert_eq!(quotes[1]["totalAmount"], 150.5);
    assert_eq!(quotes[1]["professional"]["fullName"], "Marco Rossi");
}

#[tokio::test]
async fn quotes_for_unknown_request_are_empty() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/requests/missing/quotes").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"], serde_json::json!([]));
}
