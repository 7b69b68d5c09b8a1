//! Integration tests for quotes, users and the category taxonomy.

mod common;

use axum::http::StatusCode;
use common::{assert_error_envelope, body_json, get};

// ---------------------------------------------------------------------------
// Test: GET /quotes/{id}
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_quote_formats_items_payments_and_professional() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/quotes/q-1").await;

    assert_eq!(response.status(), StatusCode::OK);

    let data = body_json(response).await["data"].clone();
    assert_eq!(data["amount"], 120.0);
    assert_eq!(data["totalAmount"], 2500);
    assert_eq!(data["depositAmount"], 30.0);
    assert_eq!(data["status"], "SENT");
    assert_eq!(data["items"].as_array().unwrap().len(), 2);
    assert_eq!(data["payments"][0]["status"], "completed");
    assert_eq!(data["payments"][0]["type"], "deposit");
    assert_eq!(data["payments"][0]["amount"], 2500);
    assert_eq!(data["professional"]["role"], "PROFESSIONAL");
    assert!(data["request"].is_null());
}

#[tokio::test]
async fn get_unknown_quote_returns_404() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/quotes/nope").await;

    let status = response.status();
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error_envelope(&body_json(response).await, status, "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Test: GET /users/{id}
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_user_formats_profession_and_subcategories() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/users/u-pro").await;

    assert_eq!(response.status(), StatusCode::OK);

    let data = body_json(response).await["data"].clone();
    assert_eq!(data["fullName"], "Marco Rossi");
    assert_eq!(data["professionData"]["slug"], "idraulico");
    assert_eq!(
        data["professionalUserSubcategories"][0]["subcategoryId"],
        "s-perdite"
    );
    assert_eq!(
        data["professionalUserSubcategories"][0]["recipientId"],
        "u-pro"
    );
    assert!(data.get("password").is_none());
}

#[tokio::test]
async fn get_unknown_user_returns_404() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/users/ghost").await;

    let status = response.status();
    assert_eq!(status, StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_error_envelope(&json, status, "NOT_FOUND");
    assert_eq!(json["error"]["message"], "User with id ghost not found");
}

// ---------------------------------------------------------------------------
// Test: GET /categories and /categories/{id}
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_categories_includes_counts_and_meta() {
    let app = common::build_test_app();
    let json = body_json(get(app, "/api/v1/categories").await).await;

    assert_eq!(json["meta"]["count"], 1);
    let category = &json["data"][0];
    assert_eq!(category["name"], "Idraulica");
    assert_eq!(category["_count"]["subcategories"], 2);
    assert_eq!(category["_count"]["assistanceRequests"], 3);
}

#[tokio::test]
async fn get_category_formats_subcategories() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/categories/c-idraulica").await;

    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();
    let subcategories = data["subcategories"].as_array().unwrap();
    assert_eq!(subcategories.len(), 2);
    assert_eq!(subcategories[1]["name"], "Caldaie");
}

#[tokio::test]
async fn get_unknown_category_returns_404() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/categories/none").await;

    let status = response.status();
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error_envelope(&body_json(response).await, status, "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Test: GET /subcategories
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_subcategories_without_filter_returns_all() {
    let app = common::build_test_app();
    let json = body_json(get(app, "/api/v1/subcategories").await).await;

    assert_eq!(json["data"].as_array().unwrap().len(), 2);
    assert_eq!(json["meta"]["count"], 2);
}

#[tokio::test]
async fn list_subcategories_filters_by_category() {
    let app = common::build_test_app();
    let json =
        body_json(get(app, "/api/v1/subcategories?categoryId=c-idraulica").await).await;

    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);

    let subcategory = &data[0];
    assert_eq!(subcategory["category"]["name"], "Idraulica");
    assert_eq!(subcategory["aiSettings"]["temperature"], 0.7);
    assert_eq!(subcategory["_count"]["ProfessionalUserSubcategory"], 4);
    assert_eq!(subcategory["_count"]["professionals"], 4);
    assert_eq!(subcategory["_count"]["assistanceRequests"], 2);
}

#[tokio::test]
async fn empty_category_filter_is_rejected() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/subcategories?categoryId=").await;

    let status = response.status();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error_envelope(&body_json(response).await, status, "VALIDATION_ERROR");
}
