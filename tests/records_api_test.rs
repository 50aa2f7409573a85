mod common;

use common::{money, TestApp};
use rust_decimal_macros::dec;
use serde_json::json;

#[tokio::test]
async fn create_and_list_daily_records() {
    let app = TestApp::new().await;

    let (status, created) = app
        .post(
            "/records",
            json!({
                "date": "2024-05-02",
                "customer_name": "Ana",
                "service": "Haircut",
                "staff": "Marco",
                "price": 30,
                "payment_type": "Cash",
            }),
        )
        .await;
    assert_eq!(status, 201);
    assert!(created["id"].as_i64().is_some());
    assert_eq!(created["customer_name"], "Ana");
    assert_eq!(created["payment_type"], "Cash");
    assert_eq!(money(&created["price"]), dec!(30));

    let (status, listed) = app.get("/records/daily/2024-05-02").await;
    assert_eq!(status, 200);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (status, listed) = app.get("/records/daily/2024-05-03").await;
    assert_eq!(status, 200);
    assert!(listed.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn monthly_listing_includes_all_of_february() {
    let app = TestApp::new().await;

    for (date, price) in [("2024-02-01", 10), ("2024-02-29", 20), ("2024-03-01", 30)] {
        let (status, _) = app
            .post(
                "/records",
                json!({
                    "date": date,
                    "customer_name": "Ana",
                    "price": price,
                    "payment_type": "Card",
                }),
            )
            .await;
        assert_eq!(status, 201);
    }

    // February has no day 31, yet the fixed [01, 31] window must cover the
    // whole month, leap day included.
    let (status, feb) = app.get("/records/monthly/2024/2").await;
    assert_eq!(status, 200);
    assert_eq!(feb.as_array().unwrap().len(), 2);

    let (status, march) = app.get("/records/monthly/2024/3").await;
    assert_eq!(status, 200);
    assert_eq!(march.as_array().unwrap().len(), 1);

    let (status, _) = app.get("/records/monthly/2024/13").await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn delete_record_returns_the_removed_row() {
    let app = TestApp::new().await;

    let (_, created) = app
        .post(
            "/records",
            json!({
                "date": "2024-06-10",
                "customer_name": "Bea",
                "price": "45.00",
                "payment_type": "Bank",
            }),
        )
        .await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = app.delete(&format!("/records/{id}")).await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Record deleted");
    assert_eq!(body["record"]["id"].as_i64().unwrap(), id);

    let (_, listed) = app.get("/records/daily/2024-06-10").await;
    assert!(listed.as_array().unwrap().is_empty());

    let (status, _) = app.delete(&format!("/records/{id}")).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn rejects_bad_input() {
    let app = TestApp::new().await;

    // Unknown payment type never reaches the table.
    let (status, _) = app
        .post(
            "/records",
            json!({
                "date": "2024-05-02",
                "customer_name": "Ana",
                "price": 30,
                "payment_type": "Cheque",
            }),
        )
        .await;
    assert!(status.is_client_error());

    let (status, _) = app
        .post(
            "/records",
            json!({
                "date": "not-a-date",
                "customer_name": "Ana",
                "price": 30,
                "payment_type": "Cash",
            }),
        )
        .await;
    assert_eq!(status, 400);

    let (status, _) = app
        .post(
            "/records",
            json!({
                "date": "2024-05-02",
                "customer_name": "Ana",
                "price": 0,
                "payment_type": "Cash",
            }),
        )
        .await;
    assert_eq!(status, 400);

    let (_, listed) = app.get("/records/daily/2024-05-02").await;
    assert!(listed.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn unmatched_routes_return_structured_404() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/nope/nothing").await;
    assert_eq!(status, 404);
    assert_eq!(body["success"], false);
    assert_eq!(body["path"], "/nope/nothing");
    assert_eq!(body["method"], "GET");
}
