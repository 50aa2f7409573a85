mod common;

use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn customers_are_listed_in_name_order() {
    let app = TestApp::new().await;

    for name in ["Zoe", "Ana", "Marta"] {
        let (status, _) = app.post("/customers", json!({ "name": name })).await;
        assert_eq!(status, 201);
    }

    let (status, listed) = app.get("/customers").await;
    assert_eq!(status, 200);
    let names: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Ana", "Marta", "Zoe"]);
}

#[tokio::test]
async fn duplicate_customer_names_are_rejected() {
    let app = TestApp::new().await;

    let (status, _) = app
        .post(
            "/customers",
            json!({ "name": "Ana", "phone": "555-0101", "email": "ana@example.com" }),
        )
        .await;
    assert_eq!(status, 201);

    let (status, body) = app.post("/customers", json!({ "name": "Ana" })).await;
    assert_eq!(status, 400);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("already exists"));

    // No second row was created.
    let (_, listed) = app.get("/customers").await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn customer_detail_includes_recent_records() {
    let app = TestApp::new().await;

    let (_, created) = app.post("/customers", json!({ "name": "Ana" })).await;
    let id = created["id"].as_i64().unwrap();

    for (date, price) in [("2024-05-01", 30), ("2024-05-03", 45)] {
        app.post(
            "/records",
            json!({
                "date": date,
                "customer_name": "Ana",
                "price": price,
                "payment_type": "Cash",
            }),
        )
        .await;
    }
    // A different customer's record must not leak into the detail.
    app.post(
        "/records",
        json!({
            "date": "2024-05-02",
            "customer_name": "Bob",
            "price": 10,
            "payment_type": "Card",
        }),
    )
    .await;

    let (status, detail) = app.get(&format!("/customers/{id}")).await;
    assert_eq!(status, 200);
    assert_eq!(detail["customer"]["name"], "Ana");
    let records = detail["records"].as_array().unwrap();
    assert_eq!(records.len(), 2);
    // Most recent first.
    assert_eq!(records[0]["date"], "2024-05-03");
    assert_eq!(records[1]["date"], "2024-05-01");
}

#[tokio::test]
async fn missing_customer_is_a_404() {
    let app = TestApp::new().await;
    let (status, _) = app.get("/customers/9999").await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn invalid_customer_email_is_rejected() {
    let app = TestApp::new().await;
    let (status, _) = app
        .post("/customers", json!({ "name": "Eve", "email": "not-an-email" }))
        .await;
    assert_eq!(status, 400);
}
