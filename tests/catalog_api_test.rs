mod common;

use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn reference_tables_are_seeded_once() {
    let app = TestApp::new().await;

    let (status, services) = app.get("/services").await;
    assert_eq!(status, 200);
    let names: Vec<&str> = services
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"Haircut"));
    // Ordered by name ascending.
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);

    let (status, staff) = app.get("/staff").await;
    assert_eq!(status, 200);
    assert!(!staff.as_array().unwrap().is_empty());

    let (status, expense_types) = app.get("/expense-types").await;
    assert_eq!(status, 200);
    let names: Vec<&str> = expense_types
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"Rent"));
}

#[tokio::test]
async fn duplicate_service_names_are_rejected() {
    let app = TestApp::new().await;

    let (status, created) = app.post("/services", json!({ "name": "Kids Cut" })).await;
    assert_eq!(status, 201);
    assert_eq!(created["active"], true);

    let (status, body) = app.post("/services", json!({ "name": "Kids Cut" })).await;
    assert_eq!(status, 400);
    assert!(body["message"].as_str().unwrap().contains("already exists"));
}

#[tokio::test]
async fn soft_deleted_staff_stay_retrievable() {
    let app = TestApp::new().await;

    let (_, created) = app.post("/staff", json!({ "name": "Marco" })).await;
    let id = created["id"].as_i64().unwrap();

    let (status, updated) = app.delete(&format!("/staff/{id}")).await;
    assert_eq!(status, 200);
    assert_eq!(updated["active"], false);

    // Hidden from the default listing...
    let (_, listed) = app.get("/staff").await;
    assert!(!listed
        .as_array()
        .unwrap()
        .iter()
        .any(|s| s["name"] == "Marco"));

    // ...but still there when inactive rows are requested.
    let (_, listed) = app.get("/staff?includeInactive=true").await;
    assert!(listed
        .as_array()
        .unwrap()
        .iter()
        .any(|s| s["name"] == "Marco" && s["active"] == false));

    let (status, _) = app.delete("/staff/9999").await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn deactivating_a_service_never_touches_history() {
    let app = TestApp::new().await;

    let (_, created) = app.post("/services", json!({ "name": "Perm" })).await;
    let id = created["id"].as_i64().unwrap();

    // Historical record referencing the service by name.
    app.post(
        "/records",
        json!({
            "date": "2024-04-01",
            "customer_name": "Ana",
            "service": "Perm",
            "price": 60,
            "payment_type": "Cash",
        }),
    )
    .await;

    let (status, _) = app.delete(&format!("/services/{id}")).await;
    assert_eq!(status, 200);

    // The record still carries the original service text.
    let (_, listed) = app.get("/records/daily/2024-04-01").await;
    assert_eq!(listed.as_array().unwrap()[0]["service"], "Perm");
}
