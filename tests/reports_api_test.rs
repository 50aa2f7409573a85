mod common;

use common::{money, TestApp};
use rust_decimal_macros::dec;
use serde_json::{json, Value};

async fn add_record(app: &TestApp, date: &str, staff: &str, service: &str, price: i64, payment: &str) {
    let (status, _) = app
        .post(
            "/records",
            json!({
                "date": date,
                "customer_name": "Walk-in",
                "service": service,
                "staff": staff,
                "price": price,
                "payment_type": payment,
            }),
        )
        .await;
    assert_eq!(status, 201);
}

#[tokio::test]
async fn empty_day_reports_zeros_not_nulls() {
    let app = TestApp::new().await;

    let (status, summary) = app.get("/reports/daily-summary/2024-01-15").await;
    assert_eq!(status, 200);
    assert_eq!(summary["date"], "2024-01-15");
    assert_eq!(summary["income"]["total"]["count"], 0);
    assert_eq!(money(&summary["income"]["total"]["amount"]), dec!(0));
    assert_eq!(summary["expenses"]["total"]["count"], 0);
    assert_eq!(money(&summary["expenses"]["total"]["amount"]), dec!(0));
    assert_eq!(money(&summary["net_profit"]), dec!(0));
    assert!(summary["income"]["by_payment_type"]
        .as_array()
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn daily_summary_groups_by_payment_type() {
    let app = TestApp::new().await;

    add_record(&app, "2024-05-02", "Marco", "Haircut", 100, "Cash").await;
    add_record(&app, "2024-05-02", "Marco", "Shave", 50, "Card").await;
    // Another day's record must not bleed into the summary.
    add_record(&app, "2024-05-03", "Marco", "Haircut", 999, "Cash").await;

    app.post(
        "/expenses",
        json!({
            "date": "2024-05-02",
            "expense_type": "Supplies",
            "amount": 30,
            "payment_type": "Cash",
        }),
    )
    .await;

    let (status, summary) = app.get("/reports/daily-summary/2024-05-02").await;
    assert_eq!(status, 200);

    assert_eq!(summary["income"]["total"]["count"], 2);
    assert_eq!(money(&summary["income"]["total"]["amount"]), dec!(150));

    let by_type = summary["income"]["by_payment_type"].as_array().unwrap();
    assert_eq!(by_type.len(), 2);
    let amount_for = |token: &str| -> rust_decimal::Decimal {
        let bucket = by_type
            .iter()
            .find(|b| b["payment_type"] == token)
            .unwrap_or_else(|| panic!("missing bucket {token}"));
        money(&bucket["amount"])
    };
    assert_eq!(amount_for("Cash"), dec!(100));
    assert_eq!(amount_for("Card"), dec!(50));

    assert_eq!(summary["expenses"]["total"]["count"], 1);
    assert_eq!(money(&summary["expenses"]["total"]["amount"]), dec!(30));
    assert_eq!(money(&summary["net_profit"]), dec!(120));
}

#[tokio::test]
async fn staff_performance_aggregates_by_staff_member() {
    let app = TestApp::new().await;

    add_record(&app, "2024-05-01", "Lena", "Haircut", 100, "Cash").await;
    add_record(&app, "2024-05-04", "Lena", "Hair Color", 200, "Card").await;
    // Outside the range.
    add_record(&app, "2024-06-01", "Lena", "Haircut", 500, "Cash").await;
    // No staff on the record: excluded from the report entirely.
    let (status, _) = app
        .post(
            "/records",
            json!({
                "date": "2024-05-02",
                "customer_name": "Walk-in",
                "price": 25,
                "payment_type": "Cash",
            }),
        )
        .await;
    assert_eq!(status, 201);

    let (status, report) = app
        .get("/reports/staff-performance/2024-05-01/2024-05-31")
        .await;
    assert_eq!(status, 200);

    let rows = report.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row["staff"], "Lena");
    assert_eq!(row["service_count"], 2);
    assert_eq!(money(&row["total_revenue"]), dec!(300));
    assert_eq!(money(&row["average_price"]), dec!(150));

    let mut services: Vec<&str> = row["services_provided"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s.as_str().unwrap())
        .collect();
    services.sort_unstable();
    assert_eq!(services, vec!["Hair Color", "Haircut"]);
}

#[tokio::test]
async fn staff_performance_orders_by_revenue() {
    let app = TestApp::new().await;

    add_record(&app, "2024-05-01", "Lena", "Haircut", 50, "Cash").await;
    add_record(&app, "2024-05-01", "Marco", "Hair Color", 200, "Card").await;

    let (_, report) = app
        .get("/reports/staff-performance/2024-05-01/2024-05-01")
        .await;
    let staff: Vec<&str> = report
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["staff"].as_str().unwrap())
        .collect();
    assert_eq!(staff, vec!["Marco", "Lena"]);
}

#[tokio::test]
async fn service_analysis_reports_price_spread() {
    let app = TestApp::new().await;

    add_record(&app, "2024-05-01", "Lena", "Haircut", 30, "Cash").await;
    add_record(&app, "2024-05-02", "Marco", "Haircut", 50, "Card").await;
    add_record(&app, "2024-05-03", "Lena", "Shave", 20, "Cash").await;

    let (status, report) = app
        .get("/reports/service-analysis/2024-05-01/2024-05-31")
        .await;
    assert_eq!(status, 200);

    let rows = report.as_array().unwrap();
    assert_eq!(rows.len(), 2);

    // Most-requested service first.
    let haircut = &rows[0];
    assert_eq!(haircut["service"], "Haircut");
    assert_eq!(haircut["service_count"], 2);
    assert_eq!(money(&haircut["total_revenue"]), dec!(80));
    assert_eq!(money(&haircut["average_price"]), dec!(40));
    assert_eq!(money(&haircut["min_price"]), dec!(30));
    assert_eq!(money(&haircut["max_price"]), dec!(50));

    let shave = &rows[1];
    assert_eq!(shave["service"], "Shave");
    assert_eq!(shave["service_count"], 1);
}

#[tokio::test]
async fn report_dates_are_validated() {
    let app = TestApp::new().await;

    let (status, _) = app.get("/reports/daily-summary/yesterday").await;
    assert_eq!(status, 400);

    let (status, body) = app
        .get("/reports/staff-performance/2024-05-01/not-a-date")
        .await;
    assert_eq!(status, 400);
    assert!(matches!(&body, Value::Object(_)));
}
