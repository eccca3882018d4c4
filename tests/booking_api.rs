mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};

use common::create_test_app;

fn reservation_body(pickup: &str, dropoff: &str) -> Value {
    json!({
        "fullName": "Mehmet Demir",
        "email": "Mehmet@Example.com",
        "phone": "0555 123 45 67",
        "pickupLocation": "İstanbul Havalimanı (IST)",
        "dropoffLocation": "Sabiha Gökçen İç Hatlar (SAW)",
        "pickupDate": pickup,
        "pickupTime": "10:00",
        "dropoffDate": dropoff,
        "dropoffTime": "10:00",
        "vehicleId": "1"
    })
}

#[tokio::test]
async fn test_quote_uses_site_rates() {
    let app = create_test_app().await;

    let response = app
        .post(
            "/api/pricing/quote",
            None,
            json!({ "dailyPrice": 1000, "pickupDate": "2025-07-01", "dropoffDate": "2025-07-04" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let body = response.json();
    assert_eq!(body["days"], 3);
    assert_eq!(body["subtotal"], 3000.0);
    assert_eq!(body["vatAmount"], 600.0);
    assert_eq!(body["discountAmount"], 540.0);
    assert_eq!(body["totalPrice"], 3060.0);
}

#[tokio::test]
async fn test_quote_counts_started_days_and_prefers_vehicle_price() {
    let app = create_test_app().await;

    let response = app
        .post(
            "/api/pricing/quote",
            None,
            json!({
                "vehicleId": "1",
                "dailyPrice": 9999,
                "pickupDate": "2025-07-01",
                "pickupTime": "10:00",
                "dropoffDate": "2025-07-02",
                "dropoffTime": "11:00"
            }),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["days"], 2);
    assert_eq!(body["dailyPrice"], 450.0);

    let unknown = app
        .post(
            "/api/pricing/quote",
            None,
            json!({ "vehicleId": "no-existe", "pickupDate": "2025-07-01", "dropoffDate": "2025-07-02" }),
        )
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);

    let no_price = app
        .post("/api/pricing/quote", None, json!({ "pickupDate": "2025-07-01", "dropoffDate": "2025-07-02" }))
        .await;
    assert_eq!(no_price.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reservation_price_is_computed_on_server() {
    let app = create_test_app().await;

    let mut body = reservation_body("2025-07-01", "2025-07-04");
    body["totalPrice"] = json!(1.0);
    let response = app.post("/api/reservations", None, body).await;
    assert_eq!(response.status, StatusCode::CREATED);

    let created = response.json();
    assert_eq!(created["status"], "new");
    // 3 días x 450: 1350 + 20% IVA - 15% descuento
    assert_eq!(created["totalPrice"], 1377.0);
    assert_eq!(created["pricing"]["days"], 3);

    let admin = app.admin_token().await;
    let id = created["id"].as_i64().unwrap();
    let stored = app.get(&format!("/api/reservations/{}", id), Some(&admin)).await;
    assert_eq!(stored.status, StatusCode::OK);
    let stored = stored.json();
    assert_eq!(stored["email"], "mehmet@example.com");
    assert_eq!(stored["differentDropoff"], true);
    assert_eq!(stored["vehicleName"], "Toyota Corolla");
}

#[tokio::test]
async fn test_reservation_with_dropoff_before_pickup_is_rejected() {
    let app = create_test_app().await;

    let same_day = app
        .post("/api/reservations", None, reservation_body("2025-07-04", "2025-07-04"))
        .await;
    assert_eq!(same_day.status, StatusCode::BAD_REQUEST);

    let reversed = app
        .post("/api/reservations", None, reservation_body("2025-07-04", "2025-07-01"))
        .await;
    assert_eq!(reversed.status, StatusCode::BAD_REQUEST);

    assert_eq!(app.count("reservations").await, 0);
}

#[tokio::test]
async fn test_reservation_validation_errors_are_listed() {
    let app = create_test_app().await;

    let response = app
        .post(
            "/api/reservations",
            None,
            json!({ "fullName": "", "email": "mal", "pickupDate": "01/07/2025", "pickupTime": "25:99" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let body = response.json();
    assert_eq!(body["code"], "VALIDATION_ERROR");
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"email"));
    assert!(fields.contains(&"pickupDate"));
    assert!(fields.contains(&"pickupTime"));
}

#[tokio::test]
async fn test_reservation_status_transitions() {
    let app = create_test_app().await;
    let admin = app.admin_token().await;

    let created = app
        .post("/api/reservations", None, reservation_body("2025-07-01", "2025-07-03"))
        .await;
    let id = created.json()["id"].as_i64().unwrap();
    let uri = format!("/api/reservations/{}", id);

    let unknown = app.put(&uri, Some(&admin), json!({ "status": "perdida" })).await;
    assert_eq!(unknown.status, StatusCode::BAD_REQUEST);

    let completed_too_early = app.put(&uri, Some(&admin), json!({ "status": "completed" })).await;
    assert_eq!(completed_too_early.status, StatusCode::CONFLICT);

    let confirmed = app.put(&uri, Some(&admin), json!({ "status": "confirmed" })).await;
    assert_eq!(confirmed.status, StatusCode::OK);
    assert_eq!(confirmed.json()["status"], "confirmed");

    let cancelled = app.put(&uri, Some(&admin), json!({ "status": "cancelled" })).await;
    assert_eq!(cancelled.status, StatusCode::OK);

    let reopened = app.put(&uri, Some(&admin), json!({ "status": "new" })).await;
    assert_eq!(reopened.status, StatusCode::CONFLICT);

    let list = app.get(&format!("/api/reservations?id={}", id), Some(&admin)).await;
    assert_eq!(list.json().as_array().unwrap().len(), 1);

    assert_eq!(app.delete(&uri, Some(&admin)).await.status, StatusCode::OK);
    assert_eq!(app.delete(&uri, Some(&admin)).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_quick_reservation_is_mirrored() {
    let app = create_test_app().await;

    let response = app
        .post(
            "/api/quick-reservations",
            None,
            json!({
                "fullName": "Zeynep Kaya",
                "phone": "0555 987 65 43",
                "pickupDate": "2025-08-10",
                "dropoffDate": "2025-08-12",
                "vehicleId": "2"
            }),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);

    let created = response.json();
    assert_eq!(created["pricing"]["days"], 2);
    assert_eq!(created["pricing"]["dailyPrice"], 500.0);
    assert_eq!(app.count("quick_reservations").await, 1);
    assert_eq!(app.count("reservations").await, 1);

    let admin = app.admin_token().await;
    let mirror_id = created["reservationId"].as_i64().unwrap();
    let mirror = app.get(&format!("/api/reservations/{}", mirror_id), Some(&admin)).await.json();
    assert_eq!(mirror["fullName"], "Zeynep Kaya");
    assert_eq!(mirror["totalPrice"], created["pricing"]["totalPrice"]);

    let quick_id = created["id"].as_i64().unwrap();
    let quick = app
        .get(&format!("/api/quick-reservations/{}", quick_id), Some(&admin))
        .await
        .json();
    assert_eq!(quick["source"], "quick-card-modal");

    let without_price = app
        .post(
            "/api/quick-reservations",
            None,
            json!({
                "fullName": "Sin Precio",
                "phone": "0555 987 65 43",
                "pickupDate": "2025-08-10",
                "dropoffDate": "2025-08-12"
            }),
        )
        .await;
    assert_eq!(without_price.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.count("reservations").await, 1);
}

#[tokio::test]
async fn test_quotation_flow() {
    let app = create_test_app().await;
    let admin = app.admin_token().await;

    let created = app
        .post(
            "/api/quotations",
            None,
            json!({
                "name": "Ali Veli",
                "email": "ali@example.com",
                "phone": "0555 111 22 33",
                "vehicleId": "3",
                "message": "Una semana en agosto"
            }),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let id = created.json()["id"].as_i64().unwrap();

    let bad_phone = app
        .post(
            "/api/quotations",
            None,
            json!({ "name": "X", "email": "x@example.com", "phone": "123", "vehicleId": "3", "message": "" }),
        )
        .await;
    assert_eq!(bad_phone.status, StatusCode::BAD_REQUEST);

    let uri = format!("/api/quotations/{}", id);
    let updated = app.put(&uri, Some(&admin), json!({ "status": "contacted" })).await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.json()["status"], "contacted");

    assert_eq!(app.get("/api/quotations", Some(&admin)).await.json().as_array().unwrap().len(), 1);
    assert_eq!(app.delete(&uri, Some(&admin)).await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_mock_intent_creates_reservation_and_payment() {
    let app = create_test_app().await;

    let response = app
        .post(
            "/api/payments/mock-intent",
            None,
            json!({
                "fullName": "Elif Şahin",
                "email": "elif@example.com",
                "phone": "0555 444 55 66",
                "pickupDate": "2025-09-01",
                "dropoffDate": "2025-09-05",
                "vehicleId": "4",
                "amount": 1234.567,
                "cardNumber": "4111 1111 1111 1111",
                "cardHolder": "ELIF SAHIN",
                "cvv": "123"
            }),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let body = response.json();
    assert_eq!(body["success"], true);
    assert!(body["intentId"].as_str().unwrap().starts_with("mock_"));

    let admin = app.admin_token().await;
    let payment_id = body["paymentId"].as_i64().unwrap();
    let payment = app.get(&format!("/api/payments/{}", payment_id), Some(&admin)).await.json();
    assert_eq!(payment["cardLast4"], "1111");
    assert_eq!(payment["cardBrand"], "Visa");
    assert_eq!(payment["currency"], "TRY");
    assert!(!payment.to_string().contains("4111 1111"));
    assert!(!payment.to_string().contains("\"cvv\""));

    let reservation_id = body["reservationId"].as_i64().unwrap();
    let reservation = app
        .get(&format!("/api/reservations/{}", reservation_id), Some(&admin))
        .await
        .json();
    assert_eq!(reservation["status"], "pending_payment");
    assert_eq!(reservation["totalPrice"], 1234.57);
    assert_eq!(app.count("customers").await, 1);
}

#[tokio::test]
async fn test_mock_intent_on_closed_reservation_conflicts() {
    let app = create_test_app().await;
    let admin = app.admin_token().await;

    let created = app
        .post("/api/reservations", None, reservation_body("2025-07-01", "2025-07-03"))
        .await;
    let id = created.json()["id"].as_i64().unwrap();
    app.put(&format!("/api/reservations/{}", id), Some(&admin), json!({ "status": "cancelled" }))
        .await;

    let response = app
        .post(
            "/api/payments/mock-intent",
            None,
            json!({ "reservationId": id, "amount": 100, "cardNumber": "5555555555554444" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(app.count("payments").await, 0);

    let missing = app
        .post(
            "/api/payments/mock-intent",
            None,
            json!({ "reservationId": 999, "amount": 100, "cardNumber": "5555555555554444" }),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}
