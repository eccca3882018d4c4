mod common;

use std::time::Duration;

use axum::http::{header, StatusCode};
use serde_json::json;

use common::create_test_app;

#[tokio::test]
async fn test_vehicle_crud() {
    let app = create_test_app().await;
    let admin = app.admin_token().await;

    let seeded = app.get("/api/vehicles", None).await.json();
    assert_eq!(seeded.as_array().unwrap().len(), 5);

    let created = app
        .post(
            "/api/vehicles",
            Some(&admin),
            json!({ "model": "Renault Clio", "price": "₺400", "deposit": "₺4.000" }),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let vehicle = created.json();
    let id = vehicle["id"].as_str().unwrap().to_string();
    assert!(!id.is_empty());
    assert_eq!(vehicle["passengers"], 5);

    let duplicate = app
        .post(
            "/api/vehicles",
            Some(&admin),
            json!({ "id": "1", "model": "Otro", "price": "₺1", "deposit": "₺1" }),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);

    let anonymous = app
        .post("/api/vehicles", None, json!({ "model": "X", "price": "1", "deposit": "1" }))
        .await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let updated = app
        .put(
            &format!("/api/vehicles/{}", id),
            Some(&admin),
            json!({ "model": "Renault Clio 5", "price": "₺420", "deposit": "₺4.000", "status": "Kirada" }),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.json()["model"], "Renault Clio 5");

    let deleted = app.delete(&format!("/api/vehicles/{}", id), Some(&admin)).await;
    assert_eq!(deleted.status, StatusCode::OK);

    let list = app.get("/api/vehicles", None).await.json();
    assert!(list.as_array().unwrap().iter().all(|v| v["id"] != id.as_str()));

    let missing = app.delete("/api/vehicles/no-existe", Some(&admin)).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(app.get("/api/vehicles/no-existe", None).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_settings_update_is_all_or_nothing() {
    let app = create_test_app().await;
    let admin = app.admin_token().await;

    let before = app.get("/api/settings", None).await.json();
    assert_eq!(before["colorTheme"], "blue");
    assert_eq!(before["vatRate"], "20");

    let rejected = app
        .put(
            "/api/settings",
            Some(&admin),
            json!({ "colorTheme": "red", "newYearBannerText": "x".repeat(2001) }),
        )
        .await;
    assert_eq!(rejected.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.get("/api/settings", None).await.json()["colorTheme"], "blue");

    let bad_key = app.put("/api/settings", Some(&admin), json!({ "mal clave!": "1" })).await;
    assert_eq!(bad_key.status, StatusCode::BAD_REQUEST);

    let saved = app
        .put("/api/settings", Some(&admin), json!({ "colorTheme": "red", "vatRate": 10, "newYearEffect": true }))
        .await;
    assert_eq!(saved.status, StatusCode::OK);
    let data = &saved.json()["data"];
    assert_eq!(data["colorTheme"], "red");
    assert_eq!(data["vatRate"], "10");
    assert_eq!(data["newYearEffect"], "true");

    let quote = app
        .post(
            "/api/pricing/quote",
            None,
            json!({ "dailyPrice": 100, "pickupDate": "2025-07-01", "dropoffDate": "2025-07-02" }),
        )
        .await
        .json();
    assert_eq!(quote["vatRate"], 10.0);
    assert_eq!(quote["totalPrice"], 93.5);
}

#[tokio::test]
async fn test_out_of_range_rates_are_rejected() {
    let app = create_test_app().await;
    let admin = app.admin_token().await;

    for body in [json!({ "vatRate": 150 }), json!({ "discountRate": "abc" }), json!({ "vatRate": -5 })] {
        let response = app.put("/api/settings", Some(&admin), body.clone()).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{}", body);
        assert_eq!(response.json()["errors"][0]["code"], "rate");
    }

    let settings = app.get("/api/settings", None).await.json();
    assert_eq!(settings["vatRate"], "20");

    let quote = app
        .post(
            "/api/pricing/quote",
            None,
            json!({ "dailyPrice": 100, "pickupDate": "2025-07-01", "dropoffDate": "2025-07-02" }),
        )
        .await
        .json();
    assert_eq!(quote["vatRate"], 20.0);
}

#[tokio::test]
async fn test_locations() {
    let app = create_test_app().await;
    let admin = app.admin_token().await;

    let grouped = app.get("/api/locations/grouped", None).await.json();
    assert!(grouped["Bodrum"].as_array().unwrap().len() >= 2);

    let created = app
        .post(
            "/api/locations",
            Some(&admin),
            json!({ "region": "Antalya", "name": "Antalya Ofis", "code": "ayt", "type": "office", "isActive": false }),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.json()["code"], "AYT");

    let duplicate = app
        .post(
            "/api/locations",
            Some(&admin),
            json!({ "region": "Antalya", "name": "Antalya Ofis", "code": "AYT", "type": "office" }),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);

    let bad_type = app
        .post(
            "/api/locations",
            Some(&admin),
            json!({ "region": "Antalya", "name": "Puerto", "code": "AYT", "type": "harbor" }),
        )
        .await;
    assert_eq!(bad_type.status, StatusCode::BAD_REQUEST);

    let public = app.get("/api/locations", None).await.json();
    assert!(public.as_array().unwrap().iter().all(|l| l["name"] != "Antalya Ofis"));

    let all = app.get("/api/locations/admin/all", Some(&admin)).await.json();
    assert!(all.as_array().unwrap().iter().any(|l| l["name"] == "Antalya Ofis"));
}

#[tokio::test]
async fn test_visits_are_tracked_and_reset() {
    let app = create_test_app().await;
    let admin = app.admin_token().await;

    let tracked = app
        .post("/api/track-visit", None, json!({ "referrer": "https://google.com", "pageUrl": "/" }))
        .await;
    assert_eq!(tracked.status, StatusCode::OK);
    assert_eq!(tracked.json()["success"], true);

    // El registro se hace en segundo plano
    for _ in 0..50 {
        if app.count("visitors").await > 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    let stats = app.get("/api/admin/stats/visitors", Some(&admin)).await;
    assert_eq!(stats.status, StatusCode::OK);
    let stats = stats.json();
    assert_eq!(stats["totalVisits"], 1);
    assert_eq!(stats["uniqueVisitors"], 1);
    assert_eq!(stats["countries"][0]["name"], "Turkey");

    let logs = app.get("/api/admin/visitors/logs", Some(&admin)).await.json();
    assert_eq!(logs[0]["referrer"], "https://google.com");

    let reset = app.post("/api/visitors/reset", Some(&admin), json!({})).await;
    assert_eq!(reset.status, StatusCode::OK);
    assert_eq!(app.count("visitors").await, 0);
}

#[tokio::test]
async fn test_backups() {
    let app = create_test_app().await;
    let admin = app.admin_token().await;

    let created = app.post("/api/backups/create", Some(&admin), json!({})).await;
    assert_eq!(created.status, StatusCode::CREATED);
    let name = created.json()["data"]["name"].as_str().unwrap().to_string();

    let list = app.get("/api/backups", Some(&admin)).await.json();
    assert_eq!(list[0]["name"], name.as_str());

    let download = app.get(&format!("/api/backups/download/{}", name), Some(&admin)).await;
    assert_eq!(download.status, StatusCode::OK);
    assert_eq!(download.headers[header::CONTENT_TYPE], "application/octet-stream");
    assert!(download.bytes.starts_with(b"SQLite format 3"));

    let invalid = app.get("/api/backups/download/data.db", Some(&admin)).await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);

    let traversal = app.get("/api/backups/download/..%2Fdata.db", Some(&admin)).await;
    assert_eq!(traversal.status, StatusCode::FORBIDDEN);

    let deleted = app.delete(&format!("/api/backups/{}", name), Some(&admin)).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(app.get("/api/backups", Some(&admin)).await.json().as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_database_console_is_root_only() {
    let app = create_test_app().await;
    let admin = app.admin_token().await;

    let forbidden = app.get("/api/db/tables", Some(&admin)).await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);

    let root = app.root_token().await;
    let tables = app.get("/api/db/tables", Some(&root)).await;
    assert_eq!(tables.status, StatusCode::OK);
    assert!(tables.json().as_array().unwrap().iter().any(|t| t == "reservations"));

    let rows = app.get("/api/db/table/vehicles", Some(&root)).await.json();
    assert_eq!(rows.as_array().unwrap().len(), 5);

    let select = app
        .post("/api/db/query", Some(&root), json!({ "query": "SELECT COUNT(*) AS total FROM vehicles" }))
        .await
        .json();
    assert_eq!(select["type"], "SELECT");
    assert_eq!(select["data"][0]["total"], 5);

    let broken = app.post("/api/db/query", Some(&root), json!({ "query": "SELEC 1" })).await;
    assert_eq!(broken.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_api_route_is_json_404() {
    let app = create_test_app().await;

    let response = app.get("/api/no-existe", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.json()["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_unknown_static_file_without_404_page_is_json() {
    let app = create_test_app().await;

    let response = app.get("/pagina-que-no-existe", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.json()["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_sensitive_paths_are_blocked() {
    let app = create_test_app().await;

    for path in ["/.env", "/data.db", "/.git/config", "/Cargo.toml"] {
        let response = app.get(path, None).await;
        assert_eq!(response.status, StatusCode::FORBIDDEN, "{}", path);
    }
}
