// Integration tests for Service Finder

use actix_web::{test, web, App};
use serde_json::{json, Value};
use service_finder::core::{FilterBuilder, MarkerLayout};
use service_finder::models::{Hit, Location};
use service_finder::routes::{configure_routes, handle_json_payload_error, layout::AppState};

fn create_hit(id: &str, coords: &[(&str, &str)]) -> Hit {
    let locations = coords
        .iter()
        .enumerate()
        .map(|(i, (lat, lng))| Location::new(format!("{}-{}", id, i), *lat, *lng).with_label(format!("Site {}", i)))
        .collect();
    Hit::new(id, locations)
}

#[::core::prelude::v1::test]
fn test_integration_search_cycle() {
    // Facet selection produces the request parameter
    let filter = FilterBuilder::default().build(Some("category:'food'"), ["veteran"]);
    assert_eq!(filter, "category:'food' AND eligibilities:'veteran'");

    // Hits come back, three of them at one pantry
    let hits = vec![
        create_hit("pantry-a", &[("34.05", "-118.25")]),
        create_hit("pantry-b", &[("34.05", "-118.25"), ("34.10", "-118.30")]),
        create_hit("clinic", &[("40.7128", "-74.006")]),
        create_hit("pantry-c", &[("34.05", "-118.25")]),
    ];

    let markers = MarkerLayout::with_default_spacing().layout_hits(&hits).unwrap();

    // One marker per location
    assert_eq!(markers.len(), 5);

    // Every marker lands on its own position
    for (i, a) in markers.iter().enumerate() {
        for b in markers.iter().skip(i + 1) {
            assert_ne!(a.position(), b.position(), "{} and {} overlap", a.member.location.id, b.member.location.id);
        }
    }

    // The shared pantry coordinate is spread, the others are untouched
    let shared: Vec<_> = markers.iter().filter(|m| m.coordinate_key == "34.05-118.25").collect();
    assert_eq!(shared.len(), 3);
    assert!(shared.iter().all(|m| m.is_displaced()));
    for m in shared {
        assert!((m.lat - 34.05).abs() < 0.001);
        assert!((m.lng - -118.25).abs() < 0.001);
    }

    let clinic = markers.iter().find(|m| m.member.hit.id == "clinic").unwrap();
    assert_eq!((clinic.lat, clinic.lng), (40.7128, -74.006));
}

#[::core::prelude::v1::test]
fn test_integration_layout_is_repeatable() {
    let hits = vec![
        create_hit("a", &[("1", "1")]),
        create_hit("b", &[("1", "1")]),
    ];
    let layout = MarkerLayout::with_default_spacing();

    assert_eq!(layout.layout_hits(&hits).unwrap(), layout.layout_hits(&hits).unwrap());
}

#[actix_web::test]
async fn test_http_build_filters() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(AppState::default()))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/filters")
        .set_json(json!({
            "pageFilter": "category:food",
            "eligibilities": ["veteran", "senior"]
        }))
        .to_request();

    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(
        body["filters"],
        "category:food AND (eligibilities:'veteran' OR eligibilities:'senior')"
    );
    assert_eq!(
        body["encoded"],
        "category%3Afood%20AND%20%28eligibilities%3A%27veteran%27%20OR%20eligibilities%3A%27senior%27%29"
    );
}

#[actix_web::test]
async fn test_http_group_hits_keeps_first_seen_order() {
    let app = test::init_service(App::new().configure(configure_routes)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/locations/group")
        .set_json(json!({
            "hits": [
                {"objectID": "1", "name": "A", "locations": [{"id": "x", "lat": "5", "lng": "6"}]},
                {"objectID": "2", "locations": [{"id": "y", "lat": 1.5, "lng": 2}]},
                {"objectID": "3", "locations": [{"id": "z", "lat": "5", "lng": "6"}]}
            ]
        }))
        .to_request();

    let raw = test::call_and_read_body(&app, req).await;
    let text = std::str::from_utf8(&raw).unwrap();

    // Keys are written in the order they were first seen
    let first = text.find("\"56\":").unwrap();
    let second = text.find("\"1.52\":").unwrap();
    assert!(first < second);

    let body: Value = serde_json::from_str(text).unwrap();
    let groups = body.as_object().unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups["56"].as_array().unwrap().len(), 2);
    assert_eq!(groups["56"][0]["hit"]["name"], "A");
    assert_eq!(groups["1.52"][0]["location"]["id"], "y");
}

#[actix_web::test]
async fn test_http_service_locations_marker_index() {
    let app = test::init_service(App::new().configure(configure_routes)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/locations/service")
        .set_json(json!({
            "locations": [
                {"id": "a", "latitude": "1", "longitude": "1"},
                {"id": "b", "latitude": "2", "longitude": "2"},
                {"id": "c", "latitude": "1", "longitude": "1"}
            ]
        }))
        .to_request();

    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["11"][0]["markerIndex"], 1);
    assert_eq!(body["11"][1]["markerIndex"], 3);
    assert_eq!(body["22"][0]["markerIndex"], 2);
}

#[actix_web::test]
async fn test_http_layout_markers() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(AppState::default()))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/markers/layout")
        .set_json(json!({
            "hits": [
                {"objectID": "1", "locations": [{"id": "a", "lat": "0", "lng": "0"}]},
                {"objectID": "2", "locations": [{"id": "b", "lat": "0", "lng": "0"}]},
                {"objectID": "3", "locations": [{"id": "c", "lat": "0", "lng": "0"}]},
                {"objectID": "4", "locations": [{"id": "d", "lat": "0", "lng": "0"}]}
            ],
            "spacing": 1.0
        }))
        .to_request();

    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["clusterCount"], 1);
    let markers = body["markers"].as_array().unwrap();
    assert_eq!(markers.len(), 4);
    assert_eq!(markers[0]["lat"], -0.5);
    assert_eq!(markers[0]["lng"], -0.5);
    assert_eq!(markers[3]["lat"], 0.5);
    assert_eq!(markers[3]["lng"], 0.5);
    assert_eq!(markers[1]["clusterIndex"], 1);
    assert_eq!(markers[1]["coordinateKey"], "00");
}

#[actix_web::test]
async fn test_http_layout_rejects_non_numeric_coordinates() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(AppState::default()))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/markers/layout")
        .set_json(json!({
            "hits": [{"objectID": "1", "locations": [{"id": "a", "lat": "north", "lng": "0"}]}]
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_argument");
}

#[actix_web::test]
async fn test_http_grid_offset() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(AppState::default()))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/grid/offset")
        .set_json(json!({
            "index": 0,
            "total": 1,
            "epicenterLat": 34.05,
            "epicenterLng": -118.25
        }))
        .to_request();

    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["offsetLat"], 34.05);
    assert_eq!(body["offsetLng"], -118.25);
}

#[actix_web::test]
async fn test_http_grid_offset_validation() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(AppState::default()))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/grid/offset")
        .set_json(json!({
            "index": 0,
            "total": 0,
            "epicenterLat": 0.0,
            "epicenterLng": 0.0
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);
}

#[actix_web::test]
async fn test_http_malformed_json() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(AppState::default()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/filters")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_json");
}
