use std::path::PathBuf;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;
use trackwarp::api::create_router;
use trackwarp::api::models::{ArtworksResponse, ErrorResponse};
use trackwarp::{read_track, Settings, TrackPoint, Warper};

const BOUNDARY: &str = "trackwarp-test-boundary";

fn router(settings: Settings) -> Router {
    create_router(Arc::new(Warper::new(settings)))
}

fn settings() -> Settings {
    let mut settings = Settings::default();
    settings.overlay.artwork_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("artwork");
    settings
}

fn flight_csv() -> String {
    let alts = [0.0, 1000.0, 2000.0, 3000.0, 4000.0, 5000.0, 3500.0, 2000.0, 800.0, 100.0];
    alts.iter()
        .enumerate()
        .map(|(i, alt)| format!("{},{},{},{}\n", i * 120, 51.0 + i as f64 * 0.02, -1.0 + i as f64 * 0.002, alt))
        .collect()
}

fn multipart(fields: &[(&str, &str)]) -> Request<Body> {
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!("--{}\r\n", BOUNDARY));
        if *name == "csv" {
            body.push_str("Content-Disposition: form-data; name=\"csv\"; filename=\"flight_path.csv\"\r\n");
            body.push_str("Content-Type: text/csv\r\n\r\n");
        } else {
            body.push_str(&format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name));
        }
        body.push_str(value);
        body.push_str("\r\n");
    }
    body.push_str(&format!("--{}--\r\n", BOUNDARY));

    Request::builder()
        .method("POST")
        .uri("/api/warp")
        .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={}", BOUNDARY))
        .body(Body::from(body))
        .unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()
}

#[tokio::test]
async fn test_list_artworks() {
    let response = router(settings())
        .oneshot(Request::builder().uri("/api/artworks").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let listing: ArtworksResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
    let names: Vec<&str> = listing.artworks.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["hello.svg", "zigzag.svg", "parachute.svg", "hello_ground.svg"]);
    assert_eq!(listing.artworks.iter().filter(|a| a.descent).count(), 2);
}

#[tokio::test]
async fn test_warp_returns_csv() {
    let csv = flight_csv();
    let app = router(settings());

    let response = app
        .clone()
        .oneshot(multipart(&[("identifier", "abc"), ("csv", &csv)]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/csv");

    let first = body_bytes(response).await;
    let track = read_track(first.as_slice()).unwrap();
    assert!(track.len() >= 2);
    assert!(track.windows(2).all(|w| w[0].time <= w[1].time));

    let again = app
        .oneshot(multipart(&[("identifier", "abc"), ("csv", &csv)]))
        .await
        .unwrap();
    assert_eq!(body_bytes(again).await, first);
}

#[tokio::test]
async fn test_missing_fields() {
    let csv = flight_csv();

    for fields in [vec![("csv", csv.as_str())], vec![("identifier", "abc")], vec![("identifier", " "), ("csv", csv.as_str())]] {
        let response = router(settings()).oneshot(multipart(&fields)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let error: ErrorResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert!(error.error.starts_with("Missing"), "{}", error.error);
    }
}

#[tokio::test]
async fn test_malformed_track() {
    let response = router(settings())
        .oneshot(multipart(&[("identifier", "abc"), ("csv", "0,51.0,-1.0,high\n")]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_core_failure_is_unprocessable() {
    let mut settings = settings();
    settings.strategy.dummy = 0;
    settings.strategy.gravity = 1;
    settings.strategy.overlay = 0;
    settings.targets.clear();

    let single = TrackPoint::new(0, 51.0, -1.0, 0.0);
    let csv = format!("{},{},{},{}\n", single.time, single.lat, single.lon, single.alt);

    let response = router(settings)
        .oneshot(multipart(&[("identifier", "abc"), ("csv", &csv)]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let error: ErrorResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert!(error.error.starts_with("Invalid input"), "{}", error.error);
}
