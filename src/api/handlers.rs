use std::io::Cursor;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::{multipart::Multipart, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};

use crate::pipeline::Warper;
use crate::track::{read_track, write_track};
use super::models::*;

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(ErrorResponse { error: message.into() }))
}

pub async fn warp_track(
    State(warper): State<Arc<Warper>>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let start = Instant::now();

    let mut csv_data: Option<Vec<u8>> = None;
    let mut identifier: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, format!("Malformed upload: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "csv" => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| api_error(StatusCode::BAD_REQUEST, format!("Unreadable csv field: {}", e)))?;
                csv_data = Some(bytes.to_vec());
            }
            "identifier" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| api_error(StatusCode::BAD_REQUEST, format!("Unreadable identifier: {}", e)))?;
                identifier = Some(text.trim().to_string());
            }
            _ => {}
        }
    }

    let csv_data = csv_data.ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "Missing csv field"))?;
    let identifier = identifier
        .filter(|id| !id.is_empty())
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "Missing identifier field"))?;

    let track = read_track(Cursor::new(csv_data))
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, format!("Malformed track: {}", e)))?;

    let warped = tokio::task::spawn_blocking(move || warper.warp(&identifier, &track))
        .await
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, format!("Warp task failed: {}", e)))?
        .map_err(|e| api_error(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;

    let mut body = Vec::with_capacity(warped.len() * 48);
    write_track(&mut body, &warped)
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    log::info!(
        "warped {} points in {:.2} ms",
        warped.len(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime::TEXT_CSV.as_ref())
        .header(header::CONTENT_DISPOSITION, "attachment; filename=\"flight_path_warped.csv\"")
        .body(Body::from(body))
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

pub async fn list_artworks(State(warper): State<Arc<Warper>>) -> Json<ArtworksResponse> {
    let artworks = warper
        .settings()
        .artworks
        .iter()
        .map(|entry| ArtworkInfo {
            name: entry.name.clone(),
            descent: entry.descent,
        })
        .collect();

    Json(ArtworksResponse { artworks })
}
