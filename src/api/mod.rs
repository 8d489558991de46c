//! HTTP interface
//!
//! - `POST /api/warp`: multipart `csv` + `identifier`, responds with warped rows
//! - `GET /api/artworks`: the artwork catalogue

pub mod handlers;
pub mod models;
pub mod routes;

pub use routes::create_router;
