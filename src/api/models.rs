use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct ArtworkInfo {
    pub name: String,
    pub descent: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ArtworksResponse {
    pub artworks: Vec<ArtworkInfo>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
