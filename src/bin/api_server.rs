use std::env;
use std::sync::Arc;

use anyhow::{Context, Result};
use trackwarp::api::create_router;
use trackwarp::{Settings, Warper};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let settings = match env::var("TRACKWARP_CONFIG") {
        Ok(path) => Settings::from_file(&path).with_context(|| format!("loading settings from {}", path))?,
        Err(_) => Settings::default(),
    };
    let addr = env::var("TRACKWARP_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

    let app = create_router(Arc::new(Warper::new(settings)));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;

    println!("trackwarp API server");
    println!("Listening on http://{}", addr);
    println!();
    println!("Endpoints:");
    println!("  POST /api/warp (multipart/form-data: csv file + identifier)");
    println!("  GET  /api/artworks");
    println!();

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
