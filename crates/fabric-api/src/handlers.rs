//! Endpoint handlers.

use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};
use tokio::fs;
use tracing::debug;

use crate::error::ApiError;
use crate::router::ApiState;

/// New-arrivals file inside the data directory.
pub const NEW_PRODUCTS_FILE: &str = "new-product.json";

/// About-us image directory, relative to the public directory.
pub const ABOUT_IMAGES_DIR: &str = "images/about-us";

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// `GET /api/new-products`
pub async fn new_products(State(state): State<Arc<ApiState>>) -> Result<Json<Value>, ApiError> {
    let value = read_new_products(&state.data_dir).await?;
    Ok(Json(value))
}

/// `GET /api/about-images`
pub async fn about_images(State(state): State<Arc<ApiState>>) -> Result<Json<Value>, ApiError> {
    let images = list_about_images(&state.public_dir).await?;
    Ok(Json(json!({ "images": images })))
}

/// Read the new-arrivals JSON from `data_dir`.
///
/// The document is passed through unchanged. A missing file reads as `[]`.
pub async fn read_new_products(data_dir: &Path) -> Result<Value, ApiError> {
    let path = data_dir.join(NEW_PRODUCTS_FILE);

    let content = match fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no new product data");
            return Ok(json!([]));
        }
        Err(e) => return Err(ApiError::NewProducts(format!("{}: {}", path.display(), e))),
    };

    serde_json::from_str(&content)
        .map_err(|e| ApiError::NewProducts(format!("{}: {}", path.display(), e)))
}

/// List about-us images under `public_dir` as site-relative paths.
///
/// Only jpg, jpeg, png and webp files are listed (extension matched without
/// regard to case), sorted by file name. A missing directory lists nothing.
pub async fn list_about_images(public_dir: &Path) -> Result<Vec<String>, ApiError> {
    let dir = public_dir.join(ABOUT_IMAGES_DIR);

    let mut entries = match fs::read_dir(&dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(dir = %dir.display(), "no about-us image directory");
            return Ok(Vec::new());
        }
        Err(e) => return Err(ApiError::AboutImages(format!("{}: {}", dir.display(), e))),
    };

    let mut names = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| ApiError::AboutImages(format!("{}: {}", dir.display(), e)))?
    {
        let name = entry.file_name().to_string_lossy().into_owned();
        if is_image(&name) {
            names.push(name);
        }
    }
    names.sort();

    Ok(names
        .into_iter()
        .map(|name| format!("/{}/{}", ABOUT_IMAGES_DIR, name))
        .collect())
}

fn is_image(name: &str) -> bool {
    match name.rsplit_once('.') {
        Some((_, ext)) => IMAGE_EXTENSIONS
            .iter()
            .any(|known| ext.eq_ignore_ascii_case(known)),
        None => false,
    }
}
