//! HTTP response building and static asset loading.
//!
//! Builders never panic: if a response fails to build, the error is
//! logged and a plain fallback response goes out instead.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use serde_json::json;
use std::path::Path;
use tokio::fs;

use crate::config::ResourcesConfig;
use crate::error::GatewayError;
use crate::logger;

/// Route prefix under which static assets are exposed.
pub const STATIC_PREFIX: &str = "/static";

/// Build a 200 response relaying a JSON payload.
pub fn build_json_response(payload: &serde_json::Value) -> Response<Full<Bytes>> {
    Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(payload.to_string())))
        .unwrap_or_else(|e| {
            log_build_error("JSON", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build the 500 response carrying `{"error": message}`.
pub fn build_error_response(err: &GatewayError) -> Response<Full<Bytes>> {
    let body = json!({ "error": err.to_string() }).to_string();
    Response::builder()
        .status(500)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_else(|e| {
            log_build_error("500", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("Not Found")))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from("Not Found")))
        })
}

/// Build the 200 response serving the fallback page.
pub fn build_html_response(content: Vec<u8>) -> Response<Full<Bytes>> {
    let content_length = content.len();
    Response::builder()
        .status(200)
        .header("Content-Type", "text/html")
        .header("Content-Length", content_length)
        .body(Full::new(Bytes::from(content)))
        .unwrap_or_else(|e| {
            log_build_error("HTML", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build a 200 response for a static asset.
fn build_static_file_response(
    content: Vec<u8>,
    content_type: &'static str,
) -> Response<Full<Bytes>> {
    let content_length = content.len();
    Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .body(Full::new(Bytes::from(content)))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Select the content type for a static asset path.
///
/// The bundled front-end ships scripts and stylesheets only, so anything
/// that is not a script is served as a stylesheet.
pub fn content_type_for(path: &str) -> &'static str {
    if path.ends_with(".js") {
        "text/javascript"
    } else {
        "text/css"
    }
}

/// Serve an asset from the static directory, 404 on any read failure.
pub async fn serve_static(resources: &ResourcesConfig, path: &str) -> Response<Full<Bytes>> {
    match load_static_file(&resources.static_dir, path).await {
        Some(content) => build_static_file_response(content, content_type_for(path)),
        None => build_404_response(),
    }
}

/// Load the fallback page for unmatched routes.
pub async fn load_index(resources: &ResourcesConfig) -> Result<Vec<u8>, GatewayError> {
    Ok(fs::read(&resources.index_file).await?)
}

/// Load a static asset, refusing paths that escape the static directory.
async fn load_static_file(static_dir: &str, path: &str) -> Option<Vec<u8>> {
    // Remove leading slash and prevent directory traversal
    let clean_path = path.trim_start_matches('/').replace("..", "");
    let prefix_clean = STATIC_PREFIX.trim_matches('/');
    let relative_path = clean_path
        .strip_prefix(&format!("{prefix_clean}/"))
        .unwrap_or(&clean_path);

    let file_path = Path::new(static_dir).join(relative_path);

    // Security: ensure file_path is within static_dir
    let static_dir_canonical = match Path::new(static_dir).canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Static directory not found or inaccessible '{static_dir}': {e}"
            ));
            return None;
        }
    };

    // File not found is common (404), no need to log at warning level
    let Ok(file_path_canonical) = file_path.canonicalize() else {
        return None;
    };
    if !file_path_canonical.starts_with(&static_dir_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            path,
            file_path_canonical.display()
        ));
        return None;
    }

    fs::read(&file_path_canonical).await.ok()
}

/// Log response build error
fn log_build_error(kind: &str, error: &hyper::http::Error) {
    logger::log_error(&format!("Failed to build {kind} response: {error}"));
}
