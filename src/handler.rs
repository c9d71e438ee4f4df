//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: classifies each request into
//! one of four behaviors and writes exactly one response.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::AUTHORIZATION;
use hyper::http::request::Parts;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;
use url::form_urlencoded;

use crate::config::AppState;
use crate::error::{GatewayError, GatewayResult};
use crate::logger;
use crate::response;
use crate::upstream;

/// Route prefix stripped before forwarding to the upstream API.
pub const PROXY_PREFIX: &str = "/api-proxy";

/// Main entry point for HTTP request handling.
///
/// Dispatch errors surface here as a single 500 JSON response, so every
/// request gets exactly one answer.
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    if state.config.logging.access_log {
        logger::log_request(req.method(), req.uri());
    }

    // The inbound body is never read; requests are classified on method,
    // path, query and headers alone.
    let (parts, _body) = req.into_parts();

    let response = match dispatch(&parts, &state).await {
        Ok(response) => response,
        Err(e) => {
            logger::log_error(&format!("{} {}: {e}", parts.method, parts.uri));
            response::build_error_response(&e)
        }
    };

    Ok(response)
}

/// Route the request to one of the four gateway behaviors.
async fn dispatch(parts: &Parts, state: &Arc<AppState>) -> GatewayResult<Response<Full<Bytes>>> {
    let path = parts.uri.path();

    // 1. OAuth token exchange (exact path, POST only)
    if parts.method == Method::POST && path == upstream::TOKEN_ENDPOINT {
        let code = query_param(parts.uri.query(), "code")
            .ok_or(GatewayError::MissingParameter("code"))?;
        let token = upstream::fetch_access_token(state, &code).await?;
        return Ok(response::build_json_response(&token));
    }

    // 2. Authenticated API proxy (any method)
    if let Some(api_path) = path.strip_prefix(PROXY_PREFIX) {
        let authorization = parts.headers.get(AUTHORIZATION).cloned();
        let payload =
            upstream::forward_api_request(state, parts.method.clone(), api_path, authorization)
                .await?;
        return Ok(response::build_json_response(&payload));
    }

    // 3. Static assets
    if path.starts_with(response::STATIC_PREFIX) {
        return Ok(response::serve_static(&state.config.resources, path).await);
    }

    // 4. Fallback: the single-page client
    let html = response::load_index(&state.config.resources).await?;
    Ok(response::build_html_response(html))
}

/// First occurrence of a query parameter, with empty values treated as
/// absent.
fn query_param(query: Option<&str>, name: &str) -> Option<String> {
    form_urlencoded::parse(query?.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}
