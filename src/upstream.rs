//! Outbound requests to the upstream API.
//!
//! Both operations share one [`reqwest::Client`] and the same response
//! contract: a non-success status or an unparseable body is an error, a
//! success body is relayed as parsed JSON.

use hyper::header::{HeaderValue, AUTHORIZATION};
use hyper::Method;
use serde_json::Value;

use crate::config::AppState;
use crate::error::{GatewayError, GatewayResult};

/// Path of the token endpoint, identical on the gateway and upstream.
pub const TOKEN_ENDPOINT: &str = "/api/v1/oauth/token";

/// Exchange an authorization code for an access token.
///
/// Sends the form-encoded grant request the upstream expects and relays
/// its JSON answer.
pub async fn fetch_access_token(state: &AppState, code: &str) -> GatewayResult<Value> {
    let url = format!("{}{}", state.config.upstream.base_url, TOKEN_ENDPOINT);
    let params = [
        ("code", code),
        ("client_id", state.config.oauth.client_id.as_str()),
        ("client_secret", state.config.oauth.client_secret.as_str()),
        ("grant_type", "authorization_code"),
    ];

    let response = state.http.post(&url).form(&params).send().await?;
    parse_json_response(response).await
}

/// Forward an API call to the upstream at `api_path`.
///
/// The caller's `Authorization` header travels through unmodified when
/// present; the inbound query string and body do not.
pub async fn forward_api_request(
    state: &AppState,
    method: Method,
    api_path: &str,
    authorization: Option<HeaderValue>,
) -> GatewayResult<Value> {
    let url = format!("{}{}", state.config.upstream.base_url, api_path);

    let mut request = state.http.request(method, &url);
    if let Some(value) = authorization {
        request = request.header(AUTHORIZATION, value);
    }

    let response = request.send().await?;
    parse_json_response(response).await
}

/// Shared upstream response contract.
async fn parse_json_response(response: reqwest::Response) -> GatewayResult<Value> {
    if !response.status().is_success() {
        return Err(GatewayError::UpstreamStatus(response.status().as_u16()));
    }
    Ok(response.json().await?)
}
