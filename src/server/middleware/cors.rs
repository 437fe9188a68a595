use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};

/// Methods cross-origin callers may use.
pub const ALLOWED_METHODS: [Method; 5] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::PATCH,
];

/// Builds the CORS layer for the API.
///
/// Credentials are always allowed. Browsers reject a literal `*` origin on credentialed
/// requests, so "any origin" is implemented by echoing the request's `Origin` header back.
/// Requested headers are echoed in the same way.
///
/// # Arguments
/// - `allowed_origins` - Explicit origin allow-list, or `None` to accept every origin. A list
///   containing `*` is treated as `None`.
///
/// # Returns
/// - `CorsLayer` - Layer to apply on the top-level router
pub fn cors_layer(allowed_origins: Option<&[String]>) -> CorsLayer {
    let origin = match allowed_origins {
        Some(origins) if !origins.iter().any(|origin| origin == "*") => {
            AllowOrigin::list(parse_origins(origins))
        }
        _ => AllowOrigin::mirror_request(),
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(ALLOWED_METHODS)
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Converts the configured origins to header values, skipping invalid entries.
fn parse_origins(origins: &[String]) -> Vec<HeaderValue> {
    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Ignoring invalid CORS origin '{}': {}", origin, e);
                None
            }
        })
        .collect();

    if parsed.is_empty() {
        tracing::warn!("No valid CORS origin configured, cross-origin requests will be refused");
    }

    parsed
}
