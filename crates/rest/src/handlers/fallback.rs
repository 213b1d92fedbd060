//! Fallback for unmatched routes.

use axum::http::{Method, Uri};
use tracing::debug;

use crate::error::RestError;

/// Handler for any path or method without a route.
///
/// A known path with an unsupported method gets the same 404 as an unknown
/// path.
pub async fn route_not_found_handler(method: Method, uri: Uri) -> RestError {
    debug!(%method, %uri, "No route matched");
    RestError::RouteNotFound
}
