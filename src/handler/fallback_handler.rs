use axum::http::{Method, Uri};
use tracing::debug;

use crate::util::error::{HandlerError, HandlerErrorKind};

/// Any path no router claims.
pub async fn route_not_found_handler(method: Method, uri: Uri) -> HandlerError {
    debug!("[route_not_found_handler] {} {}", method, uri);
    HandlerError::not_found("Route not found", format!("No route for {} {}", method, uri.path()))
}

/// A known path called with a method it does not serve.
pub async fn method_not_allowed_handler(method: Method, uri: Uri) -> HandlerError {
    debug!("[method_not_allowed_handler] {} {}", method, uri);
    HandlerError::new(
        HandlerErrorKind::MethodNotAllowed,
        "Method not allowed",
        format!("{} is not supported on {}", method, uri.path()),
    )
}
