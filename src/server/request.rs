use crate::params::QueryParams;
use may_minihttp::Request;
use tracing::{debug, info};

/// The parts of an HTTP request the create service looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRequest {
    /// HTTP method (GET, HEAD, ...)
    pub method: String,
    /// Request path without the query string
    pub path: String,
    /// Decoded query parameters, repeats preserved
    pub query: QueryParams,
}

/// Split a raw request target into path and query parameters.
pub fn split_target(raw_path: &str) -> (String, QueryParams) {
    let path = raw_path.split('?').next().unwrap_or("/").to_string();
    (path, QueryParams::parse(raw_path))
}

/// Extract method, path and query from a `may_minihttp::Request`.
pub fn parse_request(req: Request) -> ParsedRequest {
    let method = req.method().to_string();
    let (path, query) = split_target(req.path());
    let header_count = req.headers().len();

    debug!(
        param_count = query.len(),
        query = %query,
        "Query params parsed"
    );
    info!(
        method = %method,
        path = %path,
        headers_count = header_count,
        "HTTP request parsed"
    );

    ParsedRequest {
        method,
        path,
        query,
    }
}
