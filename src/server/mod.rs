//! HTTP front end on `may_minihttp`.

pub mod http_server;
pub mod request;
pub mod response;
pub mod service;

pub use http_server::{HttpServer, ServerHandle};
pub use request::{parse_request, split_target, ParsedRequest};
pub use service::{health_endpoint, CreateService};
