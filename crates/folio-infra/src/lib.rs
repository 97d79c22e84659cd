//! Folio infrastructure
//!
//! Cross-cutting pieces shared by the API binaries:
//! - telemetry initialization
//! - HTTP middleware (request id, security headers)

pub mod middleware;
pub mod telemetry;

pub use middleware::{
    request_id_middleware, security_headers_middleware, RequestId, REQUEST_ID_HEADER,
};
pub use telemetry::init_telemetry;
